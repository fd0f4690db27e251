use std::process::Command;

#[test]
fn exits_with_one_when_video_init_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_triangle"))
        .env("SDL_VIDEODRIVER", "no_such_driver")
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to launch the triangle binary");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("initialization failure: library init failed"),
        "stderr was: {stderr}"
    );
}
