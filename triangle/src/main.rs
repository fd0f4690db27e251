use backend;
use backend::config::WindowConfig;
use backend::errors::SystemError;
use backend::logging::{init_logging, LoggingConfig};
use backend::render::RenderContext;
use backend::system::System;

fn run(config: &WindowConfig) -> Result<(), SystemError> {
    let mut system = System::new(config)?;
    // dropped before `system`, while the context is still alive
    let renderer = RenderContext::new(config.clear_color).with_triangle();

    while system.process_io_events() {
        renderer.render_frame(&system);
        system.draw_to_screen();
    }
    Ok(())
}

fn main() {
    init_logging(LoggingConfig::default());

    let config = WindowConfig::default();
    if let Err(e) = run(&config) {
        log::debug!("startup aborted: {e:?}");
        eprintln!("initialization failure: {e}");
        std::process::exit(e.exit_code());
    }
}
