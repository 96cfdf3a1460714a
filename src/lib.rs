pub mod audio;
pub mod canvas;
pub mod cli;
pub mod error;
pub mod frontend;
pub mod models;
pub mod settings;
pub mod store;
pub mod timer;
mod utils;

pub use canvas::Canvas;
pub use error::{PersistenceError, SessionError};
pub use models::SessionRecord;
pub use store::SessionStore;
pub use timer::{SessionController, SessionFrontend, SoundEvent, TickScheduler};

pub fn run() -> anyhow::Result<()> {
    // Warnings only by default so log lines do not tear the canvas; RUST_LOG overrides.
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    log::info!("Kamvas starting up...");

    cli::run_cli()
}
