use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::util::paths;

pub fn initialize_logging() -> color_eyre::Result<()> {
    let directory = paths::data_dir()?.join("logs");
    std::fs::create_dir_all(&directory)?;
    let log_file = std::fs::File::create(directory.join("spinpod.log"))?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
