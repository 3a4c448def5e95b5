use crate::error::TutorError;

/// Initialize structured logging with tracing
/// This should be called once by the host application at startup
pub fn init_logging() -> Result<(), TutorError> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .json() // JSON output for structured logging
        );

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| TutorError::new(
            format!("Failed to set global tracing subscriber: {}", e),
            "startup"
        ))?;

    tracing::info!("Structured logging initialized");
    Ok(())
}
