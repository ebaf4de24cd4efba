/// Errors surfaced by the reporter at construction time.
///
/// Transport-level failures are never surfaced here; they are logged and the
/// affected entries retried on the next sync interval.
#[derive(Debug, thiserror::Error)]
pub enum ReporterError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
