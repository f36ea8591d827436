/// Type alias for Result with anyhow::Error as the error type.
/// Typed failures are raised as [`crate::shared::error::TmacError`] and travel inside it.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
