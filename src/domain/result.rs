//! Result type alias for MedTrack

use super::errors::ClinicError;

/// Result type alias for MedTrack operations
///
/// # Examples
///
/// ```
/// use medtrack::domain::result::Result;
/// use medtrack::domain::errors::ClinicError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(ClinicError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ClinicError>;
