/// Implemented by every config section that can be rejected on load.
///
/// Implementations should report all violations they find in one message
/// rather than stopping at the first one.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
