//! Traits for request standardization.

/// Trait for validating request objects.
pub trait Validator {
    /// Validate the state of the object, returning every problem at once.
    fn validate(&self) -> Result<(), String>;
}
