use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    /// The id is outside the population this generator was sized for.
    /// Valid ids are `1..=patient_count`.
    #[error("Unknown patient id: {0}")]
    UnknownPatient(u32),
}
