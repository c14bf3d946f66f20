use thiserror::Error;

/// Configuration problems detected while validating variable names at load time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VariableError {
    #[error("cycle variable '{name}' has non-numeric segment '{segment}'")]
    MalformedCycle { name: String, segment: String },
    #[error("cycle variable '{name}' needs at least an off and an on segment")]
    CycleTooShort { name: String },
    #[error("cycle variable '{name}' has a total length of zero ticks")]
    EmptyCycle { name: String },
    #[error("variable name is empty")]
    EmptyName,
}
