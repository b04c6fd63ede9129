use thiserror::Error;

/// Errors when declaring conventions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConventionError {
    /// A convention was declared with an empty contract name
    #[error("The contract name of a default convention must not be empty")]
    EmptyContractName,
}
