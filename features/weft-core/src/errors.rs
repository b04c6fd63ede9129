use std::sync::Arc;

use thiserror::Error;

use crate::types::{ContractKey, DynError};

/// Errors surfaced while producing exported values
///
/// Clonable so memoized exports can hand the same failure to every reader.
#[derive(Error, Debug, Clone)]
pub enum CompositionError {
    /// A registration relied on the default factory, but none was configured
    #[error("No default factory configured - cannot produce '{contract}'")]
    DefaultFactoryMissing { contract: ContractKey },

    /// A factory failed while producing its value
    #[error("Factory for '{contract}' failed - error: {error:?}")]
    FactoryFailed {
        contract: ContractKey,
        error: Arc<DynError>,
    },

    /// A part was asked for an export it does not declare
    #[error("The part declares no export for '{contract}'")]
    ExportMissing { contract: ContractKey },

    #[error("Failed to downcast, required: '{required_type}' actual: '{actual_type}'")]
    DowncastFailed {
        required_type: &'static str,
        actual_type: &'static str,
    },
}
