use std::fmt::Display;

use crate::{
    errors::CompositionError,
    provider::ExportDefinition,
    types::{ContractKey, ExportedValue, Metadata},
};

/// A constraint a consumer places on the exports it wants
///
/// An export satisfies the import when its contract key is equal to the
/// import's contract key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDefinition {
    pub contract: ContractKey,
}
impl ImportDefinition {
    pub fn of<T: 'static + ?Sized>() -> ImportDefinition {
        ImportDefinition {
            contract: ContractKey::of::<T>(),
        }
    }

    pub fn named<T: 'static + ?Sized>(name: impl Into<String>) -> ImportDefinition {
        ImportDefinition {
            contract: ContractKey::named::<T>(name),
        }
    }

    pub fn is_satisfied_by(&self, contract: &ContractKey) -> bool {
        self.contract == *contract
    }
}

/// A unit of composition: declares what it exports and imports, and produces
/// values for its exports on request.
///
/// `requires_disposal` is part of the composition metadata: teardown logic
/// calls [ComposablePart::dispose] only on parts reporting `true`. A part
/// that reports `false` must leave `dispose` untouched.
///
/// [Display] is used for diagnostics.
pub trait ComposablePart: Display + Send + Sync {
    /// The exports this part offers
    fn export_definitions(&self) -> &[ExportDefinition];

    /// The imports this part needs satisfied
    fn import_definitions(&self) -> &[ImportDefinition];

    /// Part level metadata
    fn metadata(&self) -> &Metadata;

    /// Produce the value for one of this part's export definitions
    ///
    /// Returns [CompositionError::ExportMissing] if the definition is not
    /// one of [ComposablePart::export_definitions].
    fn exported_value(
        &self,
        export: &ExportDefinition,
    ) -> Result<ExportedValue, CompositionError>;

    /// Whether teardown must call [ComposablePart::dispose] on this part
    fn requires_disposal(&self) -> bool {
        false
    }

    /// Release the part's resources. Called at most once by teardown, and
    /// only when [ComposablePart::requires_disposal] is true.
    fn dispose(&self) {}
}
