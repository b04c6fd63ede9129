use std::sync::{Arc, OnceLock};

use weft_core::{CompositionError, ContractKey, DynError, ExportProvider, ExportedValue};

pub(crate) type BoxedExportFactory =
    Box<dyn Fn(&dyn ExportProvider) -> Result<ExportedValue, DynError> + Send + Sync>;

/// A factory whose first produced value is kept for every later resolution
///
/// Only one thread ever invokes the factory: concurrent first resolutions
/// block until the single creation completes, then observe the cached
/// result. Failures are cached the same way.
pub struct SingletonCell {
    factory: BoxedExportFactory,
    value: OnceLock<Result<ExportedValue, CompositionError>>,
}
impl SingletonCell {
    pub fn new(
        factory: impl Fn(&dyn ExportProvider) -> Result<ExportedValue, DynError> + Send + Sync + 'static,
    ) -> SingletonCell {
        SingletonCell {
            factory: Box::new(factory),
            value: OnceLock::new(),
        }
    }

    /// The memoized value, invoking the factory on first resolution
    pub fn resolve(
        &self,
        contract: &ContractKey,
        resolver: &dyn ExportProvider,
    ) -> Result<ExportedValue, CompositionError> {
        self.value
            .get_or_init(|| {
                tracing::debug!("Creating singleton instance for '{contract}'");
                (self.factory)(resolver).map_err(|error| CompositionError::FactoryFailed {
                    contract: contract.clone(),
                    error: Arc::new(error),
                })
            })
            .clone()
    }

    pub fn is_created(&self) -> bool {
        self.value.get().is_some()
    }
}
impl std::fmt::Debug for SingletonCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingletonCell")
            .field("created", &self.is_created())
            .finish()
    }
}
