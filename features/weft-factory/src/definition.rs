use std::sync::Arc;

use weft_core::{CompositionError, ContractKey, DynError, ExportProvider, ExportedValue};

use crate::singleton::SingletonCell;

/// Factory invoked with the provider's resolver to produce one export value
pub(crate) type SharedExportFactory =
    Arc<dyn Fn(&dyn ExportProvider) -> Result<ExportedValue, DynError> + Send + Sync>;

/// Fallback factory for registrations made without their own factory
pub(crate) type DefaultExportFactory =
    dyn Fn(&ContractKey, &dyn ExportProvider) -> Result<ExportedValue, DynError> + Send + Sync;

#[derive(Clone)]
pub(crate) enum Producer {
    /// Invoked on every resolution
    Factory(SharedExportFactory),
    /// Invoked once, value shared afterwards
    Singleton(Arc<SingletonCell>),
    /// Deferred to the provider's default factory strategy
    Default,
}

/// One registration held by the factory export provider
///
/// At most one definition exists per contract key; duplicates are dropped
/// at registration time.
#[derive(Clone)]
pub struct FactoryExportDefinition {
    contract: ContractKey,
    producer: Producer,
}
impl FactoryExportDefinition {
    pub(crate) fn new(contract: ContractKey, producer: Producer) -> FactoryExportDefinition {
        FactoryExportDefinition { contract, producer }
    }

    pub fn contract(&self) -> &ContractKey {
        &self.contract
    }

    /// Whether repeated resolution of this definition returns one shared instance
    pub fn is_singleton(&self) -> bool {
        matches!(self.producer, Producer::Singleton(_))
    }

    pub(crate) fn produce(
        &self,
        resolver: &dyn ExportProvider,
        default_factory: Option<&Arc<DefaultExportFactory>>,
    ) -> Result<ExportedValue, CompositionError> {
        match &self.producer {
            Producer::Factory(factory) => {
                tracing::debug!("Producing value for '{}'", self.contract);
                factory(resolver).map_err(|error| CompositionError::FactoryFailed {
                    contract: self.contract.clone(),
                    error: Arc::new(error),
                })
            }
            Producer::Singleton(cell) => cell.resolve(&self.contract, resolver),
            Producer::Default => match default_factory {
                Some(factory) => {
                    tracing::debug!("Producing value for '{}' via default factory", self.contract);
                    factory(&self.contract, resolver).map_err(|error| {
                        CompositionError::FactoryFailed {
                            contract: self.contract.clone(),
                            error: Arc::new(error),
                        }
                    })
                }
                None => Err(CompositionError::DefaultFactoryMissing {
                    contract: self.contract.clone(),
                }),
            },
        }
    }
}
impl std::fmt::Debug for FactoryExportDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let producer = match &self.producer {
            Producer::Factory(_) => "factory",
            Producer::Singleton(_) => "singleton",
            Producer::Default => "default",
        };
        f.debug_struct("FactoryExportDefinition")
            .field("contract", &self.contract)
            .field("producer", &producer)
            .finish()
    }
}
