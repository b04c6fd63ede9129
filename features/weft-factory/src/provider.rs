use std::sync::{Arc, RwLock};

use weft_core::{
    ContractKey, DynError, Export, ExportDefinition, Exportable, ExportProvider, ExportedValue,
    ImportDefinition,
};

use crate::{
    definition::{DefaultExportFactory, FactoryExportDefinition, Producer},
    singleton::SingletonCell,
};

/// Export provider backed by registered factory functions
///
/// Registrations map a contract key to a factory; queries answer with lazy
/// exports whose values are produced by those factories. Registering the
/// same contract key twice is a no-op, keeping resolution unambiguous no
/// matter how often a configuration layer runs.
///
/// Factories receive a resolver to satisfy their own dependencies: the
/// source provider if one was designated, otherwise this provider itself.
#[derive(Clone)]
pub struct FactoryExportProvider {
    inner: Arc<ProviderInner>,
}

struct ProviderInner {
    definitions: RwLock<Vec<FactoryExportDefinition>>,
    default_factory: Option<Arc<DefaultExportFactory>>,
    source: RwLock<Option<Arc<dyn ExportProvider>>>,
}

impl Default for FactoryExportProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FactoryExportProvider {
    /// Provider without a default factory - registrations made without a
    /// factory fail on resolution
    pub fn new() -> FactoryExportProvider {
        Self::build(None)
    }

    /// Provider with a default factory strategy backing all registrations
    /// made without their own factory
    pub fn with_default_factory(
        factory: impl Fn(&ContractKey, &dyn ExportProvider) -> Result<ExportedValue, DynError>
            + Send
            + Sync
            + 'static,
    ) -> FactoryExportProvider {
        Self::build(Some(Arc::new(factory)))
    }

    fn build(default_factory: Option<Arc<DefaultExportFactory>>) -> FactoryExportProvider {
        FactoryExportProvider {
            inner: Arc::new(ProviderInner {
                definitions: RwLock::new(Vec::new()),
                default_factory,
                source: RwLock::new(None),
            }),
        }
    }

    /// Designates the resolver handed to factories for their own
    /// dependencies. Without one, factories resolve against this provider.
    pub fn set_source_provider(&self, source: Arc<dyn ExportProvider>) {
        *self.inner.source.write().unwrap() = Some(source);
    }

    /// Registers a factory for `T`
    pub fn register<T, F>(&self, factory: F) -> &Self
    where
        T: Exportable,
        F: Fn(&dyn ExportProvider) -> Result<T, DynError> + Send + Sync + 'static,
    {
        self.add(ContractKey::of::<T>(), Producer::Factory(erase(factory)))
    }

    /// Registers a factory for `T` under a registration name
    pub fn register_named<T, F>(&self, name: impl Into<String>, factory: F) -> &Self
    where
        T: Exportable,
        F: Fn(&dyn ExportProvider) -> Result<T, DynError> + Send + Sync + 'static,
    {
        self.add(ContractKey::named::<T>(name), Producer::Factory(erase(factory)))
    }

    /// Registers `T` against the provider's default factory
    pub fn register_default<T: Exportable>(&self) -> &Self {
        self.add(ContractKey::of::<T>(), Producer::Default)
    }

    /// Registers `T` under a registration name against the default factory
    pub fn register_default_named<T: Exportable>(&self, name: impl Into<String>) -> &Self {
        self.add(ContractKey::named::<T>(name), Producer::Default)
    }

    /// Registers a factory for `T` whose first value is shared by every
    /// later resolution
    pub fn register_instance<T, F>(&self, factory: F) -> &Self
    where
        T: Exportable,
        F: Fn(&dyn ExportProvider) -> Result<T, DynError> + Send + Sync + 'static,
    {
        self.add(
            ContractKey::of::<T>(),
            Producer::Singleton(Arc::new(SingletonCell::new(erase_fn(factory)))),
        )
    }

    /// Named variant of [FactoryExportProvider::register_instance]
    pub fn register_instance_named<T, F>(&self, name: impl Into<String>, factory: F) -> &Self
    where
        T: Exportable,
        F: Fn(&dyn ExportProvider) -> Result<T, DynError> + Send + Sync + 'static,
    {
        self.add(
            ContractKey::named::<T>(name),
            Producer::Singleton(Arc::new(SingletonCell::new(erase_fn(factory)))),
        )
    }

    /// Snapshot of the current registrations
    pub fn definitions(&self) -> Vec<FactoryExportDefinition> {
        self.inner.definitions.read().unwrap().clone()
    }

    fn add(&self, contract: ContractKey, producer: Producer) -> &Self {
        let mut definitions = self.inner.definitions.write().unwrap();

        // Same (type, name) already registered - drop silently to keep
        // downstream resolution unambiguous
        if definitions
            .iter()
            .any(|definition| definition.contract() == &contract)
        {
            tracing::debug!("Ignoring duplicate registration for '{contract}'");
            return self;
        }

        tracing::debug!("Registered factory export for '{contract}'");
        definitions.push(FactoryExportDefinition::new(contract, producer));
        self
    }

    fn produce(
        &self,
        definition: &FactoryExportDefinition,
    ) -> Result<ExportedValue, weft_core::CompositionError> {
        let source = self.inner.source.read().unwrap().clone();
        let default_factory = self.inner.default_factory.as_ref();
        match &source {
            Some(resolver) => definition.produce(resolver.as_ref(), default_factory),
            None => definition.produce(self, default_factory),
        }
    }
}

impl ExportProvider for FactoryExportProvider {
    fn exports(&self, import: &ImportDefinition) -> Vec<Export> {
        let definitions = self.inner.definitions.read().unwrap();

        definitions
            .iter()
            .filter(|definition| import.is_satisfied_by(definition.contract()))
            .map(|definition| {
                let definition = definition.clone();
                let provider = self.clone();
                Export::new(
                    ExportDefinition::new(definition.contract().clone()),
                    move || provider.produce(&definition),
                )
            })
            .collect()
    }
}

fn erase<T, F>(factory: F) -> crate::definition::SharedExportFactory
where
    T: Exportable,
    F: Fn(&dyn ExportProvider) -> Result<T, DynError> + Send + Sync + 'static,
{
    Arc::new(erase_fn(factory))
}

fn erase_fn<T, F>(
    factory: F,
) -> impl Fn(&dyn ExportProvider) -> Result<ExportedValue, DynError> + Send + Sync + 'static
where
    T: Exportable,
    F: Fn(&dyn ExportProvider) -> Result<T, DynError> + Send + Sync + 'static,
{
    move |resolver| factory(resolver).map(ExportedValue::new)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use weft_core::CompositionError;

    use super::*;

    #[derive(Debug, PartialEq)]
    struct Endpoint {
        address: String,
    }

    struct Port(u16);

    fn single_export(provider: &FactoryExportProvider, import: &ImportDefinition) -> Export {
        let mut exports = provider.exports(import);
        assert_eq!(exports.len(), 1);
        exports.remove(0)
    }

    #[test]
    fn duplicate_registration_is_ignored() {
        let provider = FactoryExportProvider::new();
        provider
            .register::<Endpoint, _>(|_| {
                Ok(Endpoint {
                    address: "first".into(),
                })
            })
            .register::<Endpoint, _>(|_| {
                Ok(Endpoint {
                    address: "second".into(),
                })
            });

        assert_eq!(provider.definitions().len(), 1);

        let export = single_export(&provider, &ImportDefinition::of::<Endpoint>());
        let value = export.value().unwrap().downcast::<Endpoint>().unwrap();
        assert_eq!(value.address, "first");
    }

    #[test]
    fn same_type_under_different_names_are_distinct() {
        let provider = FactoryExportProvider::new();
        provider
            .register::<Port, _>(|_| Ok(Port(80)))
            .register_named::<Port, _>("admin", |_| Ok(Port(8081)));

        assert_eq!(provider.definitions().len(), 2);

        let admin = single_export(&provider, &ImportDefinition::named::<Port>("admin"));
        assert_eq!(admin.value().unwrap().downcast::<Port>().unwrap().0, 8081);
    }

    #[test]
    fn unmatched_import_yields_no_exports() {
        let provider = FactoryExportProvider::new();
        provider.register::<Port, _>(|_| Ok(Port(80)));

        assert!(provider.exports(&ImportDefinition::of::<Endpoint>()).is_empty());
        assert!(provider
            .exports(&ImportDefinition::named::<Port>("admin"))
            .is_empty());
    }

    #[test]
    fn factory_runs_lazily_per_export() {
        let invocations = Arc::new(AtomicUsize::new(0));
        let counter = invocations.clone();

        let provider = FactoryExportProvider::new();
        provider.register::<Port, _>(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Port(80))
        });

        let import = ImportDefinition::of::<Port>();
        let first = single_export(&provider, &import);
        let second = single_export(&provider, &import);
        assert_eq!(invocations.load(Ordering::SeqCst), 0);

        first.value().unwrap();
        first.value().unwrap();
        second.value().unwrap();
        assert_eq!(invocations.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn instance_registration_shares_one_value() {
        let invocations = Arc::new(AtomicUsize::new(0));
        let counter = invocations.clone();

        let provider = FactoryExportProvider::new();
        provider.register_instance::<Endpoint, _>(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Endpoint {
                address: "singleton".into(),
            })
        });

        assert!(provider.definitions()[0].is_singleton());

        let import = ImportDefinition::of::<Endpoint>();
        let first = single_export(&provider, &import)
            .value()
            .unwrap()
            .downcast::<Endpoint>()
            .unwrap();
        let second = single_export(&provider, &import)
            .value()
            .unwrap()
            .downcast::<Endpoint>()
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(invocations.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn default_registration_without_strategy_fails() {
        let provider = FactoryExportProvider::new();
        provider.register_default::<Port>();

        let export = single_export(&provider, &ImportDefinition::of::<Port>());
        match export.value().unwrap_err() {
            CompositionError::DefaultFactoryMissing { contract } => {
                assert_eq!(contract, ContractKey::of::<Port>());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn default_registration_uses_configured_strategy() {
        let provider = FactoryExportProvider::with_default_factory(|contract, _| {
            assert_eq!(*contract, ContractKey::of::<Port>());
            Ok(ExportedValue::new(Port(4000)))
        });
        provider.register_default::<Port>();

        let export = single_export(&provider, &ImportDefinition::of::<Port>());
        assert_eq!(export.value().unwrap().downcast::<Port>().unwrap().0, 4000);
    }

    #[test]
    fn factories_resolve_dependencies_through_the_provider() {
        let provider = FactoryExportProvider::new();
        provider
            .register::<Port, _>(|_| Ok(Port(443)))
            .register::<Endpoint, _>(|resolver| {
                let port_export = resolver
                    .exports(&ImportDefinition::of::<Port>())
                    .pop()
                    .ok_or("port not registered")?;
                let port = port_export.value()?.downcast::<Port>()?;
                Ok(Endpoint {
                    address: format!("localhost:{}", port.0),
                })
            });

        let export = single_export(&provider, &ImportDefinition::of::<Endpoint>());
        let endpoint = export.value().unwrap().downcast::<Endpoint>().unwrap();
        assert_eq!(endpoint.address, "localhost:443");
    }

    #[test]
    fn designated_source_provider_feeds_factories() {
        let upstream = FactoryExportProvider::new();
        upstream.register::<Port, _>(|_| Ok(Port(9000)));

        let provider = FactoryExportProvider::new();
        provider.set_source_provider(Arc::new(upstream));
        provider.register::<Endpoint, _>(|resolver| {
            let port = resolver
                .exports(&ImportDefinition::of::<Port>())
                .pop()
                .ok_or("port not registered")?
                .value()?
                .downcast::<Port>()?;
            Ok(Endpoint {
                address: format!("upstream:{}", port.0),
            })
        });

        let export = single_export(&provider, &ImportDefinition::of::<Endpoint>());
        let endpoint = export.value().unwrap().downcast::<Endpoint>().unwrap();
        assert_eq!(endpoint.address, "upstream:9000");
    }
}
