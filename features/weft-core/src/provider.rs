use std::sync::OnceLock;

use crate::{
    errors::CompositionError,
    part::ImportDefinition,
    types::{ContractKey, ExportedValue, Metadata, MetadataValue},
};

/// Describes a single export: its contract plus attached metadata
#[derive(Debug, Clone, PartialEq)]
pub struct ExportDefinition {
    pub contract: ContractKey,
    pub metadata: Metadata,
}
impl ExportDefinition {
    pub fn new(contract: ContractKey) -> ExportDefinition {
        ExportDefinition {
            contract,
            metadata: Metadata::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

type ProduceFn = dyn Fn() -> Result<ExportedValue, CompositionError> + Send + Sync;

/// An export offered by a provider
///
/// The value is produced on first access and memoized - repeated reads of
/// the same [Export] never invoke the producer twice, and concurrent first
/// reads block until the single production completes.
pub struct Export {
    definition: ExportDefinition,
    produce: Box<ProduceFn>,
    value: OnceLock<Result<ExportedValue, CompositionError>>,
}
impl Export {
    pub fn new(
        definition: ExportDefinition,
        produce: impl Fn() -> Result<ExportedValue, CompositionError> + Send + Sync + 'static,
    ) -> Export {
        Export {
            definition,
            produce: Box::new(produce),
            value: OnceLock::new(),
        }
    }

    pub fn definition(&self) -> &ExportDefinition {
        &self.definition
    }

    /// The exported value, producing it on first access
    pub fn value(&self) -> Result<ExportedValue, CompositionError> {
        self.value.get_or_init(|| (self.produce)()).clone()
    }

    /// Wraps this export so its value is transformed on the way out
    ///
    /// The definition is untouched; only the produced value changes. The
    /// transformation itself is memoized along with the value.
    pub fn map_value(
        self,
        transform: impl Fn(ExportedValue) -> ExportedValue + Send + Sync + 'static,
    ) -> Export {
        let definition = self.definition.clone();
        Export::new(definition, move || self.value().map(&transform))
    }
}
impl std::fmt::Debug for Export {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Export")
            .field("definition", &self.definition)
            .field("produced", &self.value.get().is_some())
            .finish()
    }
}

/// Source of exports, queried with an import constraint
///
/// Returning an empty list is the answer for "nothing matches" - providers
/// never error on unknown contracts.
pub trait ExportProvider: Send + Sync {
    fn exports(&self, import: &ImportDefinition) -> Vec<Export>;
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use super::*;

    fn counting_export(calls: Arc<AtomicUsize>) -> Export {
        Export::new(ExportDefinition::new(ContractKey::of::<u32>()), move || {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(ExportedValue::new(7_u32))
        })
    }

    #[test]
    fn value_is_not_produced_until_read() {
        let calls = Arc::new(AtomicUsize::new(0));
        let export = counting_export(calls.clone());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let value = export.value().unwrap();
        assert_eq!(*value.downcast::<u32>().unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn value_is_produced_at_most_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let export = counting_export(calls.clone());

        for _ in 0..5 {
            export.value().unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn map_value_keeps_definition_and_transforms_value() {
        let export = Export::new(ExportDefinition::new(ContractKey::of::<u32>()), || {
            Ok(ExportedValue::new(10_u32))
        });
        let definition = export.definition().clone();

        let mapped = export.map_value(|value| {
            let inner = value.downcast::<u32>().unwrap();
            ExportedValue::new(*inner * 2)
        });

        assert_eq!(*mapped.definition(), definition);
        assert_eq!(*mapped.value().unwrap().downcast::<u32>().unwrap(), 20);
    }

    #[test]
    fn errors_are_memoized_too() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let export = Export::new(ExportDefinition::new(ContractKey::of::<u32>()), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(CompositionError::ExportMissing {
                contract: ContractKey::of::<u32>(),
            })
        });

        assert!(export.value().is_err());
        assert!(export.value().is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
