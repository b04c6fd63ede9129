use std::sync::Arc;

use weft_core::{Export, ExportDefinition, ExportProvider, ImportDefinition};

use crate::interceptor::{CompositeValueInterceptor, ExportedValueInterceptor};

type CriteriaPredicate = dyn Fn(&ExportDefinition) -> bool + Send + Sync;

/// An interceptor gated on a predicate over the export definition
pub struct InterceptionCriteria {
    predicate: Arc<CriteriaPredicate>,
    interceptor: Arc<dyn ExportedValueInterceptor>,
}
impl InterceptionCriteria {
    pub fn new(
        predicate: impl Fn(&ExportDefinition) -> bool + Send + Sync + 'static,
        interceptor: Arc<dyn ExportedValueInterceptor>,
    ) -> InterceptionCriteria {
        InterceptionCriteria {
            predicate: Arc::new(predicate),
            interceptor,
        }
    }

    fn applies_to(&self, definition: &ExportDefinition) -> bool {
        (self.predicate)(definition)
    }
}

/// Collects the interceptors an [InterceptingExportProvider] applies
///
/// Unconditional interceptors run for every export; criteria only for
/// exports their predicate accepts. Within one export, interceptors run in
/// the order they were added, unconditional ones first.
#[derive(Default)]
pub struct InterceptionConfiguration {
    interceptors: Vec<Arc<dyn ExportedValueInterceptor>>,
    criteria: Vec<InterceptionCriteria>,
}
impl InterceptionConfiguration {
    pub fn new() -> InterceptionConfiguration {
        InterceptionConfiguration::default()
    }

    pub fn add_interceptor(mut self, interceptor: Arc<dyn ExportedValueInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    pub fn add_criteria(mut self, criteria: InterceptionCriteria) -> Self {
        self.criteria.push(criteria);
        self
    }

    /// The interceptor chain applying to one export definition, if any
    fn interceptor_for(
        &self,
        definition: &ExportDefinition,
    ) -> Option<Arc<dyn ExportedValueInterceptor>> {
        let mut applicable: Vec<_> = self.interceptors.clone();
        applicable.extend(
            self.criteria
                .iter()
                .filter(|criteria| criteria.applies_to(definition))
                .map(|criteria| criteria.interceptor.clone()),
        );

        match applicable.len() {
            0 => None,
            1 => applicable.pop(),
            _ => Some(Arc::new(CompositeValueInterceptor::new(applicable))),
        }
    }
}

/// Decorates an export provider so every export it answers with has its
/// value routed through the configured interceptors
///
/// Export definitions are passed through untouched; exports no interceptor
/// applies to are returned as-is.
pub struct InterceptingExportProvider {
    inner: Arc<dyn ExportProvider>,
    configuration: InterceptionConfiguration,
}
impl InterceptingExportProvider {
    pub fn new(
        inner: Arc<dyn ExportProvider>,
        configuration: InterceptionConfiguration,
    ) -> InterceptingExportProvider {
        InterceptingExportProvider {
            inner,
            configuration,
        }
    }
}
impl ExportProvider for InterceptingExportProvider {
    fn exports(&self, import: &ImportDefinition) -> Vec<Export> {
        self.inner
            .exports(import)
            .into_iter()
            .map(|export| match self.configuration.interceptor_for(export.definition()) {
                Some(interceptor) => {
                    tracing::debug!("Intercepting export for '{}'", export.definition().contract);
                    export.map_value(move |value| interceptor.intercept(value))
                }
                None => export,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use weft_core::{CompositionError, ContractKey, ExportedValue};

    use super::*;

    struct FixedProvider;
    impl ExportProvider for FixedProvider {
        fn exports(&self, import: &ImportDefinition) -> Vec<Export> {
            let tagged = ImportDefinition::named::<String>("tagged");
            if import.is_satisfied_by(&ContractKey::of::<String>()) {
                vec![Export::new(
                    ExportDefinition::new(ContractKey::of::<String>()),
                    || Ok(ExportedValue::new(String::from("plain"))),
                )]
            } else if *import == tagged {
                vec![Export::new(
                    ExportDefinition::new(ContractKey::named::<String>("tagged")),
                    || Ok(ExportedValue::new(String::from("tagged"))),
                )]
            } else {
                Vec::new()
            }
        }
    }

    fn suffixing(suffix: &'static str) -> Arc<dyn ExportedValueInterceptor> {
        Arc::new(move |value: ExportedValue| {
            let text = value.downcast::<String>().unwrap();
            ExportedValue::new(format!("{text}{suffix}"))
        })
    }

    fn read(provider: &dyn ExportProvider, import: &ImportDefinition) -> String {
        let export = provider.exports(import).pop().unwrap();
        export
            .value()
            .unwrap()
            .downcast::<String>()
            .unwrap()
            .as_ref()
            .clone()
    }

    #[test]
    fn unconditional_interceptor_touches_every_export() {
        let provider = InterceptingExportProvider::new(
            Arc::new(FixedProvider),
            InterceptionConfiguration::new().add_interceptor(suffixing(".seen")),
        );

        assert_eq!(read(&provider, &ImportDefinition::of::<String>()), "plain.seen");
        assert_eq!(
            read(&provider, &ImportDefinition::named::<String>("tagged")),
            "tagged.seen"
        );
    }

    #[test]
    fn criteria_only_touch_matching_exports() {
        let provider = InterceptingExportProvider::new(
            Arc::new(FixedProvider),
            InterceptionConfiguration::new().add_criteria(InterceptionCriteria::new(
                |definition| definition.contract.name.as_deref() == Some("tagged"),
                suffixing(".audited"),
            )),
        );

        assert_eq!(read(&provider, &ImportDefinition::of::<String>()), "plain");
        assert_eq!(
            read(&provider, &ImportDefinition::named::<String>("tagged")),
            "tagged.audited"
        );
    }

    #[test]
    fn unconditional_interceptors_run_before_criteria() {
        let provider = InterceptingExportProvider::new(
            Arc::new(FixedProvider),
            InterceptionConfiguration::new()
                .add_interceptor(suffixing(".first"))
                .add_criteria(InterceptionCriteria::new(|_| true, suffixing(".second"))),
        );

        assert_eq!(
            read(&provider, &ImportDefinition::of::<String>()),
            "plain.first.second"
        );
    }

    #[test]
    fn definitions_are_not_rewritten() {
        let provider = InterceptingExportProvider::new(
            Arc::new(FixedProvider),
            InterceptionConfiguration::new().add_interceptor(suffixing(".seen")),
        );

        let export = provider.exports(&ImportDefinition::of::<String>()).pop().unwrap();
        assert_eq!(export.definition().contract, ContractKey::of::<String>());
    }

    #[test]
    fn provider_errors_pass_through() {
        struct FailingProvider;
        impl ExportProvider for FailingProvider {
            fn exports(&self, _import: &ImportDefinition) -> Vec<Export> {
                vec![Export::new(
                    ExportDefinition::new(ContractKey::of::<String>()),
                    || {
                        Err(CompositionError::DefaultFactoryMissing {
                            contract: ContractKey::of::<String>(),
                        })
                    },
                )]
            }
        }

        let provider = InterceptingExportProvider::new(
            Arc::new(FailingProvider),
            InterceptionConfiguration::new().add_interceptor(suffixing(".seen")),
        );

        let export = provider.exports(&ImportDefinition::of::<String>()).pop().unwrap();
        assert!(matches!(
            export.value(),
            Err(CompositionError::DefaultFactoryMissing { .. })
        ));
    }
}
