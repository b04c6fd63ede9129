use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use weft_core::{
    ComposablePart, CompositionError, ExportDefinition, ExportedValue, ImportDefinition, Metadata,
};

use crate::interceptor::ExportedValueInterceptor;

/// Wraps a part so every exported value passes through an interceptor,
/// picking the wrapper variant from the part's disposal requirement
///
/// A part that requires no disposal gets a wrapper that requires none
/// either - the disposal metadata teardown logic reads must stay exactly
/// the wrapped part's. A part that does require disposal gets a wrapper
/// forwarding disposal exactly once.
pub fn intercept_part(
    part: Box<dyn ComposablePart>,
    interceptor: Arc<dyn ExportedValueInterceptor>,
) -> Box<dyn ComposablePart> {
    if part.requires_disposal() {
        Box::new(DisposableInterceptingPart::new(part, interceptor))
    } else {
        Box::new(InterceptingPart::new(part, interceptor))
    }
}

/// Intercepting wrapper for parts without disposal responsibility
///
/// Export/import definitions and metadata are reported straight from the
/// wrapped part - no re-derivation, no extra caching.
pub struct InterceptingPart {
    inner: Box<dyn ComposablePart>,
    interceptor: Arc<dyn ExportedValueInterceptor>,
}
impl InterceptingPart {
    pub fn new(
        inner: Box<dyn ComposablePart>,
        interceptor: Arc<dyn ExportedValueInterceptor>,
    ) -> InterceptingPart {
        InterceptingPart { inner, interceptor }
    }
}
impl ComposablePart for InterceptingPart {
    fn export_definitions(&self) -> &[ExportDefinition] {
        self.inner.export_definitions()
    }

    fn import_definitions(&self) -> &[ImportDefinition] {
        self.inner.import_definitions()
    }

    fn metadata(&self) -> &Metadata {
        self.inner.metadata()
    }

    fn exported_value(
        &self,
        export: &ExportDefinition,
    ) -> Result<ExportedValue, CompositionError> {
        let value = self.inner.exported_value(export)?;
        tracing::debug!("Intercepting value for '{}'", export.contract);
        Ok(self.interceptor.intercept(value))
    }

    // requires_disposal / dispose stay at their defaults: the wrapped part
    // needs no cleanup, so this wrapper must not report any
}
impl std::fmt::Display for InterceptingPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

/// Intercepting wrapper for parts that must be disposed at teardown
///
/// Disposal is forwarded to the wrapped part exactly once, no matter how
/// often or from how many threads `dispose` is called.
pub struct DisposableInterceptingPart {
    inner: InterceptingPart,
    disposed: AtomicBool,
}
impl DisposableInterceptingPart {
    pub fn new(
        inner: Box<dyn ComposablePart>,
        interceptor: Arc<dyn ExportedValueInterceptor>,
    ) -> DisposableInterceptingPart {
        DisposableInterceptingPart {
            inner: InterceptingPart::new(inner, interceptor),
            disposed: AtomicBool::new(false),
        }
    }
}
impl ComposablePart for DisposableInterceptingPart {
    fn export_definitions(&self) -> &[ExportDefinition] {
        self.inner.export_definitions()
    }

    fn import_definitions(&self) -> &[ImportDefinition] {
        self.inner.import_definitions()
    }

    fn metadata(&self) -> &Metadata {
        self.inner.metadata()
    }

    fn exported_value(
        &self,
        export: &ExportDefinition,
    ) -> Result<ExportedValue, CompositionError> {
        self.inner.exported_value(export)
    }

    fn requires_disposal(&self) -> bool {
        true
    }

    fn dispose(&self) {
        if self
            .disposed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            tracing::debug!("Disposing intercepted part '{}'", self.inner.inner);
            self.inner.inner.dispose();
        }
    }
}
impl std::fmt::Display for DisposableInterceptingPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}
