use std::sync::Arc;

use weft_core::ExportedValue;

/// Transforms or wraps values on their way from a part to a consumer
///
/// Implemented for plain closures, so `Arc::new(|value| ...)` is enough for
/// simple cases.
pub trait ExportedValueInterceptor: Send + Sync {
    fn intercept(&self, value: ExportedValue) -> ExportedValue;
}

impl<F> ExportedValueInterceptor for F
where
    F: Fn(ExportedValue) -> ExportedValue + Send + Sync,
{
    fn intercept(&self, value: ExportedValue) -> ExportedValue {
        self(value)
    }
}

/// Chains interceptors - the first added runs first, its output feeding the
/// next
pub struct CompositeValueInterceptor {
    interceptors: Vec<Arc<dyn ExportedValueInterceptor>>,
}
impl CompositeValueInterceptor {
    pub fn new(interceptors: Vec<Arc<dyn ExportedValueInterceptor>>) -> CompositeValueInterceptor {
        CompositeValueInterceptor { interceptors }
    }

    pub fn add_interceptor(mut self, interceptor: Arc<dyn ExportedValueInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }
}
impl ExportedValueInterceptor for CompositeValueInterceptor {
    fn intercept(&self, value: ExportedValue) -> ExportedValue {
        self.interceptors
            .iter()
            .fold(value, |value, interceptor| interceptor.intercept(value))
    }
}
