//! Weft Intercept places an interceptor between a composed part and its
//! consumers: every value the part produces is handed to the interceptor
//! before delivery, while the part's export/import definitions, metadata and
//! disposal semantics stay exactly as the wrapped part reports them.
//!
//! # Example
//! ```rust
//! use std::sync::Arc;
//! use weft_core::ExportedValue;
//! use weft_intercept::ExportedValueInterceptor;
//!
//! let logging: Arc<dyn ExportedValueInterceptor> = Arc::new(|value: ExportedValue| {
//!     println!("produced {:?}", value.info());
//!     value
//! });
//! ```
//!
//! Weft Intercept consists of the following components:
//!
//! 1. Interceptor - the interceptor trait and interceptor chaining
//! 2. Part - intercepting wrappers around composed parts, with and without
//!    disposal responsibility
//! 3. Provider - interception configuration and the intercepting export
//!    provider decorator

pub mod interceptor;
pub mod part;
pub mod provider;

pub use interceptor::{CompositeValueInterceptor, ExportedValueInterceptor};
pub use part::{intercept_part, DisposableInterceptingPart, InterceptingPart};
pub use provider::{InterceptingExportProvider, InterceptionConfiguration, InterceptionCriteria};
