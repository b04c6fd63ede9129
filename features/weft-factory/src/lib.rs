//! Weft Factory provides exports out of registered factory functions
//! instead of discovered parts.
//!
//! Registrations map a (type, optional name) contract to a factory; queries
//! through the [weft_core::ExportProvider] seam answer with lazy exports.
//! Instance registrations are memoized behind a [SingletonCell] so every
//! resolution shares one value.
//!
//! # Example
//! ```rust
//! use weft_core::{ExportProvider, ImportDefinition};
//! use weft_factory::FactoryExportProvider;
//!
//! struct Clock;
//!
//! let provider = FactoryExportProvider::new();
//! provider.register_instance::<Clock, _>(|_resolver| Ok(Clock));
//!
//! let exports = provider.exports(&ImportDefinition::of::<Clock>());
//! assert_eq!(exports.len(), 1);
//! ```
//!
//! Weft Factory consists of the following components:
//!
//! 1. Provider - the factory export provider and its registration surface
//! 2. Definition - stored registrations and their producers
//! 3. Singleton - the memoized factory cell

pub mod definition;
pub mod provider;
pub mod singleton;

pub use definition::FactoryExportDefinition;
pub use provider::FactoryExportProvider;
pub use singleton::SingletonCell;
