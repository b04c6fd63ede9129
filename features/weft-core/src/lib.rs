//! Weft Core renders the extension point surface of the composition
//! framework that the other weft crates decorate: contract identity,
//! exported values, export/import definitions, lazily produced exports, and
//! the two seams everything plugs into - [ExportProvider] and
//! [ComposablePart].
//!
//! Weft Core consists of the following components:
//!
//! 1. Types - canonical type identity, contract keys, exported values and metadata
//! 2. Part - the composable part trait and import definitions
//! 3. Provider - export definitions, lazy exports and the export provider trait
//! 4. Errors - the shared composition error type

pub mod errors;
pub mod part;
pub mod provider;
pub mod types;

pub use errors::CompositionError;
pub use part::{ComposablePart, ImportDefinition};
pub use provider::{Export, ExportDefinition, ExportProvider};
pub use types::{
    ContractKey, DynError, Exportable, ExportedValue, Metadata, MetadataValue, TypeInfo,
};
