//! Weft Conventions resolves contract names and type identities for members
//! wired by convention instead of explicit registration.
//!
//! Resolution consults an ordered list of [DefaultConvention] overrides
//! first - among matching entries the last registered one wins - and falls
//! back to a base [ContractService] for everything else.
//!
//! # Example
//! ```rust
//! use weft_conventions::{
//!     ContractService, DefaultConvention, DefaultConventionContractService, ExportConvention,
//!     MemberKind, MemberRef,
//! };
//!
//! trait Transport: Send + Sync {}
//!
//! fn resolve() -> Result<(), weft_conventions::ConventionError> {
//!     let service = DefaultConventionContractService::default()
//!         .with_convention(DefaultConvention::new::<String, dyn Transport>(
//!             MemberKind::Field,
//!             "transport",
//!         )?);
//!
//!     let member = MemberRef::field::<String>("endpoint");
//!     let name = service.export_contract_name(&ExportConvention::new(), &member);
//!     assert_eq!(name, "transport");
//!     Ok(())
//! }
//! ```
//!
//! Weft Conventions consists of the following components:
//!
//! 1. Member - explicit member kind tags and member references
//! 2. Convention - export/import descriptors and default convention entries
//! 3. Service - the contract service trait, the base algorithm and the
//!    default convention override layer
//! 4. Errors - convention declaration errors

pub mod convention;
pub mod errors;
pub mod member;
pub mod service;

pub use convention::{DefaultConvention, ExportConvention, ImportConvention};
pub use errors::ConventionError;
pub use member::{MemberKind, MemberRef};
pub use service::{ContractService, ConventionContractService, DefaultConventionContractService};
