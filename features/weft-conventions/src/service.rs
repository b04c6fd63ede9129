use weft_core::TypeInfo;

use crate::{
    convention::{DefaultConvention, ExportConvention, ImportConvention},
    member::MemberRef,
};

/// Resolves contract names and type identities for members being wired
pub trait ContractService: Send + Sync {
    fn export_contract_name(&self, convention: &ExportConvention, member: &MemberRef) -> String;

    fn export_type_identity(&self, convention: &ExportConvention, member: &MemberRef) -> TypeInfo;

    fn import_contract_name(&self, convention: &ImportConvention, member: &MemberRef) -> String;

    fn import_type_identity(&self, convention: &ImportConvention, member: &MemberRef) -> TypeInfo;
}

/// Base resolution algorithm
///
/// Resolves in order: the descriptor's explicit contract name, then the
/// descriptor's explicit contract type, then the member's own target type.
/// Names derived from a type always come from the canonical identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConventionContractService;

impl ConventionContractService {
    pub fn new() -> ConventionContractService {
        ConventionContractService
    }

    fn contract_name(name: Option<&str>, contract_type: Option<TypeInfo>, member: &MemberRef) -> String {
        match name {
            Some(name) => name.to_string(),
            None => contract_type.unwrap_or_else(|| member.target()).type_name.to_string(),
        }
    }
}
impl ContractService for ConventionContractService {
    fn export_contract_name(&self, convention: &ExportConvention, member: &MemberRef) -> String {
        Self::contract_name(convention.contract_name(), convention.contract_type(), member)
    }

    fn export_type_identity(&self, convention: &ExportConvention, member: &MemberRef) -> TypeInfo {
        convention.contract_type().unwrap_or_else(|| member.target())
    }

    fn import_contract_name(&self, convention: &ImportConvention, member: &MemberRef) -> String {
        Self::contract_name(convention.contract_name(), convention.contract_type(), member)
    }

    fn import_type_identity(&self, convention: &ImportConvention, member: &MemberRef) -> TypeInfo {
        convention.contract_type().unwrap_or_else(|| member.target())
    }
}

/// Contract service consulting an ordered list of [DefaultConvention]
/// overrides before falling back to a base service
///
/// Among entries applying to a member, the last registered one wins, so
/// later configuration layers can override earlier ones without removing
/// them.
pub struct DefaultConventionContractService {
    base: Box<dyn ContractService>,
    conventions: Vec<DefaultConvention>,
}
impl Default for DefaultConventionContractService {
    fn default() -> Self {
        Self::new(ConventionContractService::new())
    }
}
impl DefaultConventionContractService {
    pub fn new(base: impl ContractService + 'static) -> DefaultConventionContractService {
        DefaultConventionContractService {
            base: Box::new(base),
            conventions: Vec::new(),
        }
    }

    /// Appends a convention, overriding any earlier entry for the same target
    pub fn with_convention(mut self, convention: DefaultConvention) -> Self {
        self.conventions.push(convention);
        self
    }

    /// Edit the registered conventions in place
    pub fn configure(mut self, configure: impl FnOnce(&mut Vec<DefaultConvention>)) -> Self {
        configure(&mut self.conventions);
        self
    }

    fn default_convention(&self, member: &MemberRef) -> Option<&DefaultConvention> {
        let matched = self
            .conventions
            .iter()
            .rev()
            .find(|convention| convention.applies_to(member));

        if let Some(convention) = matched {
            tracing::debug!(
                "Default convention '{}' overrides resolution for {}",
                convention.contract_name(),
                member
            );
        }

        matched
    }
}
impl ContractService for DefaultConventionContractService {
    fn export_contract_name(&self, convention: &ExportConvention, member: &MemberRef) -> String {
        match self.default_convention(member) {
            Some(default) => default.contract_name().to_string(),
            None => self.base.export_contract_name(convention, member),
        }
    }

    fn export_type_identity(&self, convention: &ExportConvention, member: &MemberRef) -> TypeInfo {
        match self.default_convention(member) {
            Some(default) => default.contract_type(),
            None => self.base.export_type_identity(convention, member),
        }
    }

    fn import_contract_name(&self, convention: &ImportConvention, member: &MemberRef) -> String {
        match self.default_convention(member) {
            Some(default) => default.contract_name().to_string(),
            None => self.base.import_contract_name(convention, member),
        }
    }

    fn import_type_identity(&self, convention: &ImportConvention, member: &MemberRef) -> TypeInfo {
        match self.default_convention(member) {
            Some(default) => default.contract_type(),
            None => self.base.import_type_identity(convention, member),
        }
    }
}
