use weft_core::TypeInfo;

use crate::{
    errors::ConventionError,
    member::{MemberKind, MemberRef},
};

/// Describes how a member is exported
///
/// Both fields are optional - whatever is left unset is derived from the
/// member by the contract service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportConvention {
    contract_name: Option<String>,
    contract_type: Option<TypeInfo>,
}
impl ExportConvention {
    pub fn new() -> ExportConvention {
        ExportConvention::default()
    }

    pub fn with_contract_name(mut self, name: impl Into<String>) -> Self {
        self.contract_name = Some(name.into());
        self
    }

    pub fn with_contract_type<T: 'static + ?Sized>(mut self) -> Self {
        self.contract_type = Some(TypeInfo::of::<T>());
        self
    }

    pub fn contract_name(&self) -> Option<&str> {
        self.contract_name.as_deref()
    }

    pub fn contract_type(&self) -> Option<TypeInfo> {
        self.contract_type
    }
}

/// Describes how a member is imported
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportConvention {
    contract_name: Option<String>,
    contract_type: Option<TypeInfo>,
}
impl ImportConvention {
    pub fn new() -> ImportConvention {
        ImportConvention::default()
    }

    pub fn with_contract_name(mut self, name: impl Into<String>) -> Self {
        self.contract_name = Some(name.into());
        self
    }

    pub fn with_contract_type<T: 'static + ?Sized>(mut self) -> Self {
        self.contract_type = Some(TypeInfo::of::<T>());
        self
    }

    pub fn contract_name(&self) -> Option<&str> {
        self.contract_name.as_deref()
    }

    pub fn contract_type(&self) -> Option<TypeInfo> {
        self.contract_type
    }
}

/// An override entry applied before the base convention algorithm
///
/// Applies to members of a given kind whose target type is `Target`; a
/// matching member resolves to `Contract` under `contract_name` instead of
/// whatever the base algorithm would have produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultConvention {
    kind: MemberKind,
    target: TypeInfo,
    contract_name: String,
    contract_type: TypeInfo,
}
impl DefaultConvention {
    pub fn new<Target: 'static, Contract: 'static + ?Sized>(
        kind: MemberKind,
        contract_name: impl Into<String>,
    ) -> Result<DefaultConvention, ConventionError> {
        let contract_name = contract_name.into();
        if contract_name.is_empty() {
            return Err(ConventionError::EmptyContractName);
        }

        Ok(DefaultConvention {
            kind,
            target: TypeInfo::of::<Target>(),
            contract_name,
            contract_type: TypeInfo::of::<Contract>(),
        })
    }

    pub fn contract_name(&self) -> &str {
        &self.contract_name
    }

    /// The canonical identity of the contract this convention assigns
    pub fn contract_type(&self) -> TypeInfo {
        self.contract_type
    }

    /// Whether this convention overrides resolution for the given member
    pub fn applies_to(&self, member: &MemberRef) -> bool {
        self.kind == member.kind() && self.target.type_id == member.target().type_id
    }
}
