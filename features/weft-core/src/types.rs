use std::{
    any::{Any, TypeId},
    collections::BTreeMap,
    sync::Arc,
};

use crate::errors::CompositionError;

/// Boxed error type used by factory functions
pub type DynError = Box<dyn std::error::Error + Send + Sync>;

/// Anything flowing through the composition graph may cross threads,
/// so exported values need to be Send + Sync + 'static
pub trait Exportable: Send + Sync + 'static {}
impl<T: Send + Sync + 'static> Exportable for T {}

/// Canonical type identity - Type Name and Type Id
///
/// All identity comparison goes through the [TypeId]; the name is carried
/// for diagnostics only. Obtain instances through [TypeInfo::of] so sibling
/// components agree on the identity of a type.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct TypeInfo {
    pub type_name: &'static str,
    pub type_id: TypeId,
}
impl std::fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name)
    }
}
impl TypeInfo {
    pub fn of<T: 'static + ?Sized>() -> TypeInfo {
        TypeInfo {
            type_name: std::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
        }
    }
}

/// Identity of a contract - a type plus an optional registration name
///
/// Two contracts are the same exactly when both the type id and the name
/// match.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct ContractKey {
    pub type_info: TypeInfo,
    pub name: Option<String>,
}
impl ContractKey {
    /// Contract for a plain, unnamed registration of `T`
    pub fn of<T: 'static + ?Sized>() -> ContractKey {
        ContractKey {
            type_info: TypeInfo::of::<T>(),
            name: None,
        }
    }

    /// Contract for a named registration of `T`
    pub fn named<T: 'static + ?Sized>(name: impl Into<String>) -> ContractKey {
        ContractKey {
            type_info: TypeInfo::of::<T>(),
            name: Some(name.into()),
        }
    }
}
impl std::fmt::Display for ContractKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} ('{}')", self.type_info, name),
            None => write!(f, "{}", self.type_info),
        }
    }
}

/// A single metadata value attached to an export or part
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    Bool(bool),
    Int(i64),
    Text(String),
}
impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        MetadataValue::Bool(value)
    }
}
impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        MetadataValue::Int(value)
    }
}
impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::Text(value.to_string())
    }
}
impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        MetadataValue::Text(value)
    }
}

/// Metadata attached to exports and parts
pub type Metadata = BTreeMap<String, MetadataValue>;

/// A value produced for an export
///
/// Type erased so it can travel through providers and interceptors which
/// only know the contract, not the concrete type.
#[derive(Clone)]
pub struct ExportedValue {
    info: TypeInfo,
    value: Arc<dyn Any + Send + Sync>,
}
impl ExportedValue {
    pub fn new<T: Exportable>(value: T) -> Self {
        ExportedValue {
            info: TypeInfo::of::<T>(),
            value: Arc::new(value),
        }
    }

    /// Wraps an already shared value without another allocation
    pub fn from_arc<T: Exportable>(value: Arc<T>) -> Self {
        ExportedValue {
            info: TypeInfo::of::<T>(),
            value,
        }
    }

    pub fn info(&self) -> TypeInfo {
        self.info
    }

    pub fn downcast<T: Exportable>(&self) -> Result<Arc<T>, CompositionError> {
        match Arc::downcast::<T>(self.value.clone()) {
            Ok(downcasted) => Ok(downcasted),
            Err(_) => Err(CompositionError::DowncastFailed {
                required_type: std::any::type_name::<T>(),
                actual_type: self.info.type_name,
            }),
        }
    }
}
impl std::fmt::Debug for ExportedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ExportedValue").field(&self.info).finish()
    }
}
