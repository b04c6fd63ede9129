use weft_core::TypeInfo;

/// What kind of member a convention is looking at
///
/// Replaces the original reflective member probing with an explicit tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// The part type itself
    Part,
    /// A field of the part
    Field,
    /// A method of the part
    Method,
}

/// Reference to a member being wired by a convention
///
/// Carries the member's target type - the type of value flowing through the
/// member (the field type, the method return type, or the part type itself).
/// Conventions key their lookups on this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRef {
    kind: MemberKind,
    name: String,
    target: TypeInfo,
}
impl MemberRef {
    /// The part type itself as a member
    pub fn part<T: 'static>() -> MemberRef {
        let target = TypeInfo::of::<T>();
        MemberRef {
            kind: MemberKind::Part,
            name: target.type_name.to_string(),
            target,
        }
    }

    /// A field member with target type `T`
    pub fn field<T: 'static>(name: impl Into<String>) -> MemberRef {
        MemberRef {
            kind: MemberKind::Field,
            name: name.into(),
            target: TypeInfo::of::<T>(),
        }
    }

    /// A method member whose return type is `T`
    pub fn method<T: 'static>(name: impl Into<String>) -> MemberRef {
        MemberRef {
            kind: MemberKind::Method,
            name: name.into(),
            target: TypeInfo::of::<T>(),
        }
    }

    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The type key conventions match against
    pub fn target(&self) -> TypeInfo {
        self.target
    }
}
impl std::fmt::Display for MemberRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} '{}' ({})", self.kind, self.name, self.target)
    }
}
