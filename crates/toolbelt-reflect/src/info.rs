//! Registered type metadata.
//!
//! [`TypeInfo`] is the closed list of fields and accessor methods a type
//! exposes to generic code. It is generated by `#[derive(Reflect)]` and
//! `#[reflect_methods]`, or written by hand for manual [`Reflect`]
//! implementations.
//!
//! [`Reflect`]: crate::Reflect

use std::fmt;

/// Visibility of a registered field or method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Declared `pub`.
    Public,
    /// Declared `pub(crate)`, `pub(super)` or `pub(in ...)`.
    Restricted,
    /// No visibility modifier.
    Private,
}

impl Visibility {
    /// Returns `true` for [`Visibility::Public`].
    pub fn is_public(self) -> bool {
        matches!(self, Visibility::Public)
    }

    /// Returns the display name of this visibility.
    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Restricted => "restricted",
            Visibility::Private => "private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How generic code may access a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldAccess {
    /// Readable and writable.
    ReadWrite,
    /// Readable only.
    ReadOnly,
    /// Declared, but neither readable nor writable. Its value is only
    /// reachable through accessor methods.
    Opaque,
}

impl FieldAccess {
    /// Returns `true` if the field value can be read directly.
    pub fn is_readable(self) -> bool {
        !matches!(self, FieldAccess::Opaque)
    }

    /// Returns `true` if the field value can be written.
    pub fn is_writable(self) -> bool {
        matches!(self, FieldAccess::ReadWrite)
    }
}

/// A declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldInfo {
    /// Registered name.
    pub name: &'static str,
    /// Declared visibility.
    pub visibility: Visibility,
    /// Access mode.
    pub access: FieldAccess,
}

impl FieldInfo {
    /// Creates a read-write field descriptor.
    pub const fn new(name: &'static str, visibility: Visibility) -> Self {
        FieldInfo {
            name,
            visibility,
            access: FieldAccess::ReadWrite,
        }
    }

    /// Sets the access mode.
    pub const fn with_access(mut self, access: FieldAccess) -> Self {
        self.access = access;
        self
    }
}

/// A registered accessor method: takes `&self` and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodInfo {
    /// Method name.
    pub name: &'static str,
    /// Declared visibility.
    pub visibility: Visibility,
}

impl MethodInfo {
    /// Creates a method descriptor.
    pub const fn new(name: &'static str, visibility: Visibility) -> Self {
        MethodInfo { name, visibility }
    }
}

/// Metadata of a registered type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeInfo {
    /// Type name.
    pub name: &'static str,
    /// Fields declared directly on the type, in declaration order.
    pub fields: &'static [FieldInfo],
    /// Registered accessor methods, in declaration order.
    pub methods: &'static [MethodInfo],
}

impl TypeInfo {
    /// Creates type metadata.
    pub const fn new(
        name: &'static str,
        fields: &'static [FieldInfo],
        methods: &'static [MethodInfo],
    ) -> Self {
        TypeInfo {
            name,
            fields,
            methods,
        }
    }

    /// Looks up a declared field by name.
    pub fn field(&self, name: &str) -> Option<&'static FieldInfo> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Looks up a registered method by name.
    pub fn method(&self, name: &str) -> Option<&'static MethodInfo> {
        self.methods.iter().find(|method| method.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static FIELDS: [FieldInfo; 2] = [
        FieldInfo::new("name", Visibility::Public),
        FieldInfo::new("secret", Visibility::Private).with_access(FieldAccess::Opaque),
    ];
    static METHODS: [MethodInfo; 1] = [MethodInfo::new("get_secret", Visibility::Public)];
    static INFO: TypeInfo = TypeInfo::new("Sample", &FIELDS, &METHODS);

    #[test]
    fn lookups() {
        assert_eq!(INFO.field("name").map(|f| f.visibility), Some(Visibility::Public));
        assert_eq!(
            INFO.field("secret").map(|f| f.access),
            Some(FieldAccess::Opaque)
        );
        assert!(INFO.field("missing").is_none());
        assert!(INFO.method("get_secret").is_some());
        assert!(INFO.method("get_name").is_none());
    }

    #[test]
    fn access_modes() {
        assert!(FieldAccess::ReadWrite.is_readable());
        assert!(FieldAccess::ReadWrite.is_writable());
        assert!(FieldAccess::ReadOnly.is_readable());
        assert!(!FieldAccess::ReadOnly.is_writable());
        assert!(!FieldAccess::Opaque.is_readable());
        assert!(!FieldAccess::Opaque.is_writable());
    }

    #[test]
    fn visibility_display() {
        assert!(Visibility::Public.is_public());
        assert!(!Visibility::Restricted.is_public());
        assert_eq!(Visibility::Private.to_string(), "private");
    }
}
