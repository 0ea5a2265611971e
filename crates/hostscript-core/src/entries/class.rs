//! Class and interface entries.
//!
//! A [`ClassEntry`] describes one host type: identity, access control,
//! its place in the inheritance graph, and the members declared directly
//! on it. Inherited members are not flattened here; the engine walks the
//! graph itself.

use crate::{ConstructorEntry, FieldEntry, MethodEntry, TypeDesc, TypeHash};

/// Registry entry for a host class or interface.
#[derive(Debug, Clone)]
pub struct ClassEntry {
    /// Unqualified name.
    pub name: String,
    /// Fully qualified name; the identity the hash is computed from.
    pub qualified_name: String,
    pub type_hash: TypeHash,
    /// Whether the type itself is publicly accessible. A non-public
    /// concrete class may still expose members through a public
    /// superclass or interface.
    pub is_public: bool,
    pub is_interface: bool,
    pub is_abstract: bool,
    /// Superclass, for classes. Interfaces list their extended
    /// interfaces under `interfaces`.
    pub superclass: Option<TypeHash>,
    /// Directly implemented (or extended) interfaces, in declaration order.
    pub interfaces: Vec<TypeHash>,
    pub constructors: Vec<ConstructorEntry>,
    /// Methods declared directly on this type.
    pub methods: Vec<MethodEntry>,
    /// Fields declared directly on this type.
    pub fields: Vec<FieldEntry>,
}

impl ClassEntry {
    /// Create a public class entry. The qualified name doubles as the
    /// simple name; use [`ClassEntry::qualified`] to split them.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::qualified(name.clone(), name)
    }

    /// Create a public class entry with distinct simple and qualified names.
    pub fn qualified(name: impl Into<String>, qualified_name: impl Into<String>) -> Self {
        let qualified_name = qualified_name.into();
        ClassEntry {
            name: name.into(),
            type_hash: TypeHash::from_name(&qualified_name),
            qualified_name,
            is_public: true,
            is_interface: false,
            is_abstract: false,
            superclass: None,
            interfaces: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Create a public interface entry.
    pub fn interface(name: impl Into<String>) -> Self {
        let mut entry = Self::new(name);
        entry.is_interface = true;
        entry.is_abstract = true;
        entry
    }

    // === Builder methods ===

    /// Mark the type itself as not publicly accessible.
    pub fn non_public(mut self) -> Self {
        self.is_public = false;
        self
    }

    /// Mark the class abstract.
    pub fn as_abstract(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Set the superclass.
    pub fn with_super(mut self, superclass: TypeHash) -> Self {
        self.superclass = Some(superclass);
        self
    }

    /// Add an implemented (or extended) interface.
    pub fn with_interface(mut self, interface: TypeHash) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Add a constructor overload.
    pub fn with_constructor(mut self, constructor: ConstructorEntry) -> Self {
        self.constructors.push(constructor);
        self
    }

    /// Add a method declared on this type.
    pub fn with_method(mut self, method: MethodEntry) -> Self {
        self.methods.push(method);
        self
    }

    /// Add a field declared on this type.
    pub fn with_field(mut self, field: FieldEntry) -> Self {
        self.fields.push(field);
        self
    }

    // === Lookup ===

    /// The exact-signature method declared directly on this type, any
    /// visibility.
    pub fn declared_method_exact(&self, name: &str, params: &[TypeDesc]) -> Option<&MethodEntry> {
        self.methods
            .iter()
            .find(|m| m.name == name && m.signature_matches(params))
    }

    /// The field declared directly on this type, any visibility.
    pub fn declared_field(&self, name: &str) -> Option<&FieldEntry> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The object type descriptor for this class.
    pub fn desc(&self) -> TypeDesc {
        TypeDesc::Object(self.type_hash)
    }
}
