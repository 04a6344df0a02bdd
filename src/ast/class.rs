use std::fmt;

use super::member::{FieldDescriptor, MethodDescriptor};

/// Handle of a class descriptor inside a [`TypeRegistry`](crate::TypeRegistry).
///
/// Descriptors reference each other (superclass, field and argument types,
/// call targets) only through handles, so self-referential and cyclic class
/// graphs need no shared ownership. Two handles are equal iff they name the
/// same descriptor instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassId(pub(crate) u32);

impl ClassId {
    pub const VOID: ClassId = ClassId(0);
    pub const BOOLEAN: ClassId = ClassId(1);
    pub const CHAR: ClassId = ClassId(2);
    pub const BYTE: ClassId = ClassId(3);
    pub const SHORT: ClassId = ClassId(4);
    pub const INT: ClassId = ClassId(5);
    pub const FLOAT: ClassId = ClassId(6);
    pub const LONG: ClassId = ClassId(7);
    pub const DOUBLE: ClassId = ClassId(8);
    pub const OBJECT: ClassId = ClassId(9);
    pub const STRING: ClassId = ClassId(10);

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// `void` and the eight primitive types.
    pub fn is_primitive(self) -> bool {
        self.0 <= ClassId::DOUBLE.0
    }

    /// The six numeric primitives other than `char`.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            ClassId::BYTE
                | ClassId::SHORT
                | ClassId::INT
                | ClassId::FLOAT
                | ClassId::LONG
                | ClassId::DOUBLE
        )
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Source-level visibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Access {
    Public,
    Protected,
    Private,
    /// Package-private.
    Default,
}

impl Access {
    /// Read the visibility bits shared by class, field and method access flags.
    pub fn from_flags(flags: u16) -> Access {
        if flags & 0x0001 != 0 {
            Access::Public
        } else if flags & 0x0004 != 0 {
            Access::Protected
        } else if flags & 0x0002 != 0 {
            Access::Private
        } else {
            Access::Default
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClassKind {
    /// `void` or a primitive type.
    Primitive,
    /// A built-in reference type never loaded from bytecode.
    System,
    /// A class translated from bytecode during the run.
    Parsed,
    /// A synthesized array type. Its superclass is always the root object type.
    Array { item: ClassId, dimensions: usize },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClassDescriptor {
    pub name: String,
    /// Dotted package name, empty for primitives and the default package.
    pub package: String,
    pub super_class: Option<ClassId>,
    pub access: Access,
    pub kind: ClassKind,
    pub fields: Vec<FieldDescriptor>,
    pub methods: Vec<MethodDescriptor>,
}

impl ClassDescriptor {
    pub fn new(
        name: impl Into<String>,
        package: impl Into<String>,
        super_class: Option<ClassId>,
        access: Access,
        kind: ClassKind,
    ) -> Self {
        ClassDescriptor {
            name: name.into(),
            package: package.into(),
            super_class,
            access,
            kind,
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// `package.Name`, or just `Name` outside any package.
    pub fn full_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }

    pub fn is_primitive(&self) -> bool {
        self.kind == ClassKind::Primitive
    }

    /// Item type and dimension count of an array type.
    pub fn array(&self) -> Option<(ClassId, usize)> {
        match self.kind {
            ClassKind::Array { item, dimensions } => Some((item, dimensions)),
            _ => None,
        }
    }

    /// Look a method up by overload identity. The return type is not part of it.
    pub fn find_method(&self, name: &str, argument_descriptor: &str) -> Option<&MethodDescriptor> {
        self.methods
            .iter()
            .find(|m| m.is_overload_of(name, argument_descriptor))
    }

    pub fn find_field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.member.name == name)
    }
}
