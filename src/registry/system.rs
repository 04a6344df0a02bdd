use crate::ast::{Access, ClassDescriptor, ClassId, ClassKind};

/// Types every registry starts with, in [`ClassId`] constant order:
/// (class path, simple name, package).
pub(super) const SYSTEM_TYPES: [(&str, &str, &str); 11] = [
    ("void", "void", ""),
    ("boolean", "boolean", ""),
    ("char", "char", ""),
    ("byte", "byte", ""),
    ("short", "short", ""),
    ("int", "int", ""),
    ("float", "float", ""),
    ("long", "long", ""),
    ("double", "double", ""),
    ("java/lang/Object", "Object", "java.lang"),
    ("java/lang/String", "String", "java.lang"),
];

pub(super) fn system_descriptor(id: ClassId, name: &str, package: &str) -> ClassDescriptor {
    let (kind, super_class) = if id.is_primitive() {
        (ClassKind::Primitive, None)
    } else if id == ClassId::OBJECT {
        (ClassKind::System, None)
    } else {
        (ClassKind::System, Some(ClassId::OBJECT))
    };
    ClassDescriptor::new(name, package, super_class, Access::Public, kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_matches_ids() {
        let ids = [
            ClassId::VOID,
            ClassId::BOOLEAN,
            ClassId::CHAR,
            ClassId::BYTE,
            ClassId::SHORT,
            ClassId::INT,
            ClassId::FLOAT,
            ClassId::LONG,
            ClassId::DOUBLE,
            ClassId::OBJECT,
            ClassId::STRING,
        ];
        for (position, id) in ids.iter().enumerate() {
            assert_eq!(id.index(), position, "{}", SYSTEM_TYPES[position].0);
        }
        assert_eq!(SYSTEM_TYPES[ClassId::BOOLEAN.index()].0, "boolean");
        assert_eq!(SYSTEM_TYPES[ClassId::STRING.index()].0, "java/lang/String");
    }

    #[test]
    fn test_system_superclasses() {
        assert_eq!(system_descriptor(ClassId::INT, "int", "").super_class, None);
        assert_eq!(system_descriptor(ClassId::OBJECT, "Object", "java.lang").super_class, None);
        assert_eq!(
            system_descriptor(ClassId::STRING, "String", "java.lang").super_class,
            Some(ClassId::OBJECT)
        );
    }
}
