#[derive(Clone, Debug, PartialEq)]
pub enum ConstantInfo {
    Utf8(Utf8Constant),
    Integer(IntegerConstant),
    Float(FloatConstant),
    Long(LongConstant),
    Double(DoubleConstant),
    Class(ClassConstant),
    String(StringConstant),
    FieldRef(FieldRefConstant),
    MethodRef(MethodRefConstant),
    InterfaceMethodRef(InterfaceMethodRefConstant),
    NameAndType(NameAndTypeConstant),
    MethodHandle(MethodHandleConstant),
    MethodType(MethodTypeConstant),
    Dynamic(DynamicConstant),
    InvokeDynamic(InvokeDynamicConstant),
    Module(ModuleConstant),
    Package(PackageConstant),
    /// Filler for the second slot taken by a Long or Double.
    Unusable,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Utf8Constant {
    pub utf8_string: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IntegerConstant {
    pub value: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FloatConstant {
    pub value: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LongConstant {
    pub value: i64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DoubleConstant {
    pub value: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClassConstant {
    pub name_index: u16,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StringConstant {
    pub string_index: u16,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldRefConstant {
    pub class_index: u16,
    pub name_and_type_index: u16,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MethodRefConstant {
    pub class_index: u16,
    pub name_and_type_index: u16,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InterfaceMethodRefConstant {
    pub class_index: u16,
    pub name_and_type_index: u16,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NameAndTypeConstant {
    pub name_index: u16,
    pub descriptor_index: u16,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MethodHandleConstant {
    pub reference_kind: u8,
    pub reference_index: u16,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MethodTypeConstant {
    pub descriptor_index: u16,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DynamicConstant {
    pub bootstrap_method_attr_index: u16,
    pub name_and_type_index: u16,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InvokeDynamicConstant {
    pub bootstrap_method_attr_index: u16,
    pub name_and_type_index: u16,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ModuleConstant {
    pub name_index: u16,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PackageConstant {
    pub name_index: u16,
}

/// A fully dereferenced Fieldref/Methodref/InterfaceMethodref.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemberRef<'a> {
    pub class_name: &'a str,
    pub name: &'a str,
    pub descriptor: &'a str,
}

/// Look up a UTF-8 constant pool entry by 1-based index.
pub fn utf8(const_pool: &[ConstantInfo], index: u16) -> Option<&str> {
    match const_pool.get((index as usize).checked_sub(1)?)? {
        ConstantInfo::Utf8(u) => Some(&u.utf8_string),
        _ => None,
    }
}

/// Resolve a Class constant to its internal name.
pub fn class_name(const_pool: &[ConstantInfo], class_index: u16) -> Option<&str> {
    match const_pool.get((class_index as usize).checked_sub(1)?)? {
        ConstantInfo::Class(c) => utf8(const_pool, c.name_index),
        _ => None,
    }
}

/// Resolve a NameAndType constant to (name, descriptor).
pub fn name_and_type(const_pool: &[ConstantInfo], nat_index: u16) -> Option<(&str, &str)> {
    match const_pool.get((nat_index as usize).checked_sub(1)?)? {
        ConstantInfo::NameAndType(nat) => {
            let name = utf8(const_pool, nat.name_index)?;
            let desc = utf8(const_pool, nat.descriptor_index)?;
            Some((name, desc))
        }
        _ => None,
    }
}

/// Resolve a FieldRef, MethodRef or InterfaceMethodRef.
pub fn member_ref(const_pool: &[ConstantInfo], index: u16) -> Option<MemberRef<'_>> {
    let (class_index, nat_index) = match const_pool.get((index as usize).checked_sub(1)?)? {
        ConstantInfo::FieldRef(r) => (r.class_index, r.name_and_type_index),
        ConstantInfo::MethodRef(r) => (r.class_index, r.name_and_type_index),
        ConstantInfo::InterfaceMethodRef(r) => (r.class_index, r.name_and_type_index),
        _ => return None,
    };
    let class_name = class_name(const_pool, class_index)?;
    let (name, descriptor) = name_and_type(const_pool, nat_index)?;
    Some(MemberRef {
        class_name,
        name,
        descriptor,
    })
}
