use crate::attribute_info::AttributeInfo;
use crate::constant_info::{self, ConstantInfo};
use crate::field_info::FieldInfo;
use crate::method_info::MethodInfo;

#[derive(Clone, Debug, PartialEq)]
pub struct ClassFile {
    pub minor_version: u16,
    pub major_version: u16,
    pub const_pool_size: u16,
    pub const_pool: Vec<ConstantInfo>,
    pub access_flags: ClassAccessFlags,
    pub this_class: u16,
    pub super_class: u16,
    pub interfaces_count: u16,
    pub interfaces: Vec<u16>,
    pub fields_count: u16,
    pub fields: Vec<FieldInfo>,
    pub methods_count: u16,
    pub methods: Vec<MethodInfo>,
    pub attributes_count: u16,
    pub attributes: Vec<AttributeInfo>,
}

impl ClassFile {
    /// Internal (slash-separated) name of this class.
    pub fn class_name(&self) -> Option<&str> {
        constant_info::class_name(&self.const_pool, self.this_class)
    }

    /// Internal name of the superclass; `None` only for `java/lang/Object`
    /// (and module-info), whose `super_class` index is zero.
    pub fn super_class_name(&self) -> Option<&str> {
        if self.super_class == 0 {
            return None;
        }
        constant_info::class_name(&self.const_pool, self.super_class)
    }

    pub fn utf8(&self, index: u16) -> Option<&str> {
        constant_info::utf8(&self.const_pool, index)
    }

    pub fn find_method(&self, name: &str) -> Option<&MethodInfo> {
        self.methods
            .iter()
            .find(|m| self.utf8(m.name_index) == Some(name))
    }
}

bitflags! {
    #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
    pub struct ClassAccessFlags: u16 {
        const PUBLIC = 0x0001;     //	Declared public; may be accessed from outside its package.
        const FINAL = 0x0010;      //	Declared final; no subclasses allowed.
        const SUPER = 0x0020;      //	Treat superclass methods specially when invoked by the invokespecial instruction.
        const INTERFACE = 0x0200;  //	Is an interface, not a class.
        const ABSTRACT = 0x0400;   //	Declared abstract; must not be instantiated.
        const SYNTHETIC = 0x1000;  //	Declared synthetic; not present in the source code.
        const ANNOTATION = 0x2000; //	Declared as an annotation type.
        const ENUM = 0x4000;       //	Declared as an enum type.
        const MODULE = 0x8000;     //	Declared as a module type.
    }
}
