//! Minimal class-file assembler for tests.
#![allow(dead_code)]

use std::collections::HashMap;

use classfile_ast::MemorySource;

pub const ACC_PUBLIC: u16 = 0x0001;
pub const ACC_PRIVATE: u16 = 0x0002;
pub const ACC_STATIC: u16 = 0x0008;
pub const ACC_FINAL: u16 = 0x0010;
pub const ACC_SYNTHETIC_BRIDGE: u16 = 0x1040;

pub mod op {
    pub const ACONST_NULL: u8 = 0x01;
    pub const ICONST_0: u8 = 0x03;
    pub const ICONST_1: u8 = 0x04;
    pub const ICONST_2: u8 = 0x05;
    pub const LCONST_1: u8 = 0x0a;
    pub const BIPUSH: u8 = 0x10;
    pub const SIPUSH: u8 = 0x11;
    pub const LDC: u8 = 0x12;
    pub const LDC2_W: u8 = 0x14;
    pub const ILOAD: u8 = 0x15;
    pub const ILOAD_0: u8 = 0x1a;
    pub const ILOAD_1: u8 = 0x1b;
    pub const ILOAD_2: u8 = 0x1c;
    pub const LLOAD_1: u8 = 0x1f;
    pub const ALOAD_0: u8 = 0x2a;
    pub const ALOAD_1: u8 = 0x2b;
    pub const ISTORE: u8 = 0x36;
    pub const ISTORE_1: u8 = 0x3c;
    pub const ISTORE_2: u8 = 0x3d;
    pub const ASTORE_1: u8 = 0x4c;
    pub const POP: u8 = 0x57;
    pub const DUP: u8 = 0x59;
    pub const IADD: u8 = 0x60;
    pub const GOTO: u8 = 0xa7;
    pub const IRETURN: u8 = 0xac;
    pub const LRETURN: u8 = 0xad;
    pub const ARETURN: u8 = 0xb0;
    pub const RETURN: u8 = 0xb1;
    pub const GETSTATIC: u8 = 0xb2;
    pub const INVOKEVIRTUAL: u8 = 0xb6;
    pub const INVOKESPECIAL: u8 = 0xb7;
    pub const INVOKESTATIC: u8 = 0xb8;
    pub const NEW: u8 = 0xbb;
}

/// Bytecode under construction.
#[derive(Clone, Debug, Default)]
pub struct Code(Vec<u8>);

impl Code {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn op(mut self, opcode: u8) -> Self {
        self.0.push(opcode);
        self
    }

    pub fn op_u8(mut self, opcode: u8, operand: u8) -> Self {
        self.0.extend([opcode, operand]);
        self
    }

    pub fn op_u16(mut self, opcode: u8, operand: u16) -> Self {
        self.0.push(opcode);
        self.0.extend(operand.to_be_bytes());
        self
    }

    pub fn len(&self) -> u16 {
        self.0.len() as u16
    }
}

#[derive(Clone, Debug)]
struct LocalEntry {
    start_pc: u16,
    length: u16,
    name: u16,
    descriptor: u16,
    slot: u16,
}

/// A class file with its own interned constant pool.
#[derive(Clone, Debug)]
pub struct ClassBuilder {
    pool: Vec<u8>,
    pool_count: u16,
    interned: HashMap<(u8, Vec<u8>), u16>,
    access: u16,
    this_class: u16,
    super_class: u16,
    fields: Vec<Vec<u8>>,
    methods: Vec<Vec<u8>>,
}

impl ClassBuilder {
    /// A public class extending `java/lang/Object`.
    pub fn new(name: &str) -> Self {
        let mut builder = ClassBuilder {
            pool: Vec::new(),
            pool_count: 1,
            interned: HashMap::new(),
            access: ACC_PUBLIC | 0x0020,
            this_class: 0,
            super_class: 0,
            fields: Vec::new(),
            methods: Vec::new(),
        };
        builder.this_class = builder.class(name);
        builder.super_class = builder.class("java/lang/Object");
        builder
    }

    pub fn extends(mut self, super_class: Option<&str>) -> Self {
        self.super_class = match super_class {
            Some(name) => self.class(name),
            None => 0,
        };
        self
    }

    fn entry(&mut self, tag: u8, body: Vec<u8>, slots: u16) -> u16 {
        if let Some(&index) = self.interned.get(&(tag, body.clone())) {
            return index;
        }
        let index = self.pool_count;
        self.pool.push(tag);
        self.pool.extend(&body);
        self.pool_count += slots;
        self.interned.insert((tag, body), index);
        index
    }

    pub fn utf8(&mut self, value: &str) -> u16 {
        let encoded = cesu8::to_java_cesu8(value);
        let mut body = (encoded.len() as u16).to_be_bytes().to_vec();
        body.extend(encoded.iter());
        self.entry(1, body, 1)
    }

    pub fn integer(&mut self, value: i32) -> u16 {
        self.entry(3, value.to_be_bytes().to_vec(), 1)
    }

    pub fn float(&mut self, value: f32) -> u16 {
        self.entry(4, value.to_bits().to_be_bytes().to_vec(), 1)
    }

    pub fn long(&mut self, value: i64) -> u16 {
        self.entry(5, value.to_be_bytes().to_vec(), 2)
    }

    pub fn double(&mut self, value: f64) -> u16 {
        self.entry(6, value.to_bits().to_be_bytes().to_vec(), 2)
    }

    pub fn class(&mut self, name: &str) -> u16 {
        let name = self.utf8(name);
        self.entry(7, name.to_be_bytes().to_vec(), 1)
    }

    pub fn string(&mut self, value: &str) -> u16 {
        let value = self.utf8(value);
        self.entry(8, value.to_be_bytes().to_vec(), 1)
    }

    pub fn name_and_type(&mut self, name: &str, descriptor: &str) -> u16 {
        let name = self.utf8(name);
        let descriptor = self.utf8(descriptor);
        let mut body = name.to_be_bytes().to_vec();
        body.extend(descriptor.to_be_bytes());
        self.entry(12, body, 1)
    }

    fn member_ref(&mut self, tag: u8, owner: &str, name: &str, descriptor: &str) -> u16 {
        let owner = self.class(owner);
        let nat = self.name_and_type(name, descriptor);
        let mut body = owner.to_be_bytes().to_vec();
        body.extend(nat.to_be_bytes());
        self.entry(tag, body, 1)
    }

    pub fn field_ref(&mut self, owner: &str, name: &str, descriptor: &str) -> u16 {
        self.member_ref(9, owner, name, descriptor)
    }

    pub fn method_ref(&mut self, owner: &str, name: &str, descriptor: &str) -> u16 {
        self.member_ref(10, owner, name, descriptor)
    }

    pub fn field(mut self, access: u16, name: &str, descriptor: &str) -> Self {
        let name = self.utf8(name);
        let descriptor = self.utf8(descriptor);
        let mut bytes = access.to_be_bytes().to_vec();
        bytes.extend(name.to_be_bytes());
        bytes.extend(descriptor.to_be_bytes());
        bytes.extend(0u16.to_be_bytes());
        self.fields.push(bytes);
        self
    }

    pub fn method(self, access: u16, name: &str, descriptor: &str) -> MethodBuilder {
        MethodBuilder {
            class: self,
            access,
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            code: None,
            locals: Vec::new(),
            native: None,
        }
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = vec![0xCA, 0xFE, 0xBA, 0xBE];
        out.extend(0u16.to_be_bytes());
        out.extend(52u16.to_be_bytes());
        out.extend(self.pool_count.to_be_bytes());
        out.extend(&self.pool);
        out.extend(self.access.to_be_bytes());
        out.extend(self.this_class.to_be_bytes());
        out.extend(self.super_class.to_be_bytes());
        out.extend(0u16.to_be_bytes());
        out.extend((self.fields.len() as u16).to_be_bytes());
        for field in &self.fields {
            out.extend(field);
        }
        out.extend((self.methods.len() as u16).to_be_bytes());
        for method in &self.methods {
            out.extend(method);
        }
        out.extend(0u16.to_be_bytes());
        out
    }
}

pub struct MethodBuilder {
    class: ClassBuilder,
    access: u16,
    name: String,
    descriptor: String,
    code: Option<Code>,
    locals: Vec<LocalEntry>,
    native: Option<(Option<String>, Option<String>)>,
}

impl MethodBuilder {
    pub fn code(mut self, code: Code) -> Self {
        self.code = Some(code);
        self
    }

    /// A LocalVariableTable entry. Entries keep the order they are added in.
    pub fn local(mut self, slot: u16, name: &str, descriptor: &str, start_pc: u16, length: u16) -> Self {
        let name = self.class.utf8(name);
        let descriptor = self.class.utf8(descriptor);
        self.locals.push(LocalEntry {
            start_pc,
            length,
            name,
            descriptor,
            slot,
        });
        self
    }

    /// Mark the method with the native-code annotation.
    pub fn native(mut self, language: Option<&str>, value: Option<&str>) -> Self {
        self.native = Some((language.map(str::to_string), value.map(str::to_string)));
        self
    }

    pub fn finish(self) -> ClassBuilder {
        let MethodBuilder {
            mut class,
            access,
            name,
            descriptor,
            code,
            locals,
            native,
        } = self;

        let name = class.utf8(&name);
        let descriptor = class.utf8(&descriptor);
        let mut attributes = Vec::new();

        if let Some(code) = code {
            let mut info = 16u16.to_be_bytes().to_vec();
            info.extend(16u16.to_be_bytes());
            info.extend((code.0.len() as u32).to_be_bytes());
            info.extend(&code.0);
            info.extend(0u16.to_be_bytes());
            if locals.is_empty() {
                info.extend(0u16.to_be_bytes());
            } else {
                let mut table = (locals.len() as u16).to_be_bytes().to_vec();
                for local in &locals {
                    for value in [local.start_pc, local.length, local.name, local.descriptor, local.slot] {
                        table.extend(value.to_be_bytes());
                    }
                }
                info.extend(1u16.to_be_bytes());
                let table_name = class.utf8("LocalVariableTable");
                info.extend(attribute(table_name, &table));
            }
            let code_name = class.utf8("Code");
            attributes.push(attribute(code_name, &info));
        }

        if let Some((language, value)) = native {
            let type_index = class.utf8("Lorg/nibiru/j2x/ast/J2xNative;");
            let mut pairs = Vec::new();
            for (element, text) in [("language", language), ("value", value)] {
                if let Some(text) = text {
                    pairs.push((class.utf8(element), class.utf8(&text)));
                }
            }
            let mut info = 1u16.to_be_bytes().to_vec();
            info.extend(type_index.to_be_bytes());
            info.extend((pairs.len() as u16).to_be_bytes());
            for (element, text) in pairs {
                info.extend(element.to_be_bytes());
                info.push(b's');
                info.extend(text.to_be_bytes());
            }
            let annotations_name = class.utf8("RuntimeInvisibleAnnotations");
            attributes.push(attribute(annotations_name, &info));
        }

        let mut bytes = access.to_be_bytes().to_vec();
        bytes.extend(name.to_be_bytes());
        bytes.extend(descriptor.to_be_bytes());
        bytes.extend((attributes.len() as u16).to_be_bytes());
        for attr in attributes {
            bytes.extend(attr);
        }
        class.methods.push(bytes);
        class
    }
}

fn attribute(name: u16, info: &[u8]) -> Vec<u8> {
    let mut bytes = name.to_be_bytes().to_vec();
    bytes.extend((info.len() as u32).to_be_bytes());
    bytes.extend(info);
    bytes
}

/// A memory source holding the given classes under their own names.
pub fn source(classes: &[(&str, &ClassBuilder)]) -> MemorySource {
    let mut source = MemorySource::new();
    for (path, class) in classes {
        source.insert(*path, class.build());
    }
    source
}

/// `<init>` that only chains to `java/lang/Object.<init>`.
pub fn default_constructor(class: ClassBuilder, class_name: &str) -> ClassBuilder {
    let mut class = class;
    let init = class.method_ref("java/lang/Object", "<init>", "()V");
    let this_desc = format!("L{class_name};");
    class
        .method(ACC_PUBLIC, "<init>", "()V")
        .code(
            Code::new()
                .op(op::ALOAD_0)
                .op_u16(op::INVOKESPECIAL, init)
                .op(op::RETURN),
        )
        .local(0, "this", &this_desc, 0, 5)
        .finish()
}
