use crate::attribute_info::{
    code_attribute_parser, runtime_annotations_attribute_parser, AttributeInfo, CodeAttribute,
    RuntimeAnnotation,
};
use crate::constant_info::ConstantInfo;

#[derive(Clone, Debug, PartialEq)]
pub struct MethodInfo {
    pub access_flags: MethodAccessFlags,
    pub name_index: u16,
    pub descriptor_index: u16,
    pub attributes_count: u16,
    pub attributes: Vec<AttributeInfo>,
}

impl MethodInfo {
    /// The method's Code attribute, absent for abstract and native methods.
    pub fn code(&self, const_pool: &[ConstantInfo]) -> Result<Option<CodeAttribute>, String> {
        let Some(attr) = self
            .attributes
            .iter()
            .find(|attr| attr.name(const_pool) == Some("Code"))
        else {
            return Ok(None);
        };
        code_attribute_parser(&attr.info)
            .map(|(_, code)| Some(code))
            .map_err(|e| format!("Code: {e}"))
    }

    /// Visible and invisible annotations, visible ones first.
    pub fn annotations(
        &self,
        const_pool: &[ConstantInfo],
    ) -> Result<Vec<RuntimeAnnotation>, String> {
        let mut annotations = Vec::new();
        for wanted in ["RuntimeVisibleAnnotations", "RuntimeInvisibleAnnotations"] {
            for attr in &self.attributes {
                if attr.name(const_pool) != Some(wanted) {
                    continue;
                }
                let (_, parsed) = runtime_annotations_attribute_parser(&attr.info)
                    .map_err(|e| format!("{wanted}: {e}"))?;
                annotations.extend(parsed.annotations);
            }
        }
        Ok(annotations)
    }
}

bitflags! {
    #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
    pub struct MethodAccessFlags: u16 {
        const PUBLIC = 0x0001;       // 	Declared public; may be accessed from outside its package.
        const PRIVATE = 0x0002;      // 	Declared private; accessible only within the defining class.
        const PROTECTED = 0x0004;    // 	Declared protected; may be accessed within subclasses.
        const STATIC = 0x0008;       // 	Declared static.
        const FINAL = 0x0010;        // 	Declared final; must not be overridden.
        const SYNCHRONIZED = 0x0020; // 	Declared synchronized; invocation is wrapped by a monitor use.
        const BRIDGE = 0x0040;       // 	A bridge method, generated by the compiler.
        const VARARGS = 0x0080;      // 	Declared with variable number of arguments.
        const NATIVE = 0x0100;       // 	Declared native; implemented in a language other than Java.
        const ABSTRACT = 0x0400;     // 	Declared abstract; no implementation is provided.
        const STRICT = 0x0800;       // 	Declared strictfp; floating-point mode is FP-strict.
        const SYNTHETIC = 0x1000;    // 	Declared synthetic; not present in the source code.
    }
}
