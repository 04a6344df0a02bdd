use crate::code_attribute::LocalVariableTableAttribute;
use crate::constant_info::{self, ConstantInfo};

/// A raw attribute; its payload is interpreted on demand by name.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeInfo {
    pub attribute_name_index: u16,
    pub attribute_length: u32,
    pub info: Vec<u8>,
}

impl AttributeInfo {
    /// The attribute's name, looked up in the owning class's constant pool.
    pub fn name<'a>(&self, const_pool: &'a [ConstantInfo]) -> Option<&'a str> {
        constant_info::utf8(const_pool, self.attribute_name_index)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExceptionEntry {
    pub start_pc: u16,
    pub end_pc: u16,
    pub handler_pc: u16,
    pub catch_type: u16,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CodeAttribute {
    pub max_stack: u16,
    pub max_locals: u16,
    pub code_length: u32,
    pub code: Vec<u8>,
    pub exception_table_length: u16,
    pub exception_table: Vec<ExceptionEntry>,
    pub attributes_count: u16,
    pub attributes: Vec<AttributeInfo>,
}

impl CodeAttribute {
    /// All LocalVariableTable entries, in the order they appear in the class file.
    ///
    /// A method may carry several LocalVariableTable attributes; their entries
    /// are concatenated.
    pub fn local_variable_table(
        &self,
        const_pool: &[ConstantInfo],
    ) -> Result<Option<LocalVariableTableAttribute>, String> {
        let mut merged: Option<LocalVariableTableAttribute> = None;
        for attr in &self.attributes {
            if attr.name(const_pool) != Some("LocalVariableTable") {
                continue;
            }
            let (_, table) = crate::code_attribute::local_variable_table_parser(&attr.info)
                .map_err(|e| format!("LocalVariableTable: {e}"))?;
            match merged.as_mut() {
                Some(existing) => {
                    existing.local_variable_table_length += table.local_variable_table_length;
                    existing.items.extend(table.items);
                }
                None => merged = Some(table),
            }
        }
        Ok(merged)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeAnnotation {
    pub type_index: u16,
    pub num_element_value_pairs: u16,
    pub element_value_pairs: Vec<ElementValuePair>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ElementValuePair {
    pub element_name_index: u16,
    pub value: ElementValue,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ElementValue {
    ConstValueIndex { tag: char, value: u16 },
    EnumConst(EnumConstValue),
    ClassInfoIndex(u16),
    AnnotationValue(RuntimeAnnotation),
    ElementArray(ElementArrayValue),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ElementArrayValue {
    pub num_values: u16,
    pub values: Vec<ElementValue>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumConstValue {
    pub type_name_index: u16,
    pub const_name_index: u16,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeAnnotationsAttribute {
    pub num_annotations: u16,
    pub annotations: Vec<RuntimeAnnotation>,
}
