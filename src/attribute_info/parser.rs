use nom::{
    bytes::complete::take,
    error::{Error, ErrorKind},
    multi::count,
    number::complete::{be_u16, be_u32, be_u8},
    Err as BaseErr,
};

use crate::attribute_info::*;

// Shorthand for the nom error type used by every parser below.
type Err<E> = BaseErr<Error<E>>;

pub fn attribute_parser(input: &[u8]) -> Result<(&[u8], AttributeInfo), Err<&[u8]>> {
    let (input, attribute_name_index) = be_u16(input)?;
    let (input, attribute_length) = be_u32(input)?;
    let (input, info) = take(attribute_length)(input)?;
    Ok((
        input,
        AttributeInfo {
            attribute_name_index,
            attribute_length,
            info: info.to_owned(),
        },
    ))
}

pub fn exception_entry_parser(input: &[u8]) -> Result<(&[u8], ExceptionEntry), Err<&[u8]>> {
    let (input, start_pc) = be_u16(input)?;
    let (input, end_pc) = be_u16(input)?;
    let (input, handler_pc) = be_u16(input)?;
    let (input, catch_type) = be_u16(input)?;
    Ok((
        input,
        ExceptionEntry {
            start_pc,
            end_pc,
            handler_pc,
            catch_type,
        },
    ))
}

pub fn code_attribute_parser(input: &[u8]) -> Result<(&[u8], CodeAttribute), Err<&[u8]>> {
    let (input, max_stack) = be_u16(input)?;
    let (input, max_locals) = be_u16(input)?;
    let (input, code_length) = be_u32(input)?;
    let (input, code) = take(code_length)(input)?;
    let (input, exception_table_length) = be_u16(input)?;
    let (input, exception_table) =
        count(exception_entry_parser, exception_table_length as usize)(input)?;
    let (input, attributes_count) = be_u16(input)?;
    let (input, attributes) = count(attribute_parser, attributes_count as usize)(input)?;
    Ok((
        input,
        CodeAttribute {
            max_stack,
            max_locals,
            code_length,
            code: code.to_owned(),
            exception_table_length,
            exception_table,
            attributes_count,
            attributes,
        },
    ))
}

/// Parses both RuntimeVisibleAnnotations and RuntimeInvisibleAnnotations;
/// the two share a layout.
pub fn runtime_annotations_attribute_parser(
    input: &[u8],
) -> Result<(&[u8], RuntimeAnnotationsAttribute), Err<&[u8]>> {
    let (input, num_annotations) = be_u16(input)?;
    let (input, annotations) = count(annotation_parser, num_annotations as usize)(input)?;
    Ok((
        input,
        RuntimeAnnotationsAttribute {
            num_annotations,
            annotations,
        },
    ))
}

pub fn annotation_parser(input: &[u8]) -> Result<(&[u8], RuntimeAnnotation), Err<&[u8]>> {
    let (input, type_index) = be_u16(input)?;
    let (input, num_element_value_pairs) = be_u16(input)?;
    let (input, element_value_pairs) =
        count(element_value_pair_parser, num_element_value_pairs as usize)(input)?;
    Ok((
        input,
        RuntimeAnnotation {
            type_index,
            num_element_value_pairs,
            element_value_pairs,
        },
    ))
}

fn element_value_pair_parser(input: &[u8]) -> Result<(&[u8], ElementValuePair), Err<&[u8]>> {
    let (input, element_name_index) = be_u16(input)?;
    let (input, value) = element_value_parser(input)?;
    Ok((
        input,
        ElementValuePair {
            element_name_index,
            value,
        },
    ))
}

fn array_value_parser(input: &[u8]) -> Result<(&[u8], ElementArrayValue), Err<&[u8]>> {
    let (input, num_values) = be_u16(input)?;
    let (input, values) = count(element_value_parser, num_values as usize)(input)?;
    Ok((input, ElementArrayValue { num_values, values }))
}

pub fn element_value_parser(input: &[u8]) -> Result<(&[u8], ElementValue), Err<&[u8]>> {
    let (input, tag) = be_u8(input)?;
    match tag as char {
        'B' | 'C' | 'I' | 'S' | 'Z' | 'D' | 'F' | 'J' | 's' => {
            let (input, value) = be_u16(input)?;
            Ok((
                input,
                ElementValue::ConstValueIndex {
                    tag: tag as char,
                    value,
                },
            ))
        }
        'e' => {
            let (input, type_name_index) = be_u16(input)?;
            let (input, const_name_index) = be_u16(input)?;
            Ok((
                input,
                ElementValue::EnumConst(EnumConstValue {
                    type_name_index,
                    const_name_index,
                }),
            ))
        }
        'c' => {
            let (input, class_info_index) = be_u16(input)?;
            Ok((input, ElementValue::ClassInfoIndex(class_info_index)))
        }
        '@' => {
            let (input, annotation_value) = annotation_parser(input)?;
            Ok((input, ElementValue::AnnotationValue(annotation_value)))
        }
        '[' => {
            let (input, array_value) = array_value_parser(input)?;
            Ok((input, ElementValue::ElementArray(array_value)))
        }
        _ => Err(BaseErr::Error(Error::new(input, ErrorKind::NoneOf))),
    }
}
