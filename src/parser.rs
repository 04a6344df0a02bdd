use nom::{
    bytes::complete::tag,
    error::Error,
    multi::count,
    number::complete::be_u16,
    Err as BaseErr,
};

use crate::attribute_info::attribute_parser;
use crate::constant_info::constant_pool_parser;
use crate::field_info::field_parser;
use crate::method_info::method_parser;
use crate::types::{ClassAccessFlags, ClassFile};

type Err<E> = BaseErr<Error<E>>;

fn magic_parser(input: &[u8]) -> Result<(&[u8], &[u8]), Err<&[u8]>> {
    tag(&b"\xCA\xFE\xBA\xBE"[..])(input)
}

/// Parse the bytes of a class file.
pub fn class_parser(input: &[u8]) -> Result<(&[u8], ClassFile), Err<&[u8]>> {
    let (input, _) = magic_parser(input)?;
    let (input, minor_version) = be_u16(input)?;
    let (input, major_version) = be_u16(input)?;
    let (input, const_pool_size) = be_u16(input)?;
    let (input, const_pool) = constant_pool_parser(input, const_pool_size)?;
    let (input, access_flags) = be_u16(input)?;
    let (input, this_class) = be_u16(input)?;
    let (input, super_class) = be_u16(input)?;
    let (input, interfaces_count) = be_u16(input)?;
    let (input, interfaces) = count(be_u16, interfaces_count as usize)(input)?;
    let (input, fields_count) = be_u16(input)?;
    let (input, fields) = count(field_parser, fields_count as usize)(input)?;
    let (input, methods_count) = be_u16(input)?;
    let (input, methods) = count(method_parser, methods_count as usize)(input)?;
    let (input, attributes_count) = be_u16(input)?;
    let (input, attributes) = count(attribute_parser, attributes_count as usize)(input)?;
    Ok((
        input,
        ClassFile {
            minor_version,
            major_version,
            const_pool_size,
            const_pool,
            access_flags: ClassAccessFlags::from_bits_truncate(access_flags),
            this_class,
            super_class,
            interfaces_count,
            interfaces,
            fields_count,
            fields,
            methods_count,
            methods,
            attributes_count,
            attributes,
        },
    ))
}
