use nom::{
    error::Error,
    multi::count,
    number::complete::be_u16,
    Err as BaseErr,
};

use crate::attribute_info::attribute_parser;
use crate::field_info::{FieldAccessFlags, FieldInfo};

type Err<E> = BaseErr<Error<E>>;

pub fn field_parser(input: &[u8]) -> Result<(&[u8], FieldInfo), Err<&[u8]>> {
    let (input, access_flags) = be_u16(input)?;
    let (input, name_index) = be_u16(input)?;
    let (input, descriptor_index) = be_u16(input)?;
    let (input, attributes_count) = be_u16(input)?;
    let (input, attributes) = count(attribute_parser, attributes_count as usize)(input)?;
    Ok((
        input,
        FieldInfo {
            access_flags: FieldAccessFlags::from_bits_truncate(access_flags),
            name_index,
            descriptor_index,
            attributes_count,
            attributes,
        },
    ))
}
