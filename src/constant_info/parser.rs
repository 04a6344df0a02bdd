use nom::{
    bytes::complete::take,
    error::{Error, ErrorKind},
    number::complete::{be_f32, be_f64, be_i32, be_i64, be_u16, be_u8},
    Err as BaseErr,
};

use crate::constant_info::*;

type Err<E> = BaseErr<Error<E>>;

/// Decode a modified UTF-8 string: NUL is `C0 80` and supplementary
/// characters are surrogate pairs encoded separately.
fn utf8_constant(bytes: &[u8]) -> Option<Utf8Constant> {
    let utf8_string = cesu8::from_java_cesu8(bytes).ok()?.into_owned();
    Some(Utf8Constant {
        utf8_string,
        bytes: bytes.to_vec(),
    })
}

fn const_utf8(input: &[u8]) -> Result<(&[u8], ConstantInfo), Err<&[u8]>> {
    let (input, length) = be_u16(input)?;
    let (rest, bytes) = take(length)(input)?;
    let constant =
        utf8_constant(bytes).ok_or_else(|| BaseErr::Error(Error::new(input, ErrorKind::Char)))?;
    Ok((rest, ConstantInfo::Utf8(constant)))
}

fn ref_pair(input: &[u8]) -> Result<(&[u8], (u16, u16)), Err<&[u8]>> {
    let (input, first) = be_u16(input)?;
    let (input, second) = be_u16(input)?;
    Ok((input, (first, second)))
}

/// Parse a single constant pool entry, tag byte included.
pub fn constant_parser(input: &[u8]) -> Result<(&[u8], ConstantInfo), Err<&[u8]>> {
    let (input, const_type) = be_u8(input)?;
    match const_type {
        1 => const_utf8(input),
        3 => {
            let (input, value) = be_i32(input)?;
            Ok((input, ConstantInfo::Integer(IntegerConstant { value })))
        }
        4 => {
            let (input, value) = be_f32(input)?;
            Ok((input, ConstantInfo::Float(FloatConstant { value })))
        }
        5 => {
            let (input, value) = be_i64(input)?;
            Ok((input, ConstantInfo::Long(LongConstant { value })))
        }
        6 => {
            let (input, value) = be_f64(input)?;
            Ok((input, ConstantInfo::Double(DoubleConstant { value })))
        }
        7 => {
            let (input, name_index) = be_u16(input)?;
            Ok((input, ConstantInfo::Class(ClassConstant { name_index })))
        }
        8 => {
            let (input, string_index) = be_u16(input)?;
            Ok((input, ConstantInfo::String(StringConstant { string_index })))
        }
        9 => {
            let (input, (class_index, name_and_type_index)) = ref_pair(input)?;
            Ok((
                input,
                ConstantInfo::FieldRef(FieldRefConstant {
                    class_index,
                    name_and_type_index,
                }),
            ))
        }
        10 => {
            let (input, (class_index, name_and_type_index)) = ref_pair(input)?;
            Ok((
                input,
                ConstantInfo::MethodRef(MethodRefConstant {
                    class_index,
                    name_and_type_index,
                }),
            ))
        }
        11 => {
            let (input, (class_index, name_and_type_index)) = ref_pair(input)?;
            Ok((
                input,
                ConstantInfo::InterfaceMethodRef(InterfaceMethodRefConstant {
                    class_index,
                    name_and_type_index,
                }),
            ))
        }
        12 => {
            let (input, (name_index, descriptor_index)) = ref_pair(input)?;
            Ok((
                input,
                ConstantInfo::NameAndType(NameAndTypeConstant {
                    name_index,
                    descriptor_index,
                }),
            ))
        }
        15 => {
            let (input, reference_kind) = be_u8(input)?;
            let (input, reference_index) = be_u16(input)?;
            Ok((
                input,
                ConstantInfo::MethodHandle(MethodHandleConstant {
                    reference_kind,
                    reference_index,
                }),
            ))
        }
        16 => {
            let (input, descriptor_index) = be_u16(input)?;
            Ok((
                input,
                ConstantInfo::MethodType(MethodTypeConstant { descriptor_index }),
            ))
        }
        17 => {
            let (input, (bootstrap_method_attr_index, name_and_type_index)) = ref_pair(input)?;
            Ok((
                input,
                ConstantInfo::Dynamic(DynamicConstant {
                    bootstrap_method_attr_index,
                    name_and_type_index,
                }),
            ))
        }
        18 => {
            let (input, (bootstrap_method_attr_index, name_and_type_index)) = ref_pair(input)?;
            Ok((
                input,
                ConstantInfo::InvokeDynamic(InvokeDynamicConstant {
                    bootstrap_method_attr_index,
                    name_and_type_index,
                }),
            ))
        }
        19 => {
            let (input, name_index) = be_u16(input)?;
            Ok((input, ConstantInfo::Module(ModuleConstant { name_index })))
        }
        20 => {
            let (input, name_index) = be_u16(input)?;
            Ok((input, ConstantInfo::Package(PackageConstant { name_index })))
        }
        _ => Err(BaseErr::Error(Error::new(input, ErrorKind::Switch))),
    }
}

/// Parse `const_pool_size - 1` slots of constant pool.
///
/// Long and Double entries take two slots; the second one is filled with
/// [`ConstantInfo::Unusable`] so that 1-based indexing keeps working.
pub fn constant_pool_parser(
    input: &[u8],
    const_pool_size: u16,
) -> Result<(&[u8], Vec<ConstantInfo>), Err<&[u8]>> {
    let slots = (const_pool_size as usize).saturating_sub(1);
    let mut pool = Vec::with_capacity(slots);
    let mut input = input;
    while pool.len() < slots {
        let (rest, constant) = constant_parser(input)?;
        input = rest;
        let wide = matches!(constant, ConstantInfo::Long(_) | ConstantInfo::Double(_));
        pool.push(constant);
        if wide {
            pool.push(ConstantInfo::Unusable);
        }
    }
    Ok((input, pool))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_takes_two_slots() {
        // count = 4: Long (slots 1-2), Utf8 "a" (slot 3)
        let bytes = [5, 0, 0, 0, 0, 0, 0, 0, 7, 1, 0, 1, b'a'];
        let (rest, pool) = constant_pool_parser(&bytes, 4).unwrap();
        assert!(rest.is_empty());
        assert_eq!(pool.len(), 3);
        assert_eq!(pool[0], ConstantInfo::Long(LongConstant { value: 7 }));
        assert_eq!(pool[1], ConstantInfo::Unusable);
        assert_eq!(utf8(&pool, 3), Some("a"));
    }

    #[test]
    fn test_member_ref_resolution() {
        let pool = vec![
            ConstantInfo::Utf8(utf8_constant(b"pkg/Owner").unwrap()),
            ConstantInfo::Class(ClassConstant { name_index: 1 }),
            ConstantInfo::Utf8(utf8_constant(b"run").unwrap()),
            ConstantInfo::Utf8(utf8_constant(b"()V").unwrap()),
            ConstantInfo::NameAndType(NameAndTypeConstant {
                name_index: 3,
                descriptor_index: 4,
            }),
            ConstantInfo::MethodRef(MethodRefConstant {
                class_index: 2,
                name_and_type_index: 5,
            }),
        ];
        let r = member_ref(&pool, 6).unwrap();
        assert_eq!(r.class_name, "pkg/Owner");
        assert_eq!(r.name, "run");
        assert_eq!(r.descriptor, "()V");
        assert!(member_ref(&pool, 1).is_none());
        assert!(utf8(&pool, 0).is_none());
    }

    #[test]
    fn test_modified_utf8() {
        // "a", NUL, "b", then U+1F600 as a surrogate pair
        let bytes = [
            1, 0, 10, b'a', 0xC0, 0x80, b'b', 0xED, 0xA0, 0xBD, 0xED, 0xB8, 0x80,
        ];
        let (rest, constant) = constant_parser(&bytes).unwrap();
        assert!(rest.is_empty());
        match constant {
            ConstantInfo::Utf8(c) => {
                assert_eq!(c.utf8_string, "a\0b\u{1F600}");
                assert_eq!(c.bytes, &bytes[3..]);
            }
            other => panic!("expected Utf8, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_utf8() {
        assert!(constant_parser(&[1, 0, 2, b'a', 0xFF]).is_err());
    }

    #[test]
    fn test_unknown_tag() {
        assert!(constant_parser(&[2, 0, 0]).is_err());
    }
}
