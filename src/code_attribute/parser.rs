use nom::{
    bytes::complete::take,
    error::{Error, ErrorKind},
    multi::count,
    number::complete::{be_i16, be_i32, be_i8, be_u16, be_u8},
    Err as BaseErr,
};

use crate::code_attribute::types::*;

type Err<E> = BaseErr<Error<E>>;

fn fail(input: &[u8], kind: ErrorKind) -> Err<&[u8]> {
    BaseErr::Error(Error::new(input, kind))
}

fn value_kind(input: &[u8], offset: u8) -> Result<ValueKind, Err<&[u8]>> {
    ValueKind::from_family_offset(offset).ok_or_else(|| fail(input, ErrorKind::Switch))
}

/// Bytes of padding after a switch opcode at `address`, so that the operands
/// start on a 4-byte boundary.
fn switch_padding(address: u32) -> u32 {
    (4 - (address + 1) % 4) % 4
}

fn wide_parser(input: &[u8]) -> Result<(&[u8], Instruction), Err<&[u8]>> {
    let (input, opcode) = be_u8(input)?;
    match opcode {
        0x15..=0x19 => {
            let kind = value_kind(input, opcode - 0x15)?;
            let (input, index) = be_u16(input)?;
            Ok((input, Instruction::Load { kind, index }))
        }
        0x36..=0x3a => {
            let kind = value_kind(input, opcode - 0x36)?;
            let (input, index) = be_u16(input)?;
            Ok((input, Instruction::Store { kind, index }))
        }
        0x84 => {
            let (input, index) = be_u16(input)?;
            let (input, value) = be_i16(input)?;
            Ok((input, Instruction::Iinc { index, value }))
        }
        0xa9 => {
            let (input, index) = be_u16(input)?;
            Ok((input, Instruction::Ret(index)))
        }
        _ => Err(fail(input, ErrorKind::Switch)),
    }
}

fn tableswitch_parser(input: &[u8], address: u32) -> Result<(&[u8], Instruction), Err<&[u8]>> {
    let (input, _) = take(switch_padding(address))(input)?;
    let (input, default) = be_i32(input)?;
    let (input, low) = be_i32(input)?;
    let (input, high) = be_i32(input)?;
    if high < low {
        return Err(fail(input, ErrorKind::Verify));
    }
    let entries = (i64::from(high) - i64::from(low) + 1) as usize;
    let (input, offsets) = count(be_i32, entries)(input)?;
    Ok((
        input,
        Instruction::Tableswitch {
            default,
            low,
            high,
            offsets,
        },
    ))
}

fn lookupswitch_parser(input: &[u8], address: u32) -> Result<(&[u8], Instruction), Err<&[u8]>> {
    let (input, _) = take(switch_padding(address))(input)?;
    let (input, default) = be_i32(input)?;
    let (input, npairs) = be_i32(input)?;
    if npairs < 0 {
        return Err(fail(input, ErrorKind::Verify));
    }
    let (input, pairs) = count(
        |input| {
            let (input, key) = be_i32(input)?;
            let (input, offset) = be_i32(input)?;
            Ok((input, (key, offset)))
        },
        npairs as usize,
    )(input)?;
    Ok((input, Instruction::Lookupswitch { default, pairs }))
}

/// Decode one instruction located at byte offset `address` of its code array.
///
/// The address is needed to compute `tableswitch`/`lookupswitch` padding.
pub fn instruction_parser(input: &[u8], address: u32) -> Result<(&[u8], Instruction), Err<&[u8]>> {
    let (input, opcode) = be_u8(input)?;
    match opcode {
        0x01 => Ok((input, Instruction::NullConst)),
        0x02..=0x08 => Ok((input, Instruction::IntConst(i32::from(opcode) - 0x03))),
        0x09 | 0x0a => Ok((input, Instruction::LongConst(i64::from(opcode - 0x09)))),
        0x0b..=0x0d => Ok((input, Instruction::FloatConst(f32::from(opcode - 0x0b)))),
        0x0e | 0x0f => Ok((input, Instruction::DoubleConst(f64::from(opcode - 0x0e)))),
        0x10 => {
            let (input, value) = be_i8(input)?;
            Ok((input, Instruction::Bipush(value)))
        }
        0x11 => {
            let (input, value) = be_i16(input)?;
            Ok((input, Instruction::Sipush(value)))
        }
        0x12 => {
            let (input, index) = be_u8(input)?;
            Ok((input, Instruction::Ldc(u16::from(index))))
        }
        0x13 | 0x14 => {
            let (input, index) = be_u16(input)?;
            Ok((input, Instruction::Ldc(index)))
        }
        0x15..=0x19 => {
            let kind = value_kind(input, opcode - 0x15)?;
            let (input, index) = be_u8(input)?;
            Ok((
                input,
                Instruction::Load {
                    kind,
                    index: u16::from(index),
                },
            ))
        }
        0x1a..=0x2d => {
            let n = opcode - 0x1a;
            let kind = value_kind(input, n / 4)?;
            Ok((
                input,
                Instruction::Load {
                    kind,
                    index: u16::from(n % 4),
                },
            ))
        }
        0x36..=0x3a => {
            let kind = value_kind(input, opcode - 0x36)?;
            let (input, index) = be_u8(input)?;
            Ok((
                input,
                Instruction::Store {
                    kind,
                    index: u16::from(index),
                },
            ))
        }
        0x3b..=0x4e => {
            let n = opcode - 0x3b;
            let kind = value_kind(input, n / 4)?;
            Ok((
                input,
                Instruction::Store {
                    kind,
                    index: u16::from(n % 4),
                },
            ))
        }
        0x84 => {
            let (input, index) = be_u8(input)?;
            let (input, value) = be_i8(input)?;
            Ok((
                input,
                Instruction::Iinc {
                    index: u16::from(index),
                    value: i16::from(value),
                },
            ))
        }
        0x99..=0xa8 | 0xc6 | 0xc7 => {
            let (input, offset) = be_i16(input)?;
            Ok((
                input,
                Instruction::Branch {
                    opcode,
                    offset: i32::from(offset),
                },
            ))
        }
        0xc8 | 0xc9 => {
            let (input, offset) = be_i32(input)?;
            Ok((input, Instruction::Branch { opcode, offset }))
        }
        0xa9 => {
            let (input, index) = be_u8(input)?;
            Ok((input, Instruction::Ret(u16::from(index))))
        }
        0xaa => tableswitch_parser(input, address),
        0xab => lookupswitch_parser(input, address),
        0xac..=0xb0 => {
            let kind = value_kind(input, opcode - 0xac)?;
            Ok((input, Instruction::Return(Some(kind))))
        }
        0xb1 => Ok((input, Instruction::Return(None))),
        0xb2..=0xb5 => {
            let (input, index) = be_u16(input)?;
            Ok((input, Instruction::FieldAccess { opcode, index }))
        }
        0xb6..=0xb8 => {
            let kind = match opcode {
                0xb6 => InvokeKind::Virtual,
                0xb7 => InvokeKind::Special,
                _ => InvokeKind::Static,
            };
            let (input, index) = be_u16(input)?;
            Ok((input, Instruction::Invoke { kind, index }))
        }
        0xb9 => {
            let (input, index) = be_u16(input)?;
            // argument count and a zero byte, both redundant with the descriptor
            let (input, _) = take(2u8)(input)?;
            Ok((
                input,
                Instruction::Invoke {
                    kind: InvokeKind::Interface,
                    index,
                },
            ))
        }
        0xba => {
            let (input, index) = be_u16(input)?;
            let (input, _) = take(2u8)(input)?;
            Ok((input, Instruction::InvokeDynamic(index)))
        }
        0xbb | 0xbd | 0xc0 | 0xc1 => {
            let (input, index) = be_u16(input)?;
            Ok((input, Instruction::TypeOp { opcode, index }))
        }
        0xbc => {
            let (input, atype) = be_u8(input)?;
            Ok((input, Instruction::Newarray(atype)))
        }
        0xc4 => wide_parser(input),
        0xc5 => {
            let (input, index) = be_u16(input)?;
            let (input, dimensions) = be_u8(input)?;
            Ok((input, Instruction::Multianewarray { index, dimensions }))
        }
        0x00 | 0x2e..=0x35 | 0x4f..=0x83 | 0x85..=0x98 | 0xbe | 0xbf | 0xc2 | 0xc3 | 0xca
        | 0xfe | 0xff => Ok((input, Instruction::Plain(opcode))),
        _ => Err(fail(input, ErrorKind::Switch)),
    }
}

/// Decode a whole code array, keeping each instruction's byte offset.
pub fn code_parser(code: &[u8]) -> Result<(&[u8], Vec<AddressedInstruction>), Err<&[u8]>> {
    let mut instructions = Vec::new();
    let mut rest = code;
    while !rest.is_empty() {
        let address = (code.len() - rest.len()) as u32;
        let (next, instruction) = instruction_parser(rest, address)?;
        instructions.push(AddressedInstruction {
            address,
            instruction,
        });
        rest = next;
    }
    Ok((rest, instructions))
}

pub fn local_variable_table_parser(
    input: &[u8],
) -> Result<(&[u8], LocalVariableTableAttribute), Err<&[u8]>> {
    let (input, local_variable_table_length) = be_u16(input)?;
    let (input, items) = count(
        local_variable_table_item_parser,
        local_variable_table_length as usize,
    )(input)?;
    Ok((
        input,
        LocalVariableTableAttribute {
            local_variable_table_length,
            items,
        },
    ))
}

fn local_variable_table_item_parser(
    input: &[u8],
) -> Result<(&[u8], LocalVariableTableItem), Err<&[u8]>> {
    let (input, start_pc) = be_u16(input)?;
    let (input, length) = be_u16(input)?;
    let (input, name_index) = be_u16(input)?;
    let (input, descriptor_index) = be_u16(input)?;
    let (input, index) = be_u16(input)?;
    Ok((
        input,
        LocalVariableTableItem {
            start_pc,
            length,
            name_index,
            descriptor_index,
            index,
        },
    ))
}
