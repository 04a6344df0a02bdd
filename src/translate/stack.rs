//! Operand stack simulation.
//!
//! Each instruction pops the expressions it consumes and pushes the
//! expression it produces. Whatever is left on the stack once the last
//! instruction has been visited becomes the statement list, bottom first.
//!
//! Instructions outside the translated set are skipped without their stack
//! effect, so a consumer may find the stack short. The missing operand then
//! becomes an [`Expr::Unresolved`] placeholder.

use tracing::{trace, warn};

use crate::ast::{Expr, Literal, MethodRef};
use crate::code_attribute::{AddressedInstruction, Instruction, InvokeKind};
use crate::constant_info::{member_ref, utf8, ConstantInfo};
use crate::descriptor::{argument_count, class_ref_to_path};
use crate::error::{Error, Result};
use crate::registry::TypeRegistry;

use super::locals::LocalTable;

pub(super) struct StackSimulator<'a> {
    registry: &'a mut TypeRegistry,
    class_path: &'a str,
    method_name: &'a str,
    const_pool: &'a [ConstantInfo],
    locals: &'a LocalTable,
    stack: Vec<Expr>,
}

impl<'a> StackSimulator<'a> {
    pub fn new(
        registry: &'a mut TypeRegistry,
        class_path: &'a str,
        method_name: &'a str,
        const_pool: &'a [ConstantInfo],
        locals: &'a LocalTable,
    ) -> Self {
        StackSimulator {
            registry,
            class_path,
            method_name,
            const_pool,
            locals,
            stack: Vec::new(),
        }
    }

    pub fn run(mut self, instructions: &[AddressedInstruction]) -> Result<Vec<Expr>> {
        for (i, addressed) in instructions.iter().enumerate() {
            let pc = addressed.address;
            let next_pc = instructions.get(i + 1).map_or(pc + 1, |next| next.address);
            self.visit(&addressed.instruction, pc, next_pc)?;
        }
        Ok(self.stack)
    }

    fn visit(&mut self, instruction: &Instruction, pc: u32, next_pc: u32) -> Result<()> {
        match instruction {
            Instruction::IntConst(value) => self.push_literal(Literal::Int(*value)),
            Instruction::LongConst(value) => self.push_literal(Literal::Long(*value)),
            Instruction::FloatConst(value) => self.push_literal(Literal::Float(*value)),
            Instruction::DoubleConst(value) => self.push_literal(Literal::Double(*value)),
            Instruction::NullConst => self.push_literal(Literal::Null),
            Instruction::Bipush(value) => self.push_literal(Literal::Byte(*value)),
            Instruction::Sipush(value) => self.push_literal(Literal::Short(*value)),
            Instruction::Ldc(index) => {
                if let Some(literal) = self.constant(*index)? {
                    self.push_literal(literal);
                } else {
                    trace!(pc, index, "constant not translated");
                }
            }
            Instruction::Load { index, .. } => {
                let variable = self.locals.variable(*index, pc);
                self.stack.push(Expr::Variable(variable));
            }
            Instruction::Store { index, .. } => {
                let value = self.pop(pc);
                // A store starts the scope of the variable it writes.
                let target = self.locals.variable(*index, next_pc);
                self.stack.push(Expr::Assignment {
                    target,
                    value: Box::new(value),
                });
            }
            Instruction::Invoke {
                kind: InvokeKind::Virtual | InvokeKind::Special,
                index,
            } => self.invoke(*index, pc)?,
            Instruction::Return(Some(_)) => {
                let value = self.pop(pc);
                self.stack.push(Expr::Return(Some(Box::new(value))));
            }
            Instruction::Return(None) => self.stack.push(Expr::Return(None)),
            _ => trace!(pc, ?instruction, "instruction not translated"),
        }
        Ok(())
    }

    fn push_literal(&mut self, literal: Literal) {
        self.stack.push(Expr::Literal(literal));
    }

    fn pop(&mut self, pc: u32) -> Expr {
        self.stack.pop().unwrap_or_else(|| {
            warn!(
                class_path = self.class_path,
                method = self.method_name,
                pc,
                "operand from an untranslated instruction"
            );
            Expr::Unresolved { pc }
        })
    }

    /// Pop the arguments, then the receiver, and push the call.
    fn invoke(&mut self, index: u16, pc: u32) -> Result<()> {
        let member = member_ref(self.const_pool, index)
            .ok_or_else(|| Error::unresolvable(self.class_path, index))?;
        let count = argument_count(member.descriptor)?;

        let mut arguments = Vec::with_capacity(count);
        for _ in 0..count {
            arguments.push(self.pop(pc));
        }
        arguments.reverse();
        let target = self.pop(pc);

        let owner = self.registry.resolve(&class_ref_to_path(member.class_name)?)?;
        self.stack.push(Expr::MethodCall {
            target: Box::new(target),
            method: MethodRef {
                owner,
                name: member.name.to_string(),
                descriptor: member.descriptor.to_string(),
            },
            arguments,
        });
        Ok(())
    }

    /// Literal for an `ldc` operand. Class, method type, method handle and
    /// dynamic constants have no literal form.
    fn constant(&self, index: u16) -> Result<Option<Literal>> {
        let entry = (index as usize)
            .checked_sub(1)
            .and_then(|i| self.const_pool.get(i))
            .ok_or_else(|| Error::unresolvable(self.class_path, index))?;
        let literal = match entry {
            ConstantInfo::Integer(c) => Literal::Int(c.value),
            ConstantInfo::Float(c) => Literal::Float(c.value),
            ConstantInfo::Long(c) => Literal::Long(c.value),
            ConstantInfo::Double(c) => Literal::Double(c.value),
            ConstantInfo::String(c) => Literal::String(
                utf8(self.const_pool, c.string_index)
                    .ok_or_else(|| Error::unresolvable(self.class_path, c.string_index))?
                    .to_string(),
            ),
            ConstantInfo::Class(_)
            | ConstantInfo::MethodType(_)
            | ConstantInfo::MethodHandle(_)
            | ConstantInfo::Dynamic(_) => return Ok(None),
            _ => return Err(Error::unresolvable(self.class_path, index)),
        };
        Ok(Some(literal))
    }
}
