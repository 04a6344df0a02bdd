/// Computational kind of a typed load, store or return.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Int,
    Long,
    Float,
    Double,
    Reference,
}

impl ValueKind {
    /// Kinds in the order the JVM lays out typed opcode families
    /// (`iload, lload, fload, dload, aload`).
    pub(crate) fn from_family_offset(offset: u8) -> Option<ValueKind> {
        match offset {
            0 => Some(ValueKind::Int),
            1 => Some(ValueKind::Long),
            2 => Some(ValueKind::Float),
            3 => Some(ValueKind::Double),
            4 => Some(ValueKind::Reference),
            _ => None,
        }
    }
}

/// Method invocation kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InvokeKind {
    Virtual,
    Special,
    Static,
    Interface,
}

/// A decoded JVM instruction.
///
/// Opcode families that differ only by operand type or by an implicit slot
/// number (`iload_1`, `astore`, `wide aload`, ...) are folded into one variant.
/// Everything the translator does not model keeps enough operand data for a
/// later control-flow pass: branch offsets, switch tables and constant indices.
#[derive(Clone, Debug, PartialEq)]
pub enum Instruction {
    /// `iconst_m1` to `iconst_5`.
    IntConst(i32),
    LongConst(i64),
    FloatConst(f32),
    DoubleConst(f64),
    NullConst,
    Bipush(i8),
    Sipush(i16),
    /// `ldc`, `ldc_w` and `ldc2_w`.
    Ldc(u16),
    Load { kind: ValueKind, index: u16 },
    Store { kind: ValueKind, index: u16 },
    Invoke { kind: InvokeKind, index: u16 },
    InvokeDynamic(u16),
    /// `return` carries no kind; `ireturn`..`areturn` carry theirs.
    Return(Option<ValueKind>),
    /// `getstatic`, `putstatic`, `getfield`, `putfield`.
    FieldAccess { opcode: u8, index: u16 },
    /// `new`, `anewarray`, `checkcast`, `instanceof`.
    TypeOp { opcode: u8, index: u16 },
    Newarray(u8),
    Multianewarray { index: u16, dimensions: u8 },
    Iinc { index: u16, value: i16 },
    /// Conditional and unconditional jumps, including `jsr` and the `_w` forms.
    Branch { opcode: u8, offset: i32 },
    Ret(u16),
    Tableswitch {
        default: i32,
        low: i32,
        high: i32,
        offsets: Vec<i32>,
    },
    Lookupswitch { default: i32, pairs: Vec<(i32, i32)> },
    /// Any other operand-less instruction: arithmetic, conversions, array
    /// access, stack shuffling, `athrow`, monitors, `nop`.
    Plain(u8),
}

/// An instruction together with its byte offset in the code array.
#[derive(Clone, Debug, PartialEq)]
pub struct AddressedInstruction {
    pub address: u32,
    pub instruction: Instruction,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LocalVariableTableAttribute {
    pub local_variable_table_length: u16,
    pub items: Vec<LocalVariableTableItem>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LocalVariableTableItem {
    pub start_pc: u16,
    pub length: u16,
    pub name_index: u16,
    pub descriptor_index: u16,
    pub index: u16,
}

impl LocalVariableTableItem {
    /// Whether the variable is live at `pc`.
    pub fn covers(&self, pc: u32) -> bool {
        let start = u32::from(self.start_pc);
        pc >= start && pc < start + u32::from(self.length)
    }
}
