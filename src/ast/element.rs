use super::class::ClassId;
use super::member::MethodRef;

/// A local variable or formal argument.
#[derive(Clone, Debug, PartialEq)]
pub struct Variable {
    /// Local variable slot in the frame.
    pub slot: u16,
    /// `None` when no debug information names the slot.
    pub name: Option<String>,
    /// `None` when no debug information types the slot.
    pub ty: Option<ClassId>,
}

impl Variable {
    pub fn named(slot: u16, name: impl Into<String>, ty: ClassId) -> Self {
        Variable {
            slot,
            name: Some(name.into()),
            ty: Some(ty),
        }
    }

    /// A slot referenced by code but not described by any debug entry.
    pub fn unnamed(slot: u16) -> Self {
        Variable {
            slot,
            name: None,
            ty: None,
        }
    }

    /// Slot 0 of an instance method.
    pub fn is_this(&self) -> bool {
        self.slot == 0 && self.name.as_deref().map_or(true, |name| name == "this")
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Block {
    /// Locals declared by the body. Formal arguments are not repeated here.
    pub variables: Vec<Variable>,
    pub statements: Vec<Expr>,
}

impl Block {
    pub fn of(statement: Expr) -> Self {
        Block {
            variables: Vec::new(),
            statements: vec![statement],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Variable(Variable),
    Assignment {
        target: Variable,
        value: Box<Expr>,
    },
    MethodCall {
        target: Box<Expr>,
        method: MethodRef,
        /// In declaration order.
        arguments: Vec<Expr>,
    },
    Return(Option<Box<Expr>>),
    /// Verbatim target-language code standing in for a whole method body.
    NativeCode {
        language: String,
        code: String,
    },
    /// An operand produced by an instruction that is not translated, such as
    /// a field read or an object allocation. `pc` is the consuming instruction.
    Unresolved { pc: u32 },
}

impl Expr {
    /// The statement a stubbed method body consists of: a return of the
    /// default value of `ty`, or a bare return for `void`.
    pub fn default_return(ty: ClassId) -> Expr {
        match Literal::default_for(ty) {
            Literal::Void => Expr::Return(None),
            literal => Expr::Return(Some(Box::new(Expr::Literal(literal)))),
        }
    }
}

/// A typed constant.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Void,
    Boolean(bool),
    Char(char),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Null,
}

impl Literal {
    /// Default value of a type: `false` for booleans, `'\0'` for chars,
    /// integer zero for every numeric type, `null` for references.
    pub fn default_for(ty: ClassId) -> Literal {
        match ty {
            ClassId::VOID => Literal::Void,
            ClassId::BOOLEAN => Literal::Boolean(false),
            ClassId::CHAR => Literal::Char('\0'),
            ty if ty.is_numeric() => Literal::Int(0),
            _ => Literal::Null,
        }
    }

    /// Type of the constant. `null` has none.
    pub fn ty(&self) -> Option<ClassId> {
        Some(match self {
            Literal::Void => ClassId::VOID,
            Literal::Boolean(_) => ClassId::BOOLEAN,
            Literal::Char(_) => ClassId::CHAR,
            Literal::Byte(_) => ClassId::BYTE,
            Literal::Short(_) => ClassId::SHORT,
            Literal::Int(_) => ClassId::INT,
            Literal::Long(_) => ClassId::LONG,
            Literal::Float(_) => ClassId::FLOAT,
            Literal::Double(_) => ClassId::DOUBLE,
            Literal::String(_) => ClassId::STRING,
            Literal::Null => return None,
        })
    }
}
