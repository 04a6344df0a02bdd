use super::class::{Access, ClassId};
use super::element::{Block, Expr, Variable};

pub const CONSTRUCTOR_NAME: &str = "<init>";
pub const STATIC_CONSTRUCTOR_NAME: &str = "<clinit>";

/// What fields and methods have in common.
#[derive(Clone, Debug, PartialEq)]
pub struct MemberDescriptor {
    pub name: String,
    /// Field type, or method return type.
    pub ty: ClassId,
    pub access: Access,
    pub is_static: bool,
    pub is_final: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldDescriptor {
    pub member: MemberDescriptor,
    pub declaring_class: ClassId,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MethodDescriptor {
    pub member: MemberDescriptor,
    /// Raw method descriptor, e.g. `(ILjava/lang/String;)V`.
    pub descriptor: String,
    pub arguments: Vec<Variable>,
    pub body: Block,
}

impl MethodDescriptor {
    pub fn name(&self) -> &str {
        &self.member.name
    }

    pub fn return_type(&self) -> ClassId {
        self.member.ty
    }

    /// The argument part of the descriptor, `(ILjava/lang/String;)`.
    pub fn argument_descriptor(&self) -> &str {
        argument_part(&self.descriptor)
    }

    pub fn is_overload_of(&self, name: &str, argument_descriptor: &str) -> bool {
        self.member.name == name && self.argument_descriptor() == argument_part(argument_descriptor)
    }

    pub fn is_constructor(&self) -> bool {
        self.member.name == CONSTRUCTOR_NAME || self.member.name == STATIC_CONSTRUCTOR_NAME
    }

    /// The call that chains an instance constructor to a base constructor.
    ///
    /// This is the first statement of an `<init>` body when that statement
    /// invokes another `<init>` on `this`. Everything else, including empty
    /// and stubbed bodies, has none.
    pub fn base_constructor_call(&self) -> Option<&Expr> {
        if self.member.name != CONSTRUCTOR_NAME {
            return None;
        }
        let first = self.body.statements.first()?;
        match first {
            Expr::MethodCall { target, method, .. }
                if method.name == CONSTRUCTOR_NAME
                    && matches!(target.as_ref(), Expr::Variable(v) if v.is_this()) =>
            {
                Some(first)
            }
            _ => None,
        }
    }
}

/// Reference to a method by owner and overload identity.
///
/// Call sites hold a reference rather than the descriptor itself: the target
/// may be the method currently being translated, or one on a system type
/// that has no translated methods at all.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MethodRef {
    pub owner: ClassId,
    pub name: String,
    /// Raw descriptor as written at the call site.
    pub descriptor: String,
}

impl MethodRef {
    pub fn argument_descriptor(&self) -> &str {
        argument_part(&self.descriptor)
    }
}

fn argument_part(descriptor: &str) -> &str {
    match descriptor.find(')') {
        Some(close) => &descriptor[..=close],
        None => descriptor,
    }
}
