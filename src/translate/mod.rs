//! Bytecode to syntax tree translation.
//!
//! [`class`] builds a class descriptor from a parsed class file, [`method`]
//! does the same for each method, delegating bodies to the operand stack
//! simulation in [`stack`].

mod class;
mod locals;
mod method;
mod native;
mod stack;

pub(crate) use self::class::translate_class;

/// Annotation marking a method whose body is supplied verbatim in a target
/// language. Its `language` and `value` elements name the language and
/// carry the code.
pub const NATIVE_ANNOTATION: &str = "Lorg/nibiru/j2x/ast/J2xNative;";

/// Prefix of the names given to formal arguments no debug entry names:
/// `a0`, `a1`, ...
pub const ARGUMENT_PREFIX: &str = "a";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranslateOptions {
    /// Field descriptor of the native-code annotation.
    pub native_annotation: String,
    pub argument_prefix: String,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        TranslateOptions {
            native_annotation: NATIVE_ANNOTATION.to_string(),
            argument_prefix: ARGUMENT_PREFIX.to_string(),
        }
    }
}
