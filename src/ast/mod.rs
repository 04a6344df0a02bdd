//! Language-agnostic syntax tree produced by the translator.
//!
//! Class descriptors live in the [`TypeRegistry`](crate::TypeRegistry) arena
//! and point at each other through [`ClassId`] handles.

mod class;
mod element;
mod member;

pub use self::class::*;
pub use self::element::*;
pub use self::member::*;
