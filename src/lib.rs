//! Translates compiled JVM [class files](https://docs.oracle.com/javase/specs/jvms/se10/html/jvms-4.html)
//! into a language-agnostic syntax tree that code generators can walk.
//!
//! ```no_run
//! use classfile_ast::{translate, DirectorySource, PackagePolicy};
//!
//! let registry = translate(
//!     "com/acme/Main",
//!     DirectorySource::new("target/classes"),
//!     PackagePolicy::new(["com.acme"]),
//! )
//! .unwrap();
//! for (class_path, class) in registry.discovered() {
//!     println!("{class_path}: {} methods", class.methods.len());
//! }
//! ```

#[macro_use]
extern crate bitflags;

pub mod attribute_info;
pub mod code_attribute;
pub mod constant_info;
pub mod field_info;
pub mod method_info;

pub mod ast;
pub mod descriptor;
pub mod emit;
pub mod error;
pub mod parser;
pub mod policy;
pub mod registry;
pub mod source;
pub mod translate;
pub mod types;

use tracing::warn;

pub use ast::{ClassDescriptor, ClassId};
pub use emit::{emit_all, Emitter};
pub use error::{Error, Result};
pub use parser::class_parser;
pub use policy::{PackagePolicy, ParsePolicy, TranslateAll, TranslateNone};
pub use registry::TypeRegistry;
#[cfg(feature = "jar")]
pub use source::JarSource;
pub use source::{ClassPath, ClassSource, DirectorySource, MemorySource};
pub use translate::TranslateOptions;
pub use types::*;

/// Parse class-file bytes. `class_path` only labels errors and log events.
pub fn parse_class_bytes(class_path: &str, bytes: &[u8]) -> Result<ClassFile> {
    match class_parser(bytes) {
        Ok((rest, class_file)) => {
            if !rest.is_empty() {
                warn!(class_path, remaining = rest.len(), "trailing bytes after class file");
            }
            Ok(class_file)
        }
        Err(e) => Err(Error::class_format(class_path, e.to_string())),
    }
}

/// Translate the class at `class_path` and everything it transitively
/// refers to, returning the populated registry.
pub fn translate(
    class_path: &str,
    source: impl ClassSource + 'static,
    policy: impl ParsePolicy + 'static,
) -> Result<TypeRegistry> {
    let mut registry = TypeRegistry::new(source, policy);
    registry.resolve(class_path)?;
    Ok(registry)
}
