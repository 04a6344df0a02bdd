//! Back ends consume the translated classes through [`Emitter`].

use crate::ast::ClassDescriptor;
use crate::registry::TypeRegistry;

/// A target-language generator.
///
/// It gets the whole registry along with each class so it can follow
/// [`ClassId`](crate::ClassId) handles to superclasses and member types.
pub trait Emitter {
    type Error;

    fn emit(&mut self, registry: &TypeRegistry, class: &ClassDescriptor) -> Result<(), Self::Error>;
}

/// Hand every discovered class to `emitter`, in discovery order.
///
/// Stops at the first error.
pub fn emit_all<E: Emitter>(registry: &TypeRegistry, emitter: &mut E) -> Result<(), E::Error> {
    for (_, class) in registry.discovered() {
        emitter.emit(registry, class)?;
    }
    Ok(())
}
