use tracing::{debug, warn};

use crate::ast::{
    Access, ClassDescriptor, ClassId, ClassKind, FieldDescriptor, MemberDescriptor,
    MethodDescriptor,
};
use crate::descriptor::{desc_to_path, package_name, simple_class_name};
use crate::error::{Error, Result};
use crate::field_info::{FieldAccessFlags, FieldInfo};
use crate::registry::TypeRegistry;
use crate::types::ClassFile;

use super::method::translate_method;

/// Turn a parsed class file into a registered class descriptor.
///
/// The descriptor is registered under `class_path` before anything it
/// refers to is resolved, so references back to it find the same handle.
#[tracing::instrument(level = "debug", skip(registry, class_file))]
pub(crate) fn translate_class(
    registry: &mut TypeRegistry,
    class_path: &str,
    class_file: &ClassFile,
) -> Result<ClassId> {
    let name = class_file
        .class_name()
        .ok_or_else(|| Error::unresolvable(class_path, class_file.this_class))?;
    if name != class_path {
        warn!(declared = name, "class file declares a different name");
    }

    let id = registry.insert_discovered(
        class_path,
        ClassDescriptor::new(
            simple_class_name(name),
            package_name(name),
            None,
            Access::from_flags(class_file.access_flags.bits()),
            ClassKind::Parsed,
        ),
    );

    let super_name = match class_file.super_class {
        0 => None,
        index => Some(
            class_file
                .super_class_name()
                .ok_or_else(|| Error::unresolvable(class_path, index))?,
        ),
    };
    let super_class = registry.resolve_optional(super_name)?;
    registry.get_mut(id).super_class = super_class;

    for field in &class_file.fields {
        let field = translate_field(registry, id, class_path, class_file, field)?;
        registry.get_mut(id).fields.push(field);
    }

    for method in &class_file.methods {
        let method = translate_method(registry, id, class_path, class_file, method)?;
        add_method(registry, id, method);
    }

    debug!(
        fields = class_file.fields.len(),
        methods = registry.get(id).methods.len(),
        "class translated"
    );
    Ok(id)
}

fn translate_field(
    registry: &mut TypeRegistry,
    owner: ClassId,
    class_path: &str,
    class_file: &ClassFile,
    field: &FieldInfo,
) -> Result<FieldDescriptor> {
    let name = class_file
        .utf8(field.name_index)
        .ok_or_else(|| Error::unresolvable(class_path, field.name_index))?;
    let descriptor = class_file
        .utf8(field.descriptor_index)
        .ok_or_else(|| Error::unresolvable(class_path, field.descriptor_index))?;
    let ty = registry.resolve(&desc_to_path(descriptor)?)?;

    Ok(FieldDescriptor {
        member: MemberDescriptor {
            name: name.to_string(),
            ty,
            access: Access::from_flags(field.access_flags.bits()),
            is_static: field.access_flags.contains(FieldAccessFlags::STATIC),
            is_final: field.access_flags.contains(FieldAccessFlags::FINAL),
        },
        declaring_class: owner,
    })
}

/// Record a method, keeping one entry per overload identity.
///
/// When a class file carries several methods differing only in return type
/// (covariant bridges), the one with the most specific return type is kept,
/// in the position of the first one seen.
fn add_method(registry: &mut TypeRegistry, owner: ClassId, method: MethodDescriptor) {
    let existing = registry
        .get(owner)
        .methods
        .iter()
        .position(|m| m.is_overload_of(method.name(), method.argument_descriptor()));

    let Some(position) = existing else {
        registry.get_mut(owner).methods.push(method);
        return;
    };

    let existing_type = registry.get(owner).methods[position].return_type();
    if registry.is_assignable_from(method.return_type(), existing_type) {
        debug!(method = method.name(), "keeping more specific overload");
    } else {
        registry.get_mut(owner).methods[position] = method;
    }
}
