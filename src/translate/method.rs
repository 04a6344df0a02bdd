use tracing::{debug, trace};

use crate::ast::{Access, Block, ClassId, Expr, MemberDescriptor, MethodDescriptor, Variable};
use crate::code_attribute::code_parser;
use crate::descriptor::{self, desc_to_path};
use crate::error::{Error, Result};
use crate::method_info::{MethodAccessFlags, MethodInfo};
use crate::registry::TypeRegistry;
use crate::types::ClassFile;

use super::locals::LocalTable;
use super::native::native_code;
use super::stack::StackSimulator;

/// Build the descriptor of one method of `owner`.
///
/// The body is, in order of precedence: the native-code annotation's code,
/// a default-value return when the policy declines the class, or the
/// simulated bytecode.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(class_path = %class_path, method = tracing::field::Empty)
)]
pub(super) fn translate_method(
    registry: &mut TypeRegistry,
    owner: ClassId,
    class_path: &str,
    class_file: &ClassFile,
    method: &MethodInfo,
) -> Result<MethodDescriptor> {
    let const_pool = &class_file.const_pool;
    let name = class_file
        .utf8(method.name_index)
        .ok_or_else(|| Error::unresolvable(class_path, method.name_index))?;
    let method_descriptor = class_file
        .utf8(method.descriptor_index)
        .ok_or_else(|| Error::unresolvable(class_path, method.descriptor_index))?;
    tracing::Span::current().record("method", name);

    let argument_types = descriptor::argument_types(method_descriptor)?;
    let return_type = registry.resolve(&desc_to_path(descriptor::return_type(method_descriptor)?)?)?;
    let is_static = method.access_flags.contains(MethodAccessFlags::STATIC);

    let full_name = registry.get(owner).full_name();
    let must_translate = registry.policy().must_translate_body(&full_name);
    let native = native_code(registry.options(), class_path, const_pool, method)?;
    let translate_body = must_translate && native.is_none();

    let code = method
        .code(const_pool)
        .map_err(|message| Error::class_format(class_path, message))?;
    let local_variable_table = match &code {
        Some(code) => code
            .local_variable_table(const_pool)
            .map_err(|message| Error::class_format(class_path, message))?,
        None => None,
    };
    let items = local_variable_table
        .as_ref()
        .map(|table| table.items.as_slice())
        .unwrap_or_default();
    let locals = LocalTable::reconcile(
        registry,
        class_path,
        const_pool,
        items,
        argument_types.len(),
        is_static,
        translate_body,
    )?;

    let body = if let Some(native) = native {
        debug!(language = %native.language, "native code body");
        Block::of(Expr::NativeCode {
            language: native.language,
            code: native.code,
        })
    } else if !must_translate {
        trace!("body not translated");
        Block::of(Expr::default_return(return_type))
    } else if let Some(code) = &code {
        let (_, instructions) = code_parser(&code.code)
            .map_err(|e| Error::class_format(class_path, format!("{name}: {e}")))?;
        let statements =
            StackSimulator::new(registry, class_path, name, const_pool, &locals).run(&instructions)?;
        Block {
            variables: locals.declarations.clone(),
            statements,
        }
    } else {
        Block::default()
    };

    let prefix = registry.options().argument_prefix.clone();
    let mut arguments = locals.arguments;
    default_arguments(registry, &mut arguments, &argument_types, is_static, &prefix)?;

    Ok(MethodDescriptor {
        member: MemberDescriptor {
            name: name.to_string(),
            ty: return_type,
            access: Access::from_flags(method.access_flags.bits()),
            is_static,
            is_final: method.access_flags.contains(MethodAccessFlags::FINAL),
        },
        descriptor: method_descriptor.to_string(),
        arguments,
        body,
    })
}

/// Name and type the formal arguments no debug entry described.
///
/// Positions already covered keep their debug-info variable; the rest are
/// named `<prefix><position>` and typed from the method descriptor.
fn default_arguments(
    registry: &mut TypeRegistry,
    arguments: &mut Vec<Variable>,
    argument_types: &[&str],
    is_static: bool,
    prefix: &str,
) -> Result<()> {
    let mut slot: u16 = if is_static { 0 } else { 1 };
    for (position, token) in argument_types.iter().enumerate() {
        if position >= arguments.len() {
            let ty = registry.resolve(&desc_to_path(token)?)?;
            arguments.push(Variable::named(slot, format!("{prefix}{position}"), ty));
        }
        slot += if matches!(*token, "J" | "D") { 2 } else { 1 };
    }
    Ok(())
}
