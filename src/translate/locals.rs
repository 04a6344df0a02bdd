use crate::ast::Variable;
use crate::code_attribute::LocalVariableTableItem;
use crate::constant_info::{utf8, ConstantInfo};
use crate::descriptor::desc_to_path;
use crate::error::{Error, Result};
use crate::registry::TypeRegistry;

/// A named local together with the debug entry giving its live range.
#[derive(Debug)]
struct ScopedVariable {
    item: LocalVariableTableItem,
    variable: Variable,
}

/// Debug-info locals of one method, split into formal arguments and body
/// declarations, plus slot lookup for the stack simulation.
#[derive(Debug, Default)]
pub(super) struct LocalTable {
    scoped: Vec<ScopedVariable>,
    pub arguments: Vec<Variable>,
    pub declarations: Vec<Variable>,
}

impl LocalTable {
    /// Walk the debug entries in class-file order.
    ///
    /// Slot 0 of an instance method is `this` and is neither an argument nor
    /// a declaration. The first `argument_count` other entries are the formal
    /// arguments; the rest are body locals, kept only when the body itself is
    /// going to be translated.
    pub fn reconcile(
        registry: &mut TypeRegistry,
        class_path: &str,
        const_pool: &[ConstantInfo],
        items: &[LocalVariableTableItem],
        argument_count: usize,
        is_static: bool,
        translate_body: bool,
    ) -> Result<Self> {
        let mut table = LocalTable::default();
        let mut remaining_arguments = argument_count;

        for item in items {
            let is_this = !is_static && item.index == 0;
            let is_argument = !is_this && remaining_arguments > 0;
            if !is_this && !is_argument && !translate_body {
                continue;
            }

            let name = utf8(const_pool, item.name_index)
                .ok_or_else(|| Error::unresolvable(class_path, item.name_index))?;
            let descriptor = utf8(const_pool, item.descriptor_index)
                .ok_or_else(|| Error::unresolvable(class_path, item.descriptor_index))?;
            let ty = registry.resolve(&desc_to_path(descriptor)?)?;
            let variable = Variable::named(item.index, name, ty);

            if is_argument {
                remaining_arguments -= 1;
                table.arguments.push(variable.clone());
            } else if !is_this {
                table.declarations.push(variable.clone());
            }
            table.scoped.push(ScopedVariable {
                item: item.clone(),
                variable,
            });
        }
        Ok(table)
    }

    /// The variable in `slot` at `pc`.
    ///
    /// Falls back to the last entry for the slot when none is live at `pc`,
    /// and to an unnamed variable when the slot has no entry at all.
    pub fn variable(&self, slot: u16, pc: u32) -> Variable {
        let mut fallback = None;
        for scoped in self.scoped.iter().filter(|s| s.variable.slot == slot) {
            if scoped.item.covers(pc) {
                return scoped.variable.clone();
            }
            fallback = Some(&scoped.variable);
        }
        fallback
            .cloned()
            .unwrap_or_else(|| Variable::unnamed(slot))
    }
}
