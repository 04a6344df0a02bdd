use tracing::warn;

use crate::attribute_info::ElementValue;
use crate::constant_info::{utf8, ConstantInfo};
use crate::error::{Error, Result};
use crate::method_info::MethodInfo;

use super::TranslateOptions;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct NativeCode {
    pub language: String,
    pub code: String,
}

/// The native-code annotation on a method, if any.
///
/// Both visible and invisible annotations count. A missing `language` or
/// `value` element becomes an empty string.
pub(super) fn native_code(
    options: &TranslateOptions,
    class_path: &str,
    const_pool: &[ConstantInfo],
    method: &MethodInfo,
) -> Result<Option<NativeCode>> {
    let annotations = method
        .annotations(const_pool)
        .map_err(|message| Error::class_format(class_path, message))?;

    let Some(annotation) = annotations
        .iter()
        .find(|a| utf8(const_pool, a.type_index) == Some(options.native_annotation.as_str()))
    else {
        return Ok(None);
    };

    let mut native = NativeCode {
        language: String::new(),
        code: String::new(),
    };
    for pair in &annotation.element_value_pairs {
        let value = match &pair.value {
            ElementValue::ConstValueIndex { tag: 's', value } => utf8(const_pool, *value),
            _ => None,
        };
        match (utf8(const_pool, pair.element_name_index), value) {
            (Some("language"), Some(language)) => native.language = language.to_string(),
            (Some("value"), Some(code)) => native.code = code.to_string(),
            _ => {}
        }
    }
    if native.language.is_empty() || native.code.is_empty() {
        warn!(class_path, "incomplete native code annotation");
    }
    Ok(Some(native))
}
