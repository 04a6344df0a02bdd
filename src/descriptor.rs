//! JVM type and method descriptor handling.
//!
//! Descriptors (`I`, `[Ljava/lang/String;`, `(IJ)V`) are turned into the
//! class-path form the registry resolves: `int`, `java/lang/String[]`, ...

use crate::error::{Error, Result};

/// Marker appended once per array dimension in a class path.
pub const ARRAY_MARKER: &str = "[]";

/// Find the single field-type token starting at `pos`.
/// Returns the token and the position right after it.
fn type_token_at(desc: &str, pos: usize) -> Option<(&str, usize)> {
    let bytes = desc.as_bytes();
    let mut end = pos;
    while *bytes.get(end)? == b'[' {
        end += 1;
    }
    match bytes[end] {
        b'B' | b'C' | b'D' | b'F' | b'I' | b'J' | b'S' | b'Z' | b'V' => {
            Some((&desc[pos..end + 1], end + 1))
        }
        b'L' => {
            let semi = desc[end + 1..].find(';')?;
            if semi == 0 {
                return None;
            }
            let next = end + 1 + semi + 1;
            Some((&desc[pos..next], next))
        }
        _ => None,
    }
}

fn malformed(desc: &str) -> Error {
    Error::MalformedDescriptor(desc.to_string())
}

/// Split a method descriptor into its argument-type tokens.
///
/// `"(I[JLjava/lang/String;)V"` → `["I", "[J", "Ljava/lang/String;"]`
pub fn argument_types(desc: &str) -> Result<Vec<&str>> {
    let arguments = argument_descriptor(desc)?;
    let inner = &arguments[1..arguments.len() - 1];
    let mut tokens = Vec::new();
    let mut pos = 0;
    while pos < inner.len() {
        let (token, next) = type_token_at(inner, pos).ok_or_else(|| malformed(desc))?;
        if token == "V" {
            return Err(malformed(desc));
        }
        tokens.push(token);
        pos = next;
    }
    Ok(tokens)
}

/// Number of formal arguments declared by a method descriptor.
pub fn argument_count(desc: &str) -> Result<usize> {
    Ok(argument_types(desc)?.len())
}

/// The parenthesised argument part of a method descriptor, `"(IJ)"` for `"(IJ)V"`.
///
/// Together with the method name this is a method's overload identity.
pub fn argument_descriptor(desc: &str) -> Result<&str> {
    if !desc.starts_with('(') {
        return Err(malformed(desc));
    }
    let close = desc.find(')').ok_or_else(|| malformed(desc))?;
    Ok(&desc[..=close])
}

/// The return-type token of a method descriptor.
pub fn return_type(desc: &str) -> Result<&str> {
    let close = argument_descriptor(desc)?.len();
    match type_token_at(desc, close) {
        Some((token, next)) if next == desc.len() => Ok(token),
        _ => Err(malformed(desc)),
    }
}

/// Convert a field-type token into the class-path form.
pub fn desc_to_path(desc: &str) -> Result<String> {
    if let Some(item) = desc.strip_prefix('[') {
        return Ok(desc_to_path(item)? + ARRAY_MARKER);
    }
    let path = match desc {
        "V" => "void",
        "Z" => "boolean",
        "C" => "char",
        "B" => "byte",
        "S" => "short",
        "I" => "int",
        "F" => "float",
        "J" => "long",
        "D" => "double",
        _ => {
            return desc
                .strip_prefix('L')
                .and_then(|rest| rest.strip_suffix(';'))
                .filter(|name| !name.is_empty() && !name.contains(';'))
                .map(str::to_string)
                .ok_or_else(|| malformed(desc));
        }
    };
    Ok(path.to_string())
}

/// Class names in constant pool Class entries are plain internal names,
/// except for array classes which use a field descriptor (`[I`).
pub fn class_ref_to_path(name: &str) -> Result<String> {
    if name.starts_with('[') {
        desc_to_path(name)
    } else {
        Ok(name.to_string())
    }
}

/// Number of array markers in a class path (`"Foo[][]"` → 2).
pub fn array_dimensions(class_path: &str) -> usize {
    class_path.matches(ARRAY_MARKER).count()
}

/// Item class path of an array class path (`"Foo[][]"` → `"Foo"`).
pub fn array_item(class_path: &str) -> &str {
    match class_path.find(ARRAY_MARKER) {
        Some(pos) => &class_path[..pos],
        None => class_path,
    }
}

/// Get just the simple class name from an internal name.
pub fn simple_class_name(name: &str) -> &str {
    match name.rfind('/') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

/// Get the package from an internal name, dotted (`"java.lang"`), or `""`.
pub fn package_name(name: &str) -> String {
    match name.rfind('/') {
        Some(pos) => name[..pos].replace('/', "."),
        None => String::new(),
    }
}
