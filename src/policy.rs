//! Decides which method bodies get translated.
//!
//! Classes outside the caller's interest still get their signatures recorded,
//! but their bodies are replaced by a return of the default value.

/// Asked once per method with the dotted full name of its declaring class.
pub trait ParsePolicy {
    fn must_translate_body(&self, full_class_name: &str) -> bool;
}

impl<F> ParsePolicy for F
where
    F: Fn(&str) -> bool,
{
    fn must_translate_body(&self, full_class_name: &str) -> bool {
        self(full_class_name)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TranslateAll;

impl ParsePolicy for TranslateAll {
    fn must_translate_body(&self, _full_class_name: &str) -> bool {
        true
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TranslateNone;

impl ParsePolicy for TranslateNone {
    fn must_translate_body(&self, _full_class_name: &str) -> bool {
        false
    }
}

/// Translates classes in the given packages and their sub-packages.
#[derive(Clone, Debug, Default)]
pub struct PackagePolicy {
    packages: Vec<String>,
}

impl PackagePolicy {
    pub fn new<I, S>(packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PackagePolicy {
            packages: packages.into_iter().map(Into::into).collect(),
        }
    }
}

impl ParsePolicy for PackagePolicy {
    fn must_translate_body(&self, full_class_name: &str) -> bool {
        let package = match full_class_name.rfind('.') {
            Some(pos) => &full_class_name[..pos],
            None => "",
        };
        self.packages.iter().any(|p| {
            package == p
                || (package.starts_with(p.as_str()) && package.as_bytes().get(p.len()) == Some(&b'.'))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_policy() {
        let policy = PackagePolicy::new(["com.acme"]);
        assert!(policy.must_translate_body("com.acme.Foo"));
        assert!(policy.must_translate_body("com.acme.util.Bar"));
        assert!(!policy.must_translate_body("com.acmeco.Foo"));
        assert!(!policy.must_translate_body("java.lang.Object"));
        assert!(!policy.must_translate_body("Foo"));
    }

    #[test]
    fn test_closure_policy() {
        let policy = |name: &str| name.ends_with("Impl");
        assert!(policy.must_translate_body("pkg.FooImpl"));
        assert!(!policy.must_translate_body("pkg.Foo"));
        assert!(TranslateAll.must_translate_body("x.Y"));
        assert!(!TranslateNone.must_translate_body("x.Y"));
    }
}
