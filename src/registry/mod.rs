//! The type registry: a cache of every class descriptor met during a run.
//!
//! Resolving a class path either returns the cached descriptor or loads the
//! class from the [`ClassSource`], translates it, and caches it. A class is
//! cached *before* its superclass, members and bodies are resolved, so
//! classes that mention themselves or each other terminate and share a
//! single descriptor.

mod system;

use std::ops::Index;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::ast::{Access, ClassDescriptor, ClassId, ClassKind, MethodDescriptor};
use crate::descriptor::{array_dimensions, array_item, ARRAY_MARKER};
use crate::error::{Error, Result};
use crate::policy::ParsePolicy;
use crate::source::ClassSource;
use crate::translate::{self, TranslateOptions};

use self::system::{system_descriptor, SYSTEM_TYPES};

pub struct TypeRegistry {
    classes: Vec<ClassDescriptor>,
    by_path: FxHashMap<String, ClassId>,
    /// Translated classes in the order they were first met.
    discovered: Vec<(String, ClassId)>,
    source: Box<dyn ClassSource>,
    policy: Box<dyn ParsePolicy>,
    options: TranslateOptions,
}

impl TypeRegistry {
    pub fn new(source: impl ClassSource + 'static, policy: impl ParsePolicy + 'static) -> Self {
        Self::with_options(source, policy, TranslateOptions::default())
    }

    pub fn with_options(
        source: impl ClassSource + 'static,
        policy: impl ParsePolicy + 'static,
        options: TranslateOptions,
    ) -> Self {
        let mut registry = TypeRegistry {
            classes: Vec::with_capacity(SYSTEM_TYPES.len()),
            by_path: FxHashMap::default(),
            discovered: Vec::new(),
            source: Box::new(source),
            policy: Box::new(policy),
            options,
        };
        for (class_path, name, package) in SYSTEM_TYPES {
            let id = ClassId(registry.classes.len() as u32);
            registry.classes.push(system_descriptor(id, name, package));
            registry.by_path.insert(class_path.to_string(), id);
        }
        registry
    }

    /// Get the descriptor for a class path, translating the class on first use.
    ///
    /// Class paths are slash separated (`pkg/sub/Foo`), primitive names
    /// (`int`), or either followed by one `[]` per array dimension. Array
    /// types are synthesized on every call and never cached.
    pub fn resolve(&mut self, class_path: &str) -> Result<ClassId> {
        if let Some(&id) = self.by_path.get(class_path) {
            trace!(class_path, %id, "cache hit");
            return Ok(id);
        }
        let dimensions = array_dimensions(class_path);
        if dimensions > 0 {
            return self.array_of(array_item(class_path), dimensions);
        }
        self.load(class_path)
    }

    /// `None` stays `None`; used for the superclass of the root class.
    pub fn resolve_optional(&mut self, class_path: Option<&str>) -> Result<Option<ClassId>> {
        class_path.map(|path| self.resolve(path)).transpose()
    }

    /// Cached descriptor for a class path, without loading anything.
    pub fn lookup(&self, class_path: &str) -> Option<ClassId> {
        self.by_path.get(class_path).copied()
    }

    pub fn get(&self, id: ClassId) -> &ClassDescriptor {
        &self.classes[id.index()]
    }

    pub(crate) fn get_mut(&mut self, id: ClassId) -> &mut ClassDescriptor {
        &mut self.classes[id.index()]
    }

    /// Number of descriptors, system and array types included.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Every class translated from bytecode during the run, by class path,
    /// in discovery order. System and array types are not included.
    pub fn discovered(&self) -> impl Iterator<Item = (&str, &ClassDescriptor)> + '_ {
        self.discovered
            .iter()
            .map(move |(path, id)| (path.as_str(), self.get(*id)))
    }

    pub fn discovered_ids(&self) -> impl Iterator<Item = ClassId> + '_ {
        self.discovered.iter().map(|(_, id)| *id)
    }

    /// Whether a value of type `source` may be used where `target` is expected.
    ///
    /// True when the two are the same descriptor or `target` is on the
    /// superclass chain of `source`. Array types are compared structurally:
    /// same dimensions and assignable item types. Distinct primitives are
    /// never assignable to each other.
    pub fn is_assignable_from(&self, target: ClassId, source: ClassId) -> bool {
        if target == source {
            return true;
        }
        if let (Some((target_item, target_dims)), Some((source_item, source_dims))) =
            (self.get(target).array(), self.get(source).array())
        {
            return target_dims == source_dims
                && self.is_assignable_from(target_item, source_item);
        }

        // Bounded by the number of descriptors in case bytecode declares a cycle.
        let mut current = self.get(source).super_class;
        for _ in 0..self.classes.len() {
            match current {
                Some(id) if id == target => return true,
                Some(id) => current = self.get(id).super_class,
                None => return false,
            }
        }
        false
    }

    /// A method of `owner` by name and argument descriptor.
    ///
    /// Only methods declared by `owner` itself are searched.
    pub fn find_method(
        &self,
        owner: ClassId,
        name: &str,
        argument_descriptor: &str,
    ) -> Option<&MethodDescriptor> {
        self.get(owner).find_method(name, argument_descriptor)
    }

    pub fn policy(&self) -> &dyn ParsePolicy {
        self.policy.as_ref()
    }

    pub fn options(&self) -> &TranslateOptions {
        &self.options
    }

    /// Add a freshly created class descriptor to the cache and discovery list.
    pub(crate) fn insert_discovered(
        &mut self,
        class_path: &str,
        descriptor: ClassDescriptor,
    ) -> ClassId {
        let id = self.push(descriptor);
        self.by_path.insert(class_path.to_string(), id);
        self.discovered.push((class_path.to_string(), id));
        id
    }

    fn push(&mut self, descriptor: ClassDescriptor) -> ClassId {
        let id = ClassId(self.classes.len() as u32);
        self.classes.push(descriptor);
        id
    }

    fn array_of(&mut self, item_path: &str, dimensions: usize) -> Result<ClassId> {
        let item = self.resolve(item_path)?;
        let item_class = self.get(item);
        let descriptor = ClassDescriptor::new(
            format!("{}{}", item_class.name, ARRAY_MARKER.repeat(dimensions)),
            item_class.package.clone(),
            Some(ClassId::OBJECT),
            Access::Public,
            ClassKind::Array { item, dimensions },
        );
        Ok(self.push(descriptor))
    }

    fn load(&mut self, class_path: &str) -> Result<ClassId> {
        let bytes = self
            .source
            .load(class_path)?
            .ok_or_else(|| Error::ClassNotFound(class_path.to_string()))?;
        debug!(class_path, size = bytes.len(), "loading class");
        let class_file = crate::parse_class_bytes(class_path, &bytes)?;
        translate::translate_class(self, class_path, &class_file)
    }
}

impl Index<ClassId> for TypeRegistry {
    type Output = ClassDescriptor;

    fn index(&self, id: ClassId) -> &ClassDescriptor {
        self.get(id)
    }
}
