//! Where class bytes come from.
//!
//! The registry asks a [`ClassSource`] for the bytes of a class path
//! (`pkg/sub/Foo`) whenever it meets a class it has not seen yet.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub const CLASS_SUFFIX: &str = ".class";

/// Supplies raw class-file bytes by class path.
pub trait ClassSource {
    /// `Ok(None)` means the class is simply not provided by this source.
    fn load(&self, class_path: &str) -> Result<Option<Vec<u8>>>;
}

impl<S: ClassSource + ?Sized> ClassSource for Box<S> {
    fn load(&self, class_path: &str) -> Result<Option<Vec<u8>>> {
        (**self).load(class_path)
    }
}

/// Class bytes held in memory, keyed by class path.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    classes: BTreeMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, class_path: impl Into<String>, bytes: Vec<u8>) {
        self.classes.insert(class_path.into(), bytes);
    }

    pub fn with(mut self, class_path: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.insert(class_path, bytes);
        self
    }

    pub fn class_paths(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }
}

impl ClassSource for MemorySource {
    fn load(&self, class_path: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.classes.get(class_path).cloned())
    }
}

/// A directory of compiled classes laid out as `<root>/pkg/sub/Foo.class`.
#[derive(Clone, Debug)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectorySource { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ClassSource for DirectorySource {
    fn load(&self, class_path: &str) -> Result<Option<Vec<u8>>> {
        let path = self.root.join(format!("{class_path}{CLASS_SUFFIX}"));
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Largest buffer reserved up front for one archive entry. The size in the
/// entry header is not trusted beyond this.
#[cfg(feature = "jar")]
const MAX_ENTRY_HINT: u64 = 1 << 20;

#[cfg(feature = "jar")]
fn entry_capacity(declared_size: u64) -> usize {
    declared_size.min(MAX_ENTRY_HINT) as usize
}

/// The `.class` entries of a JAR archive, read into memory up front.
#[cfg(feature = "jar")]
#[derive(Clone, Debug, Default)]
pub struct JarSource {
    classes: MemorySource,
}

#[cfg(feature = "jar")]
impl JarSource {
    pub fn read<R: std::io::Read + std::io::Seek>(reader: R) -> Result<Self> {
        use std::io::Read;

        let mut archive = zip::ZipArchive::new(reader)?;
        let mut classes = MemorySource::new();

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            let Some(class_path) = file.name().strip_suffix(CLASS_SUFFIX).map(str::to_string) else {
                continue;
            };
            let mut data = Vec::with_capacity(entry_capacity(file.size()));
            file.read_to_end(&mut data)?;
            classes.insert(class_path, data);
        }

        Ok(JarSource { classes })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::read(std::io::Cursor::new(bytes))
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::read(std::io::BufReader::new(file))
    }

    pub fn class_paths(&self) -> impl Iterator<Item = &str> {
        self.classes.class_paths()
    }
}

#[cfg(feature = "jar")]
impl ClassSource for JarSource {
    fn load(&self, class_path: &str) -> Result<Option<Vec<u8>>> {
        self.classes.load(class_path)
    }
}

/// Several sources searched in order; the first one providing a class wins.
#[derive(Default)]
pub struct ClassPath {
    sources: Vec<Box<dyn ClassSource>>,
}

impl ClassPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, source: impl ClassSource + 'static) {
        self.sources.push(Box::new(source));
    }

    pub fn with(mut self, source: impl ClassSource + 'static) -> Self {
        self.push(source);
        self
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl ClassSource for ClassPath {
    fn load(&self, class_path: &str) -> Result<Option<Vec<u8>>> {
        for source in &self.sources {
            if let Some(bytes) = source.load(class_path)? {
                return Ok(Some(bytes));
            }
        }
        Ok(None)
    }
}
