use thiserror::Error;

/// Everything that can abort a translation run.
///
/// A class graph is only useful to an emitter when it is fully resolved, so
/// every variant is raised at the point of detection and never recovered from.
#[derive(Debug, Error)]
pub enum Error {
    /// No class source could supply bytes for a class path.
    #[error("class not found: {0}")]
    ClassNotFound(String),

    /// The bytes for a class path are not a well-formed class file.
    #[error("malformed class file {class_path}: {message}")]
    ClassFormat { class_path: String, message: String },

    /// A type or method descriptor does not follow the JVM encoding.
    #[error("malformed descriptor `{0}`")]
    MalformedDescriptor(String),

    /// A constant pool index does not point at the expected kind of entry.
    #[error("unresolvable constant #{index} in {class_path}")]
    UnresolvableConstant { class_path: String, index: u16 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "jar")]
    #[error("jar error: {0}")]
    Jar(#[from] zip::result::ZipError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn unresolvable(class_path: &str, index: u16) -> Self {
        Error::UnresolvableConstant {
            class_path: class_path.to_string(),
            index,
        }
    }

    pub(crate) fn class_format(class_path: &str, message: impl Into<String>) -> Self {
        Error::ClassFormat {
            class_path: class_path.to_string(),
            message: message.into(),
        }
    }
}
