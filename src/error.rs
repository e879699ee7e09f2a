use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::{fmt, io};

#[derive(Debug)]
pub enum IndexError {
    /// The directory to scan does not exist (or is not a directory)
    MissingRoot(PathBuf),
    Io {
        path: PathBuf,
        source: io::Error,
    },
}

impl IndexError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> IndexError {
        IndexError::Io {
            path: path.into(),
            source,
        }
    }
}

impl Display for IndexError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            IndexError::MissingRoot(root) => {
                write!(f, "Expected wiki repo checked out at: {}", root.display())
            }
            IndexError::Io { path, source } => {
                write!(f, "I/O error on {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for IndexError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IndexError::MissingRoot(_) => None,
            IndexError::Io { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn test_missing_root_message() {
        let err = IndexError::MissingRoot(PathBuf::from("wiki"));
        assert_eq!(err.to_string(), "Expected wiki repo checked out at: wiki");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_io_keeps_source() {
        let err = IndexError::io("README.md", io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert!(err.to_string().starts_with("I/O error on README.md"));
        assert!(err.source().is_some());
    }
}
