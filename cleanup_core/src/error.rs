use std::error;
use std::fmt;
use std::io;

/// Failures reported by a host while reading, writing or refreshing names.
#[derive(Debug)]
pub enum HostError {
    Read(String),
    Rejected { name: String, reason: String },
    EmptyName,
    Refresh(String),
    Io(io::Error),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            HostError::Read(ref msg) => write!(f, "cannot read name: {}", msg),
            HostError::Rejected { ref name, ref reason } => write!(f, "host rejected {}: {}", name, reason),
            HostError::EmptyName => write!(f, "sanitized name is empty"),
            HostError::Refresh(ref msg) => write!(f, "display refresh failed: {}", msg),
            HostError::Io(ref err) => write!(f, "IO error: {}", err),
        }
    }
}

impl error::Error for HostError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            HostError::Io(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for HostError {
    fn from(err: io::Error) -> HostError {
        HostError::Io(err)
    }
}

#[derive(Debug)]
pub enum CleanupError {
    Capture { index: usize, source: HostError },
    Collision(Vec<String>),
    NotInvocable,
    Config(toml::de::Error),
    Pattern(regex::Error),
    Io(io::Error),
}

impl fmt::Display for CleanupError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CleanupError::Capture { index, ref source } => {
                write!(f, "capture failed for selected item {}: {}", index, source)
            }
            CleanupError::Collision(ref names) => {
                write!(f, "several clips would be renamed to: {}", names.join(", "))
            }
            CleanupError::NotInvocable => write!(f, "selection contains no eligible clips"),
            CleanupError::Config(ref err) => write!(f, "config error: {}", err),
            CleanupError::Pattern(ref err) => write!(f, "invalid pattern: {}", err),
            CleanupError::Io(ref err) => write!(f, "IO error: {}", err),
        }
    }
}

impl error::Error for CleanupError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            CleanupError::Capture { ref source, .. } => Some(source),
            CleanupError::Config(ref err) => Some(err),
            CleanupError::Pattern(ref err) => Some(err),
            CleanupError::Io(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for CleanupError {
    fn from(err: io::Error) -> CleanupError {
        CleanupError::Io(err)
    }
}

impl From<toml::de::Error> for CleanupError {
    fn from(err: toml::de::Error) -> CleanupError {
        CleanupError::Config(err)
    }
}

impl From<regex::Error> for CleanupError {
    fn from(err: regex::Error) -> CleanupError {
        CleanupError::Pattern(err)
    }
}

#[test]
fn error_messages() {
    let err = CleanupError::Capture {
        index: 2,
        source: HostError::Read("clip deleted".to_string()),
    };
    assert_eq!(err.to_string(), "capture failed for selected item 2: cannot read name: clip deleted");

    let err = HostError::Rejected {
        name: "A".to_string(),
        reason: "duplicate".to_string(),
    };
    assert_eq!(err.to_string(), "host rejected A: duplicate");
}
