use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    NoMetrics,
    Format(String),
    Encode(String),
    Io(PathBuf, io::Error),
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Encode(err.to_string())
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::Format(err.to_string())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(_, e) => Some(e),
            _               => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            Error::NoMetrics    => write!(f, "metrics are not found"),
            Error::Format(e)    => write!(f, "invalid var format: {}", e),
            Error::Encode(e)    => write!(f, "cannot encode config: {}", e),
            Error::Io(path, e)  => write!(f, "{}: {}", path.display(), e),
        }
    }
}
