use std::fmt::Display;
use std::path::{Path, PathBuf};

pub trait ErrorType: Display + std::fmt::Debug + PartialEq {}

// Where in an input file something went wrong. Line 0 means the file as a whole
#[derive(Debug, PartialEq, Clone)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize
}

impl Location {
    pub fn file(path: &Path) -> Self {
        Location { file: path.to_path_buf(), line: 0 }
    }

    pub fn line(path: &Path, line: usize) -> Self {
        Location { file: path.to_path_buf(), line }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            0 => write!(f, "{}", self.file.display()),
            line => write!(f, "{}:{}", self.file.display(), line),
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Error<T: ErrorType> {
    pub location: Location,
    pub error: T
}

impl<T: ErrorType> Error<T> {
    pub fn at(location: Location, error: T) -> Self {
        Error { location, error }
    }
}

impl<T: ErrorType> Display for Error<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\x1b[31;49;1m[{}]\x1b[39;49;1m  {}\x1b[0m", self.location, self.error)
    }
}

impl<T: ErrorType> std::error::Error for Error<T> {}

pub type Errors<T> = Vec<Error<T>>;

// One error per line, in the order they were found
pub fn render<T: ErrorType>(errors: &Errors<T>) -> String {
    errors.iter().map(|error| error.to_string()).collect::<Vec<_>>().join("\n")
}
