//! Load-time error channel (spec Section 7). Intra-parse diagnostics are
//! plain `String`s attached to phrases, not `Error`s: this type is only
//! for failures that keep the lexicon or a structural call from doing
//! its job at all.

use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Error(String);

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl std::error::Error for Error {}

impl<T: Into<String>> From<T> for Error {
  fn from(x: T) -> Error {
    Error(x.into())
  }
}
