//! # Request Input Sources

use std::fmt;

/// The part of an incoming request being validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// The decoded JSON request body.
    Body,
    /// The URL query string, decoded into string key/value pairs.
    Query,
    /// The matched path parameters.
    Params,
}

impl Source {
    /// Lowercase source name for logs and messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Source::Body => "body",
            Source::Query => "query",
            Source::Params => "params",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
