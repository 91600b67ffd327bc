//! Grade subjects
//!
//! Every grade belongs to exactly one of three subject collections.
//! Tags outside this set are not an error here: parsing yields `None`
//! and callers decide what an unknown subject means for them.

use std::fmt;

/// Subject a grade is recorded under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Math,
    Science,
    History,
}

impl Subject {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Math => "math",
            Self::Science => "science",
            Self::History => "history",
        }
    }

    /// Parse a subject tag (case-insensitive, surrounding whitespace ignored).
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "math" => Some(Self::Math),
            "science" => Some(Self::Science),
            "history" => Some(Self::History),
            _ => None,
        }
    }

    pub fn all() -> &'static [Self] {
        &[Self::Math, Self::Science, Self::History]
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
