//! External column format tags.

use std::fmt;

/// Tag names used by the built-in registrations
pub mod tags {
    pub const VARCHAR: &str = "VARCHAR";
    pub const INTEGER: &str = "INTEGER";
    pub const BIGINT: &str = "BIGINT";
    pub const BOOLEAN: &str = "BOOLEAN";
    pub const DOUBLE: &str = "DOUBLE";
    pub const BINARY: &str = "BINARY";
    pub const CSV: &str = "CSV";
    pub const OTHER: &str = "OTHER";
}

/// Declared shape of an external column, independent of the host type.
///
/// Normalized to ASCII upper-case: `csv` and `CSV` are the same tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FormatTag(String);

impl FormatTag {
    pub fn new(tag: impl AsRef<str>) -> Self {
        Self(tag.as_ref().trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FormatTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_case_insensitive() {
        assert_eq!(FormatTag::new(" csv "), FormatTag::new(tags::CSV));
        assert_eq!(FormatTag::from("VarChar").as_str(), "VARCHAR");
    }
}
