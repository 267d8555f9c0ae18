//! Name patterns used by the listing operations.
//!
//! A pattern is either absent, meaning "match everything", or a string
//! `p1|p2|...|pn` where each alternative may contain `*` wildcards matching
//! any substring. A name matches if it matches any alternative. Matching is
//! case-insensitive and whitespace around alternatives is ignored.
//!
//! The bridge forwards pattern strings untouched; this type exists for the
//! services that implement the listing operations.

use regex::Regex;

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct NamePattern {
    regex: Option<Regex>,
}

impl NamePattern {
    /// The pattern that matches every name.
    pub fn match_all() -> Self {
        Self { regex: None }
    }

    /// Compile an optional pattern string.
    pub fn parse(pattern: Option<&str>) -> Result<Self> {
        let Some(pattern) = pattern else {
            return Ok(Self::match_all());
        };

        let alternatives: Vec<String> = pattern
            .split('|')
            .map(|alt| {
                alt.trim()
                    .split('*')
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(".*")
            })
            .collect();
        let source = format!("(?is)^(?:{})$", alternatives.join("|"));
        let regex = Regex::new(&source).map_err(|e| Error::Malformed {
            what: "name pattern",
            message: e.to_string(),
        })?;
        Ok(Self { regex: Some(regex) })
    }

    pub fn is_match_all(&self) -> bool {
        self.regex.is_none()
    }

    pub fn matches(&self, name: &str) -> bool {
        self.regex.as_ref().map_or(true, |re| re.is_match(name))
    }

    /// Keep the names that match, preserving order.
    pub fn filter<'a, I>(&self, names: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        names
            .into_iter()
            .filter(|name| self.matches(name))
            .cloned()
            .collect()
    }
}

impl Default for NamePattern {
    fn default() -> Self {
        Self::match_all()
    }
}
