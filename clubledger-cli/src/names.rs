//! Member identity normalization

use std::fmt;

/// Normalized member identity used to join every table
///
/// Trimmed, lower-cased, with interior whitespace collapsed to single spaces.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemberKey(String);

impl MemberKey {
    /// Normalize a free-text name; `None` if nothing but whitespace
    pub fn new(raw: &str) -> Option<Self> {
        let normalized = raw
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(" ");
        if normalized.is_empty() {
            None
        } else {
            Some(MemberKey(normalized))
        }
    }

    /// Join first and last name; a missing part is skipped
    pub fn from_parts(first: Option<&str>, last: Option<&str>) -> Option<Self> {
        let joined = [first, last]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        Self::new(&joined)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Title-cased name for display ("mary-jane o'neil" -> "Mary-Jane O'Neil")
    pub fn display_name(&self) -> String {
        title_case(&self.0)
    }

    /// Last token of the display name
    pub fn surname(&self) -> String {
        let display = self.display_name();
        display
            .rsplit(' ')
            .next()
            .unwrap_or_default()
            .to_string()
    }
}

impl fmt::Display for MemberKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Upper-case every letter that follows a non-letter, lower-case the rest
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_alpha = true;
        } else {
            out.push(c);
            prev_is_alpha = false;
        }
    }
    out
}
