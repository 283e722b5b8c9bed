//! Cell representations for sheet input and output

/// A single cell as loaded from a sheet
///
/// Sheets are read as text; numeric interpretation happens later through the
/// parse functions in [`super::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cell {
    /// Empty cell
    #[default]
    Absent,
    /// Non-empty text
    Text(String),
}

impl Cell {
    /// Load a raw cell; the empty string becomes `Absent`
    pub fn from_raw(raw: &str) -> Self {
        if raw.is_empty() {
            Cell::Absent
        } else {
            Cell::Text(raw.to_string())
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Cell::Absent)
    }

    /// Try to get as text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            Cell::Absent => None,
        }
    }
}

/// A value written back to a sheet
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Empty cell
    #[default]
    Null,
    String(String),
    Int(i64),
    /// Decimal values (currency)
    Float(f64),
}

impl Value {
    /// Whole numbers as `Int`, anything else as `Float`
    pub fn number(n: f64) -> Self {
        if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
            Value::Int(n as i64)
        } else {
            Value::Float(n)
        }
    }

    /// Convert to JSON for printing
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Int(i) => serde_json::json!(*i),
            Value::Float(f) => serde_json::json!(*f),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::String(s) => write!(f, "{}", s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{:.2}", fl),
        }
    }
}

/// A sheet's contents as written: header row first
pub type Grid = Vec<Vec<Value>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string_is_absent() {
        assert_eq!(Cell::from_raw(""), Cell::Absent);
        assert_eq!(Cell::from_raw(" "), Cell::Text(" ".to_string()));
        assert_eq!(Cell::from_raw("Alice").as_text(), Some("Alice"));
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Float(20.0).to_string(), "20.00");
        assert_eq!(Value::Int(3).to_string(), "3");
        assert_eq!(Value::Null.to_string(), "");
    }

    #[test]
    fn test_number_keeps_whole_counts_integral() {
        assert_eq!(Value::number(3.0), Value::Int(3));
        assert_eq!(Value::number(2.5), Value::Float(2.5));
        assert_eq!(Value::number(2.5).to_string(), "2.50");
    }
}
