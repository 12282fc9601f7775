//! Violation reporting: field paths and the aggregated validation error

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;

/// One step from a parent JSON value into a child
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Location of a value inside the document, from the root
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Key of the innermost segment, if it names an object field
    pub fn last_key(&self) -> Option<&str> {
        match self.0.last() {
            Some(PathSegment::Key(key)) => Some(key),
            _ => None,
        }
    }

    pub(crate) fn push_key(&mut self, key: &str) {
        self.0.push(PathSegment::Key(key.to_string()));
    }

    pub(crate) fn push_index(&mut self, index: usize) {
        self.0.push(PathSegment::Index(index));
    }

    pub(crate) fn pop(&mut self) {
        self.0.pop();
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "$");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if needs_quoting(key) => write!(f, "[{:?}]", key)?,
                PathSegment::Key(key) if i == 0 => write!(f, "{}", key)?,
                PathSegment::Key(key) => write!(f, ".{}", key)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

/// Keys that would read as more than one segment are written `["a.b"]`
fn needs_quoting(key: &str) -> bool {
    key.is_empty() || key.contains(['.', '[', ']', '"'])
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// What went wrong at a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Value has the wrong JSON type (or is `null` where a value is required)
    WrongType,
    /// A required field is absent
    MissingField,
    /// A field not declared by a strict object
    UnexpectedField,
    /// A string outside a closed enumeration
    InvalidValue,
    /// A tagged union's discriminator names no known variant
    UnrecognizedDiscriminator,
    /// The validated document could not be converted into typed output
    Conversion,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ViolationKind::WrongType => "wrong type",
            ViolationKind::MissingField => "missing required field",
            ViolationKind::UnexpectedField => "unexpected field",
            ViolationKind::InvalidValue => "invalid value",
            ViolationKind::UnrecognizedDiscriminator => "unrecognized discriminator value",
            ViolationKind::Conversion => "conversion failed",
        };
        f.write_str(text)
    }
}

/// A single schema violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub path: FieldPath,
    pub kind: ViolationKind,
    /// Expected type or shape
    pub expected: String,
    /// Type (or, for enumerations, value) actually found
    pub received: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} (expected {}, received {})",
            self.path, self.kind, self.expected, self.received
        )
    }
}

/// Non-empty, ordered list of violations for one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    /// Returns `None` for an empty list
    pub(crate) fn new(violations: Vec<Violation>) -> Option<Self> {
        if violations.is_empty() {
            None
        } else {
            Some(Self { violations })
        }
    }

    pub(crate) fn conversion(err: &serde_json::Error) -> Self {
        Self {
            violations: vec![Violation {
                path: FieldPath::root(),
                kind: ViolationKind::Conversion,
                expected: "typed probe output".to_string(),
                received: err.to_string(),
            }],
        }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// First violation whose rendered path equals `path`
    pub fn at(&self, path: &str) -> Option<&Violation> {
        self.violations.iter().find(|v| v.path.to_string() == path)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.violations.len();
        write!(
            f,
            "probe output does not match schema ({} violation{})",
            count,
            if count == 1 { "" } else { "s" }
        )?;
        for violation in &self.violations {
            write!(f, "\n  {}", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

impl<'a> IntoIterator for &'a ValidationError {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

/// JSON type name used in `received` descriptions
pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() => "integer",
        Value::Number(n) if n.is_u64() => "integer out of i64 range",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_display() {
        let mut path = FieldPath::root();
        assert_eq!(path.to_string(), "$");

        path.push_key("streams");
        path.push_index(2);
        path.push_key("disposition");
        path.push_key("dub");
        assert_eq!(path.to_string(), "streams[2].disposition.dub");
        assert_eq!(path.last_key(), Some("dub"));

        path.pop();
        path.pop();
        assert_eq!(path.last_key(), None);
    }

    #[test]
    fn test_dotted_keys_are_quoted() {
        let mut path = FieldPath::root();
        path.push_key("format");
        path.push_key("tags");
        path.push_key("com.apple.quicktime.make");
        assert_eq!(path.to_string(), r#"format.tags["com.apple.quicktime.make"]"#);
        assert_eq!(path.last_key(), Some("com.apple.quicktime.make"));

        let mut path = FieldPath::root();
        path.push_key("a[0]");
        path.push_key("b");
        assert_eq!(path.to_string(), r#"["a[0]"].b"#);
    }

    #[test]
    fn test_empty_list_is_not_an_error() {
        assert!(ValidationError::new(Vec::new()).is_none());
    }

    #[test]
    fn test_error_display_lists_every_violation() {
        let mut path = FieldPath::root();
        path.push_key("format");
        let err = ValidationError::new(vec![
            Violation {
                path: path.clone(),
                kind: ViolationKind::MissingField,
                expected: "object".to_string(),
                received: "absent".to_string(),
            },
            Violation {
                path: FieldPath::root(),
                kind: ViolationKind::WrongType,
                expected: "object".to_string(),
                received: "array".to_string(),
            },
        ])
        .unwrap();

        let text = err.to_string();
        assert!(text.starts_with("probe output does not match schema (2 violations)"));
        assert!(text.contains("format: missing required field"));
        assert!(text.contains("$: wrong type (expected object, received array)"));
    }

    #[test]
    fn test_json_type_names() {
        assert_eq!(json_type(&serde_json::json!(1)), "integer");
        assert_eq!(json_type(&serde_json::json!(1.5)), "number");
        assert_eq!(json_type(&serde_json::json!(null)), "null");
        assert_eq!(json_type(&serde_json::json!(-3)), "integer");
        assert_eq!(json_type(&serde_json::json!(u64::MAX)), "integer out of i64 range");
    }
}
