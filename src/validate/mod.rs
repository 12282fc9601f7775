//! Validation engine
//!
//! Walks a parsed JSON value against a [`Schema`], collecting every
//! violation instead of stopping at the first one. Validation never
//! mutates or copies the input; typed output is produced separately once
//! a document is known to conform.

use serde_json::{Map, Value};
use tracing::trace;

use crate::schema::{ObjectSchema, Rest, Schema, TaggedUnion};

mod violation;

pub use violation::{FieldPath, PathSegment, ValidationError, Violation, ViolationKind};

use violation::json_type;

/// Validate `value` against `schema`, returning every violation found
pub fn validate(value: &Value, schema: &Schema) -> Result<(), ValidationError> {
    let mut validator = Validator::default();
    validator.check(value, schema);
    trace!(
        violations = validator.violations.len(),
        "validated document"
    );
    match ValidationError::new(validator.violations) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[derive(Default)]
struct Validator {
    path: FieldPath,
    violations: Vec<Violation>,
}

impl Validator {
    fn check(&mut self, value: &Value, schema: &Schema) {
        match schema {
            Schema::Any => {}
            Schema::String => {
                if !value.is_string() {
                    self.wrong_type(schema, value);
                }
            }
            Schema::Integer => {
                if value.as_i64().is_none() {
                    self.wrong_type(schema, value);
                }
            }
            Schema::Literal(expected) => match value.as_str() {
                Some(actual) if actual == *expected => {}
                Some(actual) => self.invalid_value(schema, actual),
                None => self.wrong_type(schema, value),
            },
            Schema::Enum(allowed) => match value.as_str() {
                Some(actual) if allowed.contains(&actual) => {}
                Some(actual) => self.invalid_value(schema, actual),
                None => self.wrong_type(schema, value),
            },
            Schema::Array(items) => match value.as_array() {
                Some(elements) => {
                    for (index, element) in elements.iter().enumerate() {
                        self.path.push_index(index);
                        self.check(element, items);
                        self.path.pop();
                    }
                }
                None => self.wrong_type(schema, value),
            },
            Schema::Record(values) => match value.as_object() {
                Some(map) => {
                    for (key, entry) in map {
                        self.path.push_key(key);
                        self.check(entry, values);
                        self.path.pop();
                    }
                }
                None => self.wrong_type(schema, value),
            },
            Schema::Object(object) => match value.as_object() {
                Some(map) => self.check_fields(map, object),
                None => self.wrong_type(schema, value),
            },
            Schema::Tagged(union) => match value.as_object() {
                Some(map) => self.check_tagged(map, union),
                None => self.wrong_type(schema, value),
            },
        }
    }

    fn check_fields(&mut self, map: &Map<String, Value>, object: &ObjectSchema) {
        for field in &object.fields {
            self.path.push_key(field.name);
            match map.get(field.name) {
                Some(value) => self.check(value, &field.schema),
                None if field.required => self.report(
                    ViolationKind::MissingField,
                    field.schema.describe(),
                    "absent".to_string(),
                ),
                None => {}
            }
            self.path.pop();
        }

        for (key, value) in map {
            if object.field(key).is_some() {
                continue;
            }
            self.path.push_key(key);
            match &object.rest {
                Rest::Deny => self.report(
                    ViolationKind::UnexpectedField,
                    format!("no such field on {}", object.name),
                    json_type(value).to_string(),
                ),
                Rest::CatchAll(schema) => self.check(value, schema),
            }
            self.path.pop();
        }
    }

    fn check_tagged(&mut self, map: &Map<String, Value>, union: &TaggedUnion) {
        let variant = match map.get(union.discriminator) {
            None => match &union.untagged {
                Some(variant) => variant,
                None => {
                    self.path.push_key(union.discriminator);
                    self.report(
                        ViolationKind::MissingField,
                        self.expected_tags(union),
                        "absent".to_string(),
                    );
                    self.path.pop();
                    return;
                }
            },
            Some(Value::String(tag)) => match union.resolve(tag) {
                Some(variant) => variant,
                None => {
                    self.path.push_key(union.discriminator);
                    self.report(
                        ViolationKind::UnrecognizedDiscriminator,
                        self.expected_tags(union),
                        format!("\"{}\"", tag),
                    );
                    self.path.pop();
                    return;
                }
            },
            Some(other) => {
                self.path.push_key(union.discriminator);
                self.report(
                    ViolationKind::WrongType,
                    self.expected_tags(union),
                    json_type(other).to_string(),
                );
                self.path.pop();
                return;
            }
        };
        self.check_fields(map, variant);
    }

    fn expected_tags(&self, union: &TaggedUnion) -> String {
        let tags: Vec<_> = union.tags().collect();
        format!("one of {}", tags.join(", "))
    }

    fn wrong_type(&mut self, schema: &Schema, value: &Value) {
        self.report(
            ViolationKind::WrongType,
            schema.describe(),
            json_type(value).to_string(),
        );
    }

    fn invalid_value(&mut self, schema: &Schema, actual: &str) {
        self.report(
            ViolationKind::InvalidValue,
            schema.describe(),
            format!("\"{}\"", actual),
        );
    }

    fn report(&mut self, kind: ViolationKind, expected: String, received: String) {
        self.violations.push(Violation {
            path: self.path.clone(),
            kind,
            expected,
            received,
        });
    }
}
