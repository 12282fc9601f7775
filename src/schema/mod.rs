//! Declarative type descriptors
//!
//! A [`Schema`] describes the exact shape a JSON value must have. Object
//! descriptors are strict unless they declare a catch-all; tagged unions
//! pick exactly one variant from a discriminator field before any other
//! field is looked at.

pub mod ffprobe;

/// Typing rule for a single JSON value
#[derive(Debug, Clone)]
pub enum Schema {
    /// Any JSON string
    String,
    /// A JSON integer representable as `i64`
    Integer,
    /// Any JSON value, including `null`
    Any,
    /// Exactly this string
    Literal(&'static str),
    /// A string from a closed set
    Enum(&'static [&'static str]),
    /// An array whose elements all match the inner schema
    Array(Box<Schema>),
    /// An object with arbitrary keys whose values all match the inner schema
    Record(Box<Schema>),
    Object(ObjectSchema),
    Tagged(TaggedUnion),
}

impl Schema {
    pub fn array(items: Schema) -> Self {
        Schema::Array(Box::new(items))
    }

    pub fn record(values: Schema) -> Self {
        Schema::Record(Box::new(values))
    }

    /// Short human-readable description used as a violation's `expected`
    pub fn describe(&self) -> String {
        match self {
            Schema::String => "string".to_string(),
            Schema::Integer => "integer".to_string(),
            Schema::Any => "any value".to_string(),
            Schema::Literal(value) => format!("\"{}\"", value),
            Schema::Enum(values) => format!("one of {}", values.join(", ")),
            Schema::Array(items) => format!("array of {}", items.describe()),
            Schema::Record(values) => format!("object of {}", values.describe()),
            Schema::Object(object) => format!("{} object", object.name),
            Schema::Tagged(union) => format!("{} object", union.name),
        }
    }
}

impl From<ObjectSchema> for Schema {
    fn from(object: ObjectSchema) -> Self {
        Schema::Object(object)
    }
}

impl From<TaggedUnion> for Schema {
    fn from(union: TaggedUnion) -> Self {
        Schema::Tagged(union)
    }
}

/// A declared object field
#[derive(Debug, Clone)]
pub struct Field {
    pub name: &'static str,
    pub schema: Schema,
    /// Optional fields may be absent; when present they must still match
    pub required: bool,
}

/// Policy for keys an object does not declare
#[derive(Debug, Clone)]
pub enum Rest {
    /// Undeclared keys are violations
    Deny,
    /// Undeclared keys are accepted when their value matches
    CatchAll(Box<Schema>),
}

/// Descriptor for an object with a fixed set of named fields
#[derive(Debug, Clone)]
pub struct ObjectSchema {
    pub name: &'static str,
    pub fields: Vec<Field>,
    pub rest: Rest,
}

impl ObjectSchema {
    /// An object that rejects every undeclared key
    pub fn strict(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
            rest: Rest::Deny,
        }
    }

    pub fn required(self, name: &'static str, schema: impl Into<Schema>) -> Self {
        self.with_field(name, schema.into(), true)
    }

    pub fn optional(self, name: &'static str, schema: impl Into<Schema>) -> Self {
        self.with_field(name, schema.into(), false)
    }

    /// Accept undeclared keys whose values match `schema`
    pub fn catch_all(mut self, schema: Schema) -> Self {
        self.rest = Rest::CatchAll(Box::new(schema));
        self
    }

    /// Copy of this descriptor under a new name, ready to be layered on
    pub fn extend(&self, name: &'static str) -> Self {
        Self {
            name,
            ..self.clone()
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn is_strict(&self) -> bool {
        matches!(self.rest, Rest::Deny)
    }

    // Redeclaring a field replaces it in place, keeping declaration order.
    fn with_field(mut self, name: &'static str, schema: Schema, required: bool) -> Self {
        let field = Field {
            name,
            schema,
            required,
        };
        match self.fields.iter_mut().find(|existing| existing.name == name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
        self
    }
}

/// Union of object variants selected by the value of one string field
#[derive(Debug, Clone)]
pub struct TaggedUnion {
    pub name: &'static str,
    pub discriminator: &'static str,
    pub variants: Vec<(&'static str, ObjectSchema)>,
    /// Variant used when the discriminator field is absent
    pub untagged: Option<ObjectSchema>,
}

impl TaggedUnion {
    pub fn new(name: &'static str, discriminator: &'static str) -> Self {
        Self {
            name,
            discriminator,
            variants: Vec::new(),
            untagged: None,
        }
    }

    pub fn variant(mut self, tag: &'static str, schema: ObjectSchema) -> Self {
        self.variants.push((tag, schema));
        self
    }

    pub fn when_absent(mut self, schema: ObjectSchema) -> Self {
        self.untagged = Some(schema);
        self
    }

    pub fn resolve(&self, tag: &str) -> Option<&ObjectSchema> {
        self.variants
            .iter()
            .find(|(candidate, _)| *candidate == tag)
            .map(|(_, schema)| schema)
    }

    pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.variants.iter().map(|(tag, _)| *tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extend_overrides_in_place() {
        let base = ObjectSchema::strict("Base")
            .required("a", Schema::Integer)
            .optional("b", Schema::String);
        let extended = base
            .extend("Extended")
            .required("b", Schema::String)
            .required("c", Schema::Integer);

        let names: Vec<_> = extended.fields.iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert!(extended.field("b").unwrap().required);
        assert!(!base.field("b").unwrap().required);
        assert_eq!(extended.name, "Extended");
    }

    #[test]
    fn test_describe() {
        assert_eq!(Schema::Literal("video").describe(), "\"video\"");
        assert_eq!(Schema::Enum(&["a", "b"]).describe(), "one of a, b");
        assert_eq!(
            Schema::array(Schema::Integer).describe(),
            "array of integer"
        );
    }

    #[test]
    fn test_union_resolution() {
        let union = TaggedUnion::new("Shape", "kind")
            .variant("circle", ObjectSchema::strict("Circle"))
            .variant("square", ObjectSchema::strict("Square"));
        assert_eq!(union.resolve("square").map(|s| s.name), Some("Square"));
        assert!(union.resolve("Square").is_none());
        assert_eq!(union.tags().collect::<Vec<_>>(), vec!["circle", "square"]);
    }
}
