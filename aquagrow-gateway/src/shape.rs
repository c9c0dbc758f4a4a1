//! Result shapes for structured generation.
//!
//! A [`ResultShape`] is the machine-checkable description sent to the
//! completion service alongside the prompt. The same value renders into
//! each backend's schema dialect and validates what comes back.

use serde_json::{json, Map, Value};

/// Kind of a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    String,
    /// A string restricted to the listed values
    Enum(Vec<String>),
}

/// One named field of an object shape. Every field is required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldShape {
    pub name: String,
    pub kind: FieldKind,
    pub description: Option<String>,
}

/// An object with named string fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectShape {
    pub fields: Vec<FieldShape>,
}

impl ObjectShape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a string field.
    pub fn string(mut self, name: &str, description: Option<&str>) -> Self {
        self.fields.push(FieldShape {
            name: name.to_string(),
            kind: FieldKind::String,
            description: description.map(String::from),
        });
        self
    }

    /// Add a string field limited to `values`.
    pub fn one_of(mut self, name: &str, values: &[&str], description: Option<&str>) -> Self {
        self.fields.push(FieldShape {
            name: name.to_string(),
            kind: FieldKind::Enum(values.iter().map(|v| v.to_string()).collect()),
            description: description.map(String::from),
        });
        self
    }

    fn required(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    fn render(&self, dialect: Dialect) -> Value {
        let mut properties = Map::new();
        for field in &self.fields {
            let mut property = Map::new();
            property.insert("type".to_string(), json!(dialect.name("string")));
            if let Some(description) = &field.description {
                property.insert("description".to_string(), json!(description));
            }
            if let FieldKind::Enum(values) = &field.kind {
                property.insert("enum".to_string(), json!(values));
            }
            properties.insert(field.name.clone(), Value::Object(property));
        }

        let mut object = json!({
            "type": dialect.name("object"),
            "properties": properties,
            "required": self.required(),
        });
        if dialect == Dialect::JsonSchema {
            object["additionalProperties"] = json!(false);
        }
        object
    }

    fn validate(&self, value: &Value, path: &str) -> Result<(), ShapeViolation> {
        let object = value
            .as_object()
            .ok_or_else(|| ShapeViolation::new(path, format!("expected an object, got {}", kind_of(value))))?;

        for field in &self.fields {
            let field_path = format!("{}.{}", path, field.name);
            let field_value = object
                .get(&field.name)
                .ok_or_else(|| ShapeViolation::new(&field_path, "required field is missing"))?;

            let text = field_value.as_str().ok_or_else(|| {
                ShapeViolation::new(&field_path, format!("expected a string, got {}", kind_of(field_value)))
            })?;

            if let FieldKind::Enum(values) = &field.kind {
                if !values.iter().any(|v| v == text) {
                    return Err(ShapeViolation::new(
                        &field_path,
                        format!("'{}' is not one of {:?}", text, values),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Top-level shape of a generated result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultShape {
    Object(ObjectShape),
    /// An array whose items all have the given object shape
    Array(ObjectShape),
}

/// Schema dialects understood by the backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialect {
    /// Gemini `responseSchema`: OpenAPI subset with upper-case type names
    Gemini,
    /// Standard JSON Schema
    JsonSchema,
}

impl Dialect {
    fn name(self, type_name: &str) -> String {
        match self {
            Dialect::Gemini => type_name.to_uppercase(),
            Dialect::JsonSchema => type_name.to_string(),
        }
    }
}

impl ResultShape {
    /// Whether the top level is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, ResultShape::Array(_))
    }

    /// Render as a Gemini `responseSchema`.
    pub fn to_gemini_schema(&self) -> Value {
        self.render(Dialect::Gemini)
    }

    /// Render as standard JSON Schema.
    pub fn to_json_schema(&self) -> Value {
        self.render(Dialect::JsonSchema)
    }

    fn render(&self, dialect: Dialect) -> Value {
        match self {
            ResultShape::Object(object) => object.render(dialect),
            ResultShape::Array(item) => json!({
                "type": dialect.name("array"),
                "items": item.render(dialect),
            }),
        }
    }

    /// Check a parsed value against this shape. Values are never coerced.
    pub fn validate(&self, value: &Value) -> Result<(), ShapeViolation> {
        match self {
            ResultShape::Object(object) => object.validate(value, "$"),
            ResultShape::Array(item) => {
                let items = value.as_array().ok_or_else(|| {
                    ShapeViolation::new("$", format!("expected an array, got {}", kind_of(value)))
                })?;
                items
                    .iter()
                    .enumerate()
                    .try_for_each(|(i, v)| item.validate(v, &format!("$[{}]", i)))
            }
        }
    }
}

/// Where and why a value failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeViolation {
    pub path: String,
    pub reason: String,
}

impl ShapeViolation {
    fn new(path: &str, reason: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
