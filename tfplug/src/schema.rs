//! Schema declaration for providers, resources and data sources
//!
//! Schemas are static metadata. Validation against them and plan
//! computation belong to Terraform core; providers only declare them.

use crate::types::{Dynamic, DynamicValue};

/// Replacement written over sensitive attributes before values are logged
pub const SENSITIVE_PLACEHOLDER: &str = "<sensitive>";

/// Terraform type of an attribute. Every attribute declared so far is a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    String,
}

/// StringKind is the format of a description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringKind {
    Plain,
    Markdown,
}

#[derive(Debug, Clone)]
pub struct Schema {
    /// Increment when a change needs state migration
    pub version: i64,
    pub description: String,
    pub description_kind: StringKind,
    pub attributes: Vec<Attribute>,
}

impl Schema {
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Copy of `value` with every sensitive top-level attribute replaced by
    /// a placeholder. Null and unknown values are left alone so the copy
    /// still shows whether something was set.
    pub fn redact(&self, value: &DynamicValue) -> DynamicValue {
        let Dynamic::Map(values) = &value.value else {
            return value.clone();
        };

        let redacted = values
            .iter()
            .map(|(name, v)| {
                let hide = self.attribute(name).is_some_and(|a| a.sensitive)
                    && !v.is_null()
                    && !v.is_unknown();
                let v = if hide {
                    Dynamic::String(SENSITIVE_PLACEHOLDER.to_string())
                } else {
                    v.clone()
                };
                (name.clone(), v)
            })
            .collect();

        DynamicValue::new(Dynamic::Map(redacted))
    }

    /// Fills null attributes that declare a static default
    pub fn apply_defaults(&self, value: &mut DynamicValue) {
        let Dynamic::Map(values) = &mut value.value else {
            return;
        };

        for attr in &self.attributes {
            let Some(default) = &attr.default else {
                continue;
            };
            let slot = values.entry(attr.name.clone()).or_insert(Dynamic::Null);
            if slot.is_null() {
                *slot = default.clone();
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: String,
    pub r#type: AttributeType,
    pub description: String,
    pub description_kind: StringKind,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    /// Terraform redacts sensitive values from plan output and logs
    pub sensitive: bool,
    /// Static default used when the attribute is not configured
    pub default: Option<Dynamic>,
}

/// AttributeBuilder provides a fluent API for building attributes
pub struct AttributeBuilder {
    attribute: Attribute,
}

impl AttributeBuilder {
    pub fn new(name: &str, type_: AttributeType) -> Self {
        Self {
            attribute: Attribute {
                name: name.to_string(),
                r#type: type_,
                description: String::new(),
                description_kind: StringKind::Plain,
                required: false,
                optional: false,
                computed: false,
                sensitive: false,
                default: None,
            },
        }
    }

    pub fn string(name: &str) -> Self {
        Self::new(name, AttributeType::String)
    }

    pub fn description(mut self, desc: &str) -> Self {
        self.attribute.description = desc.to_string();
        self.attribute.description_kind = StringKind::Plain;
        self
    }

    pub fn markdown_description(mut self, desc: &str) -> Self {
        self.attribute.description = desc.to_string();
        self.attribute.description_kind = StringKind::Markdown;
        self
    }

    pub fn required(mut self) -> Self {
        self.attribute.required = true;
        self.attribute.optional = false;
        self
    }

    pub fn optional(mut self) -> Self {
        self.attribute.optional = true;
        self.attribute.required = false;
        self
    }

    pub fn computed(mut self) -> Self {
        self.attribute.computed = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.attribute.sensitive = true;
        self
    }

    /// Defaults only make sense on computed attributes, so this marks it too
    pub fn default_value(mut self, value: Dynamic) -> Self {
        self.attribute.default = Some(value);
        self.attribute.computed = true;
        self
    }

    pub fn build(self) -> Attribute {
        self.attribute
    }
}

/// SchemaBuilder provides a fluent API for building schemas
pub struct SchemaBuilder {
    schema: Schema,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self {
            schema: Schema {
                version: 0,
                description: String::new(),
                description_kind: StringKind::Plain,
                attributes: Vec::new(),
            },
        }
    }

    pub fn version(mut self, version: i64) -> Self {
        self.schema.version = version;
        self
    }

    pub fn attribute(mut self, attr: Attribute) -> Self {
        self.schema.attributes.push(attr);
        self
    }

    pub fn description(mut self, desc: &str) -> Self {
        self.schema.description = desc.to_string();
        self.schema.description_kind = StringKind::Plain;
        self
    }

    pub fn markdown_description(mut self, desc: &str) -> Self {
        self.schema.description = desc.to_string();
        self.schema.description_kind = StringKind::Markdown;
        self
    }

    pub fn build(self) -> Schema {
        self.schema
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials_schema() -> Schema {
        SchemaBuilder::new()
            .attribute(AttributeBuilder::string("host").optional().build())
            .attribute(
                AttributeBuilder::string("password")
                    .optional()
                    .sensitive()
                    .build(),
            )
            .build()
    }

    #[test]
    fn attribute_builder_creates_optional_sensitive_string() {
        let attr = AttributeBuilder::string("token")
            .markdown_description("API token")
            .optional()
            .sensitive()
            .build();

        assert_eq!(attr.name, "token");
        assert_eq!(attr.r#type, AttributeType::String);
        assert!(attr.optional);
        assert!(!attr.required);
        assert!(attr.sensitive);
        assert_eq!(attr.description_kind, StringKind::Markdown);
    }

    #[test]
    fn required_and_optional_are_exclusive() {
        let attr = AttributeBuilder::string("name").optional().required().build();
        assert!(attr.required);
        assert!(!attr.optional);
    }

    #[test]
    fn schema_lookup_by_name() {
        let schema = credentials_schema();
        assert!(schema.attribute("password").unwrap().sensitive);
        assert!(schema.attribute("missing").is_none());
    }

    #[test]
    fn redact_hides_only_sensitive_known_values() {
        let schema = credentials_schema();
        let value = DynamicValue::object([
            ("host", Dynamic::String("db.local".to_string())),
            ("password", Dynamic::String("hunter2".to_string())),
        ]);

        let redacted = schema.redact(&value);
        let Dynamic::Map(values) = redacted.value else {
            panic!("expected object");
        };
        assert_eq!(values["host"], Dynamic::String("db.local".to_string()));
        assert_eq!(
            values["password"],
            Dynamic::String(SENSITIVE_PLACEHOLDER.to_string())
        );
    }

    #[test]
    fn redact_keeps_null_and_unknown_visible() {
        let schema = credentials_schema();
        let value = DynamicValue::object([("password", Dynamic::Unknown)]);
        assert_eq!(schema.redact(&value), value);

        let value = DynamicValue::object([("password", Dynamic::Null)]);
        assert_eq!(schema.redact(&value), value);
    }

    #[test]
    fn defaults_fill_null_attributes_only() {
        let schema = SchemaBuilder::new()
            .attribute(
                AttributeBuilder::string("mode")
                    .optional()
                    .default_value(Dynamic::String("fast".to_string()))
                    .build(),
            )
            .build();

        let mut unset = DynamicValue::object(Vec::<(String, Dynamic)>::new());
        schema.apply_defaults(&mut unset);
        assert_eq!(
            unset.get_string(&crate::types::AttributePath::new("mode")).unwrap(),
            "fast"
        );

        let mut set = DynamicValue::object([("mode", Dynamic::String("slow".to_string()))]);
        schema.apply_defaults(&mut set);
        assert_eq!(
            set.get_string(&crate::types::AttributePath::new("mode")).unwrap(),
            "slow"
        );
    }
}
