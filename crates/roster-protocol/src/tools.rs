//! Tool declarations exposed to the model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON Schema for a tool's input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        rename = "additionalProperties"
    )]
    pub additional_properties: Option<bool>,
}

impl JsonSchema {
    pub fn object() -> Self {
        Self {
            schema_type: "object".to_string(),
            description: None,
            properties: Some(serde_json::json!({})),
            required: None,
            additional_properties: Some(false),
        }
    }

    pub fn string() -> Self {
        Self {
            schema_type: "string".to_string(),
            description: None,
            properties: None,
            required: None,
            additional_properties: None,
        }
    }

    pub fn number() -> Self {
        Self {
            schema_type: "number".to_string(),
            description: None,
            properties: None,
            required: None,
            additional_properties: None,
        }
    }

    pub fn boolean() -> Self {
        Self {
            schema_type: "boolean".to_string(),
            description: None,
            properties: None,
            required: None,
            additional_properties: None,
        }
    }

    pub fn array() -> Self {
        Self {
            schema_type: "array".to_string(),
            description: None,
            properties: None,
            required: None,
            additional_properties: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn property(mut self, name: &str, schema: JsonSchema) -> Self {
        let props = self.properties.get_or_insert(serde_json::json!({}));
        if let Some(obj) = props.as_object_mut() {
            obj.insert(
                name.to_string(),
                serde_json::to_value(schema).unwrap_or(Value::Null),
            );
        }
        self
    }

    pub fn required(mut self, fields: &[&str]) -> Self {
        self.required = Some(fields.iter().map(|s| s.to_string()).collect());
        self
    }
}

/// Tool declaration sent to the model so it can decide when to call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub input_schema: JsonSchema,
}

impl ToolSpec {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        schema: JsonSchema,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: schema,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_builder() {
        let schema = JsonSchema::object()
            .description("Lead lookup arguments")
            .property("lead_id", JsonSchema::string().description("Lead id"))
            .required(&["lead_id"]);

        assert_eq!(schema.schema_type, "object");
        assert_eq!(schema.required.as_deref(), Some(&["lead_id".to_string()][..]));
        assert!(schema.properties.unwrap().get("lead_id").is_some());
    }

    #[test]
    fn tool_spec() {
        let spec = ToolSpec::new("score_lead", "Score a sales lead", JsonSchema::object());
        assert_eq!(spec.name, "score_lead");
        let json = serde_json::to_string(&spec).unwrap();
        assert!(json.contains("input_schema"));
    }
}
