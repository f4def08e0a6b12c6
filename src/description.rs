//! Node description
//!
//! Declarative schema the host uses to render the node's configuration form:
//! field names, types, defaults and the rules that hide dependent fields
//! until their toggle is enabled. Serializes to the host's camelCase shape.

use crate::executors::NODE_TYPE;
use crate::types::HttpMethod;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyType {
    Boolean,
    FixedCollection,
    Json,
    Options,
    String,
}

/// One selectable value of an `options` property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionValue {
    pub name: String,
    pub value: String,
}

impl OptionValue {
    fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// A group of fields inside a `fixedCollection` property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionOption {
    pub name: String,
    pub display_name: String,
    pub values: Vec<NodeProperty>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyOptions {
    Values(Vec<OptionValue>),
    Collections(Vec<CollectionOption>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeOptions {
    #[serde(default)]
    pub multiple_values: bool,
}

/// Visibility rules: the property is shown only when every listed parameter
/// currently holds one of its allowed values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayOptions {
    #[serde(default)]
    pub show: BTreeMap<String, Vec<Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeProperty {
    pub display_name: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PropertyType,
    pub default: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<PropertyOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_options: Option<TypeOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_options: Option<DisplayOptions>,
}

impl NodeProperty {
    fn new(display_name: &str, name: &str, kind: PropertyType, default: Value) -> Self {
        Self {
            display_name: display_name.to_string(),
            name: name.to_string(),
            kind,
            default,
            description: None,
            placeholder: None,
            required: false,
            options: None,
            type_options: None,
            display_options: None,
        }
    }

    fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    fn placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn options(mut self, options: PropertyOptions) -> Self {
        self.options = Some(options);
        self
    }

    fn show_when(mut self, field: &str, allowed: Vec<Value>) -> Self {
        self.display_options
            .get_or_insert_with(DisplayOptions::default)
            .show
            .insert(field.to_string(), allowed);
        self
    }

    /// Evaluate `displayOptions.show` with `lookup` returning the current
    /// value of a parameter.
    pub fn is_visible(&self, lookup: impl Fn(&str) -> Option<Value>) -> bool {
        let Some(display) = &self.display_options else {
            return true;
        };
        display.show.iter().all(|(field, allowed)| {
            lookup(field).is_some_and(|current| allowed.contains(&current))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDefaults {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescription {
    pub display_name: String,
    pub name: String,
    pub icon: String,
    pub group: Vec<String>,
    pub version: u32,
    pub subtitle: String,
    pub description: String,
    pub defaults: NodeDefaults,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub properties: Vec<NodeProperty>,
}

impl NodeDescription {
    /// Description of the `httpRequestContext` node.
    pub fn http_request_context() -> Self {
        let methods = HttpMethod::ALL
            .iter()
            .map(|m| OptionValue::new(m.as_str(), m.as_str()))
            .collect();

        let header_fields = vec![
            NodeProperty::new("Name", "name", PropertyType::String, json!("")),
            NodeProperty::new("Value", "value", PropertyType::String, json!("")),
        ];

        let mut headers = NodeProperty::new(
            "Headers",
            "headerParameters",
            PropertyType::FixedCollection,
            json!({}),
        )
        .placeholder("Add Header")
        .options(PropertyOptions::Collections(vec![CollectionOption {
            name: "parameters".to_string(),
            display_name: "Header".to_string(),
            values: header_fields,
        }]))
        .show_when("sendHeaders", vec![json!(true)]);
        headers.type_options = Some(TypeOptions {
            multiple_values: true,
        });

        let properties = vec![
            NodeProperty::new("Method", "method", PropertyType::Options, json!("GET"))
                .options(PropertyOptions::Values(methods))
                .description("The HTTP method to use"),
            NodeProperty::new("URL", "url", PropertyType::String, json!(""))
                .placeholder("https://httpbin.org/headers")
                .description("The URL to make the request to")
                .required(),
            NodeProperty::new("Send Headers", "sendHeaders", PropertyType::Boolean, json!(false))
                .description("Whether to send additional custom headers"),
            headers,
            NodeProperty::new("Send Body", "sendBody", PropertyType::Boolean, json!(false))
                .description("Whether to send a request body"),
            NodeProperty::new(
                "Body Content Type",
                "bodyContentType",
                PropertyType::Options,
                json!("json"),
            )
            .options(PropertyOptions::Values(vec![
                OptionValue::new("JSON", "json"),
                OptionValue::new("Form-Urlencoded", "form-urlencoded"),
                OptionValue::new("Raw", "raw"),
            ]))
            .show_when("sendBody", vec![json!(true)]),
            NodeProperty::new("Body (JSON)", "jsonBody", PropertyType::Json, json!("{}"))
                .description("JSON body to send")
                .show_when("sendBody", vec![json!(true)])
                .show_when("bodyContentType", vec![json!("json")]),
            NodeProperty::new("Body (Raw)", "rawBody", PropertyType::String, json!(""))
                .description("Raw body to send")
                .show_when("sendBody", vec![json!(true)])
                .show_when("bodyContentType", vec![json!("raw")]),
        ];

        Self {
            display_name: "HTTP Request Context".to_string(),
            name: NODE_TYPE.to_string(),
            icon: "fa:globe".to_string(),
            group: vec!["transform".to_string()],
            version: 1,
            subtitle: r#"={{$parameter["method"] + ": " + $parameter["url"]}}"#.to_string(),
            description:
                "HTTP Request node that automatically injects workflow context (ID and name) into headers"
                    .to_string(),
            defaults: NodeDefaults {
                name: "HTTP Request Context".to_string(),
            },
            inputs: vec!["main".to_string()],
            outputs: vec!["main".to_string()],
            properties,
        }
    }

    pub fn property(&self, name: &str) -> Option<&NodeProperty> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Current value of a parameter, falling back to its declared default.
    pub fn parameter_value(&self, parameters: &Value, name: &str) -> Option<Value> {
        parameters
            .get(name)
            .cloned()
            .or_else(|| self.property(name).map(|p| p.default.clone()))
    }

    /// Properties the host should show for the given parameter values.
    pub fn visible_properties(&self, parameters: &Value) -> Vec<&NodeProperty> {
        self.properties
            .iter()
            .filter(|p| p.is_visible(|field| self.parameter_value(parameters, field)))
            .collect()
    }

    /// Parameter object holding every property's default.
    pub fn default_parameters(&self) -> Value {
        let map: Map<String, Value> = self
            .properties
            .iter()
            .map(|p| (p.name.clone(), p.default.clone()))
            .collect();
        Value::Object(map)
    }
}
