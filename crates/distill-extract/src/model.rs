//! Normalized documentation model.
//!
//! One `DocItem` per documentation unit: either a UI component with its
//! story variants, or a prose page represented by a single docs-only
//! variant. Items are built once from the page registry, enriched (prose
//! variants gain their rendered Markdown body), then consumed read-only by
//! the generators.

use std::collections::BTreeMap;

use serde_json::Value;

/// One documentation unit: a component or a prose page.
#[derive(Debug, Clone, PartialEq)]
pub struct DocItem {
    /// Stable unique identifier, used as the output filename stem.
    pub id: String,

    /// Human-readable breadcrumb title, e.g. `Example/Button`.
    pub title: String,

    /// Structured component description, when docgen metadata was present.
    pub component: Option<ComponentMeta>,

    /// Story variants in registry order.
    pub stories: Vec<StoryVariant>,
}

impl DocItem {
    /// A prose page has variants and every one of them is docs-only.
    pub fn is_prose_page(&self) -> bool {
        !self.stories.is_empty() && self.stories.iter().all(|s| s.docs_only)
    }
}

/// Component description extracted from docgen info.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComponentMeta {
    pub description: String,
    pub props: BTreeMap<String, PropInfo>,
    pub subcomponents: BTreeMap<String, ComponentMeta>,
}

impl ComponentMeta {
    /// Whether there is anything worth documenting.
    pub fn has_docs(&self) -> bool {
        !self.description.is_empty() || !self.props.is_empty()
    }
}

/// A single documented prop.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropInfo {
    pub prop_type: Option<PropType>,
    pub description: String,
    pub default_value: Option<String>,
    pub required: bool,
}

/// One example scenario for a component, or the synthetic variant that
/// represents a prose page.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryVariant {
    pub id: String,
    pub name: String,

    /// Docs-only variants have no interactive example.
    pub docs_only: bool,

    /// Rendered Markdown body; populated during enrichment for prose pages,
    /// empty otherwise (and empty when enrichment fails).
    pub full_source: String,

    /// Per-story description from the docs parameters.
    pub description: String,

    /// Example source text.
    pub source_code: String,
}

/// A prop's type descriptor, as emitted by the various docgen flavors.
///
/// The raw registry value is either a plain string or a nested descriptor
/// object; this closed set of variants gives every observed shape a total,
/// deterministic rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum PropType {
    Plain(String),
    Enum(Vec<String>),
    Union(Vec<String>),
    Array(String),
    FunctionSignature,
    Named(String),
    Other(Value),
}

impl PropType {
    /// Interpret a raw docgen type value. `None` for null/missing.
    pub fn from_json(value: &Value) -> Option<PropType> {
        match value {
            Value::Null => None,
            Value::String(name) => Some(PropType::Plain(name.clone())),
            Value::Object(map) => match map.get("name").and_then(Value::as_str) {
                Some("enum") => Some(PropType::Enum(descriptor_values(map))),
                Some("union") => Some(PropType::Union(descriptor_values(map))),
                Some("array") | Some("arrayOf") => Some(PropType::Array(element_type(map))),
                Some("signature") => {
                    if signature_is_function(map) {
                        Some(PropType::FunctionSignature)
                    } else {
                        Some(PropType::Named("signature".to_string()))
                    }
                }
                Some(name) => Some(PropType::Named(name.to_string())),
                None => Some(PropType::Other(value.clone())),
            },
            other => Some(PropType::Other(other.clone())),
        }
    }

    /// Render the descriptor for a props table cell.
    pub fn render(&self) -> String {
        match self {
            PropType::Plain(name) => name.clone(),
            PropType::Enum(values) | PropType::Union(values) => values.join(" "),
            PropType::Array(element) => format!("{}[]", element),
            PropType::FunctionSignature => "function".to_string(),
            PropType::Named(name) => name.clone(),
            PropType::Other(value) => value.to_string(),
        }
    }
}

/// Value list of an enum/union descriptor: entries are either bare strings
/// or `{value}`/`{name}` objects.
fn descriptor_values(map: &serde_json::Map<String, Value>) -> Vec<String> {
    map.get("value")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .map(|entry| match entry {
                    Value::String(s) => s.clone(),
                    Value::Object(obj) => obj
                        .get("value")
                        .and_then(Value::as_str)
                        .or_else(|| obj.get("name").and_then(Value::as_str))
                        .map(str::to_string)
                        .unwrap_or_else(|| entry.to_string()),
                    other => other.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn element_type(map: &serde_json::Map<String, Value>) -> String {
    match map.get("value") {
        Some(Value::String(name)) => name.clone(),
        Some(value @ Value::Object(_)) => PropType::from_json(value)
            .map(|t| t.render())
            .unwrap_or_default(),
        _ => String::new(),
    }
}

fn signature_is_function(map: &serde_json::Map<String, Value>) -> bool {
    if map.get("type").and_then(Value::as_str) == Some("function") {
        return true;
    }
    map.get("value")
        .and_then(Value::as_array)
        .and_then(|entries| entries.first())
        .map(|entry| match entry {
            Value::String(s) => s == "function",
            Value::Object(obj) => obj.get("value").and_then(Value::as_str) == Some("function"),
            _ => false,
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn variant(id: &str, docs_only: bool) -> StoryVariant {
        StoryVariant {
            id: id.to_string(),
            name: "Primary".to_string(),
            docs_only,
            full_source: String::new(),
            description: String::new(),
            source_code: String::new(),
        }
    }

    #[test]
    fn prose_page_requires_all_docs_only_variants() {
        let mut item = DocItem {
            id: "docs-intro".to_string(),
            title: "Docs/Intro".to_string(),
            component: None,
            stories: vec![variant("docs-intro--docs", true)],
        };
        assert!(item.is_prose_page());

        item.stories.push(variant("docs-intro--primary", false));
        assert!(!item.is_prose_page());

        item.stories.clear();
        assert!(!item.is_prose_page());
    }

    #[test]
    fn plain_string_type_passes_through() {
        let t = PropType::from_json(&json!("string")).unwrap();
        assert_eq!(t.render(), "string");
    }

    #[test]
    fn enum_type_joins_values_with_spaces() {
        let t = PropType::from_json(&json!({
            "name": "enum",
            "value": [{"value": "a"}, {"value": "b"}]
        }))
        .unwrap();
        assert_eq!(t, PropType::Enum(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(t.render(), "a b");
    }

    #[test]
    fn union_type_joins_member_names() {
        let t = PropType::from_json(&json!({
            "name": "union",
            "value": [{"name": "string"}, {"name": "number"}]
        }))
        .unwrap();
        assert_eq!(t.render(), "string number");
    }

    #[test]
    fn array_type_renders_element_suffix() {
        let t = PropType::from_json(&json!({
            "name": "arrayOf",
            "value": {"name": "string"}
        }))
        .unwrap();
        assert_eq!(t.render(), "string[]");
    }

    #[test]
    fn function_signature_renders_function() {
        let t = PropType::from_json(&json!({
            "name": "signature",
            "type": "function",
            "raw": "() => void"
        }))
        .unwrap();
        assert_eq!(t, PropType::FunctionSignature);
        assert_eq!(t.render(), "function");
    }

    #[test]
    fn object_signature_renders_its_name() {
        let t = PropType::from_json(&json!({
            "name": "signature",
            "type": "object"
        }))
        .unwrap();
        assert_eq!(t.render(), "signature");
    }

    #[test]
    fn named_type_renders_name() {
        let t = PropType::from_json(&json!({"name": "ReactNode"})).unwrap();
        assert_eq!(t.render(), "ReactNode");
    }

    #[test]
    fn missing_type_is_none() {
        assert_eq!(PropType::from_json(&Value::Null), None);
    }

    #[test]
    fn unrecognized_shape_renders_compact_json() {
        let t = PropType::from_json(&json!({"raw": "Weird"})).unwrap();
        assert_eq!(t.render(), r#"{"raw":"Weird"}"#);
    }
}
