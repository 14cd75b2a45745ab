//! Registry shapes and normalization.
//!
//! The host framework reorganized its in-page story registry across major
//! versions. Rather than branching ad hoc, each known shape is a strategy
//! with a predicate over the probed registry and a page script; strategies
//! are tried in a fixed priority order and the first match wins, so
//! supporting a future shape is a pure addition.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use crate::js;
use crate::model::{ComponentMeta, DocItem, PropInfo, PropType, StoryVariant};

/// Property names and capabilities observed on the in-page registry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryProbe {
    #[serde(default)]
    pub has_preview: bool,
    #[serde(default)]
    pub preview_props: Vec<String>,
    #[serde(default)]
    pub store_props: Vec<String>,
    #[serde(default)]
    pub has_extract: bool,
    #[serde(default)]
    pub has_cache_all: bool,
}

/// Known registry shapes, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryShape {
    /// The preview object exposes a full-extraction function.
    PreviewExtract,
    /// The nested store can cache all CSF files on demand.
    StoreCacheAll,
    /// The store already carries a cached file map.
    StoreCachedFiles,
    /// Older store generation with a direct `csfFiles` map.
    StoreCsfFiles,
    /// Legacy flat `_stories` map.
    StoreLegacyStories,
}

impl RegistryShape {
    pub const PRIORITY: [RegistryShape; 5] = [
        RegistryShape::PreviewExtract,
        RegistryShape::StoreCacheAll,
        RegistryShape::StoreCachedFiles,
        RegistryShape::StoreCsfFiles,
        RegistryShape::StoreLegacyStories,
    ];

    fn applies(self, probe: &RegistryProbe) -> bool {
        match self {
            RegistryShape::PreviewExtract => probe.has_extract,
            RegistryShape::StoreCacheAll => probe.has_cache_all,
            RegistryShape::StoreCachedFiles => {
                probe.store_props.iter().any(|p| p == "cachedCSFFiles")
            }
            RegistryShape::StoreCsfFiles => probe.store_props.iter().any(|p| p == "csfFiles"),
            RegistryShape::StoreLegacyStories => {
                probe.store_props.iter().any(|p| p == "_stories")
            }
        }
    }

    pub(crate) fn script(self) -> String {
        js::extraction_script(self)
    }
}

/// Pick the highest-priority shape the probed registry supports.
pub fn detect_shape(probe: &RegistryProbe) -> Option<RegistryShape> {
    RegistryShape::PRIORITY
        .into_iter()
        .find(|shape| shape.applies(probe))
}

/// Marshaled extraction payload, before normalization.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub(crate) enum RawExtraction {
    Flat { stories: Vec<RawStory> },
    Files { files: Vec<RawFile> },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawFile {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub component: Option<RawDocgen>,
    #[serde(default)]
    pub subcomponents: BTreeMap<String, Option<RawDocgen>>,
    #[serde(default)]
    pub stories: Option<Vec<RawStory>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawDocgen {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub props: BTreeMap<String, RawProp>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawProp {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, rename = "type")]
    pub prop_type: Option<serde_json::Value>,
    #[serde(default)]
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawStory {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub component_id: Option<String>,
    #[serde(default)]
    pub import_path: String,
    #[serde(default)]
    pub docs_only: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub source_code: String,
}

/// Normalize a marshaled payload into the documentable item collection.
pub(crate) fn normalize(raw: RawExtraction) -> Vec<DocItem> {
    match raw {
        RawExtraction::Files { files } => files.into_iter().filter_map(normalize_file).collect(),
        RawExtraction::Flat { stories } => group_flat(stories),
    }
}

fn normalize_file(file: RawFile) -> Option<DocItem> {
    let stories = match file.stories {
        Some(stories) if !stories.is_empty() => stories,
        _ => {
            // Prose-page source files legitimately have no stories; they
            // become a single synthetic docs-only variant. Anything else
            // without stories is malformed and skipped.
            if is_prose_source(&file.file_name) {
                let id = item_id(&file.id, &file.title, None);
                let name = title_leaf(&file.title);
                return Some(DocItem {
                    title: file.title,
                    component: None,
                    stories: vec![StoryVariant {
                        id: format!("{}--docs", id),
                        name,
                        docs_only: true,
                        full_source: String::new(),
                        description: String::new(),
                        source_code: String::new(),
                    }],
                    id,
                });
            }
            tracing::warn!(
                "skipping registry entry '{}': no stories",
                if file.id.is_empty() { &file.title } else { &file.id }
            );
            return None;
        }
    };

    let id = item_id(&file.id, &file.title, stories.first());
    let component = file.component.map(|docgen| {
        let mut meta = component_meta(docgen);
        meta.subcomponents = file
            .subcomponents
            .into_iter()
            .filter_map(|(name, sub)| sub.map(|docgen| (name, component_meta(docgen))))
            .collect();
        meta
    });

    Some(DocItem {
        id,
        title: file.title,
        component,
        stories: stories.into_iter().map(story_variant).collect(),
    })
}

/// Group a flat story list by component, preserving first-seen order and
/// synthesizing a minimal per-component wrapper from the first entry.
fn group_flat(stories: Vec<RawStory>) -> Vec<DocItem> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<RawStory>> = HashMap::new();

    for story in stories {
        let key = story
            .component_id
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| component_prefix(&story.id));
        if !groups.contains_key(&key) {
            order.push(key.clone());
        }
        groups.entry(key).or_default().push(story);
    }

    order
        .into_iter()
        .filter_map(|key| {
            let stories = groups.remove(&key)?;
            let title = stories
                .iter()
                .map(|s| s.title.as_str())
                .find(|t| !t.is_empty())
                .unwrap_or(&key)
                .to_string();
            Some(DocItem {
                id: key,
                title,
                component: None,
                stories: stories.into_iter().map(story_variant).collect(),
            })
        })
        .collect()
}

fn story_variant(story: RawStory) -> StoryVariant {
    StoryVariant {
        id: story.id,
        name: story.name,
        docs_only: story.docs_only,
        full_source: String::new(),
        description: story.description,
        source_code: story.source_code,
    }
}

fn component_meta(docgen: RawDocgen) -> ComponentMeta {
    ComponentMeta {
        description: docgen.description,
        props: docgen
            .props
            .into_iter()
            .map(|(name, prop)| {
                (
                    name,
                    PropInfo {
                        prop_type: prop.prop_type.as_ref().and_then(PropType::from_json),
                        description: prop.description,
                        default_value: prop.default_value,
                        required: prop.required,
                    },
                )
            })
            .collect(),
        subcomponents: BTreeMap::new(),
    }
}

fn item_id(file_id: &str, title: &str, first_story: Option<&RawStory>) -> String {
    if !file_id.is_empty() {
        return file_id.to_string();
    }
    if let Some(story) = first_story {
        if !story.id.is_empty() {
            return component_prefix(&story.id);
        }
    }
    slug(title)
}

fn component_prefix(story_id: &str) -> String {
    match story_id.rfind("--") {
        Some(pos) => story_id[..pos].to_string(),
        None => story_id.to_string(),
    }
}

fn is_prose_source(file_name: &str) -> bool {
    file_name.ends_with(".mdx") || file_name.ends_with(".md")
}

fn title_leaf(title: &str) -> String {
    title.rsplit('/').next().unwrap_or(title).to_string()
}

/// Convert a breadcrumb title to a URL-safe id.
fn slug(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' || c == '/' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn probe(preview: &[&str], store: &[&str], extract: bool, cache_all: bool) -> RegistryProbe {
        RegistryProbe {
            has_preview: true,
            preview_props: preview.iter().map(|s| s.to_string()).collect(),
            store_props: store.iter().map(|s| s.to_string()).collect(),
            has_extract: extract,
            has_cache_all: cache_all,
        }
    }

    #[test]
    fn extract_function_wins_over_store_shapes() {
        let probe = probe(&["extract"], &["cachedCSFFiles"], true, true);
        assert_eq!(detect_shape(&probe), Some(RegistryShape::PreviewExtract));
    }

    #[test]
    fn cache_all_wins_over_direct_maps() {
        let probe = probe(&[], &["cachedCSFFiles", "csfFiles"], false, true);
        assert_eq!(detect_shape(&probe), Some(RegistryShape::StoreCacheAll));
    }

    #[test]
    fn legacy_property_names_are_tried_in_sequence() {
        let probe_cached = probe(&[], &["cachedCSFFiles"], false, false);
        assert_eq!(
            detect_shape(&probe_cached),
            Some(RegistryShape::StoreCachedFiles)
        );

        let probe_csf = probe(&[], &["csfFiles"], false, false);
        assert_eq!(detect_shape(&probe_csf), Some(RegistryShape::StoreCsfFiles));

        let probe_legacy = probe(&[], &["_stories"], false, false);
        assert_eq!(
            detect_shape(&probe_legacy),
            Some(RegistryShape::StoreLegacyStories)
        );
    }

    #[test]
    fn unknown_shape_yields_none() {
        let probe = probe(&["channel"], &["projectAnnotations"], false, false);
        assert_eq!(detect_shape(&probe), None);
    }

    #[test]
    fn groups_flat_stories_by_id_prefix() {
        let raw: RawExtraction = serde_json::from_value(json!({
            "kind": "flat",
            "stories": [
                {"id": "example-button--primary", "name": "Primary", "title": "Example/Button"},
                {"id": "example-button--secondary", "name": "Secondary", "title": "Example/Button"},
                {"id": "example-card--basic", "name": "Basic", "title": "Example/Card"}
            ]
        }))
        .unwrap();

        let items = normalize(raw);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "example-button");
        assert_eq!(items[0].title, "Example/Button");
        assert_eq!(items[0].stories.len(), 2);
        assert_eq!(items[1].id, "example-card");
        assert!(items[0].component.is_none());
    }

    #[test]
    fn explicit_component_reference_overrides_prefix() {
        let raw: RawExtraction = serde_json::from_value(json!({
            "kind": "flat",
            "stories": [
                {"id": "a--x", "name": "X", "title": "A", "componentId": "shared"},
                {"id": "b--y", "name": "Y", "title": "A", "componentId": "shared"}
            ]
        }))
        .unwrap();

        let items = normalize(raw);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "shared");
        assert_eq!(items[0].stories.len(), 2);
    }

    #[test]
    fn normalizes_file_with_component_docs() {
        let raw: RawExtraction = serde_json::from_value(json!({
            "kind": "files",
            "files": [{
                "id": "example-button",
                "title": "Example/Button",
                "fileName": "./src/Button.stories.tsx",
                "component": {
                    "description": "A clickable button.",
                    "props": {
                        "variant": {
                            "description": "Visual style",
                            "required": true,
                            "type": {"name": "enum", "value": [{"value": "a"}, {"value": "b"}]},
                            "defaultValue": "a"
                        }
                    }
                },
                "subcomponents": {
                    "Icon": {"description": "Inner icon", "props": {}}
                },
                "stories": [
                    {"id": "example-button--primary", "name": "Primary", "sourceCode": "<Button />"}
                ]
            }]
        }))
        .unwrap();

        let items = normalize(raw);
        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.id, "example-button");
        let meta = item.component.as_ref().unwrap();
        assert_eq!(meta.description, "A clickable button.");
        let prop = &meta.props["variant"];
        assert!(prop.required);
        assert_eq!(prop.prop_type.as_ref().unwrap().render(), "a b");
        assert_eq!(meta.subcomponents["Icon"].description, "Inner icon");
        assert_eq!(item.stories[0].source_code, "<Button />");
    }

    #[test]
    fn storyless_mdx_file_becomes_a_synthetic_prose_page() {
        let raw: RawExtraction = serde_json::from_value(json!({
            "kind": "files",
            "files": [{
                "id": "docs-intro",
                "title": "Docs/Intro",
                "fileName": "./src/Intro.mdx",
                "stories": null
            }]
        }))
        .unwrap();

        let items = normalize(raw);
        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert!(item.is_prose_page());
        assert_eq!(item.stories.len(), 1);
        assert_eq!(item.stories[0].id, "docs-intro--docs");
        assert_eq!(item.stories[0].name, "Intro");
        assert!(item.stories[0].docs_only);
        assert_eq!(item.stories[0].full_source, "");
    }

    #[test]
    fn storyless_non_prose_file_is_skipped() {
        let raw: RawExtraction = serde_json::from_value(json!({
            "kind": "files",
            "files": [
                {"id": "broken", "title": "Broken", "fileName": "./src/Broken.stories.tsx", "stories": []},
                {"id": "ok", "title": "Ok", "fileName": "./src/Ok.stories.tsx",
                 "stories": [{"id": "ok--basic", "name": "Basic"}]}
            ]
        }))
        .unwrap();

        let items = normalize(raw);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "ok");
    }

    #[test]
    fn missing_file_id_falls_back_to_story_prefix() {
        let raw: RawExtraction = serde_json::from_value(json!({
            "kind": "files",
            "files": [{
                "title": "Example/Badge",
                "fileName": "./src/Badge.stories.tsx",
                "stories": [{"id": "example-badge--basic", "name": "Basic"}]
            }]
        }))
        .unwrap();

        let items = normalize(raw);
        assert_eq!(items[0].id, "example-badge");
    }

    #[test]
    fn slug_sanitizes_titles() {
        assert_eq!(slug("Docs/Getting Started"), "docs-getting-started");
        assert_eq!(slug("Example/Button (Primary)"), "example-button-primary");
    }
}
