//! Per-item text documents.

use std::collections::BTreeMap;

use distill_extract::{ComponentMeta, DocItem, PropInfo};

/// Generate the plain-text document for one item.
///
/// Prose pages are the concatenation of their variants' rendered bodies;
/// component pages get description, props, subcomponents, and examples.
/// Sections with nothing in them are omitted entirely.
pub fn item_text(item: &DocItem) -> String {
    if item.is_prose_page() {
        return item
            .stories
            .iter()
            .map(|story| story.full_source.as_str())
            .filter(|source| !source.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");
    }

    let mut sections: Vec<String> = vec![format!("# {}", item.title)];

    if let Some(meta) = &item.component {
        if !meta.description.is_empty() {
            sections.push(meta.description.clone());
        }

        if let Some(table) = props_table(&meta.props) {
            sections.push("## Props".to_string());
            sections.push(table);
        }

        let documented: Vec<(&String, &ComponentMeta)> = meta
            .subcomponents
            .iter()
            .filter(|(_, sub)| sub.has_docs())
            .collect();
        if !documented.is_empty() {
            sections.push("## Subcomponents".to_string());
            for (name, sub) in documented {
                sections.push(format!("### {}", name));
                if !sub.description.is_empty() {
                    sections.push(sub.description.clone());
                }
                if let Some(table) = props_table(&sub.props) {
                    sections.push(table);
                }
            }
        }
    }

    if !item.stories.is_empty() {
        sections.push("## Examples".to_string());
        for story in &item.stories {
            sections.push(format!("### {}", story.name));
            if !story.description.is_empty() {
                sections.push(story.description.clone());
            }
            if !story.source_code.is_empty() {
                sections.push(format!("```tsx\n{}\n```", story.source_code));
            }
        }
    }

    sections.join("\n\n")
}

/// Markdown props table, or `None` when no documentable props remain.
///
/// The `children` prop is implicit in every component and never documented.
pub(crate) fn props_table(props: &BTreeMap<String, PropInfo>) -> Option<String> {
    let rows: Vec<String> = props
        .iter()
        .filter(|(name, _)| name.as_str() != "children")
        .map(|(name, prop)| {
            format!(
                "| {} | {} | {} | {} | {} |",
                name,
                prop.prop_type
                    .as_ref()
                    .map(|t| t.render())
                    .unwrap_or_default(),
                if prop.required { "Yes" } else { "No" },
                prop.default_value.clone().unwrap_or_default(),
                prop.description.replace('\n', " ")
            )
        })
        .collect();

    if rows.is_empty() {
        return None;
    }

    Some(format!(
        "| Name | Type | Required | Default | Description |\n| --- | --- | --- | --- | --- |\n{}",
        rows.join("\n")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use distill_extract::{PropType, StoryVariant};
    use pretty_assertions::assert_eq;

    fn story(name: &str, source: &str) -> StoryVariant {
        StoryVariant {
            id: format!("item--{}", name.to_lowercase()),
            name: name.to_string(),
            docs_only: false,
            full_source: String::new(),
            description: String::new(),
            source_code: source.to_string(),
        }
    }

    fn prose_variant(source: &str) -> StoryVariant {
        StoryVariant {
            id: "page--docs".to_string(),
            name: "Page".to_string(),
            docs_only: true,
            full_source: source.to_string(),
            description: String::new(),
            source_code: String::new(),
        }
    }

    #[test]
    fn bare_item_is_title_and_description_only() {
        let item = DocItem {
            id: "button".to_string(),
            title: "Button".to_string(),
            component: Some(ComponentMeta {
                description: "A clickable button.".to_string(),
                ..Default::default()
            }),
            stories: vec![],
        };

        assert_eq!(item_text(&item), "# Button\n\nA clickable button.");
    }

    #[test]
    fn props_table_renders_enum_row() {
        let mut props = BTreeMap::new();
        props.insert(
            "variant".to_string(),
            PropInfo {
                prop_type: Some(PropType::Enum(vec!["a".to_string(), "b".to_string()])),
                description: "Visual style".to_string(),
                default_value: Some("a".to_string()),
                required: true,
            },
        );

        let table = props_table(&props).unwrap();
        assert!(table.starts_with("| Name | Type | Required | Default | Description |"));
        assert!(table.contains("| variant | a b | Yes | a | Visual style |"));
    }

    #[test]
    fn children_prop_is_skipped() {
        let mut props = BTreeMap::new();
        props.insert("children".to_string(), PropInfo::default());
        assert_eq!(props_table(&props), None);

        props.insert(
            "size".to_string(),
            PropInfo {
                prop_type: Some(PropType::Plain("string".to_string())),
                ..Default::default()
            },
        );
        let table = props_table(&props).unwrap();
        assert!(table.contains("| size |"));
        assert!(!table.contains("| children |"));
    }

    #[test]
    fn undocumented_subcomponents_are_omitted() {
        let mut subcomponents = BTreeMap::new();
        subcomponents.insert("Bare".to_string(), ComponentMeta::default());

        let item = DocItem {
            id: "button".to_string(),
            title: "Button".to_string(),
            component: Some(ComponentMeta {
                description: String::new(),
                props: BTreeMap::new(),
                subcomponents,
            }),
            stories: vec![],
        };

        assert_eq!(item_text(&item), "# Button");
    }

    #[test]
    fn documented_subcomponents_get_headings_and_tables() {
        let mut sub_props = BTreeMap::new();
        sub_props.insert(
            "name".to_string(),
            PropInfo {
                prop_type: Some(PropType::Plain("string".to_string())),
                ..Default::default()
            },
        );
        let mut subcomponents = BTreeMap::new();
        subcomponents.insert(
            "Icon".to_string(),
            ComponentMeta {
                description: "Inner icon.".to_string(),
                props: sub_props,
                subcomponents: BTreeMap::new(),
            },
        );

        let item = DocItem {
            id: "button".to_string(),
            title: "Button".to_string(),
            component: Some(ComponentMeta {
                description: String::new(),
                props: BTreeMap::new(),
                subcomponents,
            }),
            stories: vec![],
        };

        let text = item_text(&item);
        assert!(text.contains("## Subcomponents"));
        assert!(text.contains("### Icon"));
        assert!(text.contains("Inner icon."));
        assert!(text.contains("| name | string | No |  |  |"));
    }

    #[test]
    fn examples_fence_source_as_tsx() {
        let item = DocItem {
            id: "button".to_string(),
            title: "Button".to_string(),
            component: None,
            stories: vec![story("Primary", "<Button variant=\"primary\" />")],
        };

        let text = item_text(&item);
        assert!(text.contains("## Examples"));
        assert!(text.contains("### Primary"));
        assert!(text.contains("```tsx\n<Button variant=\"primary\" />\n```"));
    }

    #[test]
    fn prose_page_concatenates_full_sources_in_order() {
        let item = DocItem {
            id: "intro".to_string(),
            title: "Docs/Intro".to_string(),
            component: None,
            stories: vec![
                prose_variant("# Welcome"),
                prose_variant(""),
                prose_variant("Second section."),
            ],
        };

        assert_eq!(item_text(&item), "# Welcome\n\nSecond section.");
    }

    #[test]
    fn failed_prose_page_renders_empty() {
        let item = DocItem {
            id: "intro".to_string(),
            title: "Docs/Intro".to_string(),
            component: None,
            stories: vec![prose_variant("")],
        };

        assert_eq!(item_text(&item), "");
    }
}
