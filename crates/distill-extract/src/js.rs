//! Page-context scripts.
//!
//! Everything evaluated inside the page lives here, separate from the Rust
//! control flow. Each script marshals plain JSON back to the host process;
//! interpretation happens in `registry.rs`.

use crate::registry::RegistryShape;

/// Predicate polled while waiting for the story registry to appear.
pub(crate) const REGISTRY_READY: &str = r#"(() => {
  const preview = window.__STORYBOOK_PREVIEW__ || window.__STORYBOOK_CLIENT_API__ || null;
  const store =
    (preview && (preview.storyStore || preview.storyStoreValue || preview._storyStore)) ||
    window.__STORYBOOK_STORY_STORE__ || null;
  return !!(store || (preview && typeof preview.extract === 'function'));
})()"#;

/// Observed shape of the registry, for strategy selection and diagnostics.
pub(crate) const PROBE: &str = r#"(() => {
  const preview = window.__STORYBOOK_PREVIEW__ || window.__STORYBOOK_CLIENT_API__ || null;
  const store =
    (preview && (preview.storyStore || preview.storyStoreValue || preview._storyStore)) ||
    window.__STORYBOOK_STORY_STORE__ || null;
  const names = (obj) => {
    const out = [];
    for (let cur = obj; cur && cur !== Object.prototype; cur = Object.getPrototypeOf(cur)) {
      out.push(...Object.getOwnPropertyNames(cur));
    }
    return [...new Set(out)];
  };
  return {
    hasPreview: !!preview,
    previewProps: preview ? names(preview) : [],
    storeProps: store ? names(store) : [],
    hasExtract: !!(preview && typeof preview.extract === 'function'),
    hasCacheAll: !!(store && typeof store.cacheAllCSFFiles === 'function'),
  };
})()"#;

/// Shared marshaling helpers prepended to every extraction script.
const HELPERS: &str = r#"const preview = window.__STORYBOOK_PREVIEW__ || window.__STORYBOOK_CLIENT_API__ || null;
const store =
  (preview && (preview.storyStore || preview.storyStoreValue || preview._storyStore)) ||
  window.__STORYBOOK_STORY_STORE__ || null;
const docgen = (component) => {
  const info = component && component.__docgenInfo;
  if (!info) return null;
  const props = {};
  for (const [name, prop] of Object.entries(info.props || {})) {
    const def = prop.defaultValue;
    props[name] = {
      description: prop.description || '',
      required: !!(prop.required || (prop.type && prop.type.required)),
      type: prop.type || prop.tsType || prop.flowType || null,
      defaultValue: def == null ? null : String(def.value !== undefined ? def.value : def),
    };
  }
  return { description: info.description || '', props };
};
const story = (entry) => {
  const params = entry.parameters || {};
  const docs = params.docs || {};
  return {
    id: entry.id || '',
    name: entry.name || entry.story || '',
    title: entry.title || '',
    componentId: entry.componentId || null,
    importPath: params.fileName || entry.importPath || '',
    docsOnly: !!params.docsOnly,
    description: (docs.description && docs.description.story) || '',
    sourceCode:
      (params.storySource && params.storySource.source) ||
      (docs.source && (docs.source.originalSource || docs.source.code)) || '',
  };
};
const file = (csf) => {
  const meta = csf.meta || {};
  const subs = {};
  for (const [name, sub] of Object.entries(meta.subcomponents || {})) {
    subs[name] = docgen(sub);
  }
  return {
    id: meta.id || '',
    title: meta.title || '',
    fileName: (meta.parameters && meta.parameters.fileName) || '',
    component: docgen(meta.component),
    subcomponents: subs,
    stories: csf.stories ? Object.values(csf.stories).map(story) : null,
  };
};"#;

const PREVIEW_EXTRACT_BODY: &str = r#"const flat = await preview.extract({ includeDocsOnly: true });
return { kind: 'flat', stories: Object.values(flat).map(story) };"#;

const STORE_CACHE_ALL_BODY: &str = r#"await store.cacheAllCSFFiles();
return { kind: 'files', files: Object.values(store.cachedCSFFiles || {}).map(file) };"#;

const STORE_CACHED_FILES_BODY: &str =
    r#"return { kind: 'files', files: Object.values(store.cachedCSFFiles || {}).map(file) };"#;

const STORE_CSF_FILES_BODY: &str =
    r#"return { kind: 'files', files: Object.values(store.csfFiles || {}).map(file) };"#;

const STORE_LEGACY_STORIES_BODY: &str =
    r#"return { kind: 'flat', stories: Object.values(store._stories || {}).map(story) };"#;

/// The extraction script for one registry shape.
pub(crate) fn extraction_script(shape: RegistryShape) -> String {
    let body = match shape {
        RegistryShape::PreviewExtract => PREVIEW_EXTRACT_BODY,
        RegistryShape::StoreCacheAll => STORE_CACHE_ALL_BODY,
        RegistryShape::StoreCachedFiles => STORE_CACHED_FILES_BODY,
        RegistryShape::StoreCsfFiles => STORE_CSF_FILES_BODY,
        RegistryShape::StoreLegacyStories => STORE_LEGACY_STORIES_BODY,
    };
    format!("(async () => {{\n{}\n{}\n}})()", HELPERS, body)
}

/// Inner markup of the docs container, or an empty string when absent.
pub(crate) fn docs_container_html(selector: &str) -> String {
    format!(
        "(() => {{ const el = document.querySelector('{}'); return el ? el.innerHTML : ''; }})()",
        selector
    )
}

/// Attachment predicate for the docs container.
pub(crate) fn selector_attached(selector: &str) -> String {
    format!("document.querySelector('{}') !== null", selector)
}
