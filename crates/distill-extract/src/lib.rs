//! Extraction of documentable items from a built Storybook output directory.
//!
//! The extractor drives a headless Chromium against the static build: every
//! request the page issues is fulfilled from disk through CDP request
//! interception (no HTTP server), the story registry is read out of the page
//! runtime via one of several version-specific strategies, and prose-only
//! pages are rendered to Markdown through `distill-markdown`.

pub mod assets;
pub mod browser;
pub mod content;
pub mod enrich;
pub mod error;
pub mod extractor;
mod js;
pub mod model;
pub mod registry;

pub use assets::{AssetResolver, AssetResponse, SITE_ORIGIN};
pub use error::ExtractError;
pub use extractor::{extract_site, ExtractOptions};
pub use model::{ComponentMeta, DocItem, PropInfo, PropType, StoryVariant};
pub use registry::{detect_shape, RegistryProbe, RegistryShape};
