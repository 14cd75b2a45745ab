//! Document generation and persistence.
//!
//! Every generator in this crate is a pure function over the run
//! configuration and the extracted item collection; the writer is the only
//! module that touches the filesystem.

pub mod config;
pub mod html;
pub mod item;
pub mod sitemap;
pub mod summary;
pub mod writer;

pub use config::{OutputConfig, RefSite};
pub use html::HtmlEngine;
pub use item::item_text;
pub use sitemap::sitemap;
pub use summary::summary_text;
pub use writer::{write_site, WriteError, WriteSummary};
