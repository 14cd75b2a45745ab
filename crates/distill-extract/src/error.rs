//! Extraction error taxonomy.

use chromiumoxide::error::CdpError;

/// Errors raised while extracting metadata from the static build.
///
/// `RegistryNotFound` and `RegistryShapeUnsupported` are fatal to the run;
/// both carry enough context for a version-compatibility report. Everything
/// else is either fatal infrastructure failure (browser, IO) or a per-page
/// condition that callers recover from locally.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("failed to launch browser: {0}")]
    Launch(String),

    #[error(
        "story registry never appeared on the entry page after {waited_secs}s; \
         is this the output directory of a completed Storybook build?"
    )]
    RegistryNotFound { waited_secs: u64 },

    #[error(
        "story registry matches no known shape; preview exposes [{}], store exposes [{}]",
        .preview_props.join(", "),
        .store_props.join(", ")
    )]
    RegistryShapeUnsupported {
        preview_props: Vec<String>,
        store_props: Vec<String>,
    },

    #[error("registry payload did not match any known schema: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("content container {0} never attached")]
    MarkerTimeout(String),

    #[error("script evaluation failed: {0}")]
    Script(String),

    #[error(transparent)]
    Browser(#[from] CdpError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
