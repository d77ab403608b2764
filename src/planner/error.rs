use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("expected exactly 5 arguments")]
    Usage,

    #[error("invalid package pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed test description {}: {reason}", path.display())]
    MalformedDescription { path: PathBuf, reason: String },

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    #[error("failed to spawn generation worker: {0}")]
    WorkerSpawn(String),
}
