use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The graph has no nodes to lay out.
    #[error("cannot render an empty graph")]
    EmptyGraph,

    #[error("invalid render options: {0}")]
    InvalidOptions(String),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("io error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, RenderError>;
