use miette::Diagnostic;
use thiserror::Error;

/// Main error type for poster operations
#[derive(Error, Diagnostic, Debug)]
pub enum PosterError {
    #[error("IO error: {0}")]
    #[diagnostic(code(poster::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(poster::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(poster::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Storage error: {message}")]
    #[diagnostic(code(poster::storage))]
    Storage { message: String },

    #[error("Render error: {message}")]
    #[diagnostic(code(poster::render))]
    Render { message: String },

    #[error("Failed to export poster: {message}")]
    #[diagnostic(
        code(poster::export),
        help("The design is unchanged; try the export again")
    )]
    Export { message: String },

    #[error("An export is already in progress for this poster")]
    #[diagnostic(code(poster::export::busy))]
    ExportInProgress,

    #[error("No render surface is available to export")]
    #[diagnostic(code(poster::export::no_surface))]
    NoSurface,
}

impl PosterError {
    pub(crate) fn render(message: impl Into<String>) -> Self {
        PosterError::Render {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PosterError>;
