use std::path::PathBuf;
use thiserror::Error;

/// Message shown to the user whenever the product list cannot be loaded.
pub const LOAD_ERROR_MESSAGE: &str =
    "Error al cargar los productos. Por favor, recarga la página e intenta nuevamente.";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read catalog source {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog document is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("catalog document has an unexpected shape: {0}")]
    InvalidShape(String),
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;
        match err.classify() {
            Category::Data => LoadError::InvalidShape(err.to_string()),
            Category::Io | Category::Syntax | Category::Eof => LoadError::Malformed(err),
        }
    }
}

impl LoadError {
    /// Text for the end user; the detailed cause goes to the log.
    pub fn user_message(&self) -> &'static str {
        LOAD_ERROR_MESSAGE
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("Por favor, completa todos los campos obligatorios ({0})")]
    MissingField(&'static str),
}
