use std::{io, path::PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Please provide a SMILES string with --smiles or --input.")]
    NoSource,

    #[error("Invalid SMILES string: {0}")]
    InvalidSmiles(String),

    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to read SMILES from stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error("failed to load draw options from {}: {source}", path.display())]
    Config {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to render image: {0}")]
    Render(String),
}
