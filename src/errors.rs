//src/errors.rs

use thiserror::Error;

/// Everything that can go wrong between reading a tree and writing the
/// iTOL files.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// The tree description was not well-formed Newick (or a leaf had no label).
    #[error("could not parse tree description: {0}")]
    TreeParse(String),

    /// A leaf taxid is unknown to the taxonomy database (or not numeric at all).
    /// Aggregation downgrades this to a per-leaf skip; everywhere else it is terminal.
    #[error("taxid {0} not found in taxonomy database")]
    TaxonNotFound(String),

    /// The remote tree repository answered with one of its failure codes.
    #[error("could not find {id} on eggNOG (error {status} received from server)")]
    RemoteNotFound { id: String, status: u16 },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, SummaryError>;
