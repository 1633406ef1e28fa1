//src/types.rs

use std::path::PathBuf;

use crate::errors::{Result, SummaryError};

/// NCBI-style numeric taxonomic identifier, as stored in the taxDB file.
pub type TaxId = u32;

/// Recommended rank-cutoff range; values outside it still work but usually
/// land on uninformative ancestors, so the config layer warns about them.
pub const CUTOFF_RECOMMENDED: std::ops::RangeInclusive<usize> = 2..=7;

/// Where the tree description comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeSource {
    /// Fetch the tree for this NOG id from the eggNOG tree repository.
    RemoteNog(String),
    /// Read the first line of a local file (plain or gzipped).
    LocalFile(PathBuf),
}

/// Which static representative-taxid set gets appended to the taxid list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepSetMode {
    None,
    All,
    BacteriaOnly,
}

impl RepSetMode {
    /// Maps the CLI menu choice {0,1,2} onto a mode.
    pub fn from_choice(choice: usize) -> Result<Self> {
        match choice {
            0 => Ok(RepSetMode::None),
            1 => Ok(RepSetMode::All),
            2 => Ok(RepSetMode::BacteriaOnly),
            other => Err(SummaryError::InvalidInput(format!(
                "representative-set mode must be 0, 1 or 2, got {other}"
            ))),
        }
    }
}

/// The two annotation dataset formats this tool has emitted over its life.
/// Binary presence is canonical; the multibar percentage layout is kept as
/// an explicit legacy switch, never merged with the binary one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnnotationFormat {
    #[default]
    BinaryPresence,
    PercentageBar,
}

/// Run configuration, validated once at the CLI boundary so the resolution
/// and aggregation code never sees raw user input.
#[derive(Debug, Clone)]
pub struct SummaryConfig {
    pub source: TreeSource,
    pub cutoff: usize,
    pub rep_mode: RepSetMode,
    pub format: AnnotationFormat,
}

impl SummaryConfig {
    /// Checks the fields once up front. NOG ids must at least look like NOG
    /// ids; an out-of-range cutoff is accepted with a warning.
    pub fn validate(&self) -> Result<()> {
        if let TreeSource::RemoteNog(nog) = &self.source {
            if !nog.contains("OG") {
                return Err(SummaryError::InvalidInput(format!(
                    "\"{nog}\" does not look like a valid NOG id"
                )));
            }
        }
        if !CUTOFF_RECOMMENDED.contains(&self.cutoff) {
            log::warn!(
                "rank cutoff {} is outside the recommended range {}..={}",
                self.cutoff,
                CUTOFF_RECOMMENDED.start(),
                CUTOFF_RECOMMENDED.end()
            );
        }
        Ok(())
    }
}
