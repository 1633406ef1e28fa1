//src/resolve.rs

use crate::errors::{Result, SummaryError};
use crate::taxdb::TaxonomyLookup;
use crate::types::TaxId;

/// Clamps a requested cutoff into the bounds of a lineage of length `len`.
/// Total function: for any non-empty lineage this yields a valid index,
/// degrading toward the root and never past index 0; `len == 0` clamps to
/// 0 rather than underflowing.
fn effective_cutoff(len: usize, cutoff: usize) -> usize {
    cutoff.min(len.saturating_sub(1))
}

/// Resolves a leaf identifier to its representative ancestor at `cutoff`
/// levels below the root. Lineages shorter than the cutoff degrade to
/// their deepest entry; a lineage that resolves only to root yields root.
///
/// Leaf identifiers that are not numeric taxids are reported as
/// `TaxonNotFound`, same as ids the taxonomy has never heard of.
pub fn resolve(taxonomy: &dyn TaxonomyLookup, leaf_id: &str, cutoff: usize) -> Result<TaxId> {
    let taxid: TaxId = leaf_id
        .parse()
        .map_err(|_| SummaryError::TaxonNotFound(leaf_id.to_string()))?;

    let lineage = taxonomy.lineage(taxid)?;

    // Some lineages resolve to root only.
    if lineage.len() == 1 {
        return Ok(lineage[0]);
    }

    Ok(lineage[effective_cutoff(lineage.len(), cutoff)])
}
