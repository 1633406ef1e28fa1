//src/aggregate.rs

use ahash::AHashMap;

use crate::errors::{Result, SummaryError};
use crate::resolve::resolve;
use crate::taxdb::TaxonomyLookup;
use crate::types::TaxId;

/// A map from ancestor taxid -> number of leaves that resolved to it.
pub type AncestorCounts = AHashMap<TaxId, u64>;

/// Resolves every leaf identifier to its representative ancestor and tallies
/// the counts. The returned total is the number of input leaf identifiers,
/// not the number of distinct ancestors.
///
/// Leaves whose taxid is unknown to the taxonomy are skipped with a warning
/// rather than aborting the run; batch trees routinely carry a handful of
/// taxa the local database has never seen. Any other error propagates.
pub fn aggregate(
    taxonomy: &dyn TaxonomyLookup,
    leaf_ids: &[String],
    cutoff: usize,
) -> Result<(AncestorCounts, u64)> {
    let mut ancestor_counts: AncestorCounts = AHashMap::new();
    let mut skipped = 0u64;

    for leaf_id in leaf_ids {
        match resolve(taxonomy, leaf_id, cutoff) {
            Ok(ancestor) => {
                log::debug!("leaf {leaf_id} resolved to ancestor {ancestor}");
                *ancestor_counts.entry(ancestor).or_insert(0) += 1;
            }
            Err(SummaryError::TaxonNotFound(id)) => {
                log::warn!("skipping leaf {id}: not in taxonomy database");
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    if skipped > 0 {
        log::warn!("skipped {skipped} of {} leaves", leaf_ids.len());
    }

    Ok((ancestor_counts, leaf_ids.len() as u64))
}
