// src/lib.rs
pub mod aggregate;
pub mod errors;
pub mod fetch;
pub mod newick;
pub mod report;
pub mod resolve;
pub mod taxdb;
pub mod types;

use crate::aggregate::{aggregate, AncestorCounts};
use crate::errors::Result;
use crate::newick::extract_leaf_ids;
use crate::report::{annotation_text, taxid_list_text};
use crate::taxdb::TaxonomyLookup;
use crate::types::AnnotationFormat;

/// A struct to hold the summary of one tree run. Only structured data is
/// stored; output text is generated on demand.
pub struct SummaryResults {
    /// A map from ancestor taxid -> number of leaves resolved to it
    pub ancestor_counts: AncestorCounts,

    /// Number of leaf identifiers extracted from the tree (including any
    /// leaves that were skipped during resolution)
    pub total_leaves: u64,
}

impl SummaryResults {
    /// How many leaves failed to resolve and were skipped.
    pub fn skipped_leaves(&self) -> u64 {
        self.total_leaves - self.ancestor_counts.values().sum::<u64>()
    }

    /// Generate the taxid list text on demand, appending the given
    /// representative set.
    pub fn get_taxid_list_text(&self, rep_taxids: &[String]) -> String {
        taxid_list_text(&self.ancestor_counts, rep_taxids)
    }

    /// Generate the iTOL annotation dataset text on demand.
    pub fn get_annotation_text(&self, format: AnnotationFormat) -> String {
        annotation_text(&self.ancestor_counts, self.total_leaves, format)
    }
}

/// Full summarization pipeline for one tree description:
///  1) extract leaf taxid tokens from the Newick string
///  2) resolve each leaf to its representative ancestor at `cutoff`
///  3) tally leaves per ancestor
pub fn summarize_tree(
    taxonomy: &dyn TaxonomyLookup,
    treestring: &str,
    cutoff: usize,
) -> Result<SummaryResults> {
    let leaf_ids = extract_leaf_ids(treestring)?;
    log::info!("Extracted {} leaves from tree.", leaf_ids.len());

    let (ancestor_counts, total_leaves) = aggregate(taxonomy, &leaf_ids, cutoff)?;
    log::info!(
        "Resolved {} leaves to {} distinct ancestors.",
        total_leaves,
        ancestor_counts.len()
    );

    Ok(SummaryResults {
        ancestor_counts,
        total_leaves,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::tests::StubTaxonomy;

    #[test]
    fn test_summarize_tree_api() {
        let taxonomy = StubTaxonomy::new(&[
            (9606, &[1, 2606, 9605, 9606]),
            (10090, &[1, 2606, 10066, 10090]),
        ]);

        let results = summarize_tree(&taxonomy, "(9606.P1,(10090.P2,9606.P3));", 2)
            .expect("Summarization failed");

        assert_eq!(results.total_leaves, 3);
        assert_eq!(results.skipped_leaves(), 0);
        assert_eq!(results.ancestor_counts[&9605], 2);
        assert_eq!(results.ancestor_counts[&10066], 1);

        let annotation = results.get_annotation_text(AnnotationFormat::BinaryPresence);
        assert!(annotation.contains("9605\t1\n"));
        assert!(annotation.contains("10066\t1\n"));

        let list = results.get_taxid_list_text(&[]);
        assert_eq!(list.lines().count(), 2);
    }

    #[test]
    fn unknown_leaves_are_skipped_not_fatal() {
        let taxonomy = StubTaxonomy::new(&[(9606, &[1, 2606, 9605, 9606])]);

        let results = summarize_tree(&taxonomy, "(9606.P1,99999.P2);", 2)
            .expect("Summarization failed");

        assert_eq!(results.total_leaves, 2);
        assert_eq!(results.skipped_leaves(), 1);
        assert_eq!(results.ancestor_counts.len(), 1);
    }
}
