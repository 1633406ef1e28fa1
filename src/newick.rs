//src/newick.rs

use phylotree::tree::Tree;

use crate::errors::{Result, SummaryError};

/// Extracts the leaf-identifier tokens from a single-line Newick tree
/// description, in tree traversal order. Leaf labels look like
/// `9606.ENSP00000269305`; the token is everything before the first `.`.
/// Duplicates are kept, one token per leaf.
pub fn extract_leaf_ids(treestring: &str) -> Result<Vec<String>> {
    let tree = Tree::from_newick(treestring.trim())
        .map_err(|e| SummaryError::TreeParse(e.to_string()))?;

    let root = tree
        .get_root()
        .map_err(|e| SummaryError::TreeParse(e.to_string()))?;
    let order = tree
        .levelorder(&root)
        .map_err(|e| SummaryError::TreeParse(e.to_string()))?;

    let mut leaf_ids = Vec::new();
    for node_idx in &order {
        let node = tree
            .get(node_idx)
            .map_err(|e| SummaryError::TreeParse(e.to_string()))?;
        if node.is_tip() {
            let name = node.name.as_ref().ok_or_else(|| {
                SummaryError::TreeParse("tree contains an unlabeled leaf".to_string())
            })?;
            leaf_ids.push(leaf_token(name));
        }
    }
    Ok(leaf_ids)
}

fn leaf_token(label: &str) -> String {
    label.split('.').next().unwrap_or(label).to_string()
}
