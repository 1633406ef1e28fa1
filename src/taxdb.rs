//src/taxdb.rs

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ahash::AHashMap;

use crate::errors::{Result, SummaryError};
use crate::types::TaxId;

pub type ParentMap = AHashMap<TaxId, TaxId>;
pub type NameMap = AHashMap<TaxId, String>;
pub type RankMap = AHashMap<TaxId, String>;

/// Looks up the full root-first lineage of a taxon. Injected into the
/// resolver/aggregator so the core logic never touches the database
/// directly and tests can substitute a stub.
pub trait TaxonomyLookup {
    /// Ordered ancestor ids from the root down to `tax_id` itself.
    /// Never empty on success; fails with `TaxonNotFound` for unknown ids.
    fn lineage(&self, tax_id: TaxId) -> Result<Vec<TaxId>>;
}

/// Parses a taxDB file in the format:
/// ```text
/// <taxid>\t<parentid>\t<taxname>\t<rank>
/// ```
/// Returns:
/// - a `ParentMap` mapping child_taxid -> parent_taxid
/// - a `NameMap` mapping taxid -> taxname
/// - a `RankMap` mapping taxid -> rank
pub fn parse_taxdb<P: AsRef<Path>>(filepath: P) -> Result<(ParentMap, NameMap, RankMap)> {
    let file = File::open(filepath)?;
    let reader = BufReader::new(file);

    let mut parent_map: ParentMap = AHashMap::new();
    let mut name_map: NameMap = AHashMap::new();
    let mut rank_map: RankMap = AHashMap::new();

    for line_result in reader.lines() {
        let line = line_result?;
        // Expecting 4 tab-separated fields: taxid, parentid, taxname, rank
        let parts: Vec<&str> = line.split('\t').collect();

        // Skip malformed lines
        if parts.len() < 4 {
            continue;
        }

        let taxid: TaxId = parts[0].trim().parse().unwrap_or(0);
        let parentid: TaxId = parts[1].trim().parse().unwrap_or(0);

        if taxid != 0 {
            parent_map.insert(taxid, parentid);
            name_map.insert(taxid, parts[2].trim().to_string());
            rank_map.insert(taxid, parts[3].trim().to_string());
        }
    }
    Ok((parent_map, name_map, rank_map))
}

/// Taxonomy provider backed by a local taxDB flat file. The database itself
/// is maintained elsewhere; this only reads it.
pub struct TaxDb {
    parent_map: ParentMap,
    name_map: NameMap,
    rank_map: RankMap,
}

impl TaxDb {
    pub fn from_file<P: AsRef<Path>>(filepath: P) -> Result<Self> {
        let (parent_map, name_map, rank_map) = parse_taxdb(filepath)?;
        log::info!("Loaded taxonomy database with {} nodes.", parent_map.len());
        Ok(TaxDb {
            parent_map,
            name_map,
            rank_map,
        })
    }

    pub fn name(&self, tax_id: TaxId) -> Option<&str> {
        self.name_map.get(&tax_id).map(String::as_str)
    }

    pub fn rank(&self, tax_id: TaxId) -> Option<&str> {
        self.rank_map.get(&tax_id).map(String::as_str)
    }
}

impl TaxonomyLookup for TaxDb {
    fn lineage(&self, tax_id: TaxId) -> Result<Vec<TaxId>> {
        if !self.parent_map.contains_key(&tax_id) {
            return Err(SummaryError::TaxonNotFound(tax_id.to_string()));
        }

        // Climb child -> parent; in taxDB the root is its own parent, which
        // terminates the walk (same convention as self-referential nodes in
        // the count propagation of the original pipeline). The walk is also
        // bounded by the table size so a corrupt database containing a
        // multi-node cycle cannot loop forever.
        let mut lineage = vec![tax_id];
        let mut node = tax_id;
        for _ in 0..self.parent_map.len() {
            match self.parent_map.get(&node) {
                Some(&parent) if parent != node && parent != 0 => {
                    lineage.push(parent);
                    node = parent;
                }
                _ => break,
            }
        }

        lineage.reverse();
        Ok(lineage)
    }
}
