//src/report.rs

use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::aggregate::AncestorCounts;
use crate::errors::Result;
use crate::types::{AnnotationFormat, RepSetMode, TaxId};

/// Fixed output file names consumed by the iTOL upload workflow.
pub const TAXID_LIST_FILENAME: &str = "output_taxidlist.txt";
pub const ANNOTATION_FILENAME: &str = "output_annotations.txt";

/// Static reference lists of representative taxids used to pad the
/// visualization with context taxa.
pub const REP_TAXIDS_FILENAME: &str = "rep_taxids.txt";
pub const REP_TAXIDS_BAC_FILENAME: &str = "rep_taxids_bac.txt";

impl RepSetMode {
    /// The reference file backing this mode, if any.
    pub fn filename(&self) -> Option<&'static str> {
        match self {
            RepSetMode::None => None,
            RepSetMode::All => Some(REP_TAXIDS_FILENAME),
            RepSetMode::BacteriaOnly => Some(REP_TAXIDS_BAC_FILENAME),
        }
    }
}

/// Reads a representative-taxid reference file (one taxid per line) whole
/// into memory. Blank lines are ignored; entries are kept verbatim.
pub fn load_rep_taxids<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut taxids = Vec::new();
    for line_result in reader.lines() {
        let line = line_result?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            taxids.push(trimmed.to_string());
        }
    }
    Ok(taxids)
}

/// Ancestor keys in ascending order, for stable output across runs.
fn sorted_taxids(counts: &AncestorCounts) -> Vec<TaxId> {
    let mut taxids: Vec<TaxId> = counts.keys().copied().collect();
    taxids.sort_unstable();
    taxids
}

/// One ancestor taxid per line, followed by every entry of the supplied
/// representative set. No duplicate suppression across the two sources:
/// iTOL tolerates repeats, and the rep entries carry no counts anyway.
pub fn taxid_list_text(counts: &AncestorCounts, rep_taxids: &[String]) -> String {
    let mut output = String::new();
    for taxid in sorted_taxids(counts) {
        writeln!(output, "{taxid}").unwrap();
    }
    for taxid in rep_taxids {
        writeln!(output, "{taxid}").unwrap();
    }
    output
}

/// iTOL annotation dataset: fixed header, then one row per ancestor.
///
/// Binary presence is the canonical format (`taxid\t1`; every listed key
/// has count >= 1 by construction). The multibar layout with absolute and
/// relative counts is the legacy format this tool originally wrote.
pub fn annotation_text(counts: &AncestorCounts, total: u64, format: AnnotationFormat) -> String {
    let mut output = String::new();

    match format {
        AnnotationFormat::BinaryPresence => {
            output.push_str(
                "DATASET_BINARY\n\
                 SEPARATOR TAB\n\
                 DATASET_LABEL\tGenomes With OG Member\n\
                 COLOR\t#006400\n\
                 FIELD_SHAPES\t1\n\
                 FIELD_LABELS\tPresent\n\
                 FIELD_COLORS\t#006400\n\
                 DATA\n",
            );
            for taxid in sorted_taxids(counts) {
                writeln!(output, "{taxid}\t1").unwrap();
            }
        }
        AnnotationFormat::PercentageBar => {
            output.push_str(
                "DATASET_MULTIBAR\n\
                 SEPARATOR TAB\n\
                 DATASET_LABEL\tGenomes With OG Member\n\
                 COLOR\t#006400\n\
                 FIELD_COLORS\t#006400\t#00ff00\n\
                 FIELD_LABELS\tAbsolute\tRelative\n\
                 ALIGN_FIELDS\t1\n\
                 DATA\n",
            );
            for taxid in sorted_taxids(counts) {
                let count = counts[&taxid];
                // Relative value is a percentage, for display purposes.
                let relative = if total == 0 {
                    0.0
                } else {
                    (count as f64 / total as f64) * 100.0
                };
                writeln!(output, "{taxid}\t{count}\t{relative:.4}").unwrap();
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::AHashMap;
    use std::io::Write;

    fn counts(entries: &[(TaxId, u64)]) -> AncestorCounts {
        let mut map = AHashMap::new();
        for (taxid, count) in entries {
            map.insert(*taxid, *count);
        }
        map
    }

    #[test]
    fn taxid_list_has_one_line_per_key() {
        let text = taxid_list_text(&counts(&[(9605, 2), (10066, 1)]), &[]);

        assert_eq!(text, "9605\n10066\n");
    }

    #[test]
    fn rep_taxids_are_appended_without_dedup() {
        let reps = vec!["9605".to_string(), "562".to_string()];
        let text = taxid_list_text(&counts(&[(9605, 2)]), &reps);

        // 9605 appears twice: once counted, once from the rep set.
        assert_eq!(text, "9605\n9605\n562\n");
    }

    #[test]
    fn binary_annotation_has_one_presence_row_per_key() {
        let map = counts(&[(9605, 2), (10066, 1)]);
        let text = annotation_text(&map, 3, AnnotationFormat::BinaryPresence);

        assert!(text.starts_with("DATASET_BINARY\n"));
        assert!(text.contains("SEPARATOR TAB\n"));

        let data_rows: Vec<&str> = text
            .lines()
            .skip_while(|l| *l != "DATA")
            .skip(1)
            .collect();
        assert_eq!(data_rows, vec!["9605\t1", "10066\t1"]);
    }

    #[test]
    fn binary_rows_round_trip_to_key_set() {
        let map = counts(&[(9605, 2), (10066, 1), (562, 4)]);
        let text = annotation_text(&map, 7, AnnotationFormat::BinaryPresence);

        let parsed: Vec<TaxId> = text
            .lines()
            .skip_while(|l| *l != "DATA")
            .skip(1)
            .map(|row| row.split('\t').next().unwrap().parse().unwrap())
            .collect();

        let mut expected = sorted_taxids(&map);
        expected.sort_unstable();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn percentage_annotation_carries_absolute_and_relative() {
        let map = counts(&[(9605, 2), (10066, 1)]);
        let text = annotation_text(&map, 3, AnnotationFormat::PercentageBar);

        assert!(text.starts_with("DATASET_MULTIBAR\n"));
        assert!(text.contains("9605\t2\t66.6667\n"));
        assert!(text.contains("10066\t1\t33.3333\n"));
    }

    #[test]
    fn loads_rep_taxids_skipping_blanks() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "9606\n\n562\n").expect("write reps");

        let reps = load_rep_taxids(file.path()).unwrap();
        assert_eq!(reps, vec!["9606".to_string(), "562".to_string()]);
    }
}
