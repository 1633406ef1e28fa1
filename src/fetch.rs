//src/fetch.rs

use std::fs;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;

use crate::errors::{Result, SummaryError};
use crate::types::TreeSource;

/// Fixed eggNOG tree repository endpoint; the tree for a NOG lives at
/// `{base}/{nog}`.
pub const EGGNOG_TREE_BASE_URL: &str = "http://eggnogapi.embl.de/nog_data/text/tree";

/// Server answers that mean the NOG has no retrievable tree.
const REMOTE_FAILURE_CODES: [u16; 3] = [404, 500, 503];

/// Turns a failing server status into `RemoteNotFound`; any other status
/// lets the response through.
fn check_remote_status(nog: &str, status: u16) -> Result<()> {
    if REMOTE_FAILURE_CODES.contains(&status) {
        return Err(SummaryError::RemoteNotFound {
            id: nog.to_string(),
            status,
        });
    }
    Ok(())
}

/// Obtains the single-line tree description for the configured source.
pub fn load_tree_description(source: &TreeSource) -> Result<String> {
    match source {
        TreeSource::LocalFile(path) => read_tree_file(path),
        TreeSource::RemoteNog(nog) => fetch_nog_tree(nog),
    }
}

/// Reads the first line of a tree file, transparently decompressing `.gz`.
pub fn read_tree_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let file = File::open(path)?;

    let is_gz = path
        .extension()
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let mut reader: Box<dyn BufRead> = if is_gz {
        Box::new(BufReader::new(MultiGzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    let mut treestring = String::new();
    reader.read_line(&mut treestring)?;
    let treestring = treestring.trim_end().to_string();

    if treestring.is_empty() {
        return Err(SummaryError::TreeParse(format!(
            "{} contains no tree description",
            path.display()
        )));
    }
    Ok(treestring)
}

/// Fetches the tree for a NOG from the eggNOG repository, caching the raw
/// response to `{nog}.txt` next to the working directory. A cached file is
/// reused without touching the network.
pub fn fetch_nog_tree(nog: &str) -> Result<String> {
    let nog = nog.trim();
    let cache_path = PathBuf::from(format!("{nog}.txt"));

    if cache_path.is_file() {
        log::info!("Found a matching tree file on disk: {}", cache_path.display());
        return read_tree_file(&cache_path);
    }

    let url = format!("{EGGNOG_TREE_BASE_URL}/{nog}");
    log::info!("Downloading tree for {nog} from eggNOG ({url}).");

    let response = reqwest::blocking::get(url.as_str())?;
    check_remote_status(nog, response.status().as_u16())?;

    let text = response.text()?;
    fs::write(&cache_path, &text)?;
    log::info!("Download complete, cached to {}.", cache_path.display());

    let treestring = text
        .lines()
        .next()
        .unwrap_or("")
        .trim_end()
        .to_string();
    if treestring.is_empty() {
        return Err(SummaryError::TreeParse(format!(
            "eggNOG returned an empty tree for {nog}"
        )));
    }
    Ok(treestring)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    #[test]
    fn reads_first_line_only() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "(9606.P1,10090.P2);\nsecond line is ignored\n").expect("write tree");

        let treestring = read_tree_file(file.path()).unwrap();
        assert_eq!(treestring, "(9606.P1,10090.P2);");
    }

    #[test]
    fn reads_gzipped_tree_files() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("tree.txt.gz");

        let file = File::create(&path).expect("create gz");
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder
            .write_all(b"(9606.P1,10090.P2);\n")
            .expect("write gz");
        encoder.finish().expect("finish gz");

        let treestring = read_tree_file(&path).unwrap();
        assert_eq!(treestring, "(9606.P1,10090.P2);");
    }

    #[test]
    fn empty_file_is_a_parse_error() {
        let file = tempfile::NamedTempFile::new().expect("temp file");

        assert!(matches!(
            read_tree_file(file.path()),
            Err(SummaryError::TreeParse(_))
        ));
    }

    #[test]
    fn failure_codes_map_to_remote_not_found() {
        for status in [404, 500, 503] {
            match check_remote_status("COG0001", status) {
                Err(SummaryError::RemoteNotFound { id, status: got }) => {
                    assert_eq!(id, "COG0001");
                    assert_eq!(got, status);
                }
                other => panic!("expected RemoteNotFound for {status}, got {other:?}"),
            }
        }
    }

    #[test]
    fn other_statuses_pass_through() {
        assert!(check_remote_status("COG0001", 200).is_ok());
        assert!(check_remote_status("COG0001", 301).is_ok());
        assert!(check_remote_status("COG0001", 418).is_ok());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            read_tree_file("no/such/tree.txt"),
            Err(SummaryError::Io(_))
        ));
    }
}
