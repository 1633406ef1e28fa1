use std::error::Error;
use std::fs;
use std::path::PathBuf;

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};

use treetaxa_rs::errors::SummaryError;
use treetaxa_rs::fetch::load_tree_description;
use treetaxa_rs::report::{load_rep_taxids, ANNOTATION_FILENAME, TAXID_LIST_FILENAME};
use treetaxa_rs::summarize_tree;
use treetaxa_rs::taxdb::TaxDb;
use treetaxa_rs::types::{AnnotationFormat, RepSetMode, SummaryConfig, TreeSource};

fn spinner(color: &str, msg: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&[
                "⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏",
            ])
            .template(&format!("{{spinner:.{color}}} {{msg}}"))
            .expect("Invalid spinner template"),
    );
    bar.set_message(msg.to_string());
    bar
}

fn prompt_config() -> Result<SummaryConfig, Box<dyn Error>> {
    let theme = ColorfulTheme::default();

    // 1. Tree source
    let source_choice = Select::with_theme(&theme)
        .with_prompt("Please choose an option")
        .items(&["Specify a NOG", "Provide a tree file"])
        .default(0)
        .interact()?;

    let source = if source_choice == 0 {
        let nog: String = Input::with_theme(&theme)
            .with_prompt("Name of the NOG?")
            .interact_text()?;
        TreeSource::RemoteNog(nog.trim().to_string())
    } else {
        // Keep asking until the file actually exists.
        loop {
            let path: String = Input::with_theme(&theme)
                .with_prompt("Name of the input file?")
                .interact_text()?;
            let path = PathBuf::from(path.trim());
            if path.is_file() {
                break TreeSource::LocalFile(path);
            }
            eprintln!("Couldn't find that file. Try again.");
        }
    };

    // 2. Rank cutoff
    let cutoff: usize = Input::with_theme(&theme)
        .with_prompt("Rank cutoff (2-7 recommended)")
        .default(7)
        .interact_text()?;

    // 3. Representative set mode
    let rep_choice = Select::with_theme(&theme)
        .with_prompt("Append representative taxids?")
        .items(&[
            "0  No representatives",
            "1  All representatives",
            "2  Bacterial representatives only",
        ])
        .default(0)
        .interact()?;
    let rep_mode = RepSetMode::from_choice(rep_choice)?;

    // Binary presence is canonical; the legacy multibar layout stays
    // reachable through the environment rather than a fifth prompt.
    let format = match std::env::var("TREETAXA_ANNOTATION").as_deref() {
        Ok("multibar") => AnnotationFormat::PercentageBar,
        _ => AnnotationFormat::BinaryPresence,
    };

    let config = SummaryConfig {
        source,
        cutoff,
        rep_mode,
        format,
    };
    config.validate()?;
    Ok(config)
}

fn run(config: &SummaryConfig) -> Result<(), SummaryError> {
    // 1. Obtain the tree description (local file or eggNOG download)
    let bar = spinner("blue", "Retrieving tree description...");
    let treestring = load_tree_description(&config.source)?;
    bar.finish_with_message("Tree description ready.");

    // 2. Load the local taxonomy database
    let taxdb_path = std::env::var("TAXDB").unwrap_or_else(|_| "./taxDB".to_string());
    let bar = spinner("green", "Loading taxonomy database...");
    let taxdb = TaxDb::from_file(&taxdb_path)?;
    bar.finish_with_message("Taxonomy database loaded.");

    // 3. Resolve leaves and tally ancestors
    let bar = spinner("yellow", "Retrieving parent nodes for each leaf...");
    let results = summarize_tree(&taxdb, &treestring, config.cutoff)?;
    bar.finish_with_message(format!(
        "Resolved {} leaves to {} ancestors ({} skipped).",
        results.total_leaves,
        results.ancestor_counts.len(),
        results.skipped_leaves()
    ));

    for &taxid in results.ancestor_counts.keys() {
        log::debug!(
            "ancestor {taxid} ({}, rank {})",
            taxdb.name(taxid).unwrap_or("?"),
            taxdb.rank(taxid).unwrap_or("?")
        );
    }

    // 4. Write the two output files
    let rep_taxids = match config.rep_mode.filename() {
        Some(filename) => load_rep_taxids(filename)?,
        None => Vec::new(),
    };

    fs::write(
        TAXID_LIST_FILENAME,
        results.get_taxid_list_text(&rep_taxids),
    )?;
    println!("Wrote new taxid list to {TAXID_LIST_FILENAME}.");

    fs::write(
        ANNOTATION_FILENAME,
        results.get_annotation_text(config.format),
    )?;
    println!("Wrote new annotation file to {ANNOTATION_FILENAME}.");

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = prompt_config()?;
    run(&config)?;
    Ok(())
}
