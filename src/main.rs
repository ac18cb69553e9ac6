use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::Value;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use bitfuse::binary::{self, SnapshotHeader};
use bitfuse::{Config, Fuse, MatchDetail, SearchOptions, SearchResult};

mod cli;
use cli::display::{self, *};
use cli::{Cli, Commands, IndexArgs};

/// Inputs at least this large get a progress bar while indexing.
#[cfg(feature = "parallel")]
const PROGRESS_MIN_ITEMS: usize = 10_000;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Commands::Search {
            file,
            query,
            limit,
            json,
            index,
        } => run_search(&file, &query, limit, json, &index),
        Commands::Index {
            file,
            output,
            index,
        } => run_index(&file, &output, &index),
        Commands::Inspect { file } => run_inspect(&file),
    };

    if let Err(e) = outcome {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

fn is_snapshot(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "bfse")
}

fn read_items(path: &Path) -> Result<Vec<Value>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    match value {
        Value::Array(items) => Ok(items),
        _ => bail!("{} must contain a JSON array", path.display()),
    }
}

fn load_snapshot(path: &Path) -> Result<Fuse<Value>> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    binary::load(&bytes).with_context(|| format!("failed to load snapshot {}", path.display()))
}

/// Build an index, with a progress bar for large inputs.
fn build_index(items: Vec<Value>, config: Config) -> Result<Fuse<Value>> {
    let mut fuse = Fuse::new(Vec::new(), config)?;

    #[cfg(feature = "parallel")]
    let progress = if items.len() >= PROGRESS_MIN_ITEMS {
        let pb = indicatif::ProgressBar::new(items.len() as u64);
        pb.set_style(
            indicatif::ProgressStyle::default_bar()
                .template("{prefix:>10} [{bar:40}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| indicatif::ProgressStyle::default_bar())
                .progress_chars("=> "),
        );
        pb.set_prefix("Indexing");
        pb
    } else {
        indicatif::ProgressBar::hidden()
    };

    for item in items {
        fuse.add(item);
        #[cfg(feature = "parallel")]
        progress.inc(1);
    }

    #[cfg(feature = "parallel")]
    progress.finish_with_message(format!("{} items", fuse.len()));

    Ok(fuse)
}

fn run_search(path: &Path, query: &str, limit: usize, json: bool, args: &IndexArgs) -> Result<()> {
    let fuse = if is_snapshot(path) {
        if args.has_overrides() {
            warn!("snapshot keeps the options it was built with; ignoring key/config flags");
        }
        let mut fuse = load_snapshot(path)?;
        fuse.set_result_fields(true, true);
        fuse
    } else {
        let config = args
            .to_config()?
            .include_score(true)
            .include_matches(true);
        build_index(read_items(path)?, config)?
    };

    let start = Instant::now();
    let results = fuse.search_with(query, SearchOptions::limit(limit));
    let elapsed = start.elapsed();
    info!(results = results.len(), elapsed_us = elapsed.as_micros() as u64, "searched");

    if json {
        let owned: Vec<_> = results.iter().map(SearchResult::to_owned_result).collect();
        println!("{}", serde_json::to_string_pretty(&owned)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No matches for {:?}", query);
        return Ok(());
    }

    let colors = display::use_colors();
    for (rank, result) in results.iter().enumerate() {
        let score = result
            .score
            .map(display::score_value)
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{} {} {}",
            pad_left(&format!("{}.", rank + 1), 4),
            score,
            dim(&format!("#{}", result.ref_index))
        );
        print_item(result.item, result.matches.as_deref(), colors);
    }
    println!(
        "{}",
        dim(&format!(
            "{} of {} items in {:.2?}",
            results.len(),
            fuse.len(),
            elapsed
        ))
    );
    Ok(())
}

fn print_item(item: &Value, matches: Option<&[MatchDetail]>, colors: bool) {
    let matches = matches.unwrap_or_default();
    if let Value::String(text) = item {
        let ranges: Vec<_> = matches.iter().flat_map(|m| m.ranges.iter().copied()).collect();
        println!("     {}", highlight(text, &ranges, colors));
        return;
    }

    println!("     {}", dim(&item.to_string()));
    for detail in matches {
        let key = match (&detail.key, detail.ref_index) {
            (Some(key), Some(i)) => format!("{}[{}]", key, i),
            (Some(key), None) => key.clone(),
            (None, _) => String::new(),
        };
        println!(
            "     {}: {}",
            label(&key),
            highlight(&detail.value, &detail.ranges, colors)
        );
    }
}

fn run_index(path: &Path, output: &Path, args: &IndexArgs) -> Result<()> {
    let config = args.to_config()?;
    let items = read_items(path)?;

    let start = Instant::now();
    let fuse = build_index(items, config)?;
    let bytes = binary::save(&fuse)?;
    fs::write(output, &bytes).with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "✅ indexed {} items into {} ({}) in {:.2?}",
        fuse.len(),
        output.display(),
        format_size(bytes.len()),
        start.elapsed()
    );
    Ok(())
}

fn run_inspect(path: &Path) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let info = binary::inspect(&bytes)?;
    let header = info.header;

    section_top("HEADER");
    row(&format!(" magic     {}", String::from_utf8_lossy(&binary::MAGIC)));
    row(&format!(" version   {}", header.version));
    row(&format!(
        " flags     {:08b}  keys={} extended={}",
        header.flags.bits(),
        header.flags.has_keys(),
        header.flags.extended_search()
    ));
    row(&format!(" entries   {}", header.entry_count));
    section_bot();

    section_top("LAYOUT");
    row(&format!(" header    {}", format_size(SnapshotHeader::SIZE)));
    row(&format!(" payload   {}", format_size(header.payload_len as usize)));
    row(&format!(" footer    {}", format_size(binary::SnapshotFooter::SIZE)));
    row(&format!(" total     {}", format_size(bytes.len())));
    section_bot();

    section_top("INTEGRITY");
    row(&format!(
        " crc32     stored {:#010x} computed {:#010x}  {}",
        info.stored_crc32,
        info.computed_crc32,
        status(info.checksum_ok())
    ));
    section_bot();

    if info.checksum_ok() {
        let fuse = load_snapshot(path)?;
        section_top("INDEX");
        let keys: Vec<String> = fuse
            .keys()
            .keys()
            .iter()
            .map(|key| format!("{} ({:.3})", key.id, key.weight))
            .collect();
        row(&format!(
            " keys      {}",
            if keys.is_empty() { "-".to_string() } else { keys.join(", ") }
        ));
        row(&format!(" threshold {}", fuse.config().threshold));
        row(&format!(" next ref  {}", fuse.next_ref_index()));
        section_bot();
    }

    Ok(())
}
