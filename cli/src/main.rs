use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use textdex_core::{dataset, persist, tokenizer};
use textdex_core::{tag_documents, DocId, InvertedIndex, QueryPolicy, StopWords, TagOptions};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "textdex")]
#[command(about = "Build, query and tag a word-to-document inverted index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build an inverted index from a tab-delimited dataset
    Create {
        /// Dataset file with one `<id><TAB><text>` line per document
        #[arg(long)]
        dataset: PathBuf,
        /// Stop word file, one word per line
        #[arg(long)]
        stop_words: PathBuf,
        /// Where to write the serialized index
        #[arg(long)]
        output: PathBuf,
    },
    /// List the documents every given word occurs in
    Find(FindArgs),
    /// Mark windows of co-occurring words in the dataset text
    Tag(TagArgs),
}

#[derive(Debug, Parser)]
struct FindArgs {
    /// Serialized index to query
    #[arg(long)]
    index: PathBuf,

    /// Write the matching document ids here instead of standard output
    #[arg(long)]
    output: Option<PathBuf>,

    /// Skip words absent from the index instead of failing
    #[arg(long)]
    lenient: bool,

    /// Words that must all occur in a matching document
    #[arg(required = true)]
    words: Vec<String>,
}

#[derive(Debug, Parser)]
struct TagArgs {
    /// Serialized index to query windows against
    #[arg(long)]
    index: PathBuf,

    /// Dataset file the index was built from
    #[arg(long)]
    dataset: PathBuf,

    /// Stop word file, one word per line
    #[arg(long)]
    stop_words: PathBuf,

    /// Words per window
    #[arg(long)]
    window_size: NonZeroUsize,

    /// Documents a window's words must share for the window to be marked
    #[arg(long)]
    min_occurrences: usize,

    /// Where to write the tagged text
    #[arg(long)]
    output: PathBuf,

    /// Marker placed before a matching window
    #[arg(long, default_value = "[[")]
    open_marker: String,

    /// Marker placed after a matching window
    #[arg(long, default_value = "]]")]
    close_marker: String,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();
    let start = Instant::now();

    match cli.command {
        Commands::Create { dataset, stop_words, output } => create(&dataset, &stop_words, &output)?,
        Commands::Find(args) => find(&args)?,
        Commands::Tag(args) => tag(&args)?,
    }

    tracing::info!(took_s = start.elapsed().as_secs_f64(), "done");
    Ok(())
}

fn create(dataset_path: &Path, stop_words_path: &Path, output: &Path) -> Result<()> {
    let stop_words = StopWords::load(stop_words_path)?;
    let documents = dataset::load(dataset_path)?;
    let unique = tokenizer::unique_words(&documents, &stop_words);
    let index = InvertedIndex::from_documents(&unique)?;
    persist::dump(&index, output)?;
    Ok(())
}

fn find(args: &FindArgs) -> Result<()> {
    let index = persist::load(&args.index)?;
    let policy = if args.lenient { QueryPolicy::Lenient } else { QueryPolicy::Strict };

    // Query words go through the same cleaning as indexed text.
    let words: Vec<String> = args
        .words
        .iter()
        .map(|word| tokenizer::clean(word))
        .filter(|word| !word.is_empty())
        .collect();
    if words.is_empty() {
        return Err(anyhow!("no query words left after cleaning"));
    }

    let hits = index.query(&words, policy)?;
    let line = hits.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
    match &args.output {
        Some(path) => persist::write_atomic(path, format!("{line}\n").as_bytes())?,
        None => println!("{line}"),
    }
    tracing::info!(hits = hits.len(), "query complete");
    Ok(())
}

fn tag(args: &TagArgs) -> Result<()> {
    let index = persist::load(&args.index)?;
    let stop_words = StopWords::load(&args.stop_words)?;
    let documents = dataset::load(&args.dataset)?;

    // Windows run over the same token stream the index was built from.
    let streams: BTreeMap<DocId, String> = documents
        .iter()
        .map(|(&id, text)| (id, tokenizer::tokenize(text, &stop_words).join(" ")))
        .collect();

    let options = TagOptions {
        window_size: args.window_size,
        min_occurrences: args.min_occurrences,
        open_marker: args.open_marker.clone(),
        close_marker: args.close_marker.clone(),
        policy: QueryPolicy::Lenient,
    };
    let mut tagged = Vec::new();
    tag_documents(&index, &options, &streams, &mut tagged)?;
    persist::write_atomic(&args.output, &tagged)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn parse_create() {
        let cli = Cli::parse_from([
            "textdex",
            "create",
            "--dataset",
            "data.txt",
            "--stop-words",
            "stops.txt",
            "--output",
            "index.json",
        ]);
        match cli.command {
            Commands::Create { dataset, stop_words, output } => {
                assert_eq!(dataset, PathBuf::from("data.txt"));
                assert_eq!(stop_words, PathBuf::from("stops.txt"));
                assert_eq!(output, PathBuf::from("index.json"));
            }
            _ => panic!("expected create command"),
        }
    }

    #[test]
    fn find_requires_at_least_one_word() {
        let err = Cli::try_parse_from(["textdex", "find", "--index", "index.json"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn parse_find_flags() {
        let cli = Cli::parse_from(["textdex", "find", "--index", "index.json", "--lenient", "one", "test"]);
        match cli.command {
            Commands::Find(args) => {
                assert!(args.lenient);
                assert!(args.output.is_none());
                assert_eq!(args.words, vec!["one", "test"]);
            }
            _ => panic!("expected find command"),
        }
    }

    #[test]
    fn parse_tag_marker_defaults() {
        let cli = Cli::parse_from([
            "textdex",
            "tag",
            "--index",
            "index.json",
            "--dataset",
            "data.txt",
            "--stop-words",
            "stops.txt",
            "--window-size",
            "3",
            "--min-occurrences",
            "1",
            "--output",
            "tagged.txt",
        ]);
        match cli.command {
            Commands::Tag(args) => {
                assert_eq!(args.window_size.get(), 3);
                assert_eq!(args.min_occurrences, 1);
                assert_eq!(args.open_marker, "[[");
                assert_eq!(args.close_marker, "]]");
            }
            _ => panic!("expected tag command"),
        }
    }
}
