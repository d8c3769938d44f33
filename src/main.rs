//! CLI for admonition-filter - run by Pandoc as a JSON filter.
//!
//! `pandoc doc.md --filter admonition-filter -o doc.pdf`

use admonition_filter::{admonitions, FilterOptions};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output format Pandoc passes to filters (e.g. latex)
    format: Option<String>,

    /// Read the Pandoc JSON document from this file instead of stdin
    #[arg(long)]
    input: Option<PathBuf>,

    /// Write the filtered document to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Pretty-print the output JSON
    #[arg(long)]
    pretty: bool,

    /// Fail on documents newer than the supported pandoc-api-version
    #[arg(long)]
    strict: bool,

    /// Log every rewritten block to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    let _ = env_logger::builder()
        .filter_module("admonition_filter", level)
        .parse_default_env()
        .try_init();

    let options = FilterOptions {
        pretty: args.pretty,
        strict_api_version: args.strict,
        target_format: args.format,
    };
    let pipeline = admonitions(options);

    let reader: Box<dyn Read> = match &args.input {
        Some(path) => match File::open(path) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(e) => {
                eprintln!("Error opening {:?}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Box::new(io::stdin().lock()),
    };
    let writer: Box<dyn Write> = match &args.output {
        Some(path) => match File::create(path) {
            Ok(file) => Box::new(BufWriter::new(file)),
            Err(e) => {
                eprintln!("Error creating {:?}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Box::new(io::stdout().lock()),
    };

    if let Err(e) = pipeline.run(reader, writer) {
        eprintln!("Error filtering document: {}", e);
        std::process::exit(1);
    }
}
