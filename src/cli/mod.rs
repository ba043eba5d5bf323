//! # CLI Module
//!
//! Command-line front end for the comparison engines.
//!
//! ## Usage
//! ```bash
//! # Groups of identical .txt files under the current directory
//! comparefiles --identical .txt
//!
//! # Pairwise similarity of .txt files, highest first
//! comparefiles --similar --sort
//!
//! # Both modes, another directory and algorithm
//! comparefiles -i '*' -s .md -d ~/notes -a token_set_ratio
//!
//! # JSON output
//! comparefiles --identical .csv --output json
//! ```

use clap::{ArgGroup, Parser, ValueEnum};
use comparefiles::core::identical::IdenticalGroupEngine;
use comparefiles::core::matrix::{SimilarityMatrixEngine, DEFAULT_SELECTOR};
use comparefiles::core::reporter::{
    identical_lines, identical_summary_line, pair_line, similarity_summary_line, DisplayOptions,
};
use comparefiles::core::scanner::ScanConfig;
use comparefiles::core::CancellationToken;
use comparefiles::error::{CompareFilesError, Result};
use comparefiles::events::{
    CompareEvent, Event, EventChannel, EventReceiver, FingerprintEvent, PipelineEvent, ScanEvent,
};
use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread::{self, JoinHandle};

/// Exit code when interrupted with Ctrl+C
const EXIT_INTERRUPTED: u8 = 130;

/// Find identical files and score text similarity in a directory tree
#[derive(Parser, Debug)]
#[command(name = "comparefiles")]
#[command(author, version, about, long_about = None)]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .multiple(true)
        .args(["identical", "similar"])
))]
pub struct Cli {
    /// Find byte-identical files matching SELECTOR (e.g. .txt, *.csv, *)
    #[arg(short, long, value_name = "SELECTOR")]
    identical: Option<String>,

    /// Score similarity between files matching SELECTOR [default: .txt]
    #[arg(
        short,
        long,
        value_name = "SELECTOR",
        num_args = 0..=1,
        default_missing_value = DEFAULT_SELECTOR
    )]
    similar: Option<String>,

    /// Directory to scan recursively
    #[arg(short, long, default_value = ".")]
    directory: PathBuf,

    /// Sort similarity results by score, highest first (prints after the scan)
    #[arg(long)]
    sort: bool,

    /// Similarity algorithm: ratio, partial_ratio, token_sort_ratio, token_set_ratio
    #[arg(short, long, default_value = "ratio")]
    algorithm: String,

    /// Print absolute paths instead of paths relative to the directory
    #[arg(long)]
    full_paths: bool,

    /// Do not separate identical groups with blank lines
    #[arg(long)]
    flat: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    output: OutputFormat,

    /// Skip hidden files and directories
    #[arg(long)]
    skip_hidden: bool,

    /// Follow symbolic links into directories
    #[arg(long)]
    follow_symlinks: bool,

    /// Verbose logging to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Plain text lines
    Text,
    /// One JSON document per mode
    Json,
}

struct Options {
    output: OutputFormat,
    display: DisplayOptions,
    cancel: CancellationToken,
}

/// Run the CLI
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    comparefiles::init_tracing(cli.verbose);

    let cancel = CancellationToken::new();
    let scan_config = ScanConfig {
        follow_symlinks: cli.follow_symlinks,
        include_hidden: !cli.skip_hidden,
        max_depth: None,
    };

    // Validate everything before any scan starts
    let identical = cli
        .identical
        .as_ref()
        .map(|selector| {
            IdenticalGroupEngine::builder()
                .directory(&cli.directory)
                .selector(selector.as_str())
                .scan_config(scan_config.clone())
                .cancellation(cancel.clone())
                .build()
        })
        .transpose()?;

    let similar = cli
        .similar
        .as_ref()
        .map(|selector| {
            SimilarityMatrixEngine::builder()
                .directory(&cli.directory)
                .selector(selector.as_str())
                .algorithm(cli.algorithm.as_str())
                .sorted(cli.sort)
                .scan_config(scan_config.clone())
                .cancellation(cancel.clone())
                .build()
        })
        .transpose()?;

    let handler_token = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || handler_token.cancel()) {
        tracing::debug!("could not install Ctrl+C handler: {e}");
    }

    let options = Options {
        output: cli.output,
        display: DisplayOptions {
            full_paths: cli.full_paths,
            group_separators: !cli.flat,
        },
        cancel,
    };

    if let Some(engine) = identical {
        run_identical(&engine, &options)?;
    }
    if !options.cancel.is_cancelled() {
        if let Some(engine) = similar {
            run_similar(&engine, &options)?;
        }
    }

    if options.cancel.is_cancelled() {
        Ok(ExitCode::from(EXIT_INTERRUPTED))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn run_identical(engine: &IdenticalGroupEngine, options: &Options) -> Result<()> {
    let progress = progress_bar(options.output);
    let (sender, receiver) = EventChannel::new();
    let listener = spawn_event_listener(receiver, progress.clone());

    let result = engine.run_with_events(&sender);

    drop(sender);
    finish_listener(listener, progress.as_ref());
    let report = result?;

    let mut out = io::stdout().lock();
    match options.output {
        OutputFormat::Text => {
            for line in identical_lines(&report, options.display) {
                writeln!(out, "{line}").map_err(output_error)?;
            }
            writeln!(out, "{}", identical_summary_line(&report)).map_err(output_error)?;
        }
        OutputFormat::Json => {
            let document = serde_json::json!({
                "mode": "identical",
                "summary": report.summary(),
                "report": report,
            });
            write_json(&mut out, &document)?;
        }
    }

    Ok(())
}

fn run_similar(engine: &SimilarityMatrixEngine, options: &Options) -> Result<()> {
    let progress = progress_bar(options.output);
    let (sender, receiver) = EventChannel::new();
    let listener = spawn_event_listener(receiver, progress.clone());

    let mut out = io::stdout();
    let mut write_error: Option<io::Error> = None;
    let mut collected = Vec::new();

    let result = engine.run_with_events(&sender, |pair| match options.output {
        OutputFormat::Text => {
            if write_error.is_some() {
                return;
            }
            let line = pair_line(&pair, options.display);
            let written = match progress {
                Some(ref pb) => pb.suspend(|| writeln!(out, "{line}")),
                None => writeln!(out, "{line}"),
            };
            if let Err(e) = written {
                // Nobody is reading any more; stop scoring
                write_error = Some(e);
                options.cancel.cancel();
            }
        }
        OutputFormat::Json => collected.push(pair),
    });

    drop(sender);
    finish_listener(listener, progress.as_ref());
    let report = result?;
    if let Some(e) = write_error {
        return Err(output_error(e));
    }

    let mut out = out.lock();
    match options.output {
        OutputFormat::Text => {
            writeln!(out, "{}", similarity_summary_line(&report)).map_err(output_error)?;
        }
        OutputFormat::Json => {
            let document = serde_json::json!({
                "mode": "similarity",
                "report": report,
                "pairs": collected,
            });
            write_json(&mut out, &document)?;
        }
    }

    Ok(())
}

fn output_error(e: io::Error) -> CompareFilesError {
    CompareFilesError::Output(e.to_string())
}

fn write_json(out: &mut impl Write, document: &serde_json::Value) -> Result<()> {
    let json = serde_json::to_string_pretty(document)
        .map_err(|e| CompareFilesError::Output(e.to_string()))?;
    writeln!(out, "{json}").map_err(output_error)
}

/// Progress bar on stderr, only for text output to a terminal
fn progress_bar(output: OutputFormat) -> Option<ProgressBar> {
    if output != OutputFormat::Text || !Term::stderr().is_term() {
        return None;
    }

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );
    Some(pb)
}

/// Wait for the listener to drain its events, then clear the bar
fn finish_listener(listener: JoinHandle<()>, progress: Option<&ProgressBar>) {
    if listener.join().is_err() {
        tracing::debug!("event listener thread panicked; progress output may be incomplete");
    }
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
}

/// Print a message to stderr without tearing the progress bar
fn notify(progress: &Option<ProgressBar>, message: &str) {
    match progress {
        Some(pb) => pb.suspend(|| eprintln!("{message}")),
        None => eprintln!("{message}"),
    }
}

fn spawn_event_listener(receiver: EventReceiver, progress: Option<ProgressBar>) -> JoinHandle<()> {
    thread::spawn(move || {
        for event in receiver.iter() {
            match event {
                Event::Fingerprint(FingerprintEvent::Unreadable { message, .. })
                | Event::Compare(CompareEvent::Unreadable { message, .. }) => {
                    notify(&progress, &message);
                }
                Event::Pipeline(PipelineEvent::Cancelled) => {
                    notify(&progress, "Interrupted; showing results found so far");
                }
                event => {
                    if let Some(ref pb) = progress {
                        update_progress(pb, event);
                    }
                }
            }
        }
    })
}

fn update_progress(pb: &ProgressBar, event: Event) {
    match event {
        Event::Pipeline(PipelineEvent::PhaseChanged { phase }) => {
            pb.set_message(phase.to_string());
        }
        Event::Scan(ScanEvent::FileFound { .. }) => {
            pb.inc_length(1);
        }
        Event::Scan(ScanEvent::Completed { total_files }) => {
            pb.set_length(total_files as u64);
            pb.set_position(0);
        }
        Event::Fingerprint(FingerprintEvent::Progress(p)) => {
            pb.set_position(p.completed as u64);
        }
        Event::Compare(CompareEvent::Started {
            total_combinations, ..
        }) => {
            pb.set_length(total_combinations as u64);
            pb.set_position(0);
        }
        Event::Compare(CompareEvent::Progress(p)) => {
            pb.set_position(p.comparisons_completed as u64);
        }
        _ => {}
    }
}
