use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use kmer_graph_traverse::config::{init_logging, LogFormat, LoggingConfig};
use kmer_graph_traverse::traversal::{traverse_graph_stats_with, traverse_graph_with, walk_graph_stats_with};
use kmer_graph_traverse::{open_graph, LinePolicy, MissPolicy, TraversalOptions, TraversalReport};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Eager traversal calling a per-node handler
    Callback,
    /// Eager traversal, statistics only
    Stats,
    /// Pull-based traversal
    Walk,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LineMode {
    Trimmed,
    Raw,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MissMode {
    CountAsEmpty,
    Skip,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "kmer-traverse")]
#[command(about = "Look up query k-mers in a colored k-mer graph and summarize the nodes found", long_about = None)]
struct Args {
    /// Graph file (.json or .csv)
    #[arg(short, long)]
    graph: PathBuf,

    /// Query file, one k-mer per line
    #[arg(short, long)]
    queries: PathBuf,

    /// Traversal driver
    #[arg(short, long, value_enum, default_value = "callback")]
    mode: Mode,

    /// How query lines become lookup keys
    #[arg(long, value_enum, default_value = "trimmed")]
    line_policy: LineMode,

    /// Miss handling in stats mode
    #[arg(long, value_enum, default_value = "count-as-empty")]
    miss_policy: MissMode,

    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    format: ReportFormat,

    /// Print every k-mer found (callback mode)
    #[arg(long)]
    print_nodes: bool,

    /// Log progress every N query lines (0 = off)
    #[arg(long, default_value_t = 100_000)]
    progress_interval: usize,

    /// Log level (overrides LOG_LEVEL)
    #[arg(long)]
    log_level: Option<String>,

    /// Log as JSON (overrides LOG_FORMAT)
    #[arg(long)]
    log_json: bool,
}

impl Args {
    fn options(&self) -> TraversalOptions {
        TraversalOptions {
            line_policy: match self.line_policy {
                LineMode::Trimmed => LinePolicy::Trimmed,
                LineMode::Raw => LinePolicy::Raw,
            },
            miss_policy: match self.miss_policy {
                MissMode::CountAsEmpty => MissPolicy::CountAsEmpty,
                MissMode::Skip => MissPolicy::Skip,
            },
            progress_interval: self.progress_interval,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut logging = LoggingConfig::from_env().with_level(args.log_level.clone());
    if args.log_json {
        logging.format = LogFormat::Json;
    }
    init_logging(&logging)?;

    let graph = open_graph(&args.graph)
        .with_context(|| format!("Failed to load graph {:?}", args.graph))?;
    let options = args.options();

    let report = match args.mode {
        Mode::Callback => {
            let print_nodes = args.print_nodes;
            traverse_graph_with(&graph, &args.queries, &options, |node| {
                if print_nodes {
                    println!("{}", node.kmer());
                }
            })
        }
        Mode::Stats => traverse_graph_stats_with(&graph, &args.queries, &options),
        Mode::Walk => walk_graph_stats_with(&graph, &args.queries, &options),
    };

    emit(&report, args.format)
}

fn emit(report: &TraversalReport, format: ReportFormat) -> Result<()> {
    match format {
        ReportFormat::Text => report.print(),
        ReportFormat::Json => {
            println!("{}", report.to_json()?);
            if let Some(error) = &report.error {
                eprintln!("{}", error);
            }
        }
    }
    Ok(())
}
