use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufWriter, Write as IoWrite};
use std::path::{Path, PathBuf};

const ALPHABET: [char; 4] = ['A', 'C', 'G', 'T'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "kmer_generator")]
#[command(about = "Generate colored k-mer graphs and query files for traversal runs", long_about = None)]
struct Args {
    /// K-mer length
    #[arg(short, long, default_value_t = 21)]
    k: usize,

    /// Number of colors (one random sequence per color)
    #[arg(short, long, default_value_t = 4)]
    colors: u32,

    /// Length of each random sequence
    #[arg(short = 'l', long, default_value_t = 10_000)]
    sequence_length: usize,

    /// Number of query k-mers to write
    #[arg(short, long, default_value_t = 1000)]
    queries: usize,

    /// Fraction of queries that are absent from the graph
    #[arg(long, default_value_t = 0.1)]
    miss_rate: f64,

    /// Output directory
    #[arg(short, long)]
    output: PathBuf,

    /// Graph file formats
    #[arg(short, long, value_enum, value_delimiter = ',', default_value = "json")]
    formats: Vec<OutputFormat>,

    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[derive(Debug, Default)]
struct GeneratedNode {
    successors: BTreeSet<String>,
    colors: BTreeSet<u32>,
}

#[derive(Debug, Serialize)]
struct JsonNode<'a> {
    kmer: &'a str,
    successors: &'a BTreeSet<String>,
    colors: &'a BTreeSet<u32>,
}

#[derive(Debug, Serialize)]
struct JsonGraph<'a> {
    k: usize,
    nodes: Vec<JsonNode<'a>>,
}

struct KmerGenerator {
    rng: StdRng,
    k: usize,
}

impl KmerGenerator {
    fn new(seed: u64, k: usize) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            k,
        }
    }

    fn random_sequence(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| ALPHABET[self.rng.gen_range(0..ALPHABET.len())])
            .collect()
    }

    /// Build a de Bruijn style graph: every k-mer window of every colored
    /// sequence is a node, and consecutive windows are linked.
    fn generate_graph(&mut self, colors: u32, sequence_length: usize) -> BTreeMap<String, GeneratedNode> {
        println!(
            "Generating {} sequences of length {} (k = {})...",
            colors, sequence_length, self.k
        );

        let mut nodes: BTreeMap<String, GeneratedNode> = BTreeMap::new();

        for color in 0..colors {
            let sequence = self.random_sequence(sequence_length);
            let windows: Vec<&str> = (0..=sequence.len().saturating_sub(self.k))
                .filter(|&i| i + self.k <= sequence.len())
                .map(|i| &sequence[i..i + self.k])
                .collect();

            for (i, window) in windows.iter().enumerate() {
                let node = nodes.entry(window.to_string()).or_default();
                node.colors.insert(color);
                if let Some(next) = windows.get(i + 1) {
                    node.successors.insert(next.to_string());
                }
            }
        }

        println!("Generated {} k-mer nodes", nodes.len());
        nodes
    }

    /// Sample queries: present k-mers from the graph, absent ones at random
    fn generate_queries(
        &mut self,
        nodes: &BTreeMap<String, GeneratedNode>,
        count: usize,
        miss_rate: f64,
    ) -> Vec<String> {
        let present: Vec<&String> = nodes.keys().collect();
        let mut queries = Vec::with_capacity(count);

        // At most 100 attempts per query; with a tiny k every k-mer may be present
        let max_attempts = count.saturating_mul(100);

        for _ in 0..max_attempts {
            if queries.len() >= count {
                break;
            }
            if present.is_empty() || self.rng.gen_bool(miss_rate.clamp(0.0, 1.0)) {
                let candidate = self.random_sequence(self.k);
                if !nodes.contains_key(&candidate) {
                    queries.push(candidate);
                }
            } else if let Some(kmer) = present.choose(&mut self.rng) {
                queries.push(kmer.to_string());
            }
        }

        queries
    }

    fn export_json(&self, nodes: &BTreeMap<String, GeneratedNode>, path: &Path) -> Result<()> {
        let graph = JsonGraph {
            k: self.k,
            nodes: nodes
                .iter()
                .map(|(kmer, node)| JsonNode {
                    kmer,
                    successors: &node.successors,
                    colors: &node.colors,
                })
                .collect(),
        };

        let file = File::create(path.join("graph.json")).context("Failed to create graph.json")?;
        serde_json::to_writer(BufWriter::new(file), &graph)?;
        println!("Exported to JSON: {:?}", path.join("graph.json"));
        Ok(())
    }

    fn export_csv(&self, nodes: &BTreeMap<String, GeneratedNode>, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path.join("graph.csv"))
            .context("Failed to create graph.csv")?;
        writer.write_record(["kmer", "successors", "colors"])?;

        for (kmer, node) in nodes {
            let successors = node.successors.iter().cloned().collect::<Vec<_>>().join(";");
            let colors = node
                .colors
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(";");
            writer.write_record([kmer.as_str(), successors.as_str(), colors.as_str()])?;
        }

        writer.flush()?;
        println!("Exported to CSV: {:?}", path.join("graph.csv"));
        Ok(())
    }

    fn export_queries(&self, queries: &[String], path: &Path) -> Result<()> {
        let file = File::create(path.join("queries.txt")).context("Failed to create queries.txt")?;
        let mut writer = BufWriter::new(file);
        for query in queries {
            writeln!(writer, "{}", query)?;
        }
        writer.flush()?;
        println!("Exported queries: {:?}", path.join("queries.txt"));
        Ok(())
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.k == 0 {
        anyhow::bail!("k must be at least 1");
    }

    // Create output directory
    std::fs::create_dir_all(&args.output)
        .context("Failed to create output directory")?;

    let mut generator = KmerGenerator::new(args.seed, args.k);
    let nodes = generator.generate_graph(args.colors, args.sequence_length);
    let queries = generator.generate_queries(&nodes, args.queries, args.miss_rate);

    for format in &args.formats {
        match format {
            OutputFormat::Json => generator.export_json(&nodes, &args.output)?,
            OutputFormat::Csv => generator.export_csv(&nodes, &args.output)?,
        }
    }
    generator.export_queries(&queries, &args.output)?;

    let edges: usize = nodes.values().map(|n| n.successors.len()).sum();
    println!("\nData generation complete!");
    println!("Output directory: {:?}", args.output);
    println!("Graph statistics:");
    println!("  - Nodes: {}", nodes.len());
    println!("  - Edges: {}", edges);
    println!("  - Queries: {}", queries.len());

    Ok(())
}
