/// Graph file loading
///
/// Supports loading a colored k-mer graph from:
/// - JSON files (`.json`)
/// - CSV files (`.csv`, list fields separated by `;`)

use super::{GraphBuilder, GraphError, GraphResult, InMemoryGraph, KmerGraph};
use crate::types::{ColorId, Kmer, Node};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Separator for list fields in CSV graph files
pub const CSV_LIST_SEPARATOR: char = ';';

/// On-disk graph format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphFormat {
    Json,
    Csv,
}

impl GraphFormat {
    /// Pick the format from a file extension (case-insensitive)
    pub fn from_path(path: &Path) -> GraphResult<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match ext.as_deref() {
            Some("json") => Ok(GraphFormat::Json),
            Some("csv") => Ok(GraphFormat::Csv),
            _ => Err(GraphError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// JSON graph format
///
/// ```json
/// {"k": 3, "nodes": [{"kmer": "ACG", "successors": ["CGT"], "colors": [0, 2]}]}
/// ```
#[derive(Debug, Deserialize)]
struct JsonGraph {
    #[serde(default)]
    k: Option<usize>,
    nodes: Vec<JsonNode>,
}

#[derive(Debug, Deserialize)]
struct JsonNode {
    kmer: String,
    #[serde(default)]
    successors: Vec<String>,
    #[serde(default)]
    colors: Vec<ColorId>,
}

/// CSV graph row
#[derive(Debug, Deserialize)]
struct CsvNode {
    kmer: String,
    #[serde(default)]
    successors: String,
    #[serde(default)]
    colors: String,
}

/// Open a graph file, choosing the format by extension
pub fn open_graph<P: AsRef<Path>>(path: P) -> GraphResult<InMemoryGraph> {
    let path = path.as_ref();
    let format = GraphFormat::from_path(path)?;
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let graph = match format {
        GraphFormat::Json => load_json(reader)?,
        GraphFormat::Csv => load_csv(reader)?,
    };

    tracing::info!(
        path = %path.display(),
        nodes = graph.node_count(),
        k = ?graph.k(),
        "Loaded k-mer graph"
    );

    Ok(graph)
}

/// Load a graph from JSON
pub fn load_json<R: Read>(reader: R) -> GraphResult<InMemoryGraph> {
    let json_graph: JsonGraph = serde_json::from_reader(reader)?;

    let mut builder = match json_graph.k {
        Some(k) => GraphBuilder::new().with_k(k),
        None => GraphBuilder::new(),
    };

    for (record, json_node) in json_graph.nodes.into_iter().enumerate() {
        let kmer = parse_kmer(record, json_node.kmer)?;
        let successors = json_node
            .successors
            .into_iter()
            .map(|s| parse_kmer(record, s))
            .collect::<GraphResult<Vec<_>>>()?;

        builder.add_node(Node::new(kmer, successors, json_node.colors))?;
    }

    Ok(builder.build())
}

/// Load a graph from CSV
///
/// CSV format:
/// ```csv
/// kmer,successors,colors
/// ACG,CGT;CGA,0;2
/// CGT,,1
/// ```
pub fn load_csv<R: Read>(reader: R) -> GraphResult<InMemoryGraph> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut builder = GraphBuilder::new();

    for (record, result) in csv_reader.deserialize().enumerate() {
        let row: CsvNode = result?;
        let kmer = parse_kmer(record, row.kmer)?;

        let successors = split_list(&row.successors)
            .map(|s| parse_kmer(record, s.to_string()))
            .collect::<GraphResult<Vec<_>>>()?;

        let colors = split_list(&row.colors)
            .map(|value| {
                value.parse::<ColorId>().map_err(|_| GraphError::InvalidColorId {
                    kmer: kmer.to_string(),
                    value: value.to_string(),
                })
            })
            .collect::<GraphResult<Vec<_>>>()?;

        builder.add_node(Node::new(kmer, successors, colors))?;
    }

    Ok(builder.build())
}

fn parse_kmer(record: usize, value: String) -> GraphResult<Kmer> {
    Kmer::new(value).map_err(|source| GraphError::InvalidKmer { record, source })
}

fn split_list(field: &str) -> impl Iterator<Item = &str> {
    field
        .split(CSV_LIST_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Lookup;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_path() {
        assert_eq!(GraphFormat::from_path(Path::new("g.json")).unwrap(), GraphFormat::Json);
        assert_eq!(GraphFormat::from_path(Path::new("g.CSV")).unwrap(), GraphFormat::Csv);
        assert!(matches!(
            GraphFormat::from_path(Path::new("g.bin")),
            Err(GraphError::UnsupportedFormat(_))
        ));
        assert!(GraphFormat::from_path(Path::new("graph")).is_err());
    }

    #[test]
    fn test_load_json() {
        let json_content = r#"
        {
            "k": 3,
            "nodes": [
                {"kmer": "ACG", "successors": ["CGT", "CGA"], "colors": [0]},
                {"kmer": "CGT", "colors": [0, 1, 2]},
                {"kmer": "GTA"}
            ]
        }
        "#;

        let graph = load_json(json_content.as_bytes()).unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.k(), Some(3));

        let node = graph.lookup("CGT").into_node().unwrap();
        assert_eq!(node.out_degree(), 0);
        assert_eq!(node.num_colors(), 3);
    }

    #[test]
    fn test_load_json_wrong_k() {
        let json_content = r#"{"k": 4, "nodes": [{"kmer": "ACG"}]}"#;
        let result = load_json(json_content.as_bytes());
        assert!(matches!(result, Err(GraphError::InconsistentLength { .. })));
    }

    #[test]
    fn test_load_json_malformed() {
        let result = load_json("{\"nodes\": [".as_bytes());
        assert!(matches!(result, Err(GraphError::JsonError(_))));

        let result = load_json(r#"{"nodes": [{"kmer": ""}]}"#.as_bytes());
        assert!(matches!(result, Err(GraphError::InvalidKmer { record: 0, .. })));
    }

    #[test]
    fn test_load_csv() {
        let csv_content = "kmer,successors,colors\n\
                           ACG,CGT;CGA,0;2\n\
                           CGT,,1\n\
                           GTA,TAC, \n";

        let graph = load_csv(csv_content.as_bytes()).unwrap();
        assert_eq!(graph.node_count(), 3);

        let acg = graph.lookup("ACG").into_node().unwrap();
        assert_eq!(acg.out_degree(), 2);
        assert_eq!(acg.successors()[0].as_str(), "CGT");
        assert!(acg.has_color(2));

        let gta = graph.lookup("GTA").into_node().unwrap();
        assert_eq!(gta.num_colors(), 0);
        assert_eq!(graph.lookup("TAC"), Lookup::NotFound);
    }

    #[test]
    fn test_load_csv_bad_color() {
        let csv_content = "kmer,successors,colors\nACG,,red\n";
        let result = load_csv(csv_content.as_bytes());
        assert!(matches!(
            result,
            Err(GraphError::InvalidColorId { ref value, .. }) if value == "red"
        ));
    }

    #[test]
    fn test_open_graph_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        let json_path = temp_dir.path().join("graph.json");
        std::fs::write(&json_path, r#"{"nodes": [{"kmer": "AC", "successors": ["CA"]}]}"#)
            .unwrap();

        let graph = open_graph(&json_path).unwrap();
        assert!(graph.lookup("AC").is_found());
    }

    #[test]
    fn test_open_graph_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = open_graph(temp_dir.path().join("missing.json"));
        assert!(matches!(result, Err(GraphError::IoError(_))));
    }
}
