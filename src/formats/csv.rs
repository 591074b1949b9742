//! CSV edge lists.
//!
//! One edge per row: `source,target,timestamp[,weight]`. Rows without a
//! weight get the graph's default weight. Keys and timestamps are parsed
//! with `FromStr`, so any key type that round-trips through text works.

use crate::graph::{EvolvingGraph, GraphConfig};
use crate::node::{NodeKey, Timestamp};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::io::{Read, Write};
use std::str::FromStr;
use tracing::debug;

/// Reader/writer options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvConfig {
    /// First row is a header (skipped on read, written on write).
    pub has_headers: bool,
    pub delimiter: u8,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            has_headers: true,
            delimiter: b',',
        }
    }
}

/// CSV format handler.
pub struct Csv;

impl Csv {
    /// Read an evolving graph from CSV.
    ///
    /// Every row is parsed before the graph is built; the first bad row
    /// fails the whole read with `MalformedInput`.
    ///
    /// ```rust
    /// use lattix_evolving::formats::{Csv, CsvConfig};
    /// use lattix_evolving::{EvolvingGraph, GraphConfig};
    ///
    /// let data = "source,target,timestamp\na,b,1\nb,c,2\n";
    /// let g: EvolvingGraph<String, u32> =
    ///     Csv::read(data.as_bytes(), &CsvConfig::default(), GraphConfig::default())?;
    /// assert_eq!(g.num_edges(), 2);
    /// assert_eq!(g.unique_timestamps(), &[1, 2]);
    /// # Ok::<(), lattix_evolving::Error>(())
    /// ```
    pub fn read<K, T, R>(
        reader: R,
        config: &CsvConfig,
        graph_config: GraphConfig,
    ) -> Result<EvolvingGraph<K, T>>
    where
        K: NodeKey + FromStr,
        T: Timestamp + FromStr,
        R: Read,
    {
        let mut reader = ::csv::ReaderBuilder::new()
            .has_headers(config.has_headers)
            .delimiter(config.delimiter)
            .flexible(true)
            .trim(::csv::Trim::All)
            .from_reader(reader);

        let mut rows = Vec::new();
        for (i, result) in reader.records().enumerate() {
            let record = result?;
            let line = record.position().map_or(i + 1, |p| p.line() as usize);
            if record.len() != 3 && record.len() != 4 {
                return Err(Error::MalformedInput(format!(
                    "line {line}: expected 3 or 4 fields, got {}",
                    record.len()
                )));
            }
            let source = parse_field::<K>(&record[0], "source", line)?;
            let target = parse_field::<K>(&record[1], "target", line)?;
            let timestamp = parse_field::<T>(&record[2], "timestamp", line)?;
            let weight = match record.get(3) {
                Some(w) => parse_field::<f64>(w, "weight", line)?,
                None => graph_config.default_weight,
            };
            rows.push((source, target, timestamp, weight));
        }

        let mut g = EvolvingGraph::with_config(graph_config)?;
        let count = g.add_bunch_of_weighted_edges(rows)?;
        debug!(edges = count, nodes = g.num_nodes(), "read csv edge list");
        Ok(g)
    }

    /// Write every edge in insertion order with its stored weight.
    pub fn write<K, T, W>(g: &EvolvingGraph<K, T>, writer: W, config: &CsvConfig) -> Result<()>
    where
        K: NodeKey + Display,
        T: Timestamp + Display,
        W: Write,
    {
        let mut writer = ::csv::WriterBuilder::new()
            .delimiter(config.delimiter)
            .from_writer(writer);

        if config.has_headers {
            writer.write_record(["source", "target", "timestamp", "weight"])?;
        }
        let nodes = g.nodes();
        for e in g.records() {
            writer.write_record([
                nodes[e.src].key.to_string(),
                nodes[e.dst].key.to_string(),
                e.timestamp.to_string(),
                e.weight.to_string(),
            ])?;
        }
        writer.flush()?;
        debug!(edges = g.num_edges(), "wrote csv edge list");
        Ok(())
    }
}

fn parse_field<V: FromStr>(raw: &str, field: &str, line: usize) -> Result<V> {
    raw.parse()
        .map_err(|_| Error::MalformedInput(format!("line {line}: bad {field} {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_mixed_weights() {
        let data = "a,b,1,2.5\nb,c,2\n";
        let config = CsvConfig { has_headers: false, ..Default::default() };
        let g: EvolvingGraph<String, i64> =
            Csv::read(data.as_bytes(), &config, GraphConfig::weighted()).unwrap();
        let weights: Vec<_> = g.edges().map(|e| e.effective_weight()).collect();
        assert_eq!(weights, vec![2.5, 1.0]);
    }

    #[test]
    fn test_read_semicolon_delimiter() {
        let data = "source;target;timestamp\n1;2;10\n";
        let config = CsvConfig { delimiter: b';', ..Default::default() };
        let g: EvolvingGraph<u32, u32> =
            Csv::read(data.as_bytes(), &config, GraphConfig::default()).unwrap();
        assert!(g.contains_node(&1));
        assert_eq!(g.unique_timestamps(), &[10]);
    }

    #[test]
    fn test_read_rejects_bad_rows() {
        let config = CsvConfig { has_headers: false, ..Default::default() };
        let bad_ts = "a,b,x\n";
        let r: Result<EvolvingGraph<String, u32>> =
            Csv::read(bad_ts.as_bytes(), &config, GraphConfig::default());
        assert!(matches!(r, Err(Error::MalformedInput(_))));

        let short = "a,b\n";
        let r: Result<EvolvingGraph<String, u32>> =
            Csv::read(short.as_bytes(), &config, GraphConfig::default());
        assert!(matches!(r, Err(Error::MalformedInput(_))));
    }

    #[test]
    fn test_write_then_read() {
        let mut g: EvolvingGraph<String, u32> = EvolvingGraph::with_config(GraphConfig::weighted()).unwrap();
        g.add_weighted_edge("x".into(), "y".into(), 3, 0.5).unwrap();
        g.add_edge("y".into(), "z".into(), 1);

        let mut buf = Vec::new();
        Csv::write(&g, &mut buf, &CsvConfig::default()).unwrap();
        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.starts_with("source,target,timestamp,weight\n"));

        let back: EvolvingGraph<String, u32> =
            Csv::read(buf.as_slice(), &CsvConfig::default(), GraphConfig::weighted()).unwrap();
        assert_eq!(back.num_edges(), 2);
        assert_eq!(back.nodes().len(), 3);
        assert_eq!(back.edges().next().unwrap().weight(), Some(0.5));
    }

    #[test]
    fn test_unweighted_graph_keeps_weights_through_write() {
        let config = CsvConfig { has_headers: false, ..Default::default() };
        let g: EvolvingGraph<String, u32> =
            Csv::read("a,b,1,2.5\n".as_bytes(), &config, GraphConfig::default()).unwrap();
        assert_eq!(crate::adjacency_matrix(&g, &1).unwrap()[[0, 1]], 2.5);
        assert_eq!(g.edges().next().unwrap().weight(), Some(2.5));

        let mut buf = Vec::new();
        Csv::write(&g, &mut buf, &config).unwrap();
        assert_eq!(String::from_utf8(buf.clone()).unwrap(), "a,b,1,2.5\n");

        let back: EvolvingGraph<String, u32> =
            Csv::read(buf.as_slice(), &config, GraphConfig::default()).unwrap();
        assert_eq!(crate::adjacency_matrix(&back, &1).unwrap()[[0, 1]], 2.5);
    }

    #[test]
    fn test_write_keeps_attributed_and_default_weights() {
        let graph_config = GraphConfig {
            default_weight: 4.0,
            ..GraphConfig::default()
        };
        let mut g: EvolvingGraph<&str, u32> = EvolvingGraph::with_config(graph_config).unwrap();
        g.add_edge("a", "b", 1);
        let mut attrs = crate::Attributes::new();
        attrs.insert("tag".into(), "x".into());
        g.add_attributed_edge("b", "a", 2, attrs);

        let mut buf = Vec::new();
        let config = CsvConfig { has_headers: false, ..Default::default() };
        Csv::write(&g, &mut buf, &config).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "a,b,1,4\nb,a,2,4\n");
    }
}
