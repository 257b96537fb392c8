//! Row-level parsing for edge-list CSV input.
use std::io::Read;

use serde::Deserialize;

use crate::errors::EdgeListProviderError;

const EDGE_FIELDS: usize = 2;

/// One `(node_a, node_b)` row.
#[derive(Debug, Deserialize)]
struct EdgeRecord {
    source: usize,
    target: usize,
}

/// Reads every edge row, skipping the header.
///
/// Fields are trimmed before parsing. The whole input is validated before
/// anything is returned.
pub(crate) fn read_edges<R: Read>(reader: R) -> Result<Vec<(usize, usize)>, EdgeListProviderError> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut edges = Vec::new();
    for row in csv.records() {
        let record = row?;
        let line = record.position().map_or(0, csv::Position::line);
        if record.len() != EDGE_FIELDS {
            return Err(EdgeListProviderError::FieldCount {
                line,
                found: record.len(),
            });
        }
        let edge: EdgeRecord = record
            .deserialize(None)
            .map_err(|err| EdgeListProviderError::InvalidNodeId {
                line,
                message: err.to_string(),
            })?;
        edges.push((edge.source, edge.target));
    }
    Ok(edges)
}
