//! Edge-list provider implementation.
use std::{fs::File, io::Read, path::Path};

use tracing::{debug, instrument};
use walkcorpus_core::{Adjacency, Graph};

use crate::errors::EdgeListProviderError;
use crate::ingest::read_edges;

/// Graph loaded from a CSV edge list with a header row.
///
/// # Examples
/// ```
/// use walkcorpus_providers_edges::EdgeListProvider;
///
/// let csv = "node_a,node_b\n0,1\n1,2\n";
/// let provider = EdgeListProvider::try_from_reader("demo", csv.as_bytes())?;
/// assert_eq!(provider.name(), "demo");
/// assert_eq!(provider.edge_rows(), 2);
/// assert_eq!(provider.graph().node_count(), 3);
/// # Ok::<(), walkcorpus_providers_edges::EdgeListProviderError>(())
/// ```
#[derive(Debug, Clone)]
pub struct EdgeListProvider {
    name: String,
    graph: Graph,
    edge_rows: usize,
}

impl EdgeListProvider {
    /// Loads an edge list from any reader.
    ///
    /// # Errors
    /// Returns [`EdgeListProviderError::FieldCount`] or
    /// [`EdgeListProviderError::InvalidNodeId`] for malformed rows,
    /// [`EdgeListProviderError::Csv`] when the reader fails, and
    /// [`EdgeListProviderError::Graph`] when the rows do not form a graph with
    /// dense node identifiers.
    #[instrument(
        name = "providers.edges.load",
        err,
        skip(name, reader),
        fields(name = tracing::field::Empty),
    )]
    pub fn try_from_reader<R: Read>(
        name: impl Into<String>,
        reader: R,
    ) -> Result<Self, EdgeListProviderError> {
        let name = name.into();
        tracing::Span::current().record("name", name.as_str());
        let edges = read_edges(reader)?;
        let edge_rows = edges.len();
        let graph = Graph::from_edges(edges)?;
        debug!(
            rows = edge_rows,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "edge list loaded"
        );
        Ok(Self {
            name,
            graph,
            edge_rows,
        })
    }

    /// Loads an edge list from a file on disk.
    ///
    /// # Errors
    /// Returns [`EdgeListProviderError::Io`] when the file cannot be opened,
    /// plus every error of [`Self::try_from_reader`].
    pub fn try_from_path(
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<Self, EdgeListProviderError> {
        let file = File::open(path)?;
        Self::try_from_reader(name, file)
    }

    /// Returns the data source name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the loaded graph.
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Consumes the provider and returns the graph.
    #[must_use]
    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// Number of data rows read, duplicates included.
    #[must_use]
    pub fn edge_rows(&self) -> usize {
        self.edge_rows
    }
}

impl Adjacency for EdgeListProvider {
    fn nodes(&self) -> &[usize] {
        self.graph.nodes()
    }

    fn neighbours(&self, node: usize) -> Result<&[usize], walkcorpus_core::GraphError> {
        self.graph.neighbours(node)
    }
}
