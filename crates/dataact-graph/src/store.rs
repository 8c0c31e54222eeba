//! # Graph Store
//!
//! [`GraphStore`] is the seam between compliance checking and a concrete
//! RDF engine: load a graph from a file, union two graphs, run `ASK` and
//! `SELECT` queries, and count triples. [`MemoryStore`] implements it over
//! in-memory oxigraph stores, one per loaded graph.
//!
//! ## Formats
//!
//! The serialization is chosen from the file extension by
//! [`format_for_path`]: `.owl`, `.rdf` and `.xml` are RDF/XML, `.ttl` is
//! Turtle, `.nt` is N-Triples, `.nq`, `.trig` and `.n3` are recognised too.
//! Anything else is read as RDF/XML.
//!
//! ## Blank Nodes
//!
//! Blank node labels are renamed on every load. Two contracts that both
//! say `_:b0` yield distinct nodes once merged with a base graph.
//!
//! ## Prefixes
//!
//! Namespaces bound on the store are declared in front of every query, so
//! rule queries may use `rdf:`, `rdfs:`, `owl:`, `xsd:` and any prefix
//! added with [`MemoryStore::with_prefixes`] without a `PREFIX` line. A
//! query's own declarations take precedence.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use oxigraph::io::{RdfFormat, RdfParser};
use oxigraph::model::{NamedNode, Quad, Term};
use oxigraph::sparql::{Query, QueryResults};
use oxigraph::store::Store;

use crate::error::{GraphError, GraphResult};

/// Namespaces every query run by [`MemoryStore`] can use undeclared.
const DEFAULT_PREFIXES: &[(&str, &str)] = &[
    ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
    ("owl", "http://www.w3.org/2002/07/owl#"),
    ("xsd", "http://www.w3.org/2001/XMLSchema#"),
];

/// One `SELECT` solution: `(variable, value)` pairs in projection order.
/// Unbound variables are absent. IRIs and blank nodes give their
/// identifier, literals their lexical form.
pub type Row = Vec<(String, String)>;

/// Operations the compliance checker needs from an RDF engine.
pub trait GraphStore: Send + Sync {
    /// Graph handle produced by [`GraphStore::load`].
    type Graph: Send + Sync;

    /// Parse the file at `path` into a new graph.
    ///
    /// A missing file yields [`GraphError::FileNotFound`].
    fn load(&self, path: &Path) -> GraphResult<Self::Graph>;

    /// The union of `base` and `overlay`. `base` is left untouched so it
    /// can be reused for the next contract.
    fn merge(&self, base: &Self::Graph, overlay: Self::Graph) -> GraphResult<Self::Graph>;

    /// Run an `ASK` query.
    fn ask(&self, graph: &Self::Graph, query: &str) -> GraphResult<bool>;

    /// Run a `SELECT` query.
    fn select(&self, graph: &Self::Graph, query: &str) -> GraphResult<Vec<Row>>;

    /// Number of distinct triples.
    fn size(&self, graph: &Self::Graph) -> GraphResult<usize>;
}

/// A loaded RDF graph, held in its own in-memory store.
pub struct Graph {
    store: Store,
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph").finish_non_exhaustive()
    }
}

impl Graph {
    fn new() -> GraphResult<Self> {
        Ok(Self {
            store: Store::new()?,
        })
    }

    pub fn len(&self) -> GraphResult<usize> {
        Ok(self.store.len()?)
    }

    pub fn is_empty(&self) -> GraphResult<bool> {
        Ok(self.store.is_empty()?)
    }

    fn quads(&self) -> GraphResult<Vec<Quad>> {
        Ok(self.store.iter().collect::<Result<_, _>>()?)
    }
}

/// Serialization used for a graph file, chosen from its extension.
pub fn format_for_path(path: &Path) -> RdfFormat {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "owl" | "rdf" | "xml" => RdfFormat::RdfXml,
        other => RdfFormat::from_extension(other).unwrap_or(RdfFormat::RdfXml),
    }
}

/// In-memory [`GraphStore`] backed by oxigraph.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    prefixes: BTreeMap<String, String>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            prefixes: DEFAULT_PREFIXES
                .iter()
                .map(|(p, ns)| (p.to_string(), ns.to_string()))
                .collect(),
        }
    }

    /// Add namespace bindings available to every query.
    pub fn with_prefixes<I, P, N>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = (P, N)>,
        P: Into<String>,
        N: Into<String>,
    {
        for (prefix, namespace) in prefixes {
            self.prefixes.insert(prefix.into(), namespace.into());
        }
        self
    }

    pub fn prefixes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes.iter().map(|(p, ns)| (p.as_str(), ns.as_str()))
    }

    /// Parse in-memory graph data in `format`. Errors name the source as
    /// `label`.
    pub fn load_str(&self, text: &str, format: RdfFormat, label: &str) -> GraphResult<Graph> {
        read_graph(
            RdfParser::from_format(format),
            format,
            text.as_bytes(),
            Path::new(label),
        )
    }

    fn prepare(&self, query: &str) -> GraphResult<Query> {
        let mut text = String::with_capacity(query.len() + 64 * self.prefixes.len());
        for (prefix, namespace) in &self.prefixes {
            text.push_str(&format!("PREFIX {prefix}: <{namespace}>\n"));
        }
        text.push_str(query);

        let mut parsed =
            Query::parse(&text, None).map_err(|e| GraphError::Query(e.to_string()))?;
        parsed.dataset_mut().set_default_graph_as_union();
        Ok(parsed)
    }

    fn run(&self, graph: &Graph, query: &str) -> GraphResult<QueryResults> {
        let prepared = self.prepare(query)?;
        graph
            .store
            .query(prepared)
            .map_err(|e| GraphError::Query(e.to_string()))
    }
}

fn read_graph(
    parser: RdfParser,
    format: RdfFormat,
    reader: impl Read,
    source: &Path,
) -> GraphResult<Graph> {
    let graph = Graph::new()?;
    graph
        .store
        .load_from_reader(parser.rename_blank_nodes(), reader)
        .map_err(|e| GraphError::Parse {
            path: source.to_path_buf(),
            format: format.name(),
            message: e.to_string(),
        })?;
    tracing::debug!(
        source = %source.display(),
        format = format.name(),
        triples = graph.len()?,
        "loaded graph"
    );
    Ok(graph)
}

/// `file://` IRI of an existing file, used to resolve relative IRIs such
/// as `rdf:about="#contract-1"`.
fn file_base_iri(path: &Path) -> Option<String> {
    let absolute = path.canonicalize().ok()?;
    let iri = format!("file://{}", absolute.to_str()?.replace(' ', "%20"));
    NamedNode::new(iri).ok().map(NamedNode::into_string)
}

fn term_value(term: &Term) -> String {
    match term {
        Term::NamedNode(node) => node.as_str().to_string(),
        Term::BlankNode(node) => node.as_str().to_string(),
        Term::Literal(literal) => literal.value().to_string(),
        #[allow(unreachable_patterns)]
        other => other.to_string(),
    }
}

impl GraphStore for MemoryStore {
    type Graph = Graph;

    fn load(&self, path: &Path) -> GraphResult<Graph> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                GraphError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                GraphError::Io {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        let format = format_for_path(path);
        let mut parser = RdfParser::from_format(format);
        if let Some(base) = file_base_iri(path) {
            parser = parser.with_base_iri(base).map_err(|e| GraphError::Parse {
                path: PathBuf::from(path),
                format: format.name(),
                message: e.to_string(),
            })?;
        }
        read_graph(parser, format, BufReader::new(file), path)
    }

    fn merge(&self, base: &Graph, overlay: Graph) -> GraphResult<Graph> {
        overlay.store.extend(base.quads()?)?;
        Ok(overlay)
    }

    fn ask(&self, graph: &Graph, query: &str) -> GraphResult<bool> {
        match self.run(graph, query)? {
            QueryResults::Boolean(answer) => Ok(answer),
            _ => Err(GraphError::UnexpectedQueryForm { expected: "ASK" }),
        }
    }

    fn select(&self, graph: &Graph, query: &str) -> GraphResult<Vec<Row>> {
        let QueryResults::Solutions(solutions) = self.run(graph, query)? else {
            return Err(GraphError::UnexpectedQueryForm { expected: "SELECT" });
        };
        let mut rows = Vec::new();
        for solution in solutions {
            let solution = solution.map_err(|e| GraphError::Query(e.to_string()))?;
            rows.push(
                solution
                    .iter()
                    .map(|(variable, term)| (variable.as_str().to_string(), term_value(term)))
                    .collect(),
            );
        }
        Ok(rows)
    }

    fn size(&self, graph: &Graph) -> GraphResult<usize> {
        graph.len()
    }
}
