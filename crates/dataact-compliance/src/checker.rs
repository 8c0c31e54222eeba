//! # Compliance Checker
//!
//! Orchestrates one contract end to end:
//!
//! ```text
//! load base graph (once) ─┐
//! load contract graph ────┴─ merge ─ count ─ classify ─ rules_for ─ execute_check × n
//! ```
//!
//! Construction is the only fail-fast step: a missing base graph or query
//! directory means nothing can be checked. After that every failure is
//! recorded in the report it belongs to and the run carries on. A contract
//! that cannot be loaded or classified gets a `load_error` and no checks;
//! a rule that cannot be evaluated gets an `error` on its check and its
//! siblings still run.
//!
//! ## Concurrency
//!
//! The checker holds no mutable state besides the lazily loaded base
//! graph, so batches fan out over rayon. Results come back in input
//! order.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use dataact_core::vocab::STANDARD_PREFIXES;
use dataact_core::ContractCategory;
use dataact_graph::{GraphError, GraphStore, MemoryStore};
use dataact_rules::{DirectoryQuerySource, QuerySource, RuleRegistry};
use rayon::prelude::*;

use crate::classifier::classify;
use crate::config::CheckerConfig;
use crate::discovery::find_contracts;
use crate::error::{ComplianceError, ComplianceResult};
use crate::executor::execute_check;
use crate::report::{BatchReport, ContractReport, UnevaluatedRulePolicy};

/// Load error recorded when no category could be determined.
pub const UNKNOWN_CATEGORY_ERROR: &str = "Could not determine contract type (B2C/B2B/B2G)";

/// Evaluates contracts against a rule registry.
pub struct ComplianceChecker<S: GraphStore = MemoryStore, Q: QuerySource = DirectoryQuerySource> {
    store: S,
    queries: Q,
    registry: RuleRegistry,
    base_graph_path: PathBuf,
    base_graph: OnceLock<Result<S::Graph, String>>,
    policy: UnevaluatedRulePolicy,
}

impl ComplianceChecker {
    /// Checker over the in-memory store, reading rule queries from
    /// `queries_dir`, with the built-in Data Act registry.
    pub fn new(
        base_graph: impl Into<PathBuf>,
        queries_dir: impl Into<PathBuf>,
    ) -> ComplianceResult<Self> {
        let queries_dir = queries_dir.into();
        if !queries_dir.is_dir() {
            return Err(ComplianceError::MissingResource {
                kind: "Queries directory",
                path: queries_dir,
            });
        }
        Self::with_parts(
            MemoryStore::new().with_prefixes(STANDARD_PREFIXES.iter().copied()),
            DirectoryQuerySource::new(queries_dir),
            RuleRegistry::builtin(),
            base_graph,
        )
    }

    /// Checker built from a configuration.
    pub fn from_config(config: &CheckerConfig) -> ComplianceResult<Self> {
        let registry = config.registry()?;
        Ok(Self::new(&config.base_graph, &config.queries_dir)?
            .with_registry(registry)
            .with_policy(config.unevaluated_rules))
    }
}

impl<S: GraphStore, Q: QuerySource> ComplianceChecker<S, Q> {
    /// Checker over any store and query source.
    pub fn with_parts(
        store: S,
        queries: Q,
        registry: RuleRegistry,
        base_graph: impl Into<PathBuf>,
    ) -> ComplianceResult<Self> {
        let base_graph_path = base_graph.into();
        if !base_graph_path.is_file() {
            return Err(ComplianceError::MissingResource {
                kind: "Base ontology",
                path: base_graph_path,
            });
        }
        Ok(Self {
            store,
            queries,
            registry,
            base_graph_path,
            base_graph: OnceLock::new(),
            policy: UnevaluatedRulePolicy::default(),
        })
    }

    pub fn with_registry(mut self, registry: RuleRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_policy(mut self, policy: UnevaluatedRulePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn policy(&self) -> UnevaluatedRulePolicy {
        self.policy
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn base_graph_path(&self) -> &Path {
        &self.base_graph_path
    }

    // -- single contract -----------------------------------------------------

    /// Check one contract. `name` defaults to the file stem.
    pub fn check_contract(&self, path: &Path, name: Option<&str>) -> ContractReport {
        let name = name.map_or_else(|| default_contract_name(path), str::to_string);
        let mut report =
            ContractReport::new(name, path.display().to_string()).with_policy(self.policy);
        tracing::info!(contract = %report.contract_name, path = %path.display(), "checking contract");

        let (graph, triples) = match self.load_merged(path) {
            Ok(loaded) => loaded,
            Err(message) => {
                tracing::warn!(contract = %report.contract_name, error = %message, "contract not loaded");
                report.load_error = Some(message);
                return report;
            }
        };
        report.total_triples = triples;

        let category = classify(&self.store, &graph, Some(path));
        report.contract_type = Some(category);
        if category == ContractCategory::Unknown {
            tracing::warn!(contract = %report.contract_name, "contract category not determined");
            report.load_error = Some(UNKNOWN_CATEGORY_ERROR.to_string());
            return report;
        }

        for rule in self.registry.rules_for(category) {
            let result = execute_check(&self.store, &self.queries, &graph, rule);
            report.add_check(rule.id.clone(), result);
        }

        tracing::info!(
            contract = %report.contract_name,
            %category,
            checks = report.check_count(),
            violations = report.total_violations(),
            compliant = report.overall_compliant(),
            "contract checked"
        );
        report
    }

    fn base(&self) -> Result<&S::Graph, String> {
        self.base_graph
            .get_or_init(|| {
                tracing::debug!(path = %self.base_graph_path.display(), "loading base graph");
                self.store
                    .load(&self.base_graph_path)
                    .map_err(|e| load_error_message(&e))
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// The merged base + contract graph and its triple count.
    fn load_merged(&self, path: &Path) -> Result<(S::Graph, usize), String> {
        let base = self.base()?;
        let merged = self
            .store
            .load(path)
            .and_then(|contract| self.store.merge(base, contract))
            .map_err(|e| load_error_message(&e))?;
        let triples = self
            .store
            .size(&merged)
            .map_err(|e| load_error_message(&e))?;
        Ok((merged, triples))
    }

    // -- batches -------------------------------------------------------------

    /// Check every contract, in parallel, keeping input order. Names
    /// default to file stems.
    pub fn check_contracts<P>(&self, paths: &[P]) -> BatchReport
    where
        P: AsRef<Path> + Sync,
    {
        self.check_contracts_named(paths, default_contract_name)
    }

    /// [`check_contracts`](Self::check_contracts) with a custom naming
    /// function for the reports.
    pub fn check_contracts_named<P, F>(&self, paths: &[P], name_of: F) -> BatchReport
    where
        P: AsRef<Path> + Sync,
        F: Fn(&Path) -> String + Sync,
    {
        let reports = paths
            .par_iter()
            .map(|p| {
                let path = p.as_ref();
                self.check_contract(path, Some(&name_of(path)))
            })
            .collect();
        BatchReport::new(reports)
    }

    /// Check every file in `dir` whose name matches `pattern`.
    pub fn check_directory(&self, dir: &Path, pattern: &str) -> ComplianceResult<BatchReport> {
        let paths = find_contracts(dir, pattern)?;
        if paths.is_empty() {
            tracing::warn!(
                dir = %dir.display(),
                pattern,
                "no contract files found matching pattern"
            );
            return Ok(BatchReport::new(Vec::new()));
        }
        Ok(self.check_contracts(&paths))
    }
}

/// A contract's default name: its file stem.
pub fn default_contract_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn load_error_message(err: &GraphError) -> String {
    match err {
        GraphError::FileNotFound { .. } => format!("File not found: {err}"),
        other => format!("Error loading contract: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataact_graph::{GraphResult, Row};
    use dataact_rules::{InMemoryQuerySource, RuleDescriptor};
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// RDF/XML base ontology with an anonymous OWL restriction: 5 triples.
    const BASE: &str = r#"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#"
         xmlns:owl="http://www.w3.org/2002/07/owl#">
  <owl:Class rdf:about="http://www.semanticweb.org/dataact#B2CDataSharing">
    <rdfs:subClassOf>
      <owl:Restriction>
        <owl:onProperty rdf:resource="http://www.semanticweb.org/dataact#hasAccessClause"/>
        <owl:someValuesFrom rdf:resource="http://www.semanticweb.org/dataact#AccessClause"/>
      </owl:Restriction>
    </rdfs:subClassOf>
  </owl:Class>
</rdf:RDF>
"#;

    const VIOLATING: &str = r#"
        PREFIX dataact: <http://www.semanticweb.org/dataact#>
        SELECT ?contract ?violationType ?details WHERE {
            ?contract a dataact:B2CDataSharing .
            FILTER NOT EXISTS { ?contract dataact:hasAccessClause ?c }
            BIND("NoAccessPath" AS ?violationType)
            BIND("missing access clause" AS ?details)
        }
        ORDER BY ?contract
    "#;

    struct Fixture {
        dir: tempfile::TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            std::fs::write(dir.path().join("base.owl"), BASE).unwrap();
            std::fs::create_dir(dir.path().join("queries")).unwrap();
            std::fs::write(dir.path().join("queries/query-4.1.sparql"), VIOLATING).unwrap();
            std::fs::create_dir(dir.path().join("contracts")).unwrap();
            Self { dir }
        }

        /// Write a Turtle contract with the `dataact:` prefix declared.
        fn contract(&self, name: &str, body: &str) -> PathBuf {
            self.raw_contract(
                name,
                &format!("@prefix dataact: <http://www.semanticweb.org/dataact#> .\n{body}\n"),
            )
        }

        fn raw_contract(&self, name: &str, text: &str) -> PathBuf {
            let path = self.dir.path().join("contracts").join(name);
            std::fs::write(&path, text).unwrap();
            path
        }

        fn checker(&self) -> ComplianceChecker {
            ComplianceChecker::new(
                self.dir.path().join("base.owl"),
                self.dir.path().join("queries"),
            )
            .unwrap()
        }
    }

    #[test]
    fn construction_requires_base_graph_and_queries() {
        let fx = Fixture::new();
        let err = ComplianceChecker::new(fx.dir.path().join("nope.owl"), fx.dir.path().join("queries"))
            .err()
            .unwrap();
        assert!(err.to_string().starts_with("Base ontology not found"));

        let err = ComplianceChecker::new(fx.dir.path().join("base.owl"), fx.dir.path().join("nope"))
            .err()
            .unwrap();
        assert!(err.to_string().starts_with("Queries directory not found"));
    }

    #[test]
    fn b2c_contract_with_violation() {
        let fx = Fixture::new();
        let path = fx.contract(
            "sample-b2c.ttl",
            "dataact:contract-1 a dataact:B2CDataSharing .",
        );
        let report = fx.checker().check_contract(&path, None);

        assert_eq!(report.contract_name, "sample-b2c");
        assert_eq!(report.contract_type, Some(ContractCategory::B2c));
        assert!(report.load_error.is_none());
        assert_eq!(report.total_triples, 6);
        assert_eq!(report.check_count(), 1);
        let check = report.check("4.1").unwrap();
        assert_eq!(check.article_name, "User Access Rights");
        assert_eq!(check.violation_count(), 1);
        assert_eq!(check.violations()[0]["violationType"], "NoAccessPath");
        assert!(!report.overall_compliant());
    }

    #[test]
    fn rdf_xml_contract_is_loaded_and_classified() {
        let fx = Fixture::new();
        let path = fx.raw_contract(
            "household-meter.owl",
            r#"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:dataact="http://www.semanticweb.org/dataact#">
  <dataact:B2CDataSharing rdf:about="http://www.semanticweb.org/dataact#meter-1"/>
  <dataact:B2CDataSharing rdf:about="http://www.semanticweb.org/dataact#meter-2">
    <dataact:hasAccessClause rdf:resource="http://www.semanticweb.org/dataact#portal"/>
  </dataact:B2CDataSharing>
</rdf:RDF>
"#,
        );

        let report = fx.checker().check_contract(&path, None);

        assert_eq!(report.load_error, None);
        // No hint in the name: classified from the declared instances.
        assert_eq!(report.contract_type, Some(ContractCategory::B2c));
        assert_eq!(report.total_triples, 8);
        let check = report.check("4.1").unwrap();
        assert_eq!(check.violation_count(), 1);
        assert_eq!(
            check.violations()[0]["contract"],
            "http://www.semanticweb.org/dataact#meter-1"
        );
    }

    #[test]
    fn missing_rule_query_is_a_check_error() {
        let fx = Fixture::new();
        let path = fx.contract(
            "supplier-b2b.ttl",
            "dataact:contract-2 a dataact:B2BDataSharing .",
        );
        let report = fx.checker().check_contract(&path, Some("Supplier"));
        assert_eq!(report.contract_name, "Supplier");
        let check = report.check("8.6").unwrap();
        assert_eq!(check.error.as_deref(), Some("Query file not found: query-8.6.sparql"));
        // Excluded from the conjunction: vacuously compliant.
        assert!(report.overall_compliant());

        let strict = fx.checker().with_policy(UnevaluatedRulePolicy::Fail);
        assert!(!strict.check_contract(&path, None).overall_compliant());
    }

    #[test]
    fn load_failures_become_load_errors() {
        let fx = Fixture::new();
        let checker = fx.checker();

        let missing = fx.dir.path().join("contracts/absent-b2c.owl");
        let report = checker.check_contract(&missing, None);
        assert!(report
            .load_error
            .as_deref()
            .unwrap()
            .starts_with("File not found: "));
        assert_eq!(report.contract_type, None);
        assert_eq!(report.check_count(), 0);

        let broken = fx.contract("broken-b2c.ttl", "dataact:x a .");
        let report = checker.check_contract(&broken, None);
        assert!(report
            .load_error
            .as_deref()
            .unwrap()
            .starts_with("Error loading contract: "));
        assert!(!report.overall_compliant());
        assert_eq!(report.total_violations(), 0);
    }

    #[test]
    fn unknown_category() {
        let fx = Fixture::new();
        let path = fx.contract("mystery.ttl", "dataact:x dataact:p dataact:y .");
        let report = fx.checker().check_contract(&path, None);
        assert_eq!(report.contract_type, Some(ContractCategory::Unknown));
        assert_eq!(report.load_error.as_deref(), Some(UNKNOWN_CATEGORY_ERROR));
        assert_eq!(report.check_count(), 0);
    }

    #[test]
    fn directory_batches_keep_sorted_order() {
        let fx = Fixture::new();
        fx.contract("b-b2c.ttl", "dataact:b a dataact:B2CDataSharing ; dataact:hasAccessClause dataact:k .");
        fx.contract("a-b2c.ttl", "dataact:a a dataact:B2CDataSharing .");
        fx.raw_contract("ignored.txt", "");

        let checker = fx.checker();
        let batch = checker
            .check_directory(&fx.dir.path().join("contracts"), "*.ttl")
            .unwrap();
        let names: Vec<_> = batch.reports().iter().map(|r| r.contract_name.as_str()).collect();
        assert_eq!(names, ["a-b2c", "b-b2c"]);
        assert_eq!(batch.compliant_contracts(), 1);

        assert!(checker
            .check_directory(&fx.dir.path().join("contracts"), "*.owl")
            .unwrap()
            .is_empty());
        assert!(matches!(
            checker.check_directory(&fx.dir.path().join("nope"), "*.ttl"),
            Err(ComplianceError::DirectoryNotFound { .. })
        ));
    }

    /// Store wrapper that counts loads, to observe base-graph caching.
    struct CountingStore {
        inner: MemoryStore,
        loads: AtomicUsize,
    }

    impl GraphStore for CountingStore {
        type Graph = dataact_graph::Graph;

        fn load(&self, path: &Path) -> GraphResult<Self::Graph> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            self.inner.load(path)
        }

        fn merge(&self, base: &Self::Graph, overlay: Self::Graph) -> GraphResult<Self::Graph> {
            self.inner.merge(base, overlay)
        }

        fn ask(&self, graph: &Self::Graph, query: &str) -> GraphResult<bool> {
            self.inner.ask(graph, query)
        }

        fn select(&self, graph: &Self::Graph, query: &str) -> GraphResult<Vec<Row>> {
            self.inner.select(graph, query)
        }

        fn size(&self, graph: &Self::Graph) -> GraphResult<usize> {
            self.inner.size(graph)
        }
    }

    #[test]
    fn base_graph_loads_once_and_custom_parts_work() {
        let fx = Fixture::new();
        let mut rules = BTreeMap::new();
        rules.insert(
            ContractCategory::B2c,
            vec![
                RuleDescriptor::new("4.1", "User Access Rights", "violating"),
                RuleDescriptor::new("4.2", "Always Fine", "empty"),
            ],
        );
        let registry = RuleRegistry::new(rules).unwrap();
        let queries = InMemoryQuerySource::new()
            .with_query("violating", VIOLATING)
            .with_query("empty", "SELECT ?x { ?x a <http://nothing.example/T> }");
        let store = CountingStore {
            inner: MemoryStore::new().with_prefixes(STANDARD_PREFIXES.iter().copied()),
            loads: AtomicUsize::new(0),
        };
        let checker =
            ComplianceChecker::with_parts(store, queries, registry, fx.dir.path().join("base.owl"))
                .unwrap();

        let paths = [
            fx.contract("one-b2c.ttl", "dataact:one a dataact:B2CDataSharing ."),
            fx.contract("two-b2c.ttl", "dataact:two a dataact:B2CDataSharing ."),
            fx.contract("three-b2c.ttl", "dataact:three a dataact:B2CDataSharing ."),
        ];
        let batch = checker.check_contracts(&paths);

        assert_eq!(checker.store().loads.load(Ordering::SeqCst), 1 + paths.len());
        let names: Vec<_> = batch.reports().iter().map(|r| r.contract_name.as_str()).collect();
        assert_eq!(names, ["one-b2c", "two-b2c", "three-b2c"]);
        for report in batch.reports() {
            assert_eq!(report.checks().keys().collect::<Vec<_>>(), ["4.1", "4.2"]);
            assert!(report.check("4.2").unwrap().compliant());
        }
    }
}
