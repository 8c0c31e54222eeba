//! Shared fixture: a small Data Act ontology, one violation query per
//! built-in article, and a contracts directory, all in a temp dir.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use dataact_compliance::ComplianceChecker;

/// The Data Act ontology as RDF/XML, 13 triples. `B2CDataSharing`
/// carries an anonymous OWL restriction.
pub const ONTOLOGY: &str = r##"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#"
         xmlns:owl="http://www.w3.org/2002/07/owl#"
         xmlns:dataact="http://www.semanticweb.org/dataact#"
         xml:base="http://www.semanticweb.org/dataact">
  <owl:Class rdf:about="#DataSharingAgreement"/>
  <owl:Class rdf:about="#B2CDataSharing">
    <rdfs:subClassOf rdf:resource="#DataSharingAgreement"/>
    <rdfs:subClassOf>
      <owl:Restriction>
        <owl:onProperty rdf:resource="#hasAccessClause"/>
        <owl:someValuesFrom rdf:resource="#AccessClause"/>
      </owl:Restriction>
    </rdfs:subClassOf>
  </owl:Class>
  <owl:Class rdf:about="#B2BDataSharing">
    <rdfs:subClassOf rdf:resource="#DataSharingAgreement"/>
  </owl:Class>
  <owl:Class rdf:about="#B2GDataSharing">
    <rdfs:subClassOf rdf:resource="#DataSharingAgreement"/>
  </owl:Class>
  <!-- Rule-definition pattern nodes are blank and must never classify. -->
  <dataact:B2CDataSharing rdf:nodeID="accessPattern">
    <rdfs:comment>Art. 4(1): users must be able to access product data.</rdfs:comment>
  </dataact:B2CDataSharing>
</rdf:RDF>
"##;

/// Wrap RDF/XML statements in a document based on the Data Act
/// namespace, so `rdf:about="#c1"` names `dataact:c1`.
pub fn rdf_xml(body: &str) -> String {
    format!(
        r#"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:dataact="http://www.semanticweb.org/dataact#"
         xml:base="http://www.semanticweb.org/dataact">
{body}
</rdf:RDF>
"#
    )
}

/// Art. 4(1): a B2C contract must grant the user an access clause.
pub const QUERY_4_1: &str = r#"
PREFIX dataact: <http://www.semanticweb.org/dataact#>
SELECT ?contract ?violationType ?details WHERE {
    ?contract a dataact:B2CDataSharing .
    FILTER(isIRI(?contract))
    FILTER NOT EXISTS { ?contract dataact:hasAccessClause ?clause }
    BIND("NoAccessPath" AS ?violationType)
    BIND("missing access clause" AS ?details)
}
"#;

/// Art. 8(6): trade-secret withholding needs a justification.
pub const QUERY_8_6: &str = r#"
PREFIX dataact: <http://www.semanticweb.org/dataact#>
SELECT ?contract ?violationType ?details ?secret WHERE {
    ?contract a dataact:B2BDataSharing ;
              dataact:withholdsTradeSecret ?secret .
    FILTER NOT EXISTS { ?secret dataact:hasJustification ?why }
    BIND("UnjustifiedWithholding" AS ?violationType)
    BIND("trade secret withheld without justification" AS ?details)
}
"#;

/// Art. 19(2)(a): government recipients must not use data competitively.
pub const QUERY_19_2_A: &str = r#"
PREFIX dataact: <http://www.semanticweb.org/dataact#>
SELECT ?contract ?violationType ?details WHERE {
    ?contract a dataact:B2GDataSharing ;
              dataact:permitsUse ?use .
    FILTER(?use = dataact:CompetitiveUse)
    BIND("CompetitiveUse" AS ?violationType)
    BIND("data may be used to compete with the holder" AS ?details)
}
"#;

pub struct Fixture {
    pub dir: tempfile::TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::write(root.join("data_act_ontology.owl"), ONTOLOGY).unwrap();
        let queries = root.join("queries");
        std::fs::create_dir_all(&queries).unwrap();
        std::fs::write(queries.join("query-4.1.sparql"), QUERY_4_1).unwrap();
        std::fs::write(queries.join("query-8.6.sparql"), QUERY_8_6).unwrap();
        std::fs::write(queries.join("query-19.2.a.sparql"), QUERY_19_2_A).unwrap();
        std::fs::create_dir_all(root.join("contracts")).unwrap();
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn ontology(&self) -> PathBuf {
        self.root().join("data_act_ontology.owl")
    }

    pub fn queries(&self) -> PathBuf {
        self.root().join("queries")
    }

    pub fn contracts(&self) -> PathBuf {
        self.root().join("contracts")
    }

    /// Write a Turtle contract and return its path. The `dataact:` prefix
    /// is declared for the body.
    pub fn contract(&self, file_name: &str, body: &str) -> PathBuf {
        let text = format!("@prefix dataact: <http://www.semanticweb.org/dataact#> .\n{body}\n");
        self.raw_contract(file_name, &text)
    }

    /// Write an RDF/XML contract from statements wrapped by [`rdf_xml`].
    pub fn owl_contract(&self, file_name: &str, body: &str) -> PathBuf {
        self.raw_contract(file_name, &rdf_xml(body))
    }

    pub fn raw_contract(&self, file_name: &str, text: &str) -> PathBuf {
        let path = self.contracts().join(file_name);
        std::fs::write(&path, text).unwrap();
        path
    }

    pub fn checker(&self) -> ComplianceChecker {
        ComplianceChecker::new(self.ontology(), self.queries()).unwrap()
    }
}

pub const COMPLIANT_B2C: &str = r#"
dataact:meter-contract a dataact:B2CDataSharing ;
    dataact:hasAccessClause dataact:meter-access .
dataact:meter-access dataact:grantsAccessTo "continuous" .
"#;

pub const VIOLATING_B2C: &str = "dataact:contract-1 a dataact:B2CDataSharing .";

pub const COMPLIANT_B2B: &str = r#"
dataact:supply-contract a dataact:B2BDataSharing ;
    dataact:withholdsTradeSecret dataact:recipe .
dataact:recipe dataact:hasJustification "Art. 4(8) confidentiality measures" .
"#;
