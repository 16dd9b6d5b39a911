//! Test fixture loader for ChronoGuard golden corpora, plus in-memory
//! oracles and scripted backends used by integration tests across crates.

mod backends;
mod corpus;

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use chronoguard_core::Passage;

pub use backends::{
    FailingCrossEncoder, FailingEmbedder, FailingPolicySource, FailingSearch, ScriptedBackend,
    SlowBackend, SlowCrossEncoder, TermOverlapCrossEncoder,
};
pub use corpus::{tokenize, HashingEmbedder, InMemoryCorpus};

/// Root directory of the fixture files.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("golden")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture file as raw JSON Value.
pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// A named corpus fixture.
#[derive(Debug, Clone, Deserialize)]
pub struct CorpusFixture {
    pub description: String,
    pub query: String,
    pub passages: Vec<Passage>,
}

/// Load a corpus fixture and build an in-memory corpus from it.
pub fn load_corpus(relative_path: &str) -> (CorpusFixture, InMemoryCorpus) {
    let fixture: CorpusFixture = load_fixture(relative_path);
    let corpus = InMemoryCorpus::new(fixture.passages.clone());
    (fixture, corpus)
}

/// Generation outputs for schema tests: `valid` and `invalid` raw strings.
#[derive(Debug, Clone, Deserialize)]
pub struct PayloadFixture {
    pub valid: Vec<String>,
    pub invalid: Vec<String>,
}
