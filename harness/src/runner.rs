//! Harness runner: one search run packaged as content-addressed artifacts.
//!
//! # Pipeline
//!
//! ```text
//! Explorer::explore(tee(TraceLog, DotGraph))
//!   → trace.json  (TraceLog::to_json_bytes)
//!   → search.dot  (DotGraph::render)
//!   → report.json (policy echo, stats, termination, path, artifact digests)
//! ```
//!
//! # Directory layout
//!
//! ```text
//! <dir>/
//!   trace.json          JSON array of trace events
//!   search.dot          Graphviz digraph
//!   report.json         run report, lists the digests of the two above
//!   report_digest.txt   ASCII digest of report.json (e.g. "sha256:...")
//! ```
//!
//! Every byte written is a function of the world, the policy and the
//! initial state. Wall-clock time is logged, never written.

use std::hash::Hash;
use std::path::Path;

use tracing::{debug, info};

use lodestar_search::{
    canonical_hash, ContentHash, Explorer, HashDomain, SearchError, SearchOutcome, SearchPolicy,
    SearchState, TraceLog,
};

use crate::atomic::write_atomic;
use crate::dot::DotGraph;

pub const TRACE_FILENAME: &str = "trace.json";
pub const DOT_FILENAME: &str = "search.dot";
pub const REPORT_FILENAME: &str = "report.json";
pub const REPORT_DIGEST_FILENAME: &str = "report_digest.txt";

const REPORT_SCHEMA_VERSION: &str = "lodestar.report.v1";

/// Error during a harness run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// The search rejected its configuration.
    Search(SearchError),
    /// I/O error reading or writing a run directory.
    Io { detail: String },
    /// `report.json` is missing a field or is not valid JSON.
    ReportInvalid { detail: String },
    /// A stored artifact does not match the digest recorded for it.
    DigestMismatch {
        artifact: String,
        expected: String,
        found: String,
    },
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Search(e) => write!(f, "search error: {e}"),
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
            Self::ReportInvalid { detail } => write!(f, "invalid report: {detail}"),
            Self::DigestMismatch {
                artifact,
                expected,
                found,
            } => write!(
                f,
                "digest mismatch for {artifact}: expected {expected}, found {found}"
            ),
        }
    }
}

impl std::error::Error for RunError {}

impl From<SearchError> for RunError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

/// Serialized products of one run.
#[derive(Debug, Clone)]
pub struct RunArtifacts {
    pub trace_json: Vec<u8>,
    pub dot: String,
    pub report_json: Vec<u8>,
    pub trace_digest: ContentHash,
    pub dot_digest: ContentHash,
    pub report_digest: ContentHash,
}

/// Run one search and package its artifacts.
///
/// # Errors
///
/// Returns [`RunError::Search`] if the policy is invalid or best-first
/// exploration meets a state without an objective.
pub fn run<S>(
    world: &str,
    initial: S,
    goal: Option<&S>,
    policy: SearchPolicy,
) -> Result<(SearchOutcome<S>, RunArtifacts), RunError>
where
    S: SearchState + Eq + Hash + 'static,
    S::Move: Eq + Hash + 'static,
{
    let policy_json = policy.to_json();
    let mut explorer = Explorer::new(policy);
    let mut log = TraceLog::new();
    let mut dot = DotGraph::new();

    let outcome = explorer.explore(initial, goal, &mut (&mut log, &mut dot))?;
    info!(
        world,
        termination = outcome.termination.name(),
        decisions = outcome.stats.decisions,
        failed_decisions = outcome.stats.failed_decisions,
        "run finished"
    );

    let trace_json = log.to_json_bytes();
    let trace_digest = log.digest();
    let rendered = dot.render();
    let dot_digest = canonical_hash(HashDomain::DotArtifact, rendered.as_bytes());

    let path: Option<Vec<String>> = outcome
        .path
        .as_ref()
        .map(|p| p.moves().into_iter().map(ToString::to_string).collect());
    let report = serde_json::json!({
        "artifacts": {
            DOT_FILENAME: dot_digest.as_str(),
            TRACE_FILENAME: trace_digest.as_str(),
        },
        "path": path,
        "policy": policy_json,
        "schema_version": REPORT_SCHEMA_VERSION,
        "solution_found": outcome.is_success(),
        "stats": outcome.stats.to_json(),
        "termination": outcome.termination.name(),
        "world": world,
    });
    let report_json = report.to_string().into_bytes();
    let report_digest = canonical_hash(HashDomain::SearchReport, &report_json);
    debug!(report_digest = %report_digest, "run report built");

    Ok((
        outcome,
        RunArtifacts {
            trace_json,
            dot: rendered,
            report_json,
            trace_digest,
            dot_digest,
            report_digest,
        },
    ))
}

/// Persist run artifacts into `dir` (created if missing).
///
/// # Errors
///
/// Returns [`RunError::Io`] on any write failure.
pub fn write_run_dir(artifacts: &RunArtifacts, dir: &Path) -> Result<(), RunError> {
    std::fs::create_dir_all(dir).map_err(|e| RunError::Io {
        detail: format!("create_dir_all: {e}"),
    })?;
    write_artifact(&dir.join(TRACE_FILENAME), &artifacts.trace_json)?;
    write_artifact(&dir.join(DOT_FILENAME), artifacts.dot.as_bytes())?;
    write_artifact(&dir.join(REPORT_FILENAME), &artifacts.report_json)?;
    write_artifact(
        &dir.join(REPORT_DIGEST_FILENAME),
        artifacts.report_digest.as_str().as_bytes(),
    )?;
    Ok(())
}

/// Re-hash a run directory against its report.
///
/// Returns the verified report digest.
///
/// # Errors
///
/// Returns [`RunError::DigestMismatch`] if any file was altered,
/// [`RunError::ReportInvalid`] if the report or its digest file cannot be
/// read, and
/// [`RunError::Io`] if a file is missing.
pub fn verify_run_dir(dir: &Path) -> Result<ContentHash, RunError> {
    let report_json = read_file(dir, REPORT_FILENAME)?;
    let stored = read_file(dir, REPORT_DIGEST_FILENAME)?;
    let stored = String::from_utf8_lossy(&stored);
    let stored = ContentHash::parse(stored.trim()).ok_or_else(|| RunError::ReportInvalid {
        detail: format!("{REPORT_DIGEST_FILENAME} does not hold an algorithm:digest pair"),
    })?;

    let report_digest = canonical_hash(HashDomain::SearchReport, &report_json);
    if report_digest != stored {
        return Err(RunError::DigestMismatch {
            artifact: REPORT_FILENAME.into(),
            expected: stored.as_str().into(),
            found: report_digest.as_str().into(),
        });
    }

    let report: serde_json::Value =
        serde_json::from_slice(&report_json).map_err(|e| RunError::ReportInvalid {
            detail: format!("{e}"),
        })?;
    if report["schema_version"] != REPORT_SCHEMA_VERSION {
        return Err(RunError::ReportInvalid {
            detail: format!("unknown schema_version {}", report["schema_version"]),
        });
    }

    for (filename, domain) in [
        (TRACE_FILENAME, HashDomain::TraceLog),
        (DOT_FILENAME, HashDomain::DotArtifact),
    ] {
        let expected = report["artifacts"][filename]
            .as_str()
            .ok_or_else(|| RunError::ReportInvalid {
                detail: format!("no digest recorded for {filename}"),
            })?;
        let found = canonical_hash(domain, &read_file(dir, filename)?);
        if found.as_str() != expected {
            return Err(RunError::DigestMismatch {
                artifact: filename.into(),
                expected: expected.into(),
                found: found.as_str().into(),
            });
        }
    }
    Ok(report_digest)
}

fn read_file(dir: &Path, filename: &str) -> Result<Vec<u8>, RunError> {
    let path = dir.join(filename);
    std::fs::read(&path).map_err(|e| RunError::Io {
        detail: format!("read {}: {e}", path.display()),
    })
}

fn write_artifact(path: &Path, content: &[u8]) -> Result<(), RunError> {
    write_atomic(path, content).map_err(|e| RunError::Io {
        detail: format!("write {}: {e}", path.display()),
    })
}
