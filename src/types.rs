use std::io;
use std::path::PathBuf;

use thiserror::Error;

// ============================================================================
// Constants
//
// Hash parameters (Karp & Rabin 1987):
//   b (HASH_BASE) = polynomial base for the key fingerprint
//   Q (HASH_MOD)  = Mersenne prime 2^61-1 for fingerprint arithmetic
// Partitioning:
//   BUCKET_COUNT sized so each shard of a ~10^8-line log fits in RAM on a
//   workstation while keeping the open-handle count modest.  Correctness
//   never depends on it; --buckets overrides it.
// ============================================================================

pub const BUCKET_COUNT: usize = 128;
pub const BUCKET_BUF_CAP: usize = 64 * 1024;
pub const HASH_BASE: u64 = 263;
pub const HASH_MOD: u64 = (1 << 61) - 1; // Mersenne prime 2^61-1
pub const KEY_SEP: u8 = b'|';
pub const MAX_EXPANSIONS: u64 = 10_000_000;

// ============================================================================
// Group key and result
// ============================================================================

/// The `(claim_id, status_code)` pair that scopes one independent graph.
///
/// Both fields are opaque strings; nothing beyond equality is read from them.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub claim: String,
    pub status: String,
}

impl GroupKey {
    pub fn new(claim: &str, status: &str) -> Self {
        GroupKey {
            claim: claim.to_string(),
            status: status.to_string(),
        }
    }
}

/// Winning cycle across the whole run.  `length` is the hop count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BestCycle {
    pub claim: String,
    pub status: String,
    pub length: usize,
}

// ============================================================================
// Options
// ============================================================================

/// Options for a full two-phase run.
#[derive(Clone, Debug)]
pub struct RunOptions {
    /// Partition fan-out; must be >= 1.
    pub buckets: usize,
    /// Per-SCC DFS node-expansion ceiling; 0 disables the ceiling.
    pub max_expansions: u64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            buckets: BUCKET_COUNT,
            max_expansions: MAX_EXPANSIONS,
        }
    }
}

// ============================================================================
// Error type
// ============================================================================

#[derive(Debug, Error)]
pub enum CycleError {
    #[error("{}: {}", path.display(), source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("fetch {url}: {reason}")]
    Fetch { url: String, reason: String },
    #[error("bucket count must be >= 1")]
    InvalidBuckets,
}

impl CycleError {
    /// Attach a path to a bare I/O error.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CycleError::Io {
            path: path.into(),
            source,
        }
    }
}

// ============================================================================
// Summary statistics
// ============================================================================

/// Counters accumulated over both phases, surfaced under verbose logging.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub lines: u64,
    pub skipped: u64,
    pub edges: u64,
    pub buckets_written: usize,
    pub groups: u64,
    pub sccs_searched: u64,
    pub sccs_truncated: u64,
}
