//! Two-phase driver: partition the input, then process one bucket at a time,
//! one group at a time, folding every group's best cycle into the reducer.

use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tempfile::TempDir;
use tracing::{debug, warn};

use crate::graph::GroupGraph;
use crate::group::read_bucket;
use crate::partition::{partition_stream, Partitioner};
use crate::scc::cycle_seeds;
use crate::search::{longest_cycle, SearchLimits, SearchOutcome};
use crate::types::{BestCycle, CycleError, GroupKey, RunOptions, RunSummary};

/// The only run-wide mutable state: the best `(claim, status, length)` seen.
///
/// Strict-greater update on length; the first-seen group keeps a tie.
#[derive(Debug, Default)]
pub struct Reducer {
    best: Option<BestCycle>,
}

impl Reducer {
    pub fn observe(&mut self, key: &GroupKey, length: usize) {
        if length == 0 {
            return;
        }
        let current = self.best.as_ref().map_or(0, |b| b.length);
        if length > current {
            self.best = Some(BestCycle {
                claim: key.claim.clone(),
                status: key.status.clone(),
                length,
            });
        }
    }

    pub fn into_best(self) -> Option<BestCycle> {
        self.best
    }
}

/// Outcome of one full run.
#[derive(Clone, Debug)]
pub struct RunReport {
    pub best: Option<BestCycle>,
    pub summary: RunSummary,
}

/// Run both phases over the input file at `input`.
///
/// The bucket directory is a fresh temp dir whose guard lives for this call,
/// so it is removed on every return path; each bucket file is additionally
/// deleted right after its phase-2 consumption.
pub fn run(input: &Path, opts: &RunOptions) -> Result<RunReport, CycleError> {
    if opts.buckets == 0 {
        return Err(CycleError::InvalidBuckets);
    }
    let limits = SearchLimits {
        max_expansions: opts.max_expansions,
    };
    let bucket_dir = TempDir::new().map_err(|e| CycleError::io(std::env::temp_dir(), e))?;

    // Phase 1: shard the input by key in one streaming pass.
    let file = File::open(input).map_err(|e| CycleError::io(input, e))?;
    let mut part = Partitioner::new(bucket_dir.path(), opts.buckets)?;
    let stats = partition_stream(BufReader::new(file), input, &mut part)?;
    let buckets = part.finish()?;
    debug!(
        lines = stats.lines,
        edges = stats.edges,
        skipped = stats.skipped,
        buckets = buckets.len(),
        "partitioning complete"
    );

    let mut summary = RunSummary {
        lines: stats.lines,
        skipped: stats.skipped,
        edges: stats.edges,
        buckets_written: buckets.len(),
        ..RunSummary::default()
    };

    // Phase 2: sequential buckets, sequential groups within a bucket.
    let mut reducer = Reducer::default();
    for bucket in &buckets {
        let groups = read_bucket(bucket)?;
        for (key, edges) in groups {
            summary.groups += 1;
            let graph = GroupGraph::from_edges(&edges);
            drop(edges);
            for seed in cycle_seeds(&graph) {
                summary.sccs_searched += 1;
                let outcome = if seed.len() == 1 {
                    // Self-loop singleton: length-1 candidate, no DFS needed.
                    SearchOutcome {
                        length: 1,
                        truncated: false,
                    }
                } else {
                    longest_cycle(&graph, &seed, &limits)
                };
                if outcome.truncated {
                    summary.sccs_truncated += 1;
                    warn!(
                        claim = %key.claim,
                        status = %key.status,
                        scc_size = seed.len(),
                        proven = outcome.length,
                        "cycle search truncated; SCC size is the unproven upper bound"
                    );
                }
                reducer.observe(&key, outcome.length);
            }
            // The group's graph drops here, before the next group begins.
        }
        fs::remove_file(bucket).map_err(|e| CycleError::io(bucket, e))?;
    }

    debug!(
        groups = summary.groups,
        sccs = summary.sccs_searched,
        truncated = summary.sccs_truncated,
        "run complete"
    );
    Ok(RunReport {
        best: reducer.into_best(),
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reducer_strict_greater() {
        let mut r = Reducer::default();
        r.observe(&GroupKey::new("a", "1"), 2);
        r.observe(&GroupKey::new("b", "2"), 3);
        r.observe(&GroupKey::new("c", "3"), 3); // tie: first-seen wins
        r.observe(&GroupKey::new("d", "4"), 1);
        let best = r.into_best().unwrap();
        assert_eq!((best.claim.as_str(), best.length), ("b", 3));
    }

    #[test]
    fn test_reducer_ignores_zero() {
        let mut r = Reducer::default();
        r.observe(&GroupKey::new("a", "1"), 0);
        assert!(r.into_best().is_none());
    }
}
