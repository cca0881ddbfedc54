//! Phase 1: streaming hash partitioner.
//!
//! Routes every valid hop line into one of B append-only bucket files by the
//! fingerprint of its `(claim, status)` key, in a single pass over the input.
//! All edges of a group land in the same bucket, so phase 2 can load one
//! bucket at a time and still see every group whole.

use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::hash::{bucket_index, key_fingerprint};
use crate::parse::{parse_hop, trim_newline};
use crate::types::{CycleError, BUCKET_BUF_CAP};

/// B lazily-created buffered bucket writers under one directory.
pub struct Partitioner {
    writers: Vec<Option<BufWriter<File>>>,
    paths: Vec<PathBuf>,
}

impl Partitioner {
    /// Prepare bucket paths under `dir`.  Files are created on first append,
    /// so untouched buckets never exist on disk.
    pub fn new(dir: &Path, buckets: usize) -> Result<Self, CycleError> {
        if buckets == 0 {
            return Err(CycleError::InvalidBuckets);
        }
        let paths = (0..buckets)
            .map(|i| dir.join(format!("bucket-{:03}", i)))
            .collect();
        Ok(Partitioner {
            writers: (0..buckets).map(|_| None).collect(),
            paths,
        })
    }

    pub fn buckets(&self) -> usize {
        self.paths.len()
    }

    fn writer(&mut self, idx: usize) -> Result<&mut BufWriter<File>, CycleError> {
        match &mut self.writers[idx] {
            Some(w) => Ok(w),
            slot @ None => {
                let file = File::create(&self.paths[idx])
                    .map_err(|e| CycleError::io(&self.paths[idx], e))?;
                Ok(slot.insert(BufWriter::with_capacity(BUCKET_BUF_CAP, file)))
            }
        }
    }

    /// Append one validated hop line to the bucket its key maps to.
    pub fn append(&mut self, claim: &str, status: &str, line: &str) -> Result<(), CycleError> {
        let idx = bucket_index(key_fingerprint(claim, status), self.paths.len());
        let res = {
            let w = self.writer(idx)?;
            w.write_all(line.as_bytes()).and_then(|()| w.write_all(b"\n"))
        };
        res.map_err(|e| CycleError::io(&self.paths[idx], e))
    }

    /// Flush and close every open writer.  Returns the paths of buckets that
    /// received at least one edge, in index order.
    pub fn finish(mut self) -> Result<Vec<PathBuf>, CycleError> {
        let mut written = Vec::new();
        for i in 0..self.writers.len() {
            if let Some(w) = self.writers[i].take() {
                w.into_inner()
                    .map_err(|e| CycleError::io(&self.paths[i], e.into_error()))?;
                written.push(self.paths[i].clone());
            }
        }
        Ok(written)
    }
}

/// Counters from one partitioning pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PartitionStats {
    pub lines: u64,
    pub skipped: u64,
    pub edges: u64,
}

/// Stream `input` top to bottom, routing each valid hop into its bucket.
///
/// Malformed lines (wrong arity, empty claim or status) are counted and
/// skipped; blank lines are ignored without counting.  Read errors and
/// bucket-write errors are fatal.
pub fn partition_stream<R: BufRead>(
    mut input: R,
    input_path: &Path,
    part: &mut Partitioner,
) -> Result<PartitionStats, CycleError> {
    let mut stats = PartitionStats::default();
    let mut line = String::new();
    loop {
        line.clear();
        let n = input
            .read_line(&mut line)
            .map_err(|e| CycleError::io(input_path, e))?;
        if n == 0 {
            break;
        }
        stats.lines += 1;
        trim_newline(&mut line);
        if line.is_empty() {
            continue;
        }
        match parse_hop(&line) {
            Some(hop) => {
                part.append(hop.claim, hop.status, &line)?;
                stats.edges += 1;
            }
            None => {
                stats.skipped += 1;
                debug!(line_number = stats.lines, "skipping malformed hop line");
            }
        }
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;

    fn run_partition(
        input: &str,
        buckets: usize,
    ) -> (tempfile::TempDir, Vec<PathBuf>, PartitionStats) {
        let dir = tempfile::tempdir().unwrap();
        let mut part = Partitioner::new(dir.path(), buckets).unwrap();
        let stats =
            partition_stream(Cursor::new(input), Path::new("<test>"), &mut part).unwrap();
        let written = part.finish().unwrap();
        (dir, written, stats)
    }

    #[test]
    fn test_zero_buckets_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Partitioner::new(dir.path(), 0),
            Err(CycleError::InvalidBuckets)
        ));
    }

    #[test]
    fn test_counts_and_skips() {
        let input = "A|B|1|1\nbad line\nB|A|1|1\nA|B||9\n\n";
        let (_dir, _written, stats) = run_partition(input, 4);
        assert_eq!(stats.lines, 5);
        assert_eq!(stats.edges, 2);
        assert_eq!(stats.skipped, 2); // "bad line" and the empty-claim line
    }

    #[test]
    fn test_group_lands_in_one_bucket() {
        // Same key everywhere: exactly one bucket file is created.
        let input = "A|B|77|9\nB|C|77|9\nC|A|77|9\n";
        let (_dir, written, stats) = run_partition(input, 16);
        assert_eq!(stats.edges, 3);
        assert_eq!(written.len(), 1);
        let body = fs::read_to_string(&written[0]).unwrap();
        assert_eq!(body, input);
    }

    #[test]
    fn test_single_bucket_takes_everything() {
        let input = "A|B|1|1\nB|A|2|2\nX|Y|3|3\n";
        let (_dir, written, stats) = run_partition(input, 1);
        assert_eq!(stats.edges, 3);
        assert_eq!(written.len(), 1);
    }
}
