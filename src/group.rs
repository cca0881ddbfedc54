//! Phase 2: per-bucket group reader.
//!
//! Loads one bucket file and regroups its edges by `(claim, status)` key.
//! Only one bucket's contents are ever resident; the engine consumes the
//! returned map group by group and drops each group after folding its
//! result into the reducer.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use rustc_hash::FxHashMap;

use crate::parse::{parse_hop, trim_newline};
use crate::types::{CycleError, GroupKey};

/// Directed edges of one group, in input order.
pub type EdgeList = Vec<(String, String)>;

/// Read one bucket file into a key -> edge-list mapping.
///
/// Bucket lines were validated during partitioning, so any line that fails
/// to re-parse here is silently dropped rather than diagnosed twice.
pub fn read_bucket(path: &Path) -> Result<FxHashMap<GroupKey, EdgeList>, CycleError> {
    let file = File::open(path).map_err(|e| CycleError::io(path, e))?;
    let mut reader = BufReader::new(file);
    let mut groups: FxHashMap<GroupKey, EdgeList> = FxHashMap::default();
    let mut line = String::new();
    loop {
        line.clear();
        let n = reader
            .read_line(&mut line)
            .map_err(|e| CycleError::io(path, e))?;
        if n == 0 {
            break;
        }
        trim_newline(&mut line);
        let Some(hop) = parse_hop(&line) else {
            continue;
        };
        groups
            .entry(GroupKey::new(hop.claim, hop.status))
            .or_default()
            .push((hop.src.to_string(), hop.dst.to_string()));
    }
    Ok(groups)
}
