//! Query batches: answers, integrity checking and pruning counters.

use tracing::{debug, error};

use crate::error::{Error, Result};
use crate::index::ReachIndex;
use crate::oracle::{Oracle, Resolution, Tier};

/// What the query source claims about a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expectation {
    Unreachable,
    Reachable,
    Unknown,
}

impl Expectation {
    /// Decode the `0 / 1 / -1` convention of query files.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Expectation::Unreachable),
            1 => Some(Expectation::Reachable),
            -1 => Some(Expectation::Unknown),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Expectation::Unreachable => 0,
            Expectation::Reachable => 1,
            Expectation::Unknown => -1,
        }
    }

    pub fn known(self) -> Option<bool> {
        match self {
            Expectation::Unreachable => Some(false),
            Expectation::Reachable => Some(true),
            Expectation::Unknown => None,
        }
    }
}

impl From<bool> for Expectation {
    fn from(reachable: bool) -> Self {
        if reachable {
            Expectation::Reachable
        } else {
            Expectation::Unreachable
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Query {
    pub source: usize,
    pub target: usize,
    pub expected: Expectation,
}

impl Query {
    pub fn new(source: usize, target: usize) -> Self {
        Self { source, target, expected: Expectation::Unknown }
    }

    pub fn expecting(source: usize, target: usize, reachable: bool) -> Self {
        Self { source, target, expected: reachable.into() }
    }
}

/// Pruning counters for a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryStats {
    pub total: usize,
    pub reachable: usize,
    /// Decided by interval containment alone.
    pub interval_resolved: usize,
    /// Decided by structural negatives or the bit-vector filters, before any search.
    pub filter_resolved: usize,
    pub searched: usize,
}

impl QueryStats {
    pub fn record(&mut self, resolution: Resolution) {
        self.total += 1;
        if resolution.reachable {
            self.reachable += 1;
        }
        match resolution.tier {
            Tier::Interval => self.interval_resolved += 1,
            Tier::Structural | Tier::Filter => self.filter_resolved += 1,
            Tier::Search => self.searched += 1,
        }
    }

    /// Queries answered without touching the graph.
    pub fn label_resolved(&self) -> usize {
        self.interval_resolved + self.filter_resolved
    }
}

/// Answer every query in order and fill in unknown expectations.
///
/// Stops at the first query whose known expectation disagrees with the computed answer.
/// On error `queries` is left untouched.
pub fn run_queries<const K: usize>(index: &ReachIndex<K>, queries: &mut [Query]) -> Result<QueryStats> {
    let mut oracle = Oracle::new(index);
    let mut answers = Vec::with_capacity(queries.len());
    for (position, query) in queries.iter().enumerate() {
        let resolution = oracle.resolve(query.source, query.target);
        check(position, query, resolution)?;
        answers.push(resolution);
    }
    Ok(settle(queries, &answers))
}

/// Answer a batch of pairs on the rayon pool, one [`Oracle`] per worker.
#[cfg(feature = "parallel")]
pub fn answer_parallel<const K: usize>(index: &ReachIndex<K>, pairs: &[(usize, usize)]) -> Vec<Resolution> {
    use rayon::prelude::*;

    pairs
        .par_iter()
        .map_init(|| Oracle::new(index), |oracle, &(s, t)| oracle.resolve(s, t))
        .collect()
}

/// Parallel [`run_queries`]. The whole batch is answered before any check runs; the
/// error is still the earliest mismatching query and `queries` stays untouched.
#[cfg(feature = "parallel")]
pub fn run_queries_parallel<const K: usize>(
    index: &ReachIndex<K>,
    queries: &mut [Query],
) -> Result<QueryStats> {
    let pairs: Vec<(usize, usize)> = queries.iter().map(|q| (q.source, q.target)).collect();
    let answers = answer_parallel(index, &pairs);
    for (position, (query, &resolution)) in queries.iter().zip(&answers).enumerate() {
        check(position, query, resolution)?;
    }
    Ok(settle(queries, &answers))
}

fn check(position: usize, query: &Query, resolution: Resolution) -> Result<()> {
    match query.expected.known() {
        Some(expected) if expected != resolution.reachable => {
            error!(
                query = position,
                source = query.source,
                target = query.target,
                expected,
                computed = resolution.reachable,
                "reachability answer disagrees with expectation"
            );
            Err(Error::IntegrityViolation {
                query: position,
                source_node: query.source,
                target_node: query.target,
                expected,
                computed: resolution.reachable,
            })
        }
        _ => Ok(()),
    }
}

fn settle(queries: &mut [Query], answers: &[Resolution]) -> QueryStats {
    let mut stats = QueryStats::default();
    for (query, &resolution) in queries.iter_mut().zip(answers) {
        query.expected = resolution.reachable.into();
        stats.record(resolution);
    }
    debug!(
        total = stats.total,
        reachable = stats.reachable,
        interval_resolved = stats.interval_resolved,
        filter_resolved = stats.filter_resolved,
        searched = stats.searched,
        "queries answered"
    );
    stats
}
