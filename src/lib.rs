//! # greach
//!
//! Static reachability oracle for large DAGs.
//!
//! Build a [`ReachIndex`] once, then answer "is there a directed path from `a` to `b`"
//! queries through an [`Oracle`]:
//!
//! - interval labels from a depth-first pass decide many pairs outright,
//! - randomized bit-vector labels (descendant and ancestor side) reject most of the rest,
//! - a forward search, pruned by the same labels, settles whatever is left.
//!
//! ```
//! use greach::{build_index, AdjacencyLists, IndexConfig, Oracle};
//!
//! // 0 -> 1 -> 2, 0 -> 3
//! let g = AdjacencyLists::from_edges(4, &[(0, 1), (1, 2), (0, 3)]);
//! let index = build_index(&g, IndexConfig::default());
//! let mut oracle = Oracle::new(&index);
//! assert!(oracle.reach(0, 2));
//! assert!(!oracle.reach(1, 3));
//! ```
//!
//! Input must be acyclic: construction seeds its passes at sources and sinks, and nodes
//! it never reaches get no labels.

pub mod build;
pub mod config;
pub mod error;
pub mod format;
pub mod graph;
pub mod hash;
pub mod index;
pub mod label;
pub mod node;
pub mod oracle;
pub mod query;
pub mod visit;

pub use build::PassSummary;
pub use config::{IndexConfig, DEFAULT_WORDS};
pub use error::{Error, Result};
pub use format::{load_graph, load_queries, read_graph, read_queries};
pub use graph::{AdjacencyLists, Graph, GraphRef};
pub use hash::HashStream;
pub use index::{build_index, ReachIndex};
pub use label::Label;
pub use node::{Interval, Node, NodeTable};
pub use oracle::{Oracle, Resolution, Tier};
pub use query::{run_queries, Expectation, Query, QueryStats};
#[cfg(feature = "parallel")]
pub use query::{answer_parallel, run_queries_parallel};
pub use visit::VisitStamps;
