//! Text loaders for graphs and query batches.
//!
//! Graph files:
//! ```text
//! graph_for_greach
//! 4
//! 0: 1 3 #
//! 1: 2 #
//! ```
//! A header word, the node count, then one `u: v1 v2 ... #` record per node with
//! successors. Records are read as tokens, so a long list may wrap onto the next line.
//! Nodes without successors may be omitted.
//!
//! Query files hold whitespace-separated `source target expected` triples, with
//! `expected` one of `0` (unreachable), `1` (reachable) or `-1` (unknown).
//!
//! Every id is range-checked here; the index itself trusts its input.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{AdjacencyLists, GraphRef};
use crate::query::{Expectation, Query};

/// Conventional first word of a graph file.
pub const GRAPH_HEADER: &str = "graph_for_greach";

pub fn load_graph(path: &Path) -> Result<AdjacencyLists> {
    read_graph(BufReader::new(File::open(path)?))
}

pub fn load_queries(path: &Path, node_count: usize) -> Result<Vec<Query>> {
    read_queries(BufReader::new(File::open(path)?), node_count)
}

/// Where the body reader is inside a `u: v1 v2 ... #` record.
#[derive(Debug, Clone, Copy)]
enum Record {
    Head,
    Colon(usize),
    Successors(usize),
}

/// One lexical piece of a graph body: a node id, `:` or `#`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece<'a> {
    Id(&'a str),
    Colon,
    Hash,
}

/// Split a whitespace token into pieces, so `0:`, `2#` and `1:2` read like `0 :`, `2 #`
/// and `1 : 2`.
fn pieces(token: &str) -> impl Iterator<Item = Piece<'_>> {
    token
        .split_inclusive([':', '#'])
        .flat_map(|chunk| {
            let (id, mark) = match chunk.strip_suffix(':') {
                Some(id) => (id, Some(Piece::Colon)),
                None => match chunk.strip_suffix('#') {
                    Some(id) => (id, Some(Piece::Hash)),
                    None => (chunk, None),
                },
            };
            (!id.is_empty()).then_some(Piece::Id(id)).into_iter().chain(mark)
        })
}

/// Successor lists are a token stream after the header: a record may wrap across
/// lines, and a missing final `#` at end of input is tolerated.
pub fn read_graph<R: BufRead>(reader: R) -> Result<AdjacencyLists> {
    let mut header_seen = false;
    let mut graph: Option<AdjacencyLists> = None;
    let mut record = Record::Head;
    let mut last_line = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        last_line = line_no;
        let line = line?;

        for token in line.split_whitespace() {
            let Some(g) = graph.as_mut() else {
                // Header and node count, possibly on one line.
                if !header_seen {
                    if token.parse::<i64>().is_ok() {
                        return Err(Error::load(line_no, "missing header word before node count"));
                    }
                    if token != GRAPH_HEADER {
                        debug!(header = token, "unrecognized graph header, reading anyway");
                    }
                    header_seen = true;
                    continue;
                }
                let n: usize = token
                    .parse()
                    .map_err(|e| Error::load(line_no, format!("bad node count '{token}': {e}")))?;
                graph = Some(AdjacencyLists::new(n));
                continue;
            };

            let n = GraphRef::node_count(g);
            for piece in pieces(token) {
                record = match (record, piece) {
                    (Record::Head, Piece::Id(id)) => Record::Colon(parse_node(id, n, line_no)?),
                    (Record::Head, _) => {
                        return Err(Error::load(line_no, "expected '<node>: <successors> #'"));
                    }
                    (Record::Colon(u), Piece::Colon) => Record::Successors(u),
                    (Record::Colon(u), _) => {
                        return Err(Error::load(line_no, format!("expected ':' after node {u}")));
                    }
                    (Record::Successors(u), Piece::Id(id)) => {
                        g.add_edge(u, parse_node(id, n, line_no)?);
                        Record::Successors(u)
                    }
                    (Record::Successors(_), Piece::Hash) => Record::Head,
                    (Record::Successors(u), Piece::Colon) => {
                        return Err(Error::load(line_no, format!("missing '#' after successors of node {u}")));
                    }
                };
            }
        }
    }

    if let Record::Colon(u) = record {
        return Err(Error::load(last_line, format!("expected ':' after node {u}")));
    }
    graph.ok_or_else(|| Error::load(last_line, "missing node count"))
}

fn parse_node(token: &str, node_count: usize, line_no: usize) -> Result<usize> {
    let id: usize = token
        .parse()
        .map_err(|e| Error::load(line_no, format!("bad node id '{token}': {e}")))?;
    if id >= node_count {
        return Err(Error::load(line_no, format!("node {id} out of range (n={node_count})")));
    }
    Ok(id)
}

pub fn read_queries<R: BufRead>(reader: R, node_count: usize) -> Result<Vec<Query>> {
    let mut queries = Vec::new();
    let mut pending: Vec<i64> = Vec::with_capacity(3);
    let mut last_line = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        last_line = line_no;
        let line = line?;
        for token in line.split_whitespace() {
            let value: i64 = token
                .parse()
                .map_err(|e| Error::load(line_no, format!("bad query field '{token}': {e}")))?;
            pending.push(value);
            if pending.len() == 3 {
                queries.push(query_from_fields(&pending, node_count, line_no)?);
                pending.clear();
            }
        }
    }

    if !pending.is_empty() {
        return Err(Error::load(last_line, "incomplete query triple"));
    }
    Ok(queries)
}

fn query_from_fields(fields: &[i64], node_count: usize, line_no: usize) -> Result<Query> {
    let node = |raw: i64| -> Result<usize> {
        usize::try_from(raw)
            .ok()
            .filter(|&id| id < node_count)
            .ok_or_else(|| Error::load(line_no, format!("node {raw} out of range (n={node_count})")))
    };
    let expected = Expectation::from_code(fields[2])
        .ok_or_else(|| Error::load(line_no, format!("expected value must be -1, 0 or 1, got {}", fields[2])))?;
    Ok(Query { source: node(fields[0])?, target: node(fields[1])?, expected })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_graph_file() {
        let txt = "graph_for_greach\n5\n0: 1 3 #\n1: 2#\n\n3: #\n";
        let g = read_graph(txt.as_bytes()).unwrap();
        assert_eq!(GraphRef::node_count(&g), 5);
        assert_eq!(g.successors_ref(0), &[1, 3]);
        assert_eq!(g.successors_ref(1), &[2]);
        assert!(g.successors_ref(3).is_empty());
        assert_eq!(g.predecessors_ref(3), &[0]);
    }

    #[test]
    fn successor_list_may_wrap_lines() {
        let g = read_graph("graph_for_greach\n3\n0: 1\n2 #\n".as_bytes()).unwrap();
        assert_eq!(g.successors_ref(0), &[1, 2]);
        assert_eq!(g.predecessors_ref(2), &[0]);

        let g = read_graph("graph_for_greach 3 0 :1# 1:\n2".as_bytes()).unwrap();
        assert_eq!(g.successors_ref(0), &[1]);
        assert_eq!(g.successors_ref(1), &[2]);
    }

    #[test]
    fn header_and_count_on_one_line() {
        let g = read_graph("graph_for_greach 2\n0: 1 #\n".as_bytes()).unwrap();
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn rejects_bad_graphs() {
        let cases = [
            ("4\n0: 1 #\n", 1),
            ("graph_for_greach\n2\n0: 2 #\n", 3),
            ("graph_for_greach\n2\n0 1\n", 3),
            ("graph_for_greach\n2\nx: 1 #\n", 3),
            ("graph_for_greach\n", 1),
            ("graph_for_greach\n3\n0: 1\n2 : #\n", 4),
            ("graph_for_greach\n3\n0: 1 #\n1\n", 4),
        ];
        for (txt, want_line) in cases {
            match read_graph(txt.as_bytes()) {
                Err(Error::Load { line, .. }) => assert_eq!(line, want_line, "{txt:?}"),
                other => panic!("expected load error for {txt:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn reads_query_triples_across_lines() {
        let qs = read_queries("0 2 1\n2 0\n0\n3 1 -1\n".as_bytes(), 4).unwrap();
        assert_eq!(
            qs,
            vec![
                Query { source: 0, target: 2, expected: Expectation::Reachable },
                Query { source: 2, target: 0, expected: Expectation::Unreachable },
                Query { source: 3, target: 1, expected: Expectation::Unknown },
            ]
        );
    }

    #[test]
    fn rejects_bad_queries() {
        assert!(matches!(read_queries("0 9 1\n".as_bytes(), 4), Err(Error::Load { line: 1, .. })));
        assert!(matches!(read_queries("0 -1 1\n".as_bytes(), 4), Err(Error::Load { line: 1, .. })));
        assert!(matches!(read_queries("0 1 2\n".as_bytes(), 4), Err(Error::Load { line: 1, .. })));
        assert!(matches!(read_queries("0 1\n".as_bytes(), 4), Err(Error::Load { line: 1, .. })));
        assert!(matches!(read_queries("0 a 1\n".as_bytes(), 4), Err(Error::Load { line: 1, .. })));
    }
}
