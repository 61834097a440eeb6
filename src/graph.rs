//! Border-adjacency graph and shortest land route search.
//!
//! The graph is a flat `code -> [code]` map built fresh for each query. Codes
//! that never appear as keys are absent nodes, and asking for a route to or
//! from one is an [`AtlasError::UnknownCode`] rather than a disconnection.

use crate::error::{AtlasError, CodeRole, Result};
use crate::models::{CountryRecord, Route, RouteOutcome};
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

#[derive(Debug, Clone, Default)]
pub struct AdjacencyGraph {
    edges: FxHashMap<String, Vec<String>>,
}

impl AdjacencyGraph {
    /// One node per record with a non-empty code. A repeated code keeps the
    /// last record's borders.
    pub fn build(records: &[CountryRecord]) -> Self {
        Self::from_edges(
            records
                .iter()
                .map(|r| (r.code.clone(), r.borders.clone())),
        )
    }

    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let edges = edges
            .into_iter()
            .filter(|(code, _)| !code.is_empty())
            .collect();
        Self { edges }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.edges.contains_key(code)
    }

    /// Neighbors in the order the provider listed them
    pub fn neighbors(&self, code: &str) -> Option<&[String]> {
        self.edges.get(code).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Breadth-first search for the fewest-hop path from `src` to `dst`.
    ///
    /// Among equally short paths the one found first wins, which follows the
    /// order of each node's adjacency list.
    pub fn find_route(&self, src: &str, dst: &str) -> Result<RouteOutcome> {
        if !self.contains(src) {
            return Err(AtlasError::unknown(src, CodeRole::Origin));
        }
        if !self.contains(dst) {
            return Err(AtlasError::unknown(dst, CodeRole::Destination));
        }
        if src == dst {
            return Ok(RouteOutcome::Connected(Route {
                path: vec![src.to_string()],
            }));
        }

        // node -> node it was first reached from; doubles as the seen-set
        let mut came_from: FxHashMap<&str, Option<&str>> = FxHashMap::default();
        let mut queue: VecDeque<&str> = VecDeque::new();
        came_from.insert(src, None);
        queue.push_back(src);

        while let Some(current) = queue.pop_front() {
            let Some(next) = self.edges.get(current) else {
                continue;
            };
            for nb in next {
                let nb = nb.as_str();
                if came_from.contains_key(nb) {
                    continue;
                }
                came_from.insert(nb, Some(current));
                if nb == dst {
                    return Ok(RouteOutcome::Connected(Route {
                        path: trace_back(&came_from, dst),
                    }));
                }
                queue.push_back(nb);
            }
        }

        Ok(RouteOutcome::NotConnected)
    }
}

fn trace_back(came_from: &FxHashMap<&str, Option<&str>>, dst: &str) -> Vec<String> {
    let mut path = vec![dst.to_string()];
    let mut cursor = dst;
    while let Some(&Some(prev)) = came_from.get(cursor) {
        path.push(prev.to_string());
        cursor = prev;
    }
    path.reverse();
    path
}

pub fn build_graph(records: &[CountryRecord]) -> AdjacencyGraph {
    AdjacencyGraph::build(records)
}

pub fn find_route(graph: &AdjacencyGraph, src: &str, dst: &str) -> Result<RouteOutcome> {
    graph.find_route(src, dst)
}
