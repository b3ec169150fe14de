//! Circular dependency detection for formula cells.
//!
//! Before a cell starts reading another, we verify the new edge doesn't close
//! a cycle (e.g. A1 reads B1, B1 reads C1, C1 reads A1). The dependency graph
//! is kept acyclic so recalculation always terminates.

use std::collections::{HashMap, HashSet};

use super::deps::DependencyGraph;

/// Returns true if making `cell` read from `other` would create a cycle,
/// i.e. `cell` is reachable from `other` through existing dependencies.
/// A cell reading itself is a cycle.
pub fn would_create_cycle(graph: &DependencyGraph, cell: usize, other: usize) -> bool {
    let mut visited = HashSet::new();
    let mut stack = vec![other];
    while let Some(current) = stack.pop() {
        if current == cell {
            return true;
        }
        if visited.insert(current) {
            stack.extend(graph.precedents_of(current));
        }
    }
    false
}

/// Find the path of dependencies from `from` to `to`, both included.
pub fn dependency_path(graph: &DependencyGraph, from: usize, to: usize) -> Option<Vec<usize>> {
    // Cell each visited cell was first reached from
    let mut parent: HashMap<usize, usize> = HashMap::new();
    let mut stack = vec![from];
    let mut visited = HashSet::from([from]);

    while let Some(current) = stack.pop() {
        if current == to {
            let mut path = vec![to];
            let mut step = to;
            while let Some(&prev) = parent.get(&step) {
                path.push(prev);
                step = prev;
            }
            path.reverse();
            return Some(path);
        }
        for next in graph.precedents_of(current) {
            if visited.insert(next) {
                parent.insert(next, current);
                stack.push(next);
            }
        }
    }
    None
}
