//! Dependency graph between cells.
//!
//! Cells are addressed by their arena index. An edge `cell -> other` means
//! `cell`'s formula reads `other`. Both directions are kept: `precedents`
//! for cycle checks and `dependents` for propagating value changes.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use super::cycle::would_create_cycle;
use super::error::CellError;

#[derive(Clone, Debug, Default)]
pub struct DependencyGraph {
    precedents: Vec<BTreeSet<usize>>,
    dependents: Vec<BTreeSet<usize>>,
}

impl DependencyGraph {
    /// A graph over `len` cells with no edges.
    pub fn new(len: usize) -> Self {
        DependencyGraph {
            precedents: vec![BTreeSet::new(); len],
            dependents: vec![BTreeSet::new(); len],
        }
    }

    pub fn len(&self) -> usize {
        self.precedents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.precedents.is_empty()
    }

    /// Record that `cell` reads `other`.
    ///
    /// An existing edge is left alone. An edge that would close a cycle is
    /// not added and `CellError::Circular` is returned.
    pub fn add_dependency(&mut self, cell: usize, other: usize) -> Result<(), CellError> {
        if self.precedents[cell].contains(&other) {
            return Ok(());
        }
        if would_create_cycle(self, cell, other) {
            log::debug!("rejecting dependency {} -> {}: cycle", cell, other);
            return Err(CellError::Circular);
        }
        self.precedents[cell].insert(other);
        self.dependents[other].insert(cell);
        Ok(())
    }

    /// Drop every edge out of `cell`. Cells reading `cell` are unaffected.
    pub fn clear_dependencies(&mut self, cell: usize) {
        let precedents = std::mem::take(&mut self.precedents[cell]);
        for other in precedents {
            self.dependents[other].remove(&cell);
        }
    }

    /// Drop every edge in the graph.
    pub fn clear(&mut self) {
        self.precedents.iter_mut().for_each(BTreeSet::clear);
        self.dependents.iter_mut().for_each(BTreeSet::clear);
    }

    /// Cells that `cell` reads, in index order.
    pub fn precedents_of(&self, cell: usize) -> impl Iterator<Item = usize> + '_ {
        self.precedents[cell].iter().copied()
    }

    /// Cells that read `cell`, in index order.
    pub fn dependents_of(&self, cell: usize) -> impl Iterator<Item = usize> + '_ {
        self.dependents[cell].iter().copied()
    }

    pub fn depends_on(&self, cell: usize, other: usize) -> bool {
        self.precedents[cell].contains(&other)
    }

    /// Every cell that reads `cell` directly or transitively, ordered so that
    /// each comes after all of its precedents. `cell` itself is not included.
    pub fn recalc_order(&self, cell: usize) -> Vec<usize> {
        let mut affected = BTreeSet::new();
        let mut stack: Vec<usize> = self.dependents_of(cell).collect();
        while let Some(next) = stack.pop() {
            if affected.insert(next) {
                stack.extend(self.dependents_of(next));
            }
        }

        // Kahn's algorithm restricted to the affected cells
        let mut pending: BTreeMap<usize, usize> = affected
            .iter()
            .map(|&c| (c, self.precedents_of(c).filter(|p| affected.contains(p)).count()))
            .collect();
        let mut ready: VecDeque<usize> = pending
            .iter()
            .filter(|&(_, &count)| count == 0)
            .map(|(&c, _)| c)
            .collect();

        let mut order = Vec::with_capacity(affected.len());
        while let Some(next) = ready.pop_front() {
            order.push(next);
            for dependent in self.dependents_of(next) {
                if let Some(count) = pending.get_mut(&dependent) {
                    *count -= 1;
                    if *count == 0 {
                        ready.push_back(dependent);
                    }
                }
            }
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_dependency_records_both_directions() {
        let mut graph = DependencyGraph::new(3);
        graph.add_dependency(0, 1).unwrap();
        assert!(graph.depends_on(0, 1));
        assert_eq!(graph.dependents_of(1).collect::<Vec<_>>(), vec![0]);
        assert_eq!(graph.precedents_of(0).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_duplicate_edge_is_noop() {
        let mut graph = DependencyGraph::new(2);
        graph.add_dependency(0, 1).unwrap();
        graph.add_dependency(0, 1).unwrap();
        assert_eq!(graph.dependents_of(1).count(), 1);
    }

    #[test]
    fn test_cycle_is_rejected_without_edge() {
        let mut graph = DependencyGraph::new(2);
        graph.add_dependency(0, 1).unwrap();
        assert_eq!(graph.add_dependency(1, 0), Err(CellError::Circular));
        assert!(!graph.depends_on(1, 0));
        assert_eq!(graph.dependents_of(0).count(), 0);

        assert_eq!(graph.add_dependency(1, 1), Err(CellError::Circular));
    }

    #[test]
    fn test_clear_dependencies_keeps_incoming_edges() {
        let mut graph = DependencyGraph::new(3);
        graph.add_dependency(0, 1).unwrap();
        graph.add_dependency(1, 2).unwrap();

        graph.clear_dependencies(1);
        assert!(!graph.depends_on(1, 2));
        assert_eq!(graph.dependents_of(2).count(), 0);
        assert!(graph.depends_on(0, 1));

        // The edge can now be added in the other direction.
        graph.add_dependency(2, 1).unwrap();
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut graph = DependencyGraph::new(3);
        graph.add_dependency(0, 1).unwrap();
        graph.add_dependency(2, 1).unwrap();
        graph.clear();
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.dependents_of(1).count(), 0);
    }

    #[test]
    fn test_recalc_order_visits_each_cell_once_after_its_inputs() {
        // 1 and 2 read 0, 3 reads 1 and 2, 4 reads 3 and 0
        let mut graph = DependencyGraph::new(6);
        graph.add_dependency(1, 0).unwrap();
        graph.add_dependency(2, 0).unwrap();
        graph.add_dependency(3, 1).unwrap();
        graph.add_dependency(3, 2).unwrap();
        graph.add_dependency(4, 3).unwrap();
        graph.add_dependency(4, 0).unwrap();

        assert_eq!(graph.recalc_order(0), vec![1, 2, 3, 4]);
        assert_eq!(graph.recalc_order(2), vec![3, 4]);
        assert!(graph.recalc_order(4).is_empty());
        assert!(graph.recalc_order(5).is_empty());
    }
}
