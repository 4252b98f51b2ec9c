//! Role-inheritance graph.
//!
//! Roles form a directed acyclic graph: an edge `role -> parent` means the
//! role holds every permission granted to the parent. Resolution is a plain
//! adjacency-list traversal, and cycle rejection runs before any edge write.

use std::collections::{HashMap, HashSet};

use crate::repos::roles::RoleEdge;

#[derive(Debug, Clone, Default)]
pub struct RoleGraph {
    parents: HashMap<i64, Vec<i64>>,
}

impl RoleGraph {
    pub fn from_edges(edges: &[RoleEdge]) -> Self {
        let mut parents: HashMap<i64, Vec<i64>> = HashMap::new();
        for edge in edges {
            parents.entry(edge.role_id).or_default().push(edge.parent_role_id);
        }
        Self { parents }
    }

    /// Every role reachable from the starting set, starts included.
    pub fn reachable(&self, start_roles: &[i64]) -> HashSet<i64> {
        let mut seen: HashSet<i64> = start_roles.iter().copied().collect();
        let mut stack: Vec<i64> = start_roles.to_vec();
        while let Some(role) = stack.pop() {
            if let Some(parents) = self.parents.get(&role) {
                for &parent in parents {
                    if seen.insert(parent) {
                        stack.push(parent);
                    }
                }
            }
        }
        seen
    }

    /// Would adding `role -> parent` close a cycle?
    ///
    /// True when the role is already reachable from the parent (the new edge
    /// would complete the loop), including the self-edge case.
    pub fn would_create_cycle(&self, role_id: i64, parent_role_id: i64) -> bool {
        role_id == parent_role_id || self.reachable(&[parent_role_id]).contains(&role_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(role_id: i64, parent_role_id: i64) -> RoleEdge {
        RoleEdge {
            role_id,
            parent_role_id,
        }
    }

    #[test]
    fn reachable_includes_start_and_transitive_parents() {
        // 1 -> 2 -> 3, 4 isolated
        let graph = RoleGraph::from_edges(&[edge(1, 2), edge(2, 3)]);
        let reach = graph.reachable(&[1]);
        assert!(reach.contains(&1));
        assert!(reach.contains(&2));
        assert!(reach.contains(&3));
        assert!(!reach.contains(&4));
    }

    #[test]
    fn reachable_handles_diamond() {
        // 1 -> {2, 3} -> 4
        let graph = RoleGraph::from_edges(&[edge(1, 2), edge(1, 3), edge(2, 4), edge(3, 4)]);
        let reach = graph.reachable(&[1]);
        assert_eq!(reach.len(), 4);
    }

    #[test]
    fn self_edge_is_a_cycle() {
        let graph = RoleGraph::default();
        assert!(graph.would_create_cycle(7, 7));
    }

    #[test]
    fn back_edge_is_a_cycle() {
        // 1 -> 2 -> 3; adding 3 -> 1 closes the loop
        let graph = RoleGraph::from_edges(&[edge(1, 2), edge(2, 3)]);
        assert!(graph.would_create_cycle(3, 1));
        // 1 -> 3 is a forward shortcut, not a cycle
        assert!(!graph.would_create_cycle(1, 3));
    }
}
