//! Tree and graph traversals
//!
//! Traversals mutate nothing, so their suspension points carry an empty working
//! slice. Highlight ids are node ids for trees and vertex ids for graphs.

use super::{AlgorithmEngine, AlgorithmKey, EngineError, GraphSearch, StepSink, TreeTraversal};
use crate::dataset::{BinaryTree, Graph, TreeNode};
use crate::state::VisEvent;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

impl<S: StepSink + ?Sized> AlgorithmEngine<'_, S> {
    /// Walk `tree` in the given order, returning node values in visit order.
    /// An empty tree yields an empty result without suspending.
    pub fn traverse(
        &mut self,
        order: TreeTraversal,
        tree: &BinaryTree,
    ) -> Result<Vec<i32>, EngineError> {
        self.begin_run();
        tracing::debug!(order = order.key(), nodes = tree.len(), "traversal started");

        let mut visited = Vec::with_capacity(tree.len());
        self.walk(order, tree.root(), &mut visited)?;

        self.end_run(&[])?;
        Ok(visited)
    }

    fn walk(
        &mut self,
        order: TreeTraversal,
        node: Option<&TreeNode>,
        out: &mut Vec<i32>,
    ) -> Result<(), EngineError> {
        let Some(node) = node else {
            return Ok(());
        };

        match order {
            TreeTraversal::Inorder => {
                self.walk(order, node.left.as_deref(), out)?;
                self.visit_node(node, out)?;
                self.walk(order, node.right.as_deref(), out)?;
            }
            TreeTraversal::Preorder => {
                self.visit_node(node, out)?;
                self.walk(order, node.left.as_deref(), out)?;
                self.walk(order, node.right.as_deref(), out)?;
            }
            TreeTraversal::Postorder => {
                self.walk(order, node.left.as_deref(), out)?;
                self.walk(order, node.right.as_deref(), out)?;
                self.visit_node(node, out)?;
            }
        }
        Ok(())
    }

    fn visit_node(&mut self, node: &TreeNode, out: &mut Vec<i32>) -> Result<(), EngineError> {
        out.push(node.value);
        self.stats.bump_visits();
        self.emit(VisEvent::Visit(node.id));
        self.suspend(&[])
    }

    /// Search `graph` from `start`, returning vertices in visit order.
    ///
    /// An empty graph yields an empty result; otherwise `start` must be a vertex
    /// of the graph.
    pub fn search(
        &mut self,
        algorithm: GraphSearch,
        graph: &Graph,
        start: usize,
    ) -> Result<Vec<usize>, EngineError> {
        self.begin_run();
        if graph.is_empty() {
            self.end_run(&[])?;
            return Ok(Vec::new());
        }
        if !graph.contains(start) {
            return Err(EngineError::UnknownVertex {
                vertex: start,
                len: graph.len(),
            });
        }
        tracing::debug!(
            algorithm = algorithm.key(),
            start,
            vertices = graph.len(),
            "graph search started"
        );

        let visited = match algorithm {
            GraphSearch::Bfs => self.breadth_first(graph, start)?,
            GraphSearch::Dfs => {
                let mut seen = FxHashSet::default();
                let mut order = Vec::with_capacity(graph.len());
                self.depth_first(graph, start, &mut seen, &mut order)?;
                order
            }
        };

        self.end_run(&[])?;
        Ok(visited)
    }

    /// Vertices join the seen set when enqueued, so none is queued twice. The
    /// view marks a vertex visited when it is dequeued and exploring when it is
    /// first discovered.
    fn breadth_first(&mut self, graph: &Graph, start: usize) -> Result<Vec<usize>, EngineError> {
        let mut seen = FxHashSet::default();
        let mut queue = VecDeque::from([start]);
        let mut order = Vec::with_capacity(graph.len());
        seen.insert(start);

        while let Some(vertex) = queue.pop_front() {
            order.push(vertex);
            self.stats.bump_visits();
            self.emit(VisEvent::Visit(vertex));
            self.suspend(&[])?;

            for &neighbor in graph.neighbors(vertex) {
                if seen.insert(neighbor) {
                    queue.push_back(neighbor);
                    self.emit(VisEvent::Explore(neighbor));
                    self.suspend(&[])?;
                }
            }
        }
        Ok(order)
    }

    /// Marks on entry, then descends into each unseen neighbor after flagging it
    /// as exploring.
    fn depth_first(
        &mut self,
        graph: &Graph,
        vertex: usize,
        seen: &mut FxHashSet<usize>,
        order: &mut Vec<usize>,
    ) -> Result<(), EngineError> {
        seen.insert(vertex);
        order.push(vertex);
        self.stats.bump_visits();
        self.emit(VisEvent::Visit(vertex));
        self.suspend(&[])?;

        for &neighbor in graph.neighbors(vertex) {
            if !seen.contains(&neighbor) {
                self.emit(VisEvent::Explore(neighbor));
                self.suspend(&[])?;
                self.depth_first(graph, neighbor, seen, order)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::VisualizationState;

    fn small_graph() -> Graph {
        Graph::from_adjacency(vec![vec![1, 2], vec![2], vec![]])
    }

    #[test]
    fn test_inorder_of_bst_is_sorted() {
        let tree = BinaryTree::from_values(&[5, 3, 8, 1, 4]);
        let mut state = VisualizationState::new();
        let mut engine = AlgorithmEngine::new(&mut state);
        let values = engine.traverse(TreeTraversal::Inorder, &tree).unwrap();
        assert_eq!(values, vec![1, 3, 4, 5, 8]);
        assert_eq!(engine.stats().visits(), 5);
        assert_eq!(state.visited_count(), 5);
    }

    #[test]
    fn test_preorder_and_postorder() {
        let tree = BinaryTree::from_values(&[5, 3, 8, 1, 4]);
        let mut state = VisualizationState::new();
        let mut engine = AlgorithmEngine::new(&mut state);
        assert_eq!(
            engine.traverse(TreeTraversal::Preorder, &tree).unwrap(),
            vec![5, 3, 1, 4, 8]
        );
        assert_eq!(
            engine.traverse(TreeTraversal::Postorder, &tree).unwrap(),
            vec![1, 4, 3, 8, 5]
        );
    }

    #[test]
    fn test_bfs_and_dfs_on_small_graph() {
        let graph = small_graph();
        let mut state = VisualizationState::new();
        let mut engine = AlgorithmEngine::new(&mut state);
        assert_eq!(
            engine.search(GraphSearch::Bfs, &graph, 0).unwrap(),
            vec![0, 1, 2]
        );
        assert_eq!(
            engine.search(GraphSearch::Dfs, &graph, 0).unwrap(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn test_bfs_explores_in_adjacency_order() {
        // 0 -> 2, 1 ; 2 -> 3 ; 1 -> 3
        let graph = Graph::from_adjacency(vec![vec![2, 1], vec![3], vec![3], vec![]]);
        let mut state = VisualizationState::new();
        let order = AlgorithmEngine::new(&mut state)
            .search(GraphSearch::Bfs, &graph, 0)
            .unwrap();
        assert_eq!(order, vec![0, 2, 1, 3]);

        let order = AlgorithmEngine::new(&mut state)
            .search(GraphSearch::Dfs, &graph, 0)
            .unwrap();
        assert_eq!(order, vec![0, 2, 3, 1]);
    }

    #[test]
    fn test_unreachable_vertices_are_not_visited() {
        let graph = Graph::from_adjacency(vec![vec![], vec![0]]);
        let mut state = VisualizationState::new();
        let order = AlgorithmEngine::new(&mut state)
            .search(GraphSearch::Dfs, &graph, 0)
            .unwrap();
        assert_eq!(order, vec![0]);
        assert!(!state.is_visited(1));
    }

    #[test]
    fn test_unknown_start_vertex() {
        let mut state = VisualizationState::new();
        let err = AlgorithmEngine::new(&mut state)
            .search(GraphSearch::Bfs, &small_graph(), 9)
            .unwrap_err();
        assert_eq!(err, EngineError::UnknownVertex { vertex: 9, len: 3 });
    }

    #[test]
    fn test_empty_inputs_are_no_ops() {
        let mut state = VisualizationState::new();
        let mut engine = AlgorithmEngine::new(&mut state);
        assert!(engine
            .traverse(TreeTraversal::Inorder, &BinaryTree::new())
            .unwrap()
            .is_empty());
        assert!(engine
            .search(GraphSearch::Bfs, &Graph::default(), 0)
            .unwrap()
            .is_empty());
        assert_eq!(engine.stats().visits(), 0);
    }
}
