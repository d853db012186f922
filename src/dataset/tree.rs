//! Binary search tree dataset and its drawing layout

use rand::Rng;

/// A tree node. Parents own their children exclusively.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    /// Stable identity (insertion index); highlight state is keyed by this
    pub id: usize,
    pub value: i32,
    pub left: Option<Box<TreeNode>>,
    pub right: Option<Box<TreeNode>>,
}

impl TreeNode {
    fn leaf(id: usize, value: i32) -> Box<Self> {
        Box::new(TreeNode {
            id,
            value,
            left: None,
            right: None,
        })
    }
}

/// Binary search tree built by sequential insertion
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BinaryTree {
    root: Option<Box<TreeNode>>,
    len: usize,
}

/// Where one node sits on the drawing surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodePlacement {
    pub id: usize,
    pub value: i32,
    pub x: f64,
    pub y: f64,
    /// Position of the parent, for drawing the connecting edge
    pub parent: Option<(f64, f64)>,
}

/// Canvas space shared by the tree and graph layouts
pub const CANVAS_WIDTH: f64 = 800.0;
pub const CANVAS_HEIGHT: f64 = 500.0;

const TREE_TOP_MARGIN: f64 = 50.0;
const TREE_LEVEL_HEIGHT: f64 = 80.0;
const TREE_OFFSET_SHRINK: f64 = 0.7;

impl BinaryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree by inserting `values` in order
    pub fn from_values(values: &[i32]) -> Self {
        let mut tree = Self::new();
        for &value in values {
            tree.insert(value);
        }
        tree
    }

    /// Build a tree from `size` random values in `[1, 100]`
    pub fn random<R: Rng + ?Sized>(rng: &mut R, size: usize) -> Self {
        Self::from_values(&super::random_array(rng, size))
    }

    /// Insert a value; smaller values go left, everything else (duplicates too) goes right.
    /// Returns the new node's id.
    pub fn insert(&mut self, value: i32) -> usize {
        fn insert_at(slot: &mut Option<Box<TreeNode>>, id: usize, value: i32) {
            match slot {
                Some(node) if value < node.value => insert_at(&mut node.left, id, value),
                Some(node) => insert_at(&mut node.right, id, value),
                None => *slot = Some(TreeNode::leaf(id, value)),
            }
        }

        let id = self.len;
        self.len += 1;
        insert_at(&mut self.root, id, value);
        id
    }

    pub fn root(&self) -> Option<&TreeNode> {
        self.root.as_deref()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn height(&self) -> usize {
        fn height_of(node: Option<&TreeNode>) -> usize {
            node.map_or(0, |n| {
                1 + height_of(n.left.as_deref()).max(height_of(n.right.as_deref()))
            })
        }
        height_of(self.root())
    }

    /// Node values indexed by node id
    pub fn values_by_id(&self) -> Vec<i32> {
        fn collect(node: Option<&TreeNode>, out: &mut [i32]) {
            if let Some(n) = node {
                out[n.id] = n.value;
                collect(n.left.as_deref(), out);
                collect(n.right.as_deref(), out);
            }
        }
        let mut out = vec![0; self.len];
        collect(self.root(), &mut out);
        out
    }

    /// Place every node on the canvas: root at the top centre, children one level
    /// lower and offset sideways by a shrinking amount.
    ///
    /// `y` grows downward from the top of the canvas.
    pub fn layout(&self) -> Vec<NodePlacement> {
        fn place(
            node: &TreeNode,
            x: f64,
            y: f64,
            offset: f64,
            parent: Option<(f64, f64)>,
            out: &mut Vec<NodePlacement>,
        ) {
            out.push(NodePlacement {
                id: node.id,
                value: node.value,
                x,
                y,
                parent,
            });
            let child_y = y + TREE_LEVEL_HEIGHT;
            let child_offset = offset * TREE_OFFSET_SHRINK;
            if let Some(left) = node.left.as_deref() {
                place(left, x - offset, child_y, child_offset, Some((x, y)), out);
            }
            if let Some(right) = node.right.as_deref() {
                place(right, x + offset, child_y, child_offset, Some((x, y)), out);
            }
        }

        let mut out = Vec::with_capacity(self.len);
        if let Some(root) = self.root() {
            place(
                root,
                CANVAS_WIDTH / 2.0,
                TREE_TOP_MARGIN,
                CANVAS_WIDTH / 4.0,
                None,
                &mut out,
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_routes_smaller_left() {
        let tree = BinaryTree::from_values(&[5, 3, 8]);
        let root = tree.root().unwrap();
        assert_eq!(root.value, 5);
        assert_eq!(root.left.as_ref().unwrap().value, 3);
        assert_eq!(root.right.as_ref().unwrap().value, 8);
    }

    #[test]
    fn test_duplicates_go_right() {
        let tree = BinaryTree::from_values(&[5, 5]);
        let root = tree.root().unwrap();
        assert!(root.left.is_none());
        let dup = root.right.as_ref().unwrap();
        assert_eq!(dup.value, 5);
        assert_eq!(dup.id, 1);
    }

    #[test]
    fn test_values_by_id_follow_insertion_order() {
        let tree = BinaryTree::from_values(&[5, 3, 8, 1, 4]);
        assert_eq!(tree.values_by_id(), vec![5, 3, 8, 1, 4]);
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.height(), 3);
    }

    #[test]
    fn test_layout_places_children_below_parent() {
        let tree = BinaryTree::from_values(&[5, 3, 8]);
        let layout = tree.layout();
        assert_eq!(layout.len(), 3);
        let root = layout[0];
        assert_eq!(root.parent, None);
        for child in &layout[1..] {
            assert_eq!(child.parent, Some((root.x, root.y)));
            assert!(child.y > root.y);
        }
        assert!(layout[1].x < root.x);
        assert!(layout[2].x > root.x);
    }

    #[test]
    fn test_empty_tree() {
        let tree = BinaryTree::from_values(&[]);
        assert!(tree.is_empty());
        assert!(tree.root().is_none());
        assert!(tree.layout().is_empty());
    }
}
