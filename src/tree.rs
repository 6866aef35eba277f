#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub value: i64,
    pub left: Option<Box<TreeNode>>,
    pub right: Option<Box<TreeNode>>,
}

impl TreeNode {
    pub fn new(value: i64) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    pub fn with_left(mut self, left: TreeNode) -> Self {
        self.left = Some(Box::new(left));
        self
    }

    pub fn with_right(mut self, right: TreeNode) -> Self {
        self.right = Some(Box::new(right));
        self
    }

    /// The fixed sample tree:
    ///
    /// ```text
    ///        5
    ///       / \
    ///      3   8
    ///     / \   \
    ///    1   4   10
    /// ```
    pub fn sample() -> Self {
        TreeNode::new(5)
            .with_left(
                TreeNode::new(3)
                    .with_left(TreeNode::new(1))
                    .with_right(TreeNode::new(4)),
            )
            .with_right(TreeNode::new(8).with_right(TreeNode::new(10)))
    }

    /// Same tree with the children of every node swapped.
    #[allow(dead_code)]
    pub fn mirror(&self) -> Self {
        Self {
            value: self.value,
            left: self.right.as_ref().map(|n| Box::new(n.mirror())),
            right: self.left.as_ref().map(|n| Box::new(n.mirror())),
        }
    }

    pub fn display(&self) -> termtree::Tree<String> {
        fn return_tree(node: Option<&TreeNode>) -> termtree::Tree<String> {
            match node {
                Some(node) if node.left.is_none() && node.right.is_none() => {
                    termtree::Tree::new(node.value.to_string())
                }
                Some(node) => termtree::Tree::new(node.value.to_string()).with_leaves([
                    return_tree(node.left.as_deref()),
                    return_tree(node.right.as_deref()),
                ]),
                None => termtree::Tree::new("-".to_string()),
            }
        }

        return_tree(Some(self))
    }
}

/// Sum of every value in the tree, accumulated in `i128` so that no tree of
/// `i64` values can overflow it short of 2^64 nodes.
pub fn sum_of_nodes(root: Option<&TreeNode>) -> i128 {
    match root {
        None => 0,
        Some(node) => {
            log::trace!(target: "tree_sum::tree::sum", "Visiting node {}", node.value);
            i128::from(node.value)
                + sum_of_nodes(node.left.as_deref())
                + sum_of_nodes(node.right.as_deref())
        }
    }
}
