use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::{Node, SnailfishNumber};

pub trait TreeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeConvert for SnailfishNumber {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree(number: &SnailfishNumber, node_idx: Index, depth: usize) -> Tree<String> {
            match number.get_node(node_idx) {
                Some(Node::Pair { left, right }) => {
                    let label = format!("pair (depth {depth})");
                    Tree::new(label).with_leaves([
                        build_tree(number, *left, depth + 1),
                        build_tree(number, *right, depth + 1),
                    ])
                }
                Some(Node::Regular(value)) => Tree::new(value.to_string()),
                None => Tree::new("?".to_string()),
            }
        }

        build_tree(self, self.root(), 0)
    }
}
