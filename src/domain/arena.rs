use generational_arena::{Arena, Index};
use std::fmt;
use std::str::FromStr;
use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::literal::Literal;

/// Tree node in the arena-based snailfish number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    /// Leaf holding a regular number
    Regular(u64),
    /// Internal node owning exactly two children
    Pair { left: Index, right: Index },
}

/// Which child of a pair a node occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Left,
    Right,
}

/// Arena-based binary tree for one snailfish number.
///
/// Children are indices into the arena and no parent links are stored. The
/// type is intentionally not `Clone`: [`SnailfishNumber::add`] consumes its
/// operands, so an operand cannot be reused once it has been added.
///
/// ```compile_fail
/// use snailfish::domain::SnailfishNumber;
///
/// let a: SnailfishNumber = "[1,1]".parse().unwrap();
/// let b: SnailfishNumber = "[2,2]".parse().unwrap();
/// let sum = a.add(b).unwrap();
/// let again = a.add(sum); // `a` was moved into the first sum
/// ```
#[derive(Debug)]
pub struct SnailfishNumber {
    /// Arena storage for all tree nodes
    arena: Arena<Node>,
    /// Index of the root node
    root: Index,
}

impl SnailfishNumber {
    #[instrument(level = "trace")]
    pub fn from_literal(literal: &Literal) -> Self {
        let mut arena = Arena::new();
        let root = insert_literal(&mut arena, literal);
        Self { arena, root }
    }

    /// Places `left` and `right` under a fresh root pair.
    ///
    /// The right operand's nodes are moved into the left operand's arena.
    pub(crate) fn join(left: SnailfishNumber, right: SnailfishNumber) -> DomainResult<Self> {
        let SnailfishNumber {
            mut arena,
            root: left_root,
        } = left;
        let right_root = graft(&mut arena, right)?;
        let root = arena.insert(Node::Pair {
            left: left_root,
            right: right_root,
        });
        Ok(Self { arena, root })
    }

    pub fn root(&self) -> Index {
        self.root
    }

    pub fn get_node(&self, idx: Index) -> Option<&Node> {
        self.arena.get(idx)
    }

    pub(crate) fn node(&self, idx: Index) -> DomainResult<Node> {
        self.arena.get(idx).copied().ok_or(DomainError::DanglingNode)
    }

    pub(crate) fn insert(&mut self, node: Node) -> Index {
        self.arena.insert(node)
    }

    pub(crate) fn replace(&mut self, idx: Index, node: Node) -> DomainResult<()> {
        let slot = self.arena.get_mut(idx).ok_or(DomainError::DanglingNode)?;
        *slot = node;
        Ok(())
    }

    pub(crate) fn remove(&mut self, idx: Index) -> DomainResult<Node> {
        self.arena.remove(idx).ok_or(DomainError::DanglingNode)
    }

    pub(crate) fn set_root(&mut self, idx: Index) {
        self.root = idx;
    }

    /// Number of live nodes in the arena.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Maximum depth, in edges, from the root to any regular number.
    #[instrument(level = "trace", skip(self))]
    pub fn height(&self) -> usize {
        self.height_from(self.root, 0)
    }

    fn height_from(&self, idx: Index, level: usize) -> usize {
        match self.get_node(idx) {
            Some(Node::Pair { left, right }) => self
                .height_from(*left, level + 1)
                .max(self.height_from(*right, level + 1)),
            Some(Node::Regular(_)) | None => level,
        }
    }

    /// Largest regular number anywhere in the tree.
    #[instrument(level = "trace", skip(self))]
    pub fn max_value(&self) -> u64 {
        self.max_value_from(self.root)
    }

    fn max_value_from(&self, idx: Index) -> u64 {
        match self.get_node(idx) {
            Some(Node::Pair { left, right }) => {
                self.max_value_from(*left).max(self.max_value_from(*right))
            }
            Some(Node::Regular(value)) => *value,
            None => 0,
        }
    }

    /// Three times the magnitude of the left element plus twice the right.
    #[instrument(level = "trace", skip(self))]
    pub fn magnitude(&self) -> DomainResult<u64> {
        self.magnitude_from(self.root)
    }

    fn magnitude_from(&self, idx: Index) -> DomainResult<u64> {
        match self.node(idx)? {
            Node::Pair { left, right } => {
                let left = self.magnitude_from(left)?.checked_mul(3);
                let right = self.magnitude_from(right)?.checked_mul(2);
                left.zip(right)
                    .and_then(|(l, r)| l.checked_add(r))
                    .ok_or(DomainError::ValueOverflow {
                        operation: "magnitude",
                    })
            }
            Node::Regular(value) => Ok(value),
        }
    }

    /// Regular numbers in reading order.
    pub fn leaves(&self) -> Vec<u64> {
        let mut leaves = Vec::new();
        let mut stack = vec![self.root];
        while let Some(idx) = stack.pop() {
            match self.get_node(idx) {
                Some(Node::Pair { left, right }) => {
                    // Push right first so the left subtree is read first
                    stack.push(*right);
                    stack.push(*left);
                }
                Some(Node::Regular(value)) => leaves.push(*value),
                None => {}
            }
        }
        leaves
    }

    pub(crate) fn leftmost_regular(&self, mut idx: Index) -> DomainResult<Index> {
        while let Node::Pair { left, .. } = self.node(idx)? {
            idx = left;
        }
        Ok(idx)
    }

    pub(crate) fn rightmost_regular(&self, mut idx: Index) -> DomainResult<Index> {
        while let Node::Pair { right, .. } = self.node(idx)? {
            idx = right;
        }
        Ok(idx)
    }

    pub(crate) fn render_from(&self, idx: Index) -> String {
        Subtree { number: self, idx }.to_string()
    }

    fn write_from(&self, idx: Index, f: &mut impl fmt::Write) -> fmt::Result {
        match self.get_node(idx) {
            Some(Node::Pair { left, right }) => {
                f.write_char('[')?;
                self.write_from(*left, f)?;
                f.write_char(',')?;
                self.write_from(*right, f)?;
                f.write_char(']')
            }
            Some(Node::Regular(value)) => write!(f, "{value}"),
            None => f.write_char('?'),
        }
    }
}

fn insert_literal(arena: &mut Arena<Node>, literal: &Literal) -> Index {
    match literal {
        Literal::Regular(value) => arena.insert(Node::Regular(*value)),
        Literal::Pair(left, right) => {
            let left = insert_literal(arena, left);
            let right = insert_literal(arena, right);
            arena.insert(Node::Pair { left, right })
        }
    }
}

/// Moves every node of `source` into `arena`, returning the new root index.
fn graft(arena: &mut Arena<Node>, mut source: SnailfishNumber) -> DomainResult<Index> {
    let root = source.root;
    graft_from(arena, &mut source, root)
}

fn graft_from(
    arena: &mut Arena<Node>,
    source: &mut SnailfishNumber,
    idx: Index,
) -> DomainResult<Index> {
    match source.remove(idx)? {
        Node::Regular(value) => Ok(arena.insert(Node::Regular(value))),
        Node::Pair { left, right } => {
            let left = graft_from(arena, source, left)?;
            let right = graft_from(arena, source, right)?;
            Ok(arena.insert(Node::Pair { left, right }))
        }
    }
}

/// Borrowed view of one subtree, rendered in literal syntax.
struct Subtree<'a> {
    number: &'a SnailfishNumber,
    idx: Index,
}

impl fmt::Display for Subtree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.number.write_from(self.idx, f)
    }
}

impl fmt::Display for SnailfishNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_from(self.root, f)
    }
}

impl FromStr for SnailfishNumber {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        Ok(Self::from_literal(&s.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(s: &str) -> SnailfishNumber {
        s.parse().expect("valid literal")
    }

    #[test]
    fn given_five_levels_when_measuring_height_then_returns_five() {
        assert_eq!(number("[[[[[9,8],1],2],3],4]").height(), 5);
    }

    #[test]
    fn given_single_pair_when_measuring_height_then_returns_one() {
        assert_eq!(number("[1,4]").height(), 1);
    }

    #[test]
    fn given_regular_root_when_measuring_then_height_is_zero() {
        let n = number("7");
        assert_eq!(n.height(), 0);
        assert_eq!(n.magnitude().unwrap(), 7);
    }

    #[test]
    fn given_number_when_taking_max_value_then_finds_largest_leaf() {
        assert_eq!(number("[[[[[9,8],1],2],3],4]").max_value(), 9);
        assert_eq!(number("[[[[0,7],4],[15,[0,13]]],[1,1]]").max_value(), 15);
    }

    #[test]
    fn given_number_when_rendering_then_matches_input() {
        let text = "[[[[0,7],4],[[7,8],[6,0]]],[8,1]]";
        assert_eq!(number(text).to_string(), text);
    }

    #[test]
    fn given_number_when_listing_leaves_then_reading_order() {
        assert_eq!(number("[[1,[2,3]],[4,5]]").leaves(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn given_two_numbers_when_joining_then_right_nodes_move_over() {
        let joined = SnailfishNumber::join(number("[1,2]"), number("[[3,4],5]")).unwrap();
        assert_eq!(joined.to_string(), "[[1,2],[[3,4],5]]");
        assert_eq!(joined.len(), 9);
        assert_eq!(joined.magnitude().unwrap(), 143);
    }

    #[test]
    fn given_pair_when_walking_to_edges_then_finds_outer_leaves() {
        let n = number("[[1,[2,3]],[4,5]]");
        let first = n.leftmost_regular(n.root()).unwrap();
        let last = n.rightmost_regular(n.root()).unwrap();
        assert_eq!(n.get_node(first), Some(&Node::Regular(1)));
        assert_eq!(n.get_node(last), Some(&Node::Regular(5)));
    }

    #[test]
    fn given_chain_deeper_than_forty_levels_when_measuring_then_overflow_error() {
        let deep = format!("{}1{}", "[".repeat(45), ",0]".repeat(45));
        let n: SnailfishNumber = deep.parse().unwrap();
        assert_eq!(n.height(), 45);
        assert!(matches!(
            n.magnitude(),
            Err(DomainError::ValueOverflow { operation: "magnitude" })
        ));
    }
}
