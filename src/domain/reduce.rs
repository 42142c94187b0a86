//! Reduction engine: explode, split, and addition.
//!
//! Traversals use an explicit stack and push the right child before the
//! left one, so nodes are popped in reading order. Neighbour and parent
//! links exist only on the stack, never in the tree.

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::arena::{Node, Slot, SnailfishNumber};
use crate::domain::error::{DomainError, DomainResult};

/// Deepest level (root = 0) at which a regular number may sit after reduction.
pub const MAX_DEPTH: usize = 4;

/// Largest regular number allowed after reduction.
pub const SPLIT_THRESHOLD: u64 = 9;

/// A single rewrite applied by [`SnailfishNumber::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Explode,
    Split,
}

/// One pending node of the explode traversal.
#[derive(Debug)]
struct Visit {
    idx: Index,
    /// Subtree immediately to the left of this node, if any
    left_neighbor: Option<Index>,
    /// Subtree immediately to the right of this node, if any
    right_neighbor: Option<Index>,
    parent: Option<(Index, Slot)>,
    level: usize,
}

impl SnailfishNumber {
    pub fn needs_reduction(&self) -> bool {
        self.height() > MAX_DEPTH || self.max_value() > SPLIT_THRESHOLD
    }

    /// Explodes the leftmost pair nested inside four pairs.
    ///
    /// Returns `Ok(false)` if no such pair exists. A qualifying pair whose
    /// children are not both regular numbers cannot be exploded and yields
    /// [`DomainError::MalformedDepth`].
    #[instrument(level = "debug", skip(self))]
    pub fn explode(&mut self) -> DomainResult<bool> {
        let mut stack = vec![Visit {
            idx: self.root(),
            left_neighbor: None,
            right_neighbor: None,
            parent: None,
            level: 0,
        }];

        while let Some(visit) = stack.pop() {
            let Node::Pair { left, right } = self.node(visit.idx)? else {
                continue;
            };

            if visit.level < MAX_DEPTH {
                stack.push(Visit {
                    idx: right,
                    left_neighbor: Some(left),
                    right_neighbor: visit.right_neighbor,
                    parent: Some((visit.idx, Slot::Right)),
                    level: visit.level + 1,
                });
                stack.push(Visit {
                    idx: left,
                    left_neighbor: visit.left_neighbor,
                    right_neighbor: Some(right),
                    parent: Some((visit.idx, Slot::Left)),
                    level: visit.level + 1,
                });
                continue;
            }

            let (Node::Regular(left_value), Node::Regular(right_value)) =
                (self.node(left)?, self.node(right)?)
            else {
                return Err(DomainError::MalformedDepth {
                    depth: visit.level,
                    pair: self.render_from(visit.idx),
                });
            };

            self.explode_at(&visit, left_value, right_value)?;
            self.remove(left)?;
            self.remove(right)?;
            self.remove(visit.idx)?;
            debug!("exploded [{},{}]: {}", left_value, right_value, self);
            return Ok(true);
        }

        Ok(false)
    }

    fn explode_at(&mut self, visit: &Visit, left_value: u64, right_value: u64) -> DomainResult<()> {
        if let Some(neighbor) = visit.left_neighbor {
            let target = self.rightmost_regular(neighbor)?;
            self.add_to_regular(target, left_value)?;
        }
        if let Some(neighbor) = visit.right_neighbor {
            let target = self.leftmost_regular(neighbor)?;
            self.add_to_regular(target, right_value)?;
        }

        let zero = self.insert(Node::Regular(0));
        match visit.parent {
            Some((parent, slot)) => {
                let Node::Pair { left, right } = self.node(parent)? else {
                    return Err(DomainError::DanglingNode);
                };
                let pair = match slot {
                    Slot::Left => Node::Pair { left: zero, right },
                    Slot::Right => Node::Pair { left, right: zero },
                };
                self.replace(parent, pair)
            }
            None => {
                self.set_root(zero);
                Ok(())
            }
        }
    }

    fn add_to_regular(&mut self, idx: Index, amount: u64) -> DomainResult<()> {
        match self.node(idx)? {
            Node::Regular(value) => {
                let sum = value
                    .checked_add(amount)
                    .ok_or(DomainError::ValueOverflow { operation: "explode" })?;
                self.replace(idx, Node::Regular(sum))
            }
            Node::Pair { .. } => Err(DomainError::DanglingNode),
        }
    }

    /// Splits the first regular number, in reading order, greater than 9.
    ///
    /// Returns `Ok(false)` if every regular number is small enough.
    #[instrument(level = "debug", skip(self))]
    pub fn split(&mut self) -> DomainResult<bool> {
        let mut stack = vec![self.root()];

        while let Some(idx) = stack.pop() {
            match self.node(idx)? {
                Node::Pair { left, right } => {
                    stack.push(right);
                    stack.push(left);
                }
                Node::Regular(value) if value > SPLIT_THRESHOLD => {
                    self.split_at(idx)?;
                    debug!("split {}: {}", value, self);
                    return Ok(true);
                }
                Node::Regular(_) => {}
            }
        }

        Ok(false)
    }

    /// Turns the regular number at `idx` into `[floor(v/2), ceil(v/2)]` in place.
    pub fn split_at(&mut self, idx: Index) -> DomainResult<()> {
        let value = match self.node(idx)? {
            Node::Regular(value) => value,
            Node::Pair { .. } => {
                return Err(DomainError::InvalidSplitTarget(self.render_from(idx)));
            }
        };
        let left = self.insert(Node::Regular(value / 2));
        let right = self.insert(Node::Regular(value / 2 + value % 2));
        self.replace(idx, Node::Pair { left, right })
    }

    /// Applies exactly one rewrite. Explode always wins over split.
    pub fn step(&mut self) -> DomainResult<Option<Step>> {
        if self.height() > MAX_DEPTH {
            let applied = self.explode()?;
            return applied_step(Step::Explode, applied);
        }
        if self.max_value() > SPLIT_THRESHOLD {
            let applied = self.split()?;
            return applied_step(Step::Split, applied);
        }
        Ok(None)
    }

    /// Rewrites until no rule applies; returns the number of steps taken.
    pub fn reduce(&mut self) -> DomainResult<usize> {
        Reducer::default().reduce(self)
    }

    /// Adds two numbers: pairs them under a new root, then reduces.
    ///
    /// Both operands are consumed.
    pub fn add(self, rhs: SnailfishNumber) -> DomainResult<SnailfishNumber> {
        Reducer::default().add(self, rhs)
    }
}

/// A due rule that changed nothing means the measures and the traversal disagree.
fn applied_step(rule: Step, applied: bool) -> DomainResult<Option<Step>> {
    if applied {
        Ok(Some(rule))
    } else {
        Err(DomainError::RuleNotApplied { rule })
    }
}

/// Drives the reduction loop, optionally bounded by a step limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reducer {
    step_limit: Option<usize>,
}

impl Reducer {
    pub fn new(step_limit: Option<usize>) -> Self {
        Self { step_limit }
    }

    #[instrument(level = "debug", skip(self, number), fields(input = %number))]
    pub fn reduce(&self, number: &mut SnailfishNumber) -> DomainResult<usize> {
        let mut steps = 0;
        while number.needs_reduction() {
            if let Some(limit) = self.step_limit {
                if steps >= limit {
                    return Err(DomainError::StepLimitExceeded { limit });
                }
            }
            match number.step()? {
                Some(step) => {
                    steps += 1;
                    trace!("step {}: {:?}", steps, step);
                }
                None => break,
            }
        }
        debug!("reduced in {} steps: {}", steps, number);
        Ok(steps)
    }

    #[instrument(level = "debug", skip(self, lhs, rhs))]
    pub fn add(&self, lhs: SnailfishNumber, rhs: SnailfishNumber) -> DomainResult<SnailfishNumber> {
        let mut sum = SnailfishNumber::join(lhs, rhs)?;
        self.reduce(&mut sum)?;
        Ok(sum)
    }
}
