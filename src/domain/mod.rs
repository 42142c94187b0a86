//! Domain layer: snailfish numbers and the reduction rules
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod error;
pub mod homework;
pub mod literal;
pub mod reduce;

pub use arena::{Node, Slot, SnailfishNumber};
pub use error::{DomainError, DomainResult};
pub use homework::{final_sum, largest_pair, LargestPair};
pub use literal::Literal;
pub use reduce::{Reducer, Step, MAX_DEPTH, SPLIT_THRESHOLD};
