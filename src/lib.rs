//! Snailfish numbers: pair trees reduced by explode and split.
//!
//! ```
//! use snailfish::domain::SnailfishNumber;
//!
//! let lhs: SnailfishNumber = "[[[[4,3],4],4],[7,[[8,4],9]]]".parse().unwrap();
//! let rhs: SnailfishNumber = "[1,1]".parse().unwrap();
//! let sum = lhs.add(rhs).unwrap();
//! assert_eq!(sum.to_string(), "[[[[0,7],4],[[7,8],[6,0]]],[8,1]]");
//! assert_eq!(sum.magnitude().unwrap(), 1384);
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod tree_traits;
pub mod util;
