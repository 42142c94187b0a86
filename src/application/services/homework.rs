//! Homework service
//!
//! Loads a file of snailfish numbers, one per line, and computes the final
//! sum and the largest pairwise magnitude.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{self, LargestPair, Literal, Reducer, SnailfishNumber};
use crate::infrastructure::traits::FileSystem;

/// Both homework answers for one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Rendered final sum
    pub sum: String,
    /// Magnitude of the final sum (task 1)
    pub magnitude: u64,
    /// Best ordered pair (task 2), None for a single-number input
    pub largest: Option<LargestPair>,
}

/// Service for running the homework over input files.
pub struct HomeworkService {
    fs: Arc<dyn FileSystem>,
    reducer: Reducer,
}

impl HomeworkService {
    /// Create a new homework service.
    pub fn new(fs: Arc<dyn FileSystem>, reducer: Reducer) -> Self {
        Self { fs, reducer }
    }

    pub fn reducer(&self) -> &Reducer {
        &self.reducer
    }

    /// Parse every non-blank line of `path` as a snailfish literal.
    pub fn load(&self, path: &Path) -> ApplicationResult<Vec<Literal>> {
        debug!("load: path={}", path.display());
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read input", path)?;

        let literals = content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                line.parse::<Literal>()
                    .map_err(|source| ApplicationError::InvalidInput {
                        path: path.to_path_buf(),
                        line: i + 1,
                        source,
                    })
            })
            .collect::<ApplicationResult<Vec<_>>>()?;

        info!("loaded {} numbers from {}", literals.len(), path.display());
        Ok(literals)
    }

    /// Task 1: add all numbers in order.
    pub fn final_sum(&self, path: &Path) -> ApplicationResult<SnailfishNumber> {
        let literals = self.load(path)?;
        Ok(domain::final_sum(&literals, &self.reducer)?)
    }

    /// Task 2: best ordered pair of distinct numbers.
    pub fn largest_pair(&self, path: &Path) -> ApplicationResult<LargestPair> {
        let literals = self.load(path)?;
        Ok(domain::largest_pair(&literals, &self.reducer)?)
    }

    /// Both tasks from a single read of the input.
    pub fn solve(&self, path: &Path) -> ApplicationResult<Report> {
        let literals = self.load(path)?;
        let sum = domain::final_sum(&literals, &self.reducer)?;
        let largest = if literals.len() > 1 {
            Some(domain::largest_pair(&literals, &self.reducer)?)
        } else {
            None
        };

        Ok(Report {
            sum: sum.to_string(),
            magnitude: sum.magnitude()?,
            largest,
        })
    }
}
