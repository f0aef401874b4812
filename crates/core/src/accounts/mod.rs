//! Chart-of-accounts classification.
//!
//! Account numbers are classified by an ordered list of numeric ranges, each
//! carrying two type labels and up to three categories. The first range that
//! contains a number wins.

pub mod classifier;
pub mod types;

#[cfg(test)]
mod classifier_props;

pub use classifier::AccountClassifier;
pub use types::{Account, AccountRange};
