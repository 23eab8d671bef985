//! Memoized selectors.

pub mod memo;

pub use memo::{DEFAULT_MEMO_CAPACITY, MemoCache, MemoStats};
