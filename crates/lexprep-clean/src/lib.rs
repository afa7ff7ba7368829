//! Text normalization for extracted contract text.
//!
//! ```rust
//! use lexprep_clean::clean;
//!
//! let cleaned = clean("CONFIDENTIAL\nThe Parties agree:\nPage 1 of 4\n");
//! assert_eq!(cleaned, "The Parties agree:");
//! ```

pub mod cleaner;

pub use cleaner::{clean, CleanOptions, TextCleaner};
