//! Ratcliff/Obershelp "gestalt" pattern matching on arbitrary sequences.
//!
//! The matcher finds the longest contiguous run shared by two sequences, then
//! repeats the search on the pieces to the left and to the right of it. The sum
//! of all runs gives the similarity ratio `2 * M / (|a| + |b|)`.
//!
//! [`match_sequences`] is the entry point most callers want: it returns the
//! ratio together with the matching blocks and is symmetric in its arguments.
//! [`SequenceMatcher`] exposes the orientation-dependent primitives.
#![deny(missing_docs)]

pub mod block;
pub mod gestalt;
pub mod matcher;

pub use block::MatchingBlock;
pub use gestalt::{match_sequences, ratio, Match};
pub use matcher::SequenceMatcher;
