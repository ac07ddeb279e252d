//! Rule compilation and the match guards the rule pipeline relies on.
//!
//! `compiler` turns rule records into compiled regexes once per rule set.
//! `guards` holds the checks that the `regex` crate cannot express inside a
//! pattern, such as refusing a match that is followed by a given suffix.

pub mod compiler;
pub mod guards;
