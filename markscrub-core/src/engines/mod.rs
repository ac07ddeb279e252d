//! Concrete rewriting engines and the passes they are built from.
//!
//! * `pipeline` applies an ordered rule list to a document.
//! * `normalizer` cleans up whitespace and emptied elements afterwards.
//! * `sanitize_engine` composes the two behind the `Rewriter` trait.
//! * `quote_scan` splits a document into quoted spans and the text between them.
//! * `translator` applies a dictionary inside quoted spans only.

pub mod normalizer;
pub mod pipeline;
pub mod quote_scan;
pub mod sanitize_engine;
pub mod translator;
