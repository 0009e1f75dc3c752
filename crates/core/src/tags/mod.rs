//! Product tagging by occasion and recipient.
//!
//! # Responsibilities
//!
//! - Hold the fixed tag vocabulary and the keyword tables that map text to it.
//! - Match free-text chat messages and search queries against the tables.
//! - Infer tags from a product name and merge them with explicit tags.
//!
//! # Module invariants
//!
//! - Auto-derived occasion tags are never empty (`no_reason` is the default).
//! - Auto-derived recipient tags always contain `universal`.
//! - Output lists never contain duplicates.

pub mod classifier;
pub mod resolver;
pub mod rules;
pub mod vocabulary;

pub use classifier::{auto_tag_from_name, fired_rules, is_flower_topic, match_free_text};
pub use resolver::resolve_product_tags;
pub use vocabulary::{Occasion, Recipient};
