//! Entity to model mappers
//!
//! - `From<Model> for Entity` where every column maps losslessly
//! - `TryFrom<Model>` where a column holds an enum stored as text

mod comment;
mod post;
mod reaction;
mod user;

pub use reaction::{counts_by_subject, parse_reaction_type};
