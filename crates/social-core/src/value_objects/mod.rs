//! Value objects - immutable types that represent domain concepts

mod reaction_counts;
mod reaction_type;
mod snowflake;
mod subject;

pub use reaction_counts::ReactionCounts;
pub use reaction_type::ReactionType;
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
pub use subject::{Subject, SubjectKind, Viewer};
