pub mod complete;
pub mod derive;
pub mod query;
pub mod rule;
