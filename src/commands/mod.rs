pub mod edit;
pub mod lang;
pub mod list;
pub mod org;
pub mod show;
pub mod sync;
