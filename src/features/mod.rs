//! Newsletter collection and digest generation

pub mod collect;
pub mod summarize;

pub use collect::fetch_newsletters;
pub use summarize::summarize_newsletters;
