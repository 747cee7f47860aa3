pub mod chains;
pub mod quotes;
