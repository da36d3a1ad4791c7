pub mod catalog;
pub mod classifier;
pub mod cli;
pub mod cookbook;
pub mod kitchen;
pub mod matcher;
pub mod pagination;
pub mod sequence;
pub mod server;
pub mod store;
pub mod taxonomy;
