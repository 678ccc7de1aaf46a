pub mod catalog;
pub mod memory;
pub mod models;
pub mod order_repo;
pub mod sequence;
