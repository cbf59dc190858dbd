pub mod cache;
pub mod error;
pub mod execution;
pub mod importance;
pub mod mempool;
pub mod observers;
