pub mod cache;
pub mod call;
pub mod chain;
pub mod recovery;
