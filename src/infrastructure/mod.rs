pub mod error;
pub mod export;
pub mod snapshot;
pub mod storage;
