pub mod config;
pub mod error;
pub mod search;
pub mod storage;
pub mod utils;

pub use error::{Result, SearchError};
pub use search::SearchEngine;
