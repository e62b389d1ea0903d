pub mod env;
pub mod pagination;
pub mod types;
pub mod utils;
