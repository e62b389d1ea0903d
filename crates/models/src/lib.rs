pub mod errors;
pub mod resource;
