pub mod service;
pub mod store;

pub use service::ResourceService;
pub use store::ResourceStore;
