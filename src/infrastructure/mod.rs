pub mod core;
pub mod dataset;
pub mod explorer;
pub mod mock;
pub mod model_store;
pub mod reporter;

pub use explorer::ExplorerFetcher;
pub use mock::MockDocumentFetcher;
