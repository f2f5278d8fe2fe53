pub mod builder;
pub mod error;
pub mod store;

pub use builder::ChatStoreBuilder;
pub use error::StoreError;
pub use store::ChatStore;
