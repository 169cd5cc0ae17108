pub mod feed;
pub mod store;
pub mod store_storage;

pub use feed::{QueryKey, TitleFeed};
pub use store::{AppStore, StoreState};
pub use store_storage::StoreStorage;
