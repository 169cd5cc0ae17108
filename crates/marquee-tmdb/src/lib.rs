pub mod api;
pub mod client;
pub mod error;
pub mod traits;

pub use client::TmdbClient;
pub use error::TmdbError;
pub use traits::{PageQuery, TitleSource};
