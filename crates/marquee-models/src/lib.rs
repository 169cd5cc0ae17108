pub mod filters;
pub mod media;
pub mod page;
pub mod watchlist;

pub use filters::{current_year, BrowseMode, FilterState, DEFAULT_START_YEAR};
pub use media::{CastMember, Genre, MediaType, Person, ProductionCompany, Title, TitleDetails};
pub use page::PageResult;
pub use watchlist::WatchlistEntry;
