mod fetcher;
mod store;

pub use fetcher::TrendFetcher;
pub use store::TrendStore;
