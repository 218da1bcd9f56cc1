//! Daily trending Qiita articles and their author images.
//!
//! [`TrendFetcher`] pulls the trend feed and decodes it into [`Article`]s,
//! [`TrendStore`] holds the latest list for views to observe, and
//! [`ImageFetcher`] downloads author images in the background.

pub mod api;
pub mod config;
pub mod error;
pub mod feed;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
pub use feed::{TrendFetcher, TrendStore};
pub use models::{Article, ImageFetchState};
pub use services::{ImageFetcher, ImageHandle};
