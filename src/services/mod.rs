mod image_fetcher;

pub use image_fetcher::{ImageFetcher, ImageHandle};
