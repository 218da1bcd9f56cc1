mod article;
mod image;

pub use article::Article;
pub use image::ImageFetchState;
