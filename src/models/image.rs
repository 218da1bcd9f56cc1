use std::sync::Arc;

/// Progress of a single author image download.
///
/// A fetch starts `Pending` and moves to `Loaded` at most once. A failed
/// fetch never leaves `Pending`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImageFetchState {
    #[default]
    Pending,
    Loaded(Arc<[u8]>),
}

impl ImageFetchState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, ImageFetchState::Loaded(_))
    }

    pub fn bytes(&self) -> Option<&Arc<[u8]>> {
        match self {
            ImageFetchState::Pending => None,
            ImageFetchState::Loaded(bytes) => Some(bytes),
        }
    }
}
