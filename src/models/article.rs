use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

/// One trending post and its author, as shown in the daily trend list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub likes_count: u64,
    pub is_new: bool,
    pub has_code_block: bool,
    pub author_id: String,
    pub author_image_url: Url,
}

// Wire shape of a trend feed item. Unknown fields are ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrendItem {
    is_new_arrival: bool,
    has_code_block: bool,
    node: TrendNode,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrendNode {
    uuid: String,
    title: String,
    likes_count: u64,
    author: TrendAuthor,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrendAuthor {
    url_name: String,
    profile_image_url: String,
}

impl Article {
    /// Decode a single trend item. Returns `None` if any field is missing,
    /// mistyped, or the profile image is not an absolute URL.
    pub fn from_json(raw: &Value) -> Option<Self> {
        let item = match TrendItem::deserialize(raw) {
            Ok(item) => item,
            Err(e) => {
                tracing::debug!("Dropping trend item: {}", e);
                return None;
            }
        };

        if item.node.uuid.is_empty() {
            tracing::debug!("Dropping trend item with empty uuid");
            return None;
        }

        let author_image_url = match Url::parse(&item.node.author.profile_image_url) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!(
                    "Dropping trend item {}: bad profile image url: {}",
                    item.node.uuid,
                    e
                );
                return None;
            }
        };

        Some(Self {
            id: item.node.uuid,
            title: item.node.title,
            likes_count: item.node.likes_count,
            is_new: item.is_new_arrival,
            has_code_block: item.has_code_block,
            author_id: item.node.author.url_name,
            author_image_url,
        })
    }

    /// Decode every item, keeping the valid ones in their original order.
    pub fn load(list: &[Value]) -> Vec<Self> {
        list.iter().filter_map(Self::from_json).collect()
    }

    /// Like [`Article::load`], but a non-array document counts as empty.
    pub fn load_list(json: &Value) -> Vec<Self> {
        match json.as_array() {
            Some(list) => Self::load(list),
            None => Vec::new(),
        }
    }
}
