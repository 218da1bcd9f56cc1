mod request;

pub use request::{ApiRequest, Parameters, RequestMethod};

use reqwest::Client;

use crate::error::Result;

const USER_AGENT_STRING: &str = concat!("qiita-trends/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP client. No explicit timeout; the transport defaults apply.
pub fn build_client() -> Result<Client> {
    let client = Client::builder().user_agent(USER_AGENT_STRING).build()?;
    Ok(client)
}
