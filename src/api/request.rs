use std::collections::BTreeMap;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::Serialize;
use url::Url;

use crate::config::Config;
use crate::error::{AppError, Result};

/// Request parameters, serialized as the JSON body when non-empty.
pub type Parameters = BTreeMap<String, serde_json::Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl RequestMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMethod::Get => "GET",
            RequestMethod::Post => "POST",
            RequestMethod::Put => "PUT",
            RequestMethod::Delete => "DELETE",
            RequestMethod::Patch => "PATCH",
        }
    }
}

impl From<RequestMethod> for Method {
    fn from(method: RequestMethod) -> Self {
        match method {
            RequestMethod::Get => Method::GET,
            RequestMethod::Post => Method::POST,
            RequestMethod::Put => Method::PUT,
            RequestMethod::Delete => Method::DELETE,
            RequestMethod::Patch => Method::PATCH,
        }
    }
}

/// A fully described HTTP request, independent of any client.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    url: Url,
    method: RequestMethod,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
}

impl ApiRequest {
    /// Build a request for `base_url` + `endpoint_path`.
    ///
    /// The two parts are joined verbatim, so `endpoint_path` is expected to
    /// start with `/` (or be empty). Fails with [`AppError::InvalidUrl`] if the
    /// result is not an absolute URL.
    pub fn build<P: Serialize>(
        base_url: &str,
        endpoint_path: &str,
        method: RequestMethod,
        parameters: &BTreeMap<String, P>,
    ) -> Result<Self> {
        let raw = format!("{}{}", base_url, endpoint_path);
        let url = Url::parse(&raw).map_err(|e| AppError::InvalidUrl(format!("{}: {}", raw, e)))?;
        Ok(Self::new(url, method, parameters))
    }

    /// Request against the configured Qiita API base URL.
    pub fn endpoint(config: &Config, endpoint_path: &str, method: RequestMethod) -> Result<Self> {
        Self::build(&config.api_base_url, endpoint_path, method, &Parameters::new())
    }

    pub fn new<P: Serialize>(url: Url, method: RequestMethod, parameters: &BTreeMap<String, P>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        // A body that fails to serialize is dropped; the request still goes out.
        let body = if parameters.is_empty() {
            None
        } else {
            match serde_json::to_vec(parameters) {
                Ok(data) => Some(data),
                Err(e) => {
                    tracing::warn!("Failed to serialize parameters for {}: {}", url, e);
                    None
                }
            }
        };

        Self {
            url,
            method,
            headers,
            body,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn method(&self) -> RequestMethod {
        self.method
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    pub fn to_reqwest(&self, client: &Client) -> reqwest::RequestBuilder {
        let builder = client
            .request(self.method.into(), self.url.clone())
            .headers(self.headers.clone());

        match &self.body {
            Some(body) => builder.body(body.clone()),
            None => builder,
        }
    }
}
