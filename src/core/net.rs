// src/core/net.rs
// Blocking HTTP GET behind a small trait so the localizer can run offline in tests.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::redirect::Policy;

use crate::config::consts::{MAX_REDIRECTS, REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::error::{Error, Result};

/// A fetched page. `final_url` is where redirects ended up.
#[derive(Clone, Debug)]
pub struct Page {
    pub final_url: String,
    pub body: String,
}

pub trait PageSource {
    fn get(&self, url: &str) -> Result<Page>;
}

pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .redirect(Policy::limited(MAX_REDIRECTS))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

impl PageSource for HttpClient {
    fn get(&self, url: &str) -> Result<Page> {
        let resp = self
            .client
            .get(url)
            .header("accept", "text/html,application/xhtml+xml,application/xml;q=0.9")
            .header("accept-language", "en-US,en;q=0.9")
            .send()?;

        let final_url = resp.url().to_string();
        let status = resp.status();
        // not-found pages come back as a redirect to a notFound URL, which
        // the caller checks; anything else non-2xx is an error here
        if !status.is_success() && !final_url.contains(crate::config::consts::NOT_FOUND_MARKER) {
            return Err(Error::Status { url: s!(url), status: status.as_u16() });
        }

        let body = resp.text()?;
        Ok(Page { final_url, body })
    }
}
