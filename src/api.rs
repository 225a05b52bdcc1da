// API client module: a small blocking HTTP client that talks to a
// TiddlyWiki server through its TiddlyWeb-style REST endpoints. Each
// operation is one synchronous request/response, except `append` which
// is a fetch followed by a write.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::tiddler::Tiddler;
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{StatusCode, Url};
use serde_json::Value;
use tracing::{debug, warn};

const JSON: &str = "application/json";
const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Handle on one wiki server: the parsed base URL plus a reusable
/// reqwest blocking client.
#[derive(Clone, Debug)]
pub struct WikiClient {
    client: Client,
    base_url: Url,
    strict: bool,
}

impl WikiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder().build().map_err(Error::Transport)?;
        Ok(WikiClient {
            client,
            base_url: config.base_url().clone(),
            strict: config.is_strict(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full URL for an endpoint path. Names are inserted as-is; reqwest
    /// percent-encodes what the URL parser requires (spaces and such).
    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// Fetch a single tiddler by title.
    ///
    /// The status code is not checked before decoding unless the client
    /// is strict, so a missing tiddler usually surfaces as a decode error.
    pub fn fetch(&self, name: &str) -> Result<Tiddler> {
        let url = self.endpoint(&format!("/recipes/default/tiddlers/{}", name));
        let res = self.send_get(&url)?;
        let body = res.text().map_err(Error::Transport)?;
        Tiddler::from_json(&body)
    }

    /// Fetch the summary listing of every tiddler.
    ///
    /// Each element of the listing is decoded on its own, so keys outside
    /// the tiddler shape are dropped and missing ones stay empty. One bad
    /// element fails the whole listing.
    pub fn fetch_all(&self) -> Result<Vec<Tiddler>> {
        let url = self.endpoint("/recipes/default/tiddlers.json");
        let res = self.send_get(&url)?;
        let body = res.text().map_err(Error::Transport)?;

        let listing: Vec<Value> = serde_json::from_str(&body).map_err(Error::Decode)?;
        listing
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                serde_json::from_value::<Tiddler>(value).map_err(|e| {
                    warn!(index, error = %e, "could not decode tiddler in listing");
                    Error::Decode(e)
                })
            })
            .collect()
    }

    /// Create or replace a tiddler under its title.
    ///
    /// Anything other than 204 is logged and, unless strict, still
    /// reported as success.
    pub fn create(&self, tiddler: &Tiddler) -> Result<()> {
        if tiddler.title.is_empty() {
            return Err(Error::MissingTitle);
        }
        let body = tiddler.try_to_json()?;
        let url = self.endpoint(&format!("/recipes/default/tiddlers/{}", tiddler.title));

        let res = self
            .client
            .put(&url)
            .header(CONTENT_TYPE, JSON_UTF8)
            .body(body)
            .send()
            .map_err(Error::Transport)?;
        debug!(method = "PUT", %url, status = res.status().as_u16(), "request finished");

        self.expect_status("PUT", &url, &res, StatusCode::NO_CONTENT)
    }

    /// Append `text` to an existing tiddler, separated by a blank line.
    ///
    /// Not atomic: a write landing between the fetch and the put is lost.
    pub fn append(&self, name: &str, text: &str) -> Result<()> {
        let mut tiddler = self.fetch(name)?;
        tiddler.append_text(text);
        self.create(&tiddler)
    }

    /// Delete a tiddler from the default bag.
    pub fn delete(&self, name: &str) -> Result<()> {
        let url = self.endpoint(&format!("/bags/default/tiddlers/{}", name));
        let res = self.client.delete(&url).send().map_err(Error::Transport)?;
        debug!(method = "DELETE", %url, status = res.status().as_u16(), "request finished");

        self.expect_status("DELETE", &url, &res, StatusCode::NO_CONTENT)?;
        // Drain the body so the connection can be reused.
        res.bytes().map_err(Error::Transport)?;
        Ok(())
    }

    fn send_get(&self, url: &str) -> Result<Response> {
        let res = self
            .client
            .get(url)
            .header(ACCEPT, JSON)
            .send()
            .map_err(Error::Transport)?;
        debug!(method = "GET", %url, status = res.status().as_u16(), "request finished");
        if self.strict {
            self.expect_status("GET", url, &res, StatusCode::OK)?;
        }
        Ok(res)
    }

    /// Compare the response status with `expected`. A mismatch is always
    /// logged; it only becomes an error in strict mode.
    fn expect_status(
        &self,
        method: &str,
        url: &str,
        res: &Response,
        expected: StatusCode,
    ) -> Result<()> {
        let status = res.status();
        if status == expected {
            return Ok(());
        }
        warn!(method, %url, status = status.as_u16(), expected = expected.as_u16(), "unexpected status");
        if self.strict {
            return Err(Error::UnexpectedStatus {
                method: method.to_string(),
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}
