// Error taxonomy for the wiki client. Every library operation returns
// `Result<T>`; the binary wraps these in `anyhow` at the top level.

use thiserror::Error;

/// Errors produced while talking to a TiddlyWiki server.
#[derive(Debug, Error)]
pub enum Error {
    /// The request could not be sent, the connection failed, or the
    /// response body could not be read.
    #[error("transport error")]
    Transport(#[source] reqwest::Error),

    /// The response body was not the JSON shape we expected.
    #[error("could not decode server response")]
    Decode(#[source] serde_json::Error),

    /// A local tiddler could not be serialized.
    #[error("could not encode tiddler")]
    Encode(#[source] serde_json::Error),

    /// Only produced when the client runs with strict status checking.
    #[error("{method} {url} returned unexpected status {status}")]
    UnexpectedStatus {
        method: String,
        url: String,
        status: u16,
    },

    #[error("tiddler has no title")]
    MissingTitle,

    #[error("invalid server url `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unexpected_status_names_the_request() {
        let err = Error::UnexpectedStatus {
            method: "PUT".into(),
            url: "http://wiki/recipes/default/tiddlers/x".into(),
            status: 409,
        };
        assert_eq!(
            err.to_string(),
            "PUT http://wiki/recipes/default/tiddlers/x returned unexpected status 409"
        );
    }

    #[test]
    fn decode_error_keeps_source() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let detail = json_err.to_string();
        let err = Error::Decode(json_err);
        assert_eq!(err.to_string(), "could not decode server response");
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), detail);
    }
}
