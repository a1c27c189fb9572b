//! Named remote operations and their parameter shapes.

use std::fmt;
use std::str::FromStr;

use reqwest::Url;
use crate::error::RequestError;

/// Closed set of remote operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Language metadata (declared, not implemented).
    Info,
    /// Text translation.
    Text,
    /// Speech audio (declared, not implemented).
    Audio,
}

impl Endpoint {
    /// Wire name of the endpoint.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Text => "text",
            Self::Audio => "audio",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Endpoint {
    type Err = RequestError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "info" => Ok(Self::Info),
            "text" => Ok(Self::Text),
            "audio" => Ok(Self::Audio),
            other => Err(RequestError::InvalidOperation(other.to_string())),
        }
    }
}

/// Parameters of a text translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextParams {
    /// Source language code (`auto` allowed).
    pub source: String,
    /// Target language code.
    pub target: String,
    /// Text to translate.
    pub query: String,
}

/// Per-endpoint parameter bundle.
#[derive(Debug, Clone, PartialEq)]
pub enum EndpointParams {
    /// `info`
    Info {
        /// Raw request body.
        body: String,
    },
    /// `text`
    Text(TextParams),
    /// `audio`
    Audio {
        /// Voice language code.
        lang: String,
        /// Text to speak.
        text: String,
        /// Length of `text` in characters.
        text_length: usize,
        /// Playback speed multiplier.
        speed: f64,
    },
}

impl EndpointParams {
    /// Text translation parameters.
    pub fn text(
        source: impl Into<String>,
        target: impl Into<String>,
        query: impl Into<String>,
    ) -> Self {
        Self::Text(TextParams {
            source: source.into(),
            target: target.into(),
            query: query.into(),
        })
    }

    /// Endpoint this bundle belongs to.
    #[must_use]
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Self::Info { .. } => Endpoint::Info,
            Self::Text(_) => Endpoint::Text,
            Self::Audio { .. } => Endpoint::Audio,
        }
    }
}

/// A validated (endpoint, parameters) pair; identical across every retry.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteCall {
    endpoint: Endpoint,
    params: EndpointParams,
}

impl RemoteCall {
    /// Pair `endpoint` with `params`.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidOperation`] when the parameter shape
    /// belongs to a different endpoint.
    pub fn new(endpoint: Endpoint, params: EndpointParams) -> Result<Self, RequestError> {
        if params.endpoint() != endpoint {
            return Err(RequestError::InvalidOperation(format!(
                "{endpoint} called with {} parameters",
                params.endpoint()
            )));
        }
        Ok(Self { endpoint, params })
    }

    /// Resolve the endpoint by name, then pair it with `params`.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidOperation`] for an unknown name or a
    /// mismatched parameter shape.
    pub fn named(name: &str, params: EndpointParams) -> Result<Self, RequestError> {
        Self::new(name.parse()?, params)
    }

    /// Text translation call.
    pub fn text(
        source: impl Into<String>,
        target: impl Into<String>,
        query: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: Endpoint::Text,
            params: EndpointParams::text(source, target, query),
        }
    }

    /// Endpoint of this call.
    #[must_use]
    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    /// Parameters of this call.
    #[must_use]
    pub fn params(&self) -> &EndpointParams {
        &self.params
    }

    /// Outbound URL under `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidOperation`] for endpoints without a
    /// remote implementation, and [`RequestError::InvalidBaseUrl`] when
    /// `base_url` does not parse.
    pub fn url(&self, base_url: &str) -> Result<Url, RequestError> {
        match &self.params {
            EndpointParams::Text(TextParams {
                source,
                target,
                query,
            }) => {
                let base = base_url.trim_end_matches('/');
                Url::parse_with_params(
                    &format!("{base}/m"),
                    [
                        ("sl", source.as_str()),
                        ("tl", target.as_str()),
                        ("q", query.as_str()),
                    ],
                )
                .map_err(|error| RequestError::InvalidBaseUrl {
                    url: base_url.to_string(),
                    reason: error.to_string(),
                })
            }
            EndpointParams::Info { .. } | EndpointParams::Audio { .. } => Err(
                RequestError::InvalidOperation(format!("{} is not supported", self.endpoint)),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_parses_known_names_only() {
        assert_eq!("text".parse::<Endpoint>().unwrap(), Endpoint::Text);
        assert_eq!("audio".parse::<Endpoint>().unwrap(), Endpoint::Audio);
        let err = "translate".parse::<Endpoint>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid endpoint: translate");
    }

    #[test]
    fn mismatched_params_are_rejected() {
        let err = RemoteCall::new(Endpoint::Audio, EndpointParams::text("en", "ja", "hi"))
            .unwrap_err();
        assert!(matches!(err, RequestError::InvalidOperation(_)));
    }

    #[test]
    fn text_url_encodes_query() {
        let call = RemoteCall::text("en", "ja", "hello world & more");
        let url = call.url("https://translate.google.com/").unwrap();
        assert_eq!(url.path(), "/m");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("sl".to_string(), "en".to_string()),
                ("tl".to_string(), "ja".to_string()),
                ("q".to_string(), "hello world & more".to_string()),
            ]
        );
    }

    #[test]
    fn unsupported_endpoints_have_no_url() {
        let call = RemoteCall::named(
            "info",
            EndpointParams::Info {
                body: "{}".to_string(),
            },
        )
        .unwrap();
        assert!(matches!(
            call.url("https://translate.google.com"),
            Err(RequestError::InvalidOperation(_))
        ));
    }

    #[test]
    fn bad_base_url_is_reported() {
        let err = RemoteCall::text("en", "ja", "x").url("not a url").unwrap_err();
        assert!(matches!(err, RequestError::InvalidBaseUrl { .. }));
    }
}
