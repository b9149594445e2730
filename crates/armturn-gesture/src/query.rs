//! Query responder - text commands from the messaging bridge
//!
//! Vocabulary is a single keyword. The reply is `kinect:True` or
//! `kinect:False`; anything else gets a fixed diagnostic.

use std::fmt;

use tracing::debug;

use crate::GestureStateStore;

/// The one recognized command
pub const QUERY_KEYWORD: &str = "kinect";

/// Prefix of a detection reply
pub const RESPONSE_PREFIX: &str = "kinect";

/// Plain-text reply to an unrecognized command
pub const UNRECOGNIZED_TEXT: &str =
    "ERROR: I am a simple bot. I do not understand the request. Try writing and sending \"kinect\"";

/// Rich-text reply to an unrecognized command
pub const UNRECOGNIZED_XHTML: &str =
    "<p><i>ERROR:</i> <strong>I do not understand the request:</strong> Try: \"kinect\"</p>";

/// Parsed form of an incoming message body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureQuery {
    /// Read the current detection result
    Detection,
    Unrecognized,
}

impl GestureQuery {
    /// Exact, case-sensitive match against the keyword
    pub fn parse(body: &str) -> Self {
        if body == QUERY_KEYWORD {
            GestureQuery::Detection
        } else {
            GestureQuery::Unrecognized
        }
    }
}

/// Reply to send back through the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureResponse {
    Detection(bool),
    Unrecognized,
}

impl GestureResponse {
    /// Message body
    pub fn body(&self) -> String {
        self.to_string()
    }

    /// Optional rich-text rendering for bridges that support it
    pub fn xhtml(&self) -> Option<&'static str> {
        match self {
            GestureResponse::Detection(_) => None,
            GestureResponse::Unrecognized => Some(UNRECOGNIZED_XHTML),
        }
    }

    pub fn is_recognized(&self) -> bool {
        matches!(self, GestureResponse::Detection(_))
    }
}

impl fmt::Display for GestureResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestureResponse::Detection(detected) => {
                let text = if *detected { "True" } else { "False" };
                write!(f, "{}:{}", RESPONSE_PREFIX, text)
            }
            GestureResponse::Unrecognized => f.write_str(UNRECOGNIZED_TEXT),
        }
    }
}

/// Answers bridge commands from the gesture state store
#[derive(Debug, Clone)]
pub struct QueryResponder {
    store: GestureStateStore,
}

impl QueryResponder {
    pub fn new(store: GestureStateStore) -> Self {
        Self { store }
    }

    /// Answer a parsed query
    pub fn answer(&self, query: GestureQuery) -> GestureResponse {
        match query {
            GestureQuery::Detection => GestureResponse::Detection(self.store.get()),
            GestureQuery::Unrecognized => GestureResponse::Unrecognized,
        }
    }

    /// Answer a raw message body. Anything but the exact keyword,
    /// including an empty body, gets the diagnostic.
    pub fn respond(&self, body: &str) -> GestureResponse {
        let response = self.answer(GestureQuery::parse(body));
        debug!(body, recognized = response.is_recognized(), "Answered query");
        response
    }
}
