//! Request/response messages exchanged with the extraction trigger.
//!
//! The trigger sends `{"action": "extractContent", "notionMode": bool}` and
//! gets back `{"data": markdown}` or `{"error": message}`.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::document::Document;
use crate::options::ExtractOptions;
use crate::service::Extractor;
use crate::{PagemarkError, Result};

/// A message from the trigger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum Request {
    #[serde(rename = "extractContent", rename_all = "camelCase")]
    ExtractContent {
        /// Strip LaTeX delimiters for destinations that cannot render them
        #[serde(default)]
        notion_mode: bool,
    },
}

impl Request {
    /// Decode a JSON message. Unknown actions are an error.
    pub fn from_json(message: &str) -> Result<Self> {
        if message.trim().is_empty() {
            return Err(PagemarkError::InvalidInput("empty message".to_string()));
        }
        Ok(serde_json::from_str(message)?)
    }
}

/// The reply sent back to the trigger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Data { data: String },
    Error { error: String },
}

impl Response {
    pub fn data(data: impl Into<String>) -> Self {
        Response::Data { data: data.into() }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Response::Error {
            error: error.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error { .. })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Answer one trigger message against the current document.
///
/// Every failure becomes an error response; nothing is raised to the caller.
pub fn handle(message: &str, document: Option<&Document>, options: &ExtractOptions) -> Response {
    let request = match Request::from_json(message) {
        Ok(request) => request,
        Err(err) => {
            warn!(%err, "rejected trigger message");
            return Response::error(err.to_string());
        }
    };

    let Some(document) = document else {
        warn!("no active document");
        return Response::error("no active document");
    };

    match request {
        Request::ExtractContent { notion_mode } => {
            let options = ExtractOptions {
                compact: notion_mode,
                ..options.clone()
            };
            Response::data(Extractor::with_options(options).extract(document))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;

    fn document() -> Document {
        let body = Node::element("body").with_child(
            Node::element("article").with_child(
                Node::element("p")
                    .with_child(Node::text("The value "))
                    .with_child(Node::text("$x_{i}$ is small enough")),
            ),
        );
        Document::new(Node::element("html").with_child(body), None)
    }

    #[test]
    fn test_decode_request() {
        assert_eq!(
            Request::from_json(r#"{"action":"extractContent","notionMode":true}"#).unwrap(),
            Request::ExtractContent { notion_mode: true }
        );
        assert_eq!(
            Request::from_json(r#"{"action":"extractContent"}"#).unwrap(),
            Request::ExtractContent { notion_mode: false }
        );
        assert!(Request::from_json(r#"{"action":"copyPage"}"#).is_err());
        assert!(Request::from_json("not json").is_err());
        assert!(matches!(Request::from_json("  "), Err(PagemarkError::InvalidInput(_))));
    }

    #[test]
    fn test_response_json_shape() {
        assert_eq!(Response::data("# Hi").to_json().unwrap(), r##"{"data":"# Hi"}"##);
        assert_eq!(Response::error("boom").to_json().unwrap(), r#"{"error":"boom"}"#);
    }

    #[test]
    fn test_handle_extracts_in_both_modes() {
        let options = ExtractOptions::default();
        let document = document();

        let delimited = handle(r#"{"action":"extractContent","notionMode":false}"#, Some(&document), &options);
        assert_eq!(delimited, Response::data("The value $x_{i}$ is small enough"));

        let compact = handle(r#"{"action":"extractContent","notionMode":true}"#, Some(&document), &options);
        assert_eq!(compact, Response::data("The value x_{i} is small enough"));
    }

    #[test]
    fn test_handle_errors() {
        let options = ExtractOptions::default();
        assert!(handle(r#"{"action":"extractContent"}"#, None, &options).is_error());
        assert!(handle(r#"{"action":"other"}"#, Some(&document()), &options).is_error());
    }
}
