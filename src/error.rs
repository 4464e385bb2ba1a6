// Error type shared by the components. Missing page elements are not errors,
// components just skip themselves; this covers the things that really went wrong.

use std::fmt;
use wasm_bindgen::JsValue;

#[derive(Debug)]
pub enum SiteError {
    /// A browser global (`window`, `document`) was not available.
    MissingGlobal(&'static str),
    /// A browser API threw; carries the stringified exception.
    Js(String),
    /// The JSON configuration handed to `start` could not be parsed.
    Config(serde_json::Error),
    /// The contact payload could not be serialized.
    Payload(serde_json::Error),
}

impl fmt::Display for SiteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteError::MissingGlobal(name) => {
                write!(f, "browser global `{}` is not available", name)
            }
            SiteError::Js(msg) => write!(f, "javascript error: {}", msg),
            SiteError::Config(e) => write!(f, "invalid site configuration: {}", e),
            SiteError::Payload(e) => write!(f, "failed to serialize contact payload: {}", e),
        }
    }
}

impl std::error::Error for SiteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SiteError::Config(e) | SiteError::Payload(e) => Some(e),
            _ => None,
        }
    }
}

impl From<JsValue> for SiteError {
    fn from(value: JsValue) -> Self {
        let msg = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        SiteError::Js(msg)
    }
}

impl From<SiteError> for JsValue {
    fn from(err: SiteError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;
