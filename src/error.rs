use thiserror::Error;
use wasm_bindgen::{JsError, JsValue};

#[derive(Debug, Error)]
pub enum Error {
    #[error("no global `window` exists")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("failed to read config: {0}")]
    ConfigDecode(String),
    #[error("failed to write config: {0}")]
    ConfigEncode(String),
    #[error("{context}: {message}")]
    Dom {
        context: &'static str,
        message: String,
    },
}

impl Error {
    // Wrap a rejected DOM call, keeping whatever the browser reported
    pub fn dom(context: &'static str, value: JsValue) -> Error {
        let message = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        Error::Dom { context, message }
    }
}

impl From<Error> for JsValue {
    fn from(err: Error) -> JsValue {
        JsError::new(&err.to_string()).into()
    }
}
