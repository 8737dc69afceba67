use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum FieldError {
    #[error("invalid color '{0}', expected #rrggbb")]
    InvalidColor(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("no global window available")]
    NoWindow,

    #[error("javascript error: {0}")]
    Js(String),
}

impl FieldError {
    pub fn js(value: JsValue) -> FieldError {
        FieldError::Js(
            value
                .as_string()
                .unwrap_or_else(|| format!("{:?}", value)),
        )
    }
}

impl From<FieldError> for JsValue {
    fn from(err: FieldError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}
