use crate::error::ErrorReport;
use askama::Template;

/// The single HTML page served by the frontend.
///
/// At most one of `result` and `error` is set; the constructors are the only
/// way to build one.
#[derive(Template, Debug)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub prompt: String,
    result: Option<String>,
    error: Option<ErrorReport>,
}

impl IndexPage {
    pub fn empty() -> Self {
        Self {
            prompt: String::new(),
            result: None,
            error: None,
        }
    }

    pub fn with_result(prompt: String, result: String) -> Self {
        Self {
            prompt,
            result: Some(result),
            error: None,
        }
    }

    pub fn with_error(prompt: String, error: ErrorReport) -> Self {
        Self {
            prompt,
            result: None,
            error: Some(error),
        }
    }
}
