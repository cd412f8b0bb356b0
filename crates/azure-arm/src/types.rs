//! Shared wire types

use serde::{Deserialize, Serialize};

/// One page of an ARM list response.
///
/// ARM list operations return `{"value": [...], "nextLink": "..."}` where
/// `nextLink` is an opaque continuation URL. Its absence marks the final
/// page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page, in API order
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,

    /// Continuation token; `None` means no further pages exist
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_link: Option<String>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Page {
            value: Vec::new(),
            next_link: None,
        }
    }
}

impl<T> Page<T> {
    /// A page with items and no continuation token
    pub fn of(value: Vec<T>) -> Self {
        Page {
            value,
            next_link: None,
        }
    }
}
