use serde::{Deserialize, Serialize};


/// Body of any non-2xx response from the backend, e.g. `{"detail": "Story not found"}`.
///
/// Request validation failures carry a structured (array) `detail` instead of a string,
/// which is why this is kept as an arbitrary JSON value.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct ErrorResponse {
    pub detail: serde_json::Value,
}

impl ErrorResponse {
    pub fn detail_message(&self) -> Option<&str> {
        self.detail.as_str()
    }

    /// Case-insensitive comparison against a plain-string `detail`.
    pub fn detail_is(&self, expected_detail: &str) -> bool {
        self.detail_message()
            .map(|detail| detail.eq_ignore_ascii_case(expected_detail))
            .unwrap_or(false)
    }
}



/// Known `detail` messages sent by the backend.
pub mod error_details {
    pub const STORY_NOT_FOUND: &str = "Story not found";
    pub const STUDIABLE_NOT_FOUND: &str = "Studiable not found";
    pub const PARENT_CHAPTER_NOT_FOUND: &str = "Parent chapter not found";
    pub const INVALID_STUDIABLE_TYPE: &str = "Invalid studiable type";
}
