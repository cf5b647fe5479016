/*
[INPUT]:  Raw panel API response bodies
[OUTPUT]: Typed envelope and payload structs
[POS]:    Data layer - response definitions
[UPDATE]: When the response envelope or endpoint payloads change
*/

use serde::{Deserialize, Serialize};

use super::models::{CommissionRecord, NoticeItem};

/// Standard response envelope wrapping every passport/user payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    pub message: String,
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,
}

/// Payload of a successful login or signup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginData {
    /// Short session token, used as a display/session key
    pub token: String,
    /// Bearer credential sent verbatim as the Authorization header
    pub auth_data: String,
    pub is_admin: i64,
}

impl LoginData {
    pub fn admin(&self) -> bool {
        self.is_admin != 0
    }
}

/// `/user/invite/details` responds without the envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionRecordsPage {
    pub data: Vec<CommissionRecord>,
    pub total: u64,
}

/// `/user/notice/fetch` responds without the envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoticePage {
    pub data: Vec<NoticeItem>,
    pub total: u64,
}
