use serde::Serialize;

use crate::infrastructure::error::StatusMessage;

/// 请求状态
///
/// 消息只挂在 `Error` 上，其它状态不可能带消息。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error(StatusMessage),
}

impl RequestStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestStatus::Loading)
    }

    pub fn message(&self) -> Option<&StatusMessage> {
        match self {
            RequestStatus::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn error_text(&self) -> Option<String> {
        self.message().map(StatusMessage::text)
    }
}
