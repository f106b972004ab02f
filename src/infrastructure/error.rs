use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// 查询失败类型
///
/// `Display` 输出即为展示给用户的文案，诊断信息保存在字段中只写入日志。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("GitHub user not found. Please check the username.")]
    NotFound { username: String },

    #[error("Error fetching data from GitHub.")]
    Upstream { status: u16, url: Option<String> },

    #[error("GitHub API rate limit exceeded. Please try again later.")]
    RateLimited { url: Option<String> },

    #[error("{context}")]
    Network { context: NetworkContext, detail: String },
}

/// 网络错误发生的阶段，决定默认文案
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkContext {
    Profile,
    Repositories,
}

impl NetworkContext {
    pub fn message(&self) -> &'static str {
        match self {
            NetworkContext::Profile => "Error fetching data",
            NetworkContext::Repositories => "Error fetching repositories",
        }
    }
}

impl fmt::Display for NetworkContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl LookupError {
    /// 创建上游错误
    pub fn upstream(status: u16, url: Option<String>) -> Self {
        LookupError::Upstream { status, url }
    }

    /// 创建网络错误
    pub fn network(context: NetworkContext, detail: impl Into<String>) -> Self {
        LookupError::Network {
            context,
            detail: detail.into(),
        }
    }

    /// 错误类别
    pub fn kind(&self) -> ErrorKind {
        match self {
            LookupError::NotFound { .. } => ErrorKind::NotFound,
            LookupError::Upstream { .. } => ErrorKind::Upstream,
            LookupError::RateLimited { .. } => ErrorKind::RateLimit,
            LookupError::Network { .. } => ErrorKind::Network,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            LookupError::NotFound { .. } => Some(404),
            LookupError::Upstream { status, .. } => Some(*status),
            LookupError::RateLimited { .. } => Some(403),
            LookupError::Network { .. } => None,
        }
    }

    /// 将 reqwest 错误归类为网络错误（连接、超时、JSON 解析）
    pub fn from_reqwest(context: NetworkContext, error: reqwest::Error) -> Self {
        let detail = match error.url() {
            Some(url) => format!("{} ({})", error, url),
            None => error.to_string(),
        };
        LookupError::network(context, detail)
    }
}

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    Upstream,
    RateLimit,
    Network,
}

/// 非失败类提示，与错误共用同一个展示通道
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    NoPublicRepositories,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::NoPublicRepositories => write!(f, "This user has no public repositories."),
        }
    }
}

/// 状态栏消息：错误或提示
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Failure(LookupError),
    Notice(Notice),
}

impl StatusMessage {
    pub fn text(&self) -> String {
        self.to_string()
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, StatusMessage::Failure(_))
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusMessage::Failure(error) => write!(f, "{}", error),
            StatusMessage::Notice(notice) => write!(f, "{}", notice),
        }
    }
}

impl From<LookupError> for StatusMessage {
    fn from(error: LookupError) -> Self {
        StatusMessage::Failure(error)
    }
}

impl From<Notice> for StatusMessage {
    fn from(notice: Notice) -> Self {
        StatusMessage::Notice(notice)
    }
}

impl Serialize for StatusMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("StatusMessage", 2)?;
        match self {
            StatusMessage::Failure(error) => state.serialize_field("kind", &error.kind())?,
            StatusMessage::Notice(_) => state.serialize_field("kind", "notice")?,
        }
        state.serialize_field("message", &self.text())?;
        state.end()
    }
}
