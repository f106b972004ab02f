use serde::Serialize;

use crate::github::client::GitHubApi;
use crate::github::models::Profile;
use crate::state::RequestStatus;

/// 单个用户页面（`/user/{username}`）：只取资料，不分页
#[derive(Debug, Clone, Serialize)]
pub struct UserPageView {
    username: String,
    profile: Option<Profile>,
    status: RequestStatus,
}

impl UserPageView {
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn status(&self) -> &RequestStatus {
        &self.status
    }

    pub fn heading(&self) -> String {
        format!("GitHub Profile for {}", self.username)
    }
}

/// 打开用户页面并获取资料
pub async fn open_user_page<A>(api: &A, username: &str) -> UserPageView
where
    A: GitHubApi + ?Sized,
{
    let username = username.trim().to_string();
    if username.is_empty() {
        return UserPageView {
            username,
            profile: None,
            status: RequestStatus::Idle,
        };
    }

    match api.fetch_profile(&username).await {
        Ok(profile) => UserPageView {
            username,
            profile: Some(profile),
            status: RequestStatus::Success,
        },
        Err(error) => {
            tracing::warn!(username = %username, error = ?error, "user page fetch failed");
            UserPageView {
                username,
                profile: None,
                status: RequestStatus::Error(error.into()),
            }
        }
    }
}
