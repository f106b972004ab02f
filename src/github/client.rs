use async_trait::async_trait;
use reqwest::StatusCode;
use url::Url;

use crate::github::models::{Profile, Repository};
use crate::infrastructure::error::{LookupError, NetworkContext};
use crate::infrastructure::network::NetworkManager;

/// GitHub 只读 API 的通用接口，控制器只依赖这个 trait
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// 获取用户资料
    async fn fetch_profile(&self, username: &str) -> Result<Profile, LookupError>;

    /// 获取某一页仓库（页码从 1 开始）
    async fn fetch_repositories(
        &self,
        username: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Repository>, LookupError>;
}

/// 基于 reqwest 的 GitHub REST 客户端
#[derive(Debug, Clone)]
pub struct GitHubClient {
    network: NetworkManager,
    base_url: Url,
}

impl GitHubClient {
    pub fn new(network: NetworkManager, base_url: &str) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| anyhow::anyhow!("Invalid GitHub API url '{}': {}", base_url, e))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("GitHub API url '{}' cannot be used as a base url", base_url);
        }
        Ok(Self { network, base_url })
    }

    /// `{base}/users/{username}`，用户名按路径段编码
    pub fn profile_url(&self, username: &str) -> Url {
        self.users_url(&[username])
    }

    /// `{base}/users/{username}/repos?per_page=N&page=P`
    pub fn repositories_url(&self, username: &str, page: u32, per_page: u32) -> Url {
        let mut url = self.users_url(&[username, "repos"]);
        url.query_pairs_mut()
            .append_pair("per_page", &per_page.to_string())
            .append_pair("page", &page.to_string());
        url
    }

    fn users_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // new() 已排除 cannot-be-a-base 的 url
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("users").extend(segments);
        }
        url
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn fetch_profile(&self, username: &str) -> Result<Profile, LookupError> {
        let url = self.profile_url(username);
        let response = self
            .network
            .get(url.clone())
            .await
            .map_err(|e| LookupError::from_reqwest(NetworkContext::Profile, e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound {
                username: username.to_string(),
            });
        }
        if !status.is_success() {
            return Err(LookupError::upstream(status.as_u16(), Some(url.to_string())));
        }

        response
            .json::<Profile>()
            .await
            .map_err(|e| LookupError::from_reqwest(NetworkContext::Profile, e))
    }

    async fn fetch_repositories(
        &self,
        username: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Repository>, LookupError> {
        let url = self.repositories_url(username, page, per_page);
        let response = self
            .network
            .get(url.clone())
            .await
            .map_err(|e| LookupError::from_reqwest(NetworkContext::Repositories, e))?;

        let status = response.status();
        if status == StatusCode::FORBIDDEN {
            return Err(LookupError::RateLimited {
                url: Some(url.to_string()),
            });
        }
        if !status.is_success() {
            return Err(LookupError::upstream(status.as_u16(), Some(url.to_string())));
        }

        response
            .json::<Vec<Repository>>()
            .await
            .map_err(|e| LookupError::from_reqwest(NetworkContext::Repositories, e))
    }
}
