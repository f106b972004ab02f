use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// 网络客户端配置
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("github-profile-finder/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl NetworkConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// 网络客户端管理器
///
/// 不做重试：每次查询只发出一次请求，失败直接交给调用方。
#[derive(Debug, Clone)]
pub struct NetworkManager {
    client: Client,
}

impl NetworkManager {
    pub fn new(config: NetworkConfig) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );

        let client = ClientBuilder::new()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self { client })
    }

    /// 发送一次 GET 请求
    pub async fn get(
        &self,
        url: url::Url,
    ) -> Result<reqwest::Response, reqwest::Error> {
        tracing::debug!(url = %url, "sending request");
        let response = self.client.get(url).send().await?;
        tracing::debug!(status = response.status().as_u16(), "response received");
        Ok(response)
    }
}
