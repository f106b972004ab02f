use serde::{Deserialize, Serialize};

/// GitHub 用户资料（`/users/{username}`）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub login: String,
    pub avatar_url: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "public_repos")]
    pub public_repo_count: u32,
}

impl Profile {
    pub fn bio_or_default(&self) -> &str {
        non_empty(self.bio.as_deref()).unwrap_or("No bio available")
    }

    pub fn location_or_default(&self) -> &str {
        non_empty(self.location.as_deref()).unwrap_or("No location available")
    }
}

/// 用户公开仓库（`/users/{username}/repos`）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    #[serde(rename = "html_url")]
    pub url: String,
    pub description: Option<String>,
    #[serde(rename = "stargazers_count")]
    pub star_count: u32,
    #[serde(rename = "forks_count")]
    pub fork_count: u32,
}

impl Repository {
    pub fn description_or_default(&self) -> &str {
        non_empty(self.description.as_deref()).unwrap_or("No description")
    }
}

// GitHub 对空字段有时返回 ""，有时返回 null
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
