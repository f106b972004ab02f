use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::state::PageOrdering;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// GitHub `per_page` 上限
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub page_size: u32,
    pub page_ordering: PageOrdering,
    pub timeout_secs: u64,
    pub debug: bool,
    env_errors: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            page_ordering: PageOrdering::default(),
            timeout_secs: 30,
            debug: false,
            env_errors: Vec::new(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        let mut config = Config::default();

        // 加载配置文件
        #[cfg(not(test))]
        config.load_from_env_file();
        // 加载环境变量（覆盖配置文件）
        config.load_from_env();

        config
    }

    pub fn load_from_env_file(&mut self) {
        // 先加载用户主目录，再加载当前目录；dotenvy 不覆盖已存在的变量
        if let Ok(home) = env::var("HOME") {
            let user_env_path = PathBuf::from(home).join(".gh-profile").join(".env");
            if user_env_path.exists() {
                dotenvy::from_path(user_env_path).ok();
            }
        }

        dotenvy::dotenv().ok();
    }

    pub fn load_from_env(&mut self) {
        if let Ok(url) = env::var("GH_PROFILE_API_URL") {
            self.api_url = url;
        }
        if let Ok(raw) = env::var("GH_PROFILE_PAGE_SIZE") {
            match raw.trim().parse() {
                Ok(size) => self.page_size = size,
                Err(_) => self
                    .env_errors
                    .push(format!("GH_PROFILE_PAGE_SIZE is not a number: {}", raw)),
            }
        }
        if let Ok(raw) = env::var("GH_PROFILE_PAGE_ORDERING") {
            match raw.parse() {
                Ok(ordering) => self.page_ordering = ordering,
                Err(e) => self.env_errors.push(format!("GH_PROFILE_PAGE_ORDERING: {}", e)),
            }
        }
        if let Ok(raw) = env::var("GH_PROFILE_TIMEOUT") {
            match raw.trim().parse() {
                Ok(secs) => self.timeout_secs = secs,
                Err(_) => self
                    .env_errors
                    .push(format!("GH_PROFILE_TIMEOUT is not a number: {}", raw)),
            }
        }
        if let Ok(debug) = env::var("GH_PROFILE_DEBUG") {
            self.debug = matches!(debug.trim().to_lowercase().as_str(), "1" | "true" | "yes");
        }
    }

    pub fn update_from_args(&mut self, args: &crate::cli::args::Args) {
        // 命令行参数优先级最高
        if let Some(url) = &args.api_url {
            self.api_url = url.clone();
        }
        if let Some(size) = args.page_size {
            self.page_size = size;
        }
        if let Some(ordering) = args.ordering {
            self.page_ordering = ordering;
        }
        if args.debug {
            self.debug = true;
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(error) = self.env_errors.first() {
            anyhow::bail!("Invalid environment configuration: {}", error);
        }
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            anyhow::bail!(
                "Page size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE,
                self.page_size
            );
        }
        let url = url::Url::parse(&self.api_url)
            .map_err(|e| anyhow::anyhow!("Invalid API url '{}': {}", self.api_url, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("API url must use http or https: {}", self.api_url);
        }
        if self.timeout_secs == 0 {
            anyhow::bail!("Timeout must be at least one second");
        }
        Ok(())
    }
}
