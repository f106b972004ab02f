use std::io;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// 日志配置
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: Level,
    pub format: LogFormat,
    pub output: LogOutput,
    pub include_file_location: bool,
    pub include_span_events: bool,
    pub filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            format: LogFormat::Compact,
            output: LogOutput::Stderr,
            include_file_location: false,
            include_span_events: false,
            filter: None,
        }
    }
}

impl LoggingConfig {
    /// 调试模式：输出 debug 级别并附带源码位置
    pub fn debug() -> Self {
        Self {
            level: Level::DEBUG,
            format: LogFormat::Pretty,
            include_file_location: true,
            ..Self::default()
        }
    }

    pub fn directive(&self) -> String {
        format!("github_profile_finder={}", self.level)
    }
}

/// 日志格式
#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    /// 人类可读的格式
    Pretty,
    /// 紧凑格式
    Compact,
}

/// 日志输出目标
///
/// 渲染结果写到 stdout，所以默认输出到 stderr。
#[derive(Debug, Clone, PartialEq)]
pub enum LogOutput {
    Stdout,
    Stderr,
    File(String),
}

/// 设置日志系统
pub fn setup_logging(config: LoggingConfig) -> anyhow::Result<()> {
    let env_filter = build_filter(&config)?;

    let fmt_layer = match &config.output {
        LogOutput::Stdout => create_fmt_layer(&config, io::stdout),
        LogOutput::Stderr => create_fmt_layer(&config, io::stderr),
        LogOutput::File(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            create_fmt_layer(&config, Arc::new(file))
        }
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()?;

    Ok(())
}

fn build_filter(config: &LoggingConfig) -> anyhow::Result<EnvFilter> {
    let filter = match &config.filter {
        Some(filter) => EnvFilter::try_new(filter)?,
        // 未设置 RUST_LOG 时才使用默认指令
        None => EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(config.directive()))?,
    };
    Ok(filter)
}

fn create_fmt_layer<W>(config: &LoggingConfig, make_writer: W) -> Box<dyn Layer<Registry> + Send + Sync>
where
    W: for<'writer> fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
    let mut layer = fmt::layer()
        .with_writer(make_writer)
        .with_target(true)
        .with_level(true);

    if config.include_file_location {
        layer = layer.with_file(true).with_line_number(true);
    }

    if config.include_span_events {
        layer = layer.with_span_events(FmtSpan::CLOSE);
    }

    match config.format {
        LogFormat::Pretty => layer.pretty().boxed(),
        LogFormat::Compact => layer.compact().boxed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, Level::WARN);
        assert_eq!(config.format, LogFormat::Compact);
        assert_eq!(config.output, LogOutput::Stderr);
        assert!(!config.include_file_location);
    }

    #[test]
    fn test_debug_config() {
        let config = LoggingConfig::debug();
        assert_eq!(config.level, Level::DEBUG);
        assert!(config.include_file_location);
        assert_eq!(config.directive(), "github_profile_finder=DEBUG");
    }

    #[test]
    fn test_explicit_filter_is_used() {
        let config = LoggingConfig {
            filter: Some("github_profile_finder=trace,reqwest=info".to_string()),
            ..LoggingConfig::default()
        };
        assert!(build_filter(&config).is_ok());

        let bad = LoggingConfig {
            filter: Some("github_profile_finder=loudest".to_string()),
            ..LoggingConfig::default()
        };
        assert!(build_filter(&bad).is_err());
    }

    #[test]
    fn test_rust_log_takes_precedence_over_default_level() {
        let original = std::env::var("RUST_LOG").ok();

        std::env::set_var("RUST_LOG", "github_profile_finder=debug");
        let from_env = build_filter(&LoggingConfig::default()).unwrap().to_string();

        std::env::remove_var("RUST_LOG");
        let fallback = build_filter(&LoggingConfig::default()).unwrap().to_string();

        match original {
            Some(value) => std::env::set_var("RUST_LOG", value),
            None => std::env::remove_var("RUST_LOG"),
        }

        assert_eq!(from_env.to_lowercase(), "github_profile_finder=debug");
        assert_eq!(fallback.to_lowercase(), "github_profile_finder=warn");
    }
}
