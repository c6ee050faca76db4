use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::query::context::ExecutionMode;
use crate::query::visitor::ChildSubstitution;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("配置解析错误: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("配置序列化错误: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub rewrite: RewriteConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// 重写配置
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct RewriteConfig {
    /// 通用分支中子节点被改写后的处理方式
    pub child_substitution: ChildSubstitution,
    /// 选择同步或异步查询方法提供者
    pub execution_mode: ExecutionMode,
}

/// 日志配置
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    /// 为 false 时输出到标准错误
    pub to_file: bool,
    pub dir: String,
    pub file: String,
    pub max_file_size: u64,
    pub max_files: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            to_file: false,
            dir: "logs".to_string(),
            file: "query-rewrite".to_string(),
            max_file_size: 100 * 1024 * 1024, // 100MB
            max_files: 5,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.rewrite.child_substitution, ChildSubstitution::BubbleUp);
        assert_eq!(config.rewrite.execution_mode, ExecutionMode::Sync);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_config_load_save() {
        let temp_file = NamedTempFile::new().expect("Failed to create temporary file");

        let mut config = Config::default();
        config.rewrite.child_substitution = ChildSubstitution::Rebuild;
        config.rewrite.execution_mode = ExecutionMode::Async;
        config
            .save(temp_file.path())
            .expect("Failed to save config to temporary file");

        let loaded_config =
            Config::load(temp_file.path()).expect("Failed to load config from temporary file");
        assert_eq!(config, loaded_config);
    }

    #[test]
    fn test_config_partial_file_uses_defaults() {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temporary file");
        temp_file
            .write_all(b"[rewrite]\nchild_substitution = \"rebuild\"\n")
            .expect("Failed to write TOML content to temporary file");

        let config = Config::load(temp_file.path()).expect("Failed to load partial config");
        assert_eq!(config.rewrite.child_substitution, ChildSubstitution::Rebuild);
        assert_eq!(config.rewrite.execution_mode, ExecutionMode::Sync);
        assert_eq!(config.log, LogConfig::default());
    }

    #[test]
    fn test_config_invalid_toml() {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temporary file");
        temp_file
            .write_all(b"[rewrite]\nchild_substitution = \"sideways\"\n")
            .expect("Failed to write TOML content to temporary file");

        let err = Config::load(temp_file.path()).expect_err("未知的替换模式应解析失败");
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
