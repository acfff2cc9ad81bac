// ==========================================
// 门店补货系统 - 配置错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败: {path}: {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件格式错误: {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("环境变量取值无效: {key}={value} ({message})")]
    InvalidEnvValue {
        key: String,
        value: String,
        message: String,
    },

    #[error("配置项无效: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
