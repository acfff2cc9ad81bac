// ==========================================
// 门店补货系统 - 管道运行配置
// ==========================================
// 加载顺序（后者覆盖前者）:
// 1. 内置默认值
// 2. JSON 配置文件（显式路径，或用户配置目录下的 config.json）
// 3. 环境变量
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::engine::document::{DEFAULT_DUE_OFFSET_DAYS, DEFAULT_WAREHOUSE, MAX_DUE_OFFSET_DAYS};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 环境变量键
pub mod env_keys {
    pub const SOURCE: &str = "PO_REPLENISH_SOURCE";
    pub const INTERIM_DIR: &str = "PO_REPLENISH_INTERIM_DIR";
    pub const OUTPUT_DIR: &str = "PO_REPLENISH_OUTPUT_DIR";
    pub const RUN_DATE: &str = "PO_REPLENISH_RUN_DATE";
}

/// 用户配置目录下的应用子目录
pub const APP_CONFIG_DIR: &str = "po-replenish";
pub const CONFIG_FILE_NAME: &str = "config.json";

/// 运行日期格式（配置文件 / 环境变量）
pub const RUN_DATE_FORMAT: &str = "%Y-%m-%d";

// ==========================================
// PipelineConfig
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// 源数据（xlsx 文件或 CSV 目录）
    pub source_path: PathBuf,
    /// 审计中间表目录
    pub interim_dir: PathBuf,
    /// 分析工作簿与调拨单输出目录
    pub output_dir: PathBuf,
    pub analysis_workbook: String,
    /// 调拨单子目录（相对 output_dir）
    pub document_dir: String,
    pub due_offset_days: i64,
    pub warehouse_code: String,
    /// 指定运行日期；None 时取当天
    pub run_date: Option<NaiveDate>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from("data/raw/po_source.xlsx"),
            interim_dir: PathBuf::from("data/interim"),
            output_dir: PathBuf::from("data/processed"),
            analysis_workbook: "po_analysis".to_string(),
            document_dir: "po".to_string(),
            due_offset_days: DEFAULT_DUE_OFFSET_DAYS,
            warehouse_code: DEFAULT_WAREHOUSE.to_string(),
            run_date: None,
        }
    }
}

impl PipelineConfig {
    /// 完整加载: 默认值 → 配置文件 → 环境变量
    ///
    /// # 参数
    /// - path: 显式配置文件；None 时尝试用户配置目录（不存在则跳过）
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => match Self::default_config_path().filter(|p| p.exists()) {
                Some(p) => Self::from_file(&p)?,
                None => Self::default(),
            },
        };

        config.apply_env_with(|key| std::env::var(key).ok())?;
        config.validate()?;

        info!(
            source = %config.source_path.display(),
            output = %config.output_dir.display(),
            "配置加载完成"
        );
        Ok(config)
    }

    /// 用户配置目录下的默认配置文件
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_CONFIG_DIR).join(CONFIG_FILE_NAME))
    }

    /// 从 JSON 文件读取（缺失字段取默认值）
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: Self = serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        debug!(path = %path.display(), "读取配置文件");
        Ok(config)
    }

    /// 应用环境变量覆写
    ///
    /// lookup 按键返回变量值；空白值视为未设置
    pub fn apply_env_with<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(v) = get(env_keys::SOURCE) {
            self.source_path = PathBuf::from(v);
        }
        if let Some(v) = get(env_keys::INTERIM_DIR) {
            self.interim_dir = PathBuf::from(v);
        }
        if let Some(v) = get(env_keys::OUTPUT_DIR) {
            self.output_dir = PathBuf::from(v);
        }
        if let Some(v) = get(env_keys::RUN_DATE) {
            let date = NaiveDate::parse_from_str(&v, RUN_DATE_FORMAT).map_err(|e| {
                ConfigError::InvalidEnvValue {
                    key: env_keys::RUN_DATE.to_string(),
                    value: v.clone(),
                    message: e.to_string(),
                }
            })?;
            self.run_date = Some(date);
        }
        Ok(())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.due_offset_days < 0 {
            return Err(ConfigError::Invalid(format!(
                "due_offset_days 不能为负: {}",
                self.due_offset_days
            )));
        }
        if self.due_offset_days > MAX_DUE_OFFSET_DAYS {
            return Err(ConfigError::Invalid(format!(
                "due_offset_days 超出上限 {}: {}",
                MAX_DUE_OFFSET_DAYS, self.due_offset_days
            )));
        }
        if self.warehouse_code.trim().is_empty() {
            return Err(ConfigError::Invalid("warehouse_code 不能为空".to_string()));
        }
        if self.analysis_workbook.trim().is_empty() {
            return Err(ConfigError::Invalid("analysis_workbook 不能为空".to_string()));
        }
        Ok(())
    }

    /// 调拨单输出目录
    pub fn document_output_dir(&self) -> PathBuf {
        self.output_dir.join(&self.document_dir)
    }

    /// 实际运行日期（未指定时取 today）
    pub fn resolve_run_date(&self, today: NaiveDate) -> NaiveDate {
        self.run_date.unwrap_or(today)
    }
}
