// ==========================================
// 门店补货系统 - 配置层
// ==========================================
// 职责: 运行配置加载，支持多级覆写
// 来源: 默认值 / JSON 文件 / 环境变量
// ==========================================

pub mod error;
pub mod pipeline_config;

pub use error::{ConfigError, ConfigResult};
pub use pipeline_config::{env_keys, PipelineConfig};
