// ==========================================
// 门店补货系统 - 管道错误类型
// ==========================================
// 计算本身不产生错误，仅聚合读写与配置错误
// ==========================================

use crate::config::ConfigError;
use crate::export::ExportError;
use crate::importer::ImportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("源数据导入失败: {0}")]
    Import(#[from] ImportError),

    #[error("结果输出失败: {0}")]
    Export(#[from] ExportError),

    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
