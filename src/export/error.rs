// ==========================================
// 门店补货系统 - 输出模块错误类型
// ==========================================

use thiserror::Error;

/// 输出模块错误类型
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("文件写入失败: {path}: {message}")]
    WriteError { path: String, message: String },

    #[error("CSV 写入失败: {0}")]
    CsvWriteError(String),

    #[error("JSON 序列化失败: {0}")]
    JsonError(String),

    #[error("工作表列数不一致 (工作表 {sheet}, 行 {row}): 期望 {expected}，实际 {actual}")]
    RowShapeMismatch {
        sheet: String,
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("后台写入任务失败: {0}")]
    TaskJoinError(String),
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::WriteError {
            path: String::new(),
            message: err.to_string(),
        }
    }
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::CsvWriteError(err.to_string())
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::JsonError(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ExportError {
    fn from(err: tokio::task::JoinError) -> Self {
        ExportError::TaskJoinError(err.to_string())
    }
}

/// Result 类型别名
pub type ExportResult<T> = Result<T, ExportError>;
