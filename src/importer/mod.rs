// ==========================================
// 门店补货系统 - 导入层
// ==========================================
// 职责: 外部源数据 → 类型化唯一事实
// 支持: Excel 工作簿, CSV 目录
// ==========================================

pub mod error;
pub mod fact_collapser;
pub mod field_mapper;
pub mod file_parser;
pub mod source_importer;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use fact_collapser::FactCollapser;
pub use field_mapper::{fields, sheets, FieldMapper};
pub use file_parser::{
    CsvDirectoryReader, ExcelWorkbookReader, RawRow, RawSheet, SheetReader, SourceWorkbook,
};
pub use source_importer::SourceImporter;
