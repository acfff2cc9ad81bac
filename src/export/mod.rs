// ==========================================
// 门店补货系统 - 输出模块
// ==========================================
// 职责: 报表布局、表格落盘、调拨单并发写出
// ==========================================

pub mod document_sink;
pub mod error;
pub mod report;
pub mod writer;

pub use document_sink::{DocumentSink, WorkbookDocumentSink};
pub use error::{ExportError, ExportResult};
pub use report::ReportBuilder;
pub use writer::{write_json_file, CsvWorkbookWriter, Sheet, TabularWriter, Workbook};
