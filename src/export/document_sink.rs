// ==========================================
// 门店补货系统 - 调拨单落盘
// ==========================================
// 每张单据是独立文件，各门店并发写出
// 任一单据写出失败则整体失败（重跑即恢复）
// ==========================================

use crate::domain::document::OrderDocument;
use crate::export::error::ExportResult;
use crate::export::report::ReportBuilder;
use crate::export::writer::TabularWriter;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

// ==========================================
// DocumentSink Trait
// ==========================================
// 用途: 调拨单输出接口
// 实现者: WorkbookDocumentSink
#[async_trait]
pub trait DocumentSink: Send + Sync {
    /// 批量写出单据
    ///
    /// # 返回
    /// - Ok(Vec<PathBuf>): 与输入顺序一致的单据路径
    /// - Err: 首个写出失败的错误
    async fn write_documents(&self, documents: Vec<OrderDocument>) -> ExportResult<Vec<PathBuf>>;
}

// ==========================================
// WorkbookDocumentSink - 单据 → 工作簿
// ==========================================
pub struct WorkbookDocumentSink<W: TabularWriter + 'static> {
    writer: Arc<W>,
}

impl<W: TabularWriter + 'static> WorkbookDocumentSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Arc::new(writer),
        }
    }
}

#[async_trait]
impl<W: TabularWriter + 'static> DocumentSink for WorkbookDocumentSink<W> {
    async fn write_documents(&self, documents: Vec<OrderDocument>) -> ExportResult<Vec<PathBuf>> {
        use futures::future::join_all;

        info!(count = documents.len(), "开始写出调拨单");

        // 每张单据一个阻塞写出任务
        let tasks = documents.into_iter().map(|document| {
            let writer = Arc::clone(&self.writer);
            tokio::task::spawn_blocking(move || {
                let workbook = ReportBuilder::document_workbook(&document);
                writer.write_workbook(&workbook).inspect_err(|e| {
                    error!(
                        branch = %document.header.branch_code,
                        error = %e,
                        "调拨单写出失败"
                    );
                })
            })
        });

        let results = join_all(tasks).await;

        let mut paths = Vec::with_capacity(results.len());
        for joined in results {
            paths.push(joined??);
        }

        info!(written = paths.len(), "调拨单写出完成");
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::{OrderHeader, OrderLine};
    use crate::export::writer::CsvWorkbookWriter;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn document(branch: &str) -> OrderDocument {
        let date = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        let doc_number = format!("SR{}10-15-2026MAIN", branch);
        OrderDocument {
            header: OrderHeader {
                branch_code: branch.into(),
                pos_type: "ORW".into(),
                trans_type: "StockRequest".into(),
                doc_number: doc_number.clone(),
                from_whse: "MAIN".into(),
                to_whse: branch.into(),
                doc_date: date,
                doc_due_date: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
                remarks: String::new(),
            },
            lines: vec![OrderLine {
                branch_code: branch.into(),
                doc_number,
                from_whse: "MAIN".into(),
                to_whse: branch.into(),
                item_code: "ITM1".into(),
                item_name: Some("Widget".into()),
                uom: Some("PACK".into()),
                unit_cost: Some(25.0),
                qty: 2,
                gross_price: 0.0,
                tax_amt: 0.0,
                desc_amt: 0.0,
                net_sales: 0.0,
                gross_sales: 0.0,
            }],
        }
    }

    #[tokio::test]
    async fn test_write_documents_one_workbook_per_branch() {
        let dir = TempDir::new().unwrap();
        let sink = WorkbookDocumentSink::new(CsvWorkbookWriter::new(dir.path()));

        let paths = sink
            .write_documents(vec![document("B1"), document("B2")])
            .await
            .unwrap();

        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0], dir.path().join("po_B1_10-15-2026_SRB110-15-2026MAIN"));
        for path in &paths {
            assert!(path.join("TransactionHeader.csv").exists());
            assert!(path.join("TransactionLine.csv").exists());
        }
    }

    #[tokio::test]
    async fn test_write_no_documents() {
        let dir = TempDir::new().unwrap();
        let sink = WorkbookDocumentSink::new(CsvWorkbookWriter::new(dir.path()));

        let paths = sink.write_documents(Vec::new()).await.unwrap();

        assert!(paths.is_empty());
    }
}
