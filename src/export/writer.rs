// ==========================================
// 门店补货系统 - 表格输出
// ==========================================
// 工作簿 = 目录，工作表 = 目录下的 <sheet>.csv
// 单表（审计中间表）= <name>.csv
// ==========================================

use crate::export::error::{ExportError, ExportResult};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

// ==========================================
// Sheet / Workbook - 与格式无关的表格结构
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn new<S: Into<String>>(name: S, headers: &[&str]) -> Self {
        Self {
            name: name.into(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// 校验每行列数与表头一致
    pub fn validate(&self) -> ExportResult<()> {
        for (idx, row) in self.rows.iter().enumerate() {
            if row.len() != self.headers.len() {
                return Err(ExportError::RowShapeMismatch {
                    sheet: self.name.clone(),
                    row: idx + 1,
                    expected: self.headers.len(),
                    actual: row.len(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workbook {
    pub name: String,
    pub sheets: Vec<Sheet>,
}

// ==========================================
// TabularWriter Trait
// ==========================================
// 用途: 表格落盘接口
// 实现者: CsvWorkbookWriter
pub trait TabularWriter: Send + Sync {
    /// 写出单张表，返回文件路径
    fn write_table(&self, sheet: &Sheet) -> ExportResult<PathBuf>;

    /// 写出工作簿，返回工作簿路径
    fn write_workbook(&self, workbook: &Workbook) -> ExportResult<PathBuf>;
}

// ==========================================
// CsvWorkbookWriter - CSV 实现
// ==========================================
pub struct CsvWorkbookWriter {
    root: PathBuf,
}

impl CsvWorkbookWriter {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn write_csv(path: &Path, sheet: &Sheet) -> ExportResult<()> {
        sheet.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ExportError::WriteError {
                path: parent.display().to_string(),
                message: e.to_string(),
            })?;
        }

        let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
        writer.write_record(&sheet.headers)?;
        for row in &sheet.rows {
            writer.write_record(row)?;
        }
        writer.flush().map_err(|e| ExportError::WriteError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        debug!(path = %path.display(), rows = sheet.rows.len(), "工作表写出完成");
        Ok(())
    }
}

impl TabularWriter for CsvWorkbookWriter {
    fn write_table(&self, sheet: &Sheet) -> ExportResult<PathBuf> {
        let path = self.root.join(format!("{}.csv", sheet.name));
        Self::write_csv(&path, sheet)?;
        Ok(path)
    }

    fn write_workbook(&self, workbook: &Workbook) -> ExportResult<PathBuf> {
        let dir = self.root.join(&workbook.name);
        for sheet in &workbook.sheets {
            Self::write_csv(&dir.join(format!("{}.csv", sheet.name)), sheet)?;
        }
        Ok(dir)
    }
}

/// 写出 JSON 文件（运行摘要等）
pub fn write_json_file<T: Serialize + ?Sized>(path: &Path, value: &T) -> ExportResult<PathBuf> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(|e| ExportError::WriteError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_sheet(name: &str) -> Sheet {
        let mut sheet = Sheet::new(name, &["ItemCode", "Qty"]);
        sheet.push_row(vec!["ITM1".into(), "2".into()]);
        sheet.push_row(vec!["ITM2".into(), "".into()]);
        sheet
    }

    #[test]
    fn test_write_table() {
        let dir = TempDir::new().unwrap();
        let writer = CsvWorkbookWriter::new(dir.path());

        let path = writer.write_table(&sample_sheet("df_join")).unwrap();

        assert_eq!(path, dir.path().join("df_join.csv"));
        let content = fs::read_to_string(path).unwrap();
        assert_eq!(content, "ItemCode,Qty\nITM1,2\nITM2,\n");
    }

    #[test]
    fn test_write_workbook_creates_sheet_files() {
        let dir = TempDir::new().unwrap();
        let writer = CsvWorkbookWriter::new(dir.path().join("processed"));
        let workbook = Workbook {
            name: "po_analysis".into(),
            sheets: vec![sample_sheet("groupby_plu_po_analysis"), sample_sheet("branch_po_analysis")],
        };

        let path = writer.write_workbook(&workbook).unwrap();

        assert!(path.join("groupby_plu_po_analysis.csv").exists());
        assert!(path.join("branch_po_analysis.csv").exists());
    }

    #[test]
    fn test_row_shape_mismatch_rejected() {
        let dir = TempDir::new().unwrap();
        let mut sheet = Sheet::new("bad", &["A", "B"]);
        sheet.push_row(vec!["only-one".into()]);

        let result = CsvWorkbookWriter::new(dir.path()).write_table(&sheet);

        assert!(matches!(result, Err(ExportError::RowShapeMismatch { row: 1, .. })));
    }

    #[test]
    fn test_write_json_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("summary.json");

        write_json_file(&path, &serde_json::json!({ "documents": 2 })).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["documents"], 2);
    }
}
