// ==========================================
// 门店补货系统 - 源文件解析器实现
// ==========================================
// 阶段 0: 文件读取与解析（工作表 → 原始行）
// 支持: Excel 工作簿 (.xlsx/.xls) / CSV 目录（每个工作表一个 <Sheet>.csv）
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Data, Range, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

// ==========================================
// RawRow / RawSheet - 原始行记录
// ==========================================

/// 单行原始记录（列名 → 去空白后的文本值）
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// 源表中的行号（表头为第 1 行）
    pub row_number: usize,
    pub values: HashMap<String, String>,
}

impl RawRow {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(|v| v.as_str())
    }
}

/// 单个工作表的原始内容，行顺序与源文件一致
#[derive(Debug, Clone, PartialEq)]
pub struct RawSheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawSheet {
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }
}

// ==========================================
// SheetReader Trait
// ==========================================
// 用途: 按名称读取工作表
// 实现者: ExcelWorkbookReader, CsvDirectoryReader, SourceWorkbook
pub trait SheetReader: Send + Sync {
    /// 读取指定工作表
    ///
    /// # 返回
    /// - Ok(RawSheet): 表头 + 非空数据行
    /// - Err: 文件不存在、工作表不存在、解析失败
    fn read_sheet(&self, sheet: &str) -> ImportResult<RawSheet>;
}

/// 将一行单元格文本按表头组装为 RawRow，完全空白的行返回 None
fn build_row<I>(headers: &[String], cells: I, row_number: usize) -> Option<RawRow>
where
    I: IntoIterator<Item = String>,
{
    let mut values = HashMap::new();
    for (col_idx, value) in cells.into_iter().enumerate() {
        if let Some(header) = headers.get(col_idx) {
            values.insert(header.clone(), value.trim().to_string());
        }
    }

    if values.values().all(|v| v.is_empty()) {
        return None;
    }

    Some(RawRow { row_number, values })
}

// ==========================================
// Excel 工作簿读取
// ==========================================
// 打开时一次性解析全部工作表，之后按名称取用
pub struct ExcelWorkbookReader {
    path: PathBuf,
    sheets: Vec<(String, Range<Data>)>,
}

impl ExcelWorkbookReader {
    pub fn new<P: AsRef<Path>>(path: P) -> ImportResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(path)?;
        let mut sheets = Vec::new();
        for name in workbook.sheet_names() {
            let range = workbook.worksheet_range(&name)?;
            sheets.push((name, range));
        }

        Ok(Self {
            path: path.to_path_buf(),
            sheets,
        })
    }

    /// 工作簿中的工作表名（源文件顺序）
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|(name, _)| name.as_str()).collect()
    }
}

impl SheetReader for ExcelWorkbookReader {
    fn read_sheet(&self, sheet: &str) -> ImportResult<RawSheet> {
        let range = self
            .sheets
            .iter()
            .find(|(name, _)| name == sheet)
            .map(|(_, range)| range)
            .ok_or_else(|| {
                ImportError::SheetNotFound(format!("{} ({})", sheet, self.path.display()))
            })?;

        // 提取表头（第一行）
        let mut rows = range.rows();
        let header_row = rows.next().ok_or_else(|| {
            ImportError::ExcelParseError(format!("工作表 {} 无表头行", sheet))
        })?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let records = rows
            .enumerate()
            .filter_map(|(idx, data_row)| {
                build_row(&headers, data_row.iter().map(|c| c.to_string()), idx + 2)
            })
            .collect();

        Ok(RawSheet {
            name: sheet.to_string(),
            headers,
            rows: records,
        })
    }
}

// ==========================================
// CSV 目录读取
// ==========================================
pub struct CsvDirectoryReader {
    dir: PathBuf,
}

impl CsvDirectoryReader {
    pub fn new<P: AsRef<Path>>(dir: P) -> ImportResult<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(ImportError::FileNotFound(dir.display().to_string()));
        }
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn sheet_path(&self, sheet: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", sheet))
    }
}

impl SheetReader for CsvDirectoryReader {
    fn read_sheet(&self, sheet: &str) -> ImportResult<RawSheet> {
        let path = self.sheet_path(sheet);
        if !path.exists() {
            return Err(ImportError::SheetNotFound(path.display().to_string()));
        }

        let file = File::open(&path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
            .collect();

        let mut records = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            if let Some(row) = build_row(&headers, record.iter().map(str::to_string), idx + 2) {
                records.push(row);
            }
        }

        Ok(RawSheet {
            name: sheet.to_string(),
            headers,
            rows: records,
        })
    }
}

// ==========================================
// 通用源读取器（根据路径自动选择）
// ==========================================
pub enum SourceWorkbook {
    Excel(ExcelWorkbookReader),
    CsvDirectory(CsvDirectoryReader),
}

impl SourceWorkbook {
    /// 目录 → CSV 目录读取；.xlsx/.xls → Excel 读取
    pub fn open<P: AsRef<Path>>(path: P) -> ImportResult<Self> {
        let path = path.as_ref();
        if path.is_dir() {
            return Ok(SourceWorkbook::CsvDirectory(CsvDirectoryReader::new(path)?));
        }
        Ok(SourceWorkbook::Excel(ExcelWorkbookReader::new(path)?))
    }
}

impl SheetReader for SourceWorkbook {
    fn read_sheet(&self, sheet: &str) -> ImportResult<RawSheet> {
        match self {
            SourceWorkbook::Excel(reader) => reader.read_sheet(sheet),
            SourceWorkbook::CsvDirectory(reader) => reader.read_sheet(sheet),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_sheet(dir: &TempDir, name: &str, lines: &[&str]) {
        let mut file = File::create(dir.path().join(format!("{}.csv", name))).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
    }

    #[test]
    fn test_csv_directory_reads_sheet() {
        let dir = TempDir::new().unwrap();
        write_sheet(
            &dir,
            "Sales",
            &["CardCode,ItemCode,AveMonthlySalesQty", "01-00002,ITM1,60", "01-00002,ITM2,15"],
        );

        let reader = CsvDirectoryReader::new(dir.path()).unwrap();
        let sheet = reader.read_sheet("Sales").unwrap();

        assert_eq!(sheet.headers, vec!["CardCode", "ItemCode", "AveMonthlySalesQty"]);
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0].get("CardCode"), Some("01-00002"));
        assert_eq!(sheet.rows[0].row_number, 2);
        assert_eq!(sheet.rows[1].get("AveMonthlySalesQty"), Some("15"));
    }

    #[test]
    fn test_csv_directory_skips_blank_rows() {
        let dir = TempDir::new().unwrap();
        write_sheet(&dir, "MDQ", &["PLU,MDQ", "ITM1,4", ",", "ITM2,6"]);

        let reader = CsvDirectoryReader::new(dir.path()).unwrap();
        let sheet = reader.read_sheet("MDQ").unwrap();

        assert_eq!(sheet.rows.len(), 2);
        // 行号保持源文件位置
        assert_eq!(sheet.rows[1].row_number, 4);
    }

    #[test]
    fn test_csv_directory_missing_sheet() {
        let dir = TempDir::new().unwrap();
        let reader = CsvDirectoryReader::new(dir.path()).unwrap();

        let result = reader.read_sheet("Branches");
        assert!(matches!(result, Err(ImportError::SheetNotFound(_))));
    }

    #[test]
    fn test_excel_reader_rejects_unknown_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("raw.txt");
        File::create(&path).unwrap();

        let result = ExcelWorkbookReader::new(&path);
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_source_workbook_missing_file() {
        let result = SourceWorkbook::open("non_existent.xlsx");
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }
}
