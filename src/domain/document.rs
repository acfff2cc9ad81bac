// ==========================================
// 门店补货系统 - 调拨申请单据模型
// ==========================================
// 依据: 数据模型 - OrderHeader / OrderLine
// 单据类型: StockRequest（总仓 → 门店）
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 单据日期格式（MM-DD-YYYY）
pub const DOC_DATE_FORMAT: &str = "%m-%d-%Y";

pub const POS_TYPE: &str = "ORW";
pub const TRANS_TYPE: &str = "StockRequest";

/// 格式化单据日期
pub fn format_doc_date(date: NaiveDate) -> String {
    date.format(DOC_DATE_FORMAT).to_string()
}

// ==========================================
// OrderHeader - 单据头（每门店一行）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderHeader {
    pub branch_code: String,
    pub pos_type: String,
    pub trans_type: String,
    pub doc_number: String,
    pub from_whse: String,
    pub to_whse: String,
    pub doc_date: NaiveDate,
    pub doc_due_date: NaiveDate,
    pub remarks: String,
}

// ==========================================
// OrderLine - 单据行（每个保留的门店-商品一行）
// ==========================================
// 金额类字段由下游 POS 计算，此处固定为 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub branch_code: String,
    pub doc_number: String,
    pub from_whse: String,
    pub to_whse: String,
    pub item_code: String,
    pub item_name: Option<String>,
    pub uom: Option<String>,
    pub unit_cost: Option<f64>,
    pub qty: i64,
    pub gross_price: f64,
    pub tax_amt: f64,
    pub desc_amt: f64,
    pub net_sales: f64,
    pub gross_sales: f64,
}

// ==========================================
// OrderDocument - 单门店完整单据
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDocument {
    pub header: OrderHeader,
    pub lines: Vec<OrderLine>,
}

impl OrderDocument {
    /// 输出文件名（不含扩展名）: po_<门店>_<日期>_<单号>
    pub fn file_stem(&self) -> String {
        format!(
            "po_{}_{}_{}",
            self.header.branch_code,
            format_doc_date(self.header.doc_date),
            self.header.doc_number
        )
    }
}
