// ==========================================
// 门店补货系统 - 源数据领域模型
// ==========================================
// 依据: 数据模型 - BranchFact / ItemFact / SalesFact / InventoryFact / MDQFact
// ==========================================
// 两级结构:
// - Raw*Row: 字段映射后的单行源记录（允许重复键）
// - *Fact:   按主键折叠后的唯一事实（导入层产出，引擎层只读）
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// 原始行（字段映射后、折叠前）
// ==========================================

/// 销售表单行（Sales）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSalesRow {
    pub branch_code: String,
    pub item_code: String,
    pub ave_monthly_sales_qty: Option<f64>,
    pub row_number: usize,
}

/// 门店库存表单行（BranchesInventory）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInventoryRow {
    pub branch_code: String,
    pub item_code: String,
    pub qty_on_hand: Option<f64>,
    pub row_number: usize,
}

/// MDQ 表单行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMdqRow {
    pub item_code: String,
    pub uom: Option<String>,
    pub mdq: Option<f64>,
    pub unit_cost: Option<f64>, // 源列 SRP
    pub total_srp: Option<f64>,
    pub row_number: usize,
}

/// 门店主数据单行（Branches）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBranchRow {
    pub branch_code: String,
    pub card_name: Option<String>,
    pub store_classification: Option<String>,
    pub branch_type: Option<String>,
    pub ordering_limit: Option<f64>,
    pub lead_time: Option<f64>,
    pub row_number: usize,
}

/// 商品主数据单行（ItemMaster）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawItemRow {
    pub item_code: String,
    pub item_name: Option<String>,
    pub uom_group: Option<String>,
    pub base_uom: Option<String>,
    pub item_group_name: Option<String>,
    pub row_number: usize,
}

/// 订货额度表单行（Ordering Limit）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawOrderLimitRow {
    pub branch_type: String,
    pub ordering_limit: Option<f64>,
    pub row_number: usize,
}

// ==========================================
// 折叠后的唯一事实
// ==========================================

/// 门店事实（主键: branch_code）
///
/// 文本字段取读取顺序中第一个非空值；lead_time / ordering_limit 取最大值。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchFact {
    pub branch_code: String,
    pub card_name: Option<String>,
    pub store_classification: Option<String>,
    pub branch_type: Option<String>, // 源列 Type
    pub ordering_limit: Option<f64>,
    pub lead_time: Option<f64>, // 补货提前期（天）
}

/// 商品事实（主键: item_code）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemFact {
    pub item_code: String,
    pub item_name: Option<String>,
    pub uom_group: Option<String>,
    pub base_uom: Option<String>,
    pub item_group_name: Option<String>,
}

/// 销售事实（主键: branch_code + item_code，重复行求和）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesFact {
    pub branch_code: String,
    pub item_code: String,
    pub ave_monthly_sales_qty: f64,
}

/// 库存事实（主键: branch_code + item_code，重复行求和）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryFact {
    pub branch_code: String,
    pub item_code: String,
    pub qty_on_hand: f64,
}

/// MDQ 事实（主键: item_code）
///
/// uom 取首个非空值；mdq、unit_cost 取最大值；total_srp 求和。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MdqFact {
    pub item_code: String,
    pub uom: Option<String>,
    pub mdq: Option<f64>,
    pub unit_cost: Option<f64>,
    pub total_srp: f64,
}

/// 订货额度事实（主键: branch_type）
///
/// 仅加载，不参与关联与决策。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLimitFact {
    pub branch_type: String,
    pub ordering_limit: Option<f64>,
}

// ==========================================
// SourceTables - 一次运行的完整输入
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceTables {
    pub sales: Vec<SalesFact>,
    pub inventory: Vec<InventoryFact>,
    pub mdq: Vec<MdqFact>,
    pub branches: Vec<BranchFact>,
    pub order_limits: Vec<OrderLimitFact>,
    pub items: Vec<ItemFact>,
}
