// ==========================================
// 门店补货系统 - 管道记录模型
// ==========================================
// 依据: 数据模型 - BranchItemGrid / EnrichedRecord / DecidedRecord
// ==========================================
// 红线: 各阶段只产出新记录，不原地修改上游记录
// ==========================================

use crate::domain::source::{BranchFact, ItemFact, MdqFact};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ==========================================
// GridRow - 门店 × 商品 全组合中的一行
// ==========================================
// 同一门店/商品的事实在所有行之间共享
#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    pub item: Arc<ItemFact>,
    pub branch: Arc<BranchFact>,
}

impl GridRow {
    pub fn branch_code(&self) -> &str {
        &self.branch.branch_code
    }

    pub fn item_code(&self) -> &str {
        &self.item.item_code
    }
}

// ==========================================
// EnrichedRecord - 关联销售/库存/MDQ 之后的记录
// ==========================================
// 未匹配的事实保持 None（左关联语义）
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
    pub item: Arc<ItemFact>,
    pub branch: Arc<BranchFact>,
    pub sales_offtake: Option<f64>,       // 月均销量（AveMonthlySalesQty）
    pub month_end_inventory: Option<f64>, // 月末库存（QtyOnHand）
    pub mdq: Option<Arc<MdqFact>>,
}

impl EnrichedRecord {
    pub fn branch_code(&self) -> &str {
        &self.branch.branch_code
    }

    pub fn item_code(&self) -> &str {
        &self.item.item_code
    }

    pub fn uom(&self) -> Option<&str> {
        self.mdq.as_ref().and_then(|m| m.uom.as_deref())
    }

    pub fn mdq_qty(&self) -> Option<f64> {
        self.mdq.as_ref().and_then(|m| m.mdq)
    }

    pub fn unit_cost(&self) -> Option<f64> {
        self.mdq.as_ref().and_then(|m| m.unit_cost)
    }

    pub fn total_srp(&self) -> Option<f64> {
        self.mdq.as_ref().map(|m| m.total_srp)
    }
}

// ==========================================
// ItemAggregate - 全网按商品汇总的记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemAggregate {
    pub item_code: String,

    // ===== 代表值（首个非空）=====
    pub item_name: Option<String>,
    pub uom_group: Option<String>,
    pub item_group_name: Option<String>,
    pub store_classification: Option<String>,
    pub uom: Option<String>,

    // ===== 求和 =====
    pub unit_cost: f64,
    pub sales_offtake: f64,
    pub month_end_inventory: f64,

    // ===== 最大值 =====
    pub mdq: Option<f64>,
    pub total_srp: Option<f64>,
    pub lead_time: Option<f64>,

    pub branch_count: usize,
}

// ==========================================
// Decision - 补货决策结果
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub ave_daily_sales: f64,
    pub days_to_sell: i64,
    pub suggested_po: i64,
    pub conversion: Option<i64>, // MDQ 为 0 时无定义
    pub qty: i64,
    pub total_amount_order: f64,
}

impl Decision {
    /// 是否值得下单（Qty 非 0）
    pub fn is_orderable(&self) -> bool {
        self.qty != 0
    }
}

// ==========================================
// Decided<R> - 记录 + 决策
// ==========================================
// R 为 EnrichedRecord（门店级）或 ItemAggregate（商品级）
#[derive(Debug, Clone, PartialEq)]
pub struct Decided<R> {
    pub record: R,
    pub decision: Decision,
}

impl<R> Decided<R> {
    pub fn new(record: R, decision: Decision) -> Self {
        Self { record, decision }
    }
}
