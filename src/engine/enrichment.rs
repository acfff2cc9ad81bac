// ==========================================
// 门店补货系统 - 数据关联（左关联）
// ==========================================
// 步骤:
// 1. 全组合 ⟕ 销售 ⟕ 库存   （键: 门店 + 商品）→ 关联前视图
// 2. 步骤1结果 ⟕ MDQ        （键: 商品）       → 完整视图
// ==========================================
// 红线: 只做左关联，行数与全组合一致，不丢行不重复
// ==========================================

use crate::domain::record::{EnrichedRecord, GridRow};
use crate::domain::source::{InventoryFact, MdqFact, SalesFact};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// 关联结果：MDQ 关联前后两个视图（均用于审计落盘）
#[derive(Debug, Clone)]
pub struct EnrichedTables {
    pub sales_inventory: Vec<EnrichedRecord>,
    pub full: Vec<EnrichedRecord>,
}

pub struct EnrichmentJoiner;

impl EnrichmentJoiner {
    pub fn new() -> Self {
        Self
    }

    /// 执行完整关联
    #[instrument(skip_all, fields(grid = grid.len()))]
    pub fn enrich(
        &self,
        grid: &[GridRow],
        sales: &[SalesFact],
        inventory: &[InventoryFact],
        mdq: &[MdqFact],
    ) -> EnrichedTables {
        let sales_inventory = self.join_sales_inventory(grid, sales, inventory);
        let full = self.join_mdq(&sales_inventory, mdq);

        info!(
            rows = full.len(),
            with_sales = full.iter().filter(|r| r.sales_offtake.is_some()).count(),
            with_inventory = full.iter().filter(|r| r.month_end_inventory.is_some()).count(),
            with_mdq = full.iter().filter(|r| r.mdq.is_some()).count(),
            "数据关联完成"
        );

        EnrichedTables {
            sales_inventory,
            full,
        }
    }

    /// 关联销售与库存（键: 门店 + 商品）
    pub fn join_sales_inventory(
        &self,
        grid: &[GridRow],
        sales: &[SalesFact],
        inventory: &[InventoryFact],
    ) -> Vec<EnrichedRecord> {
        let sales_index: HashMap<(&str, &str), f64> = sales
            .iter()
            .map(|s| {
                (
                    (s.branch_code.as_str(), s.item_code.as_str()),
                    s.ave_monthly_sales_qty,
                )
            })
            .collect();
        let inventory_index: HashMap<(&str, &str), f64> = inventory
            .iter()
            .map(|i| ((i.branch_code.as_str(), i.item_code.as_str()), i.qty_on_hand))
            .collect();

        let records: Vec<EnrichedRecord> = grid
            .iter()
            .map(|row| {
                let key = (row.branch_code(), row.item_code());
                EnrichedRecord {
                    item: Arc::clone(&row.item),
                    branch: Arc::clone(&row.branch),
                    sales_offtake: sales_index.get(&key).copied(),
                    month_end_inventory: inventory_index.get(&key).copied(),
                    mdq: None,
                }
            })
            .collect();

        debug!(rows = records.len(), "销售/库存关联完成");
        records
    }

    /// 关联 MDQ（键: 商品），返回新记录
    pub fn join_mdq(&self, records: &[EnrichedRecord], mdq: &[MdqFact]) -> Vec<EnrichedRecord> {
        let mdq_index: HashMap<&str, Arc<MdqFact>> = mdq
            .iter()
            .map(|m| (m.item_code.as_str(), Arc::new(m.clone())))
            .collect();

        records
            .iter()
            .map(|record| EnrichedRecord {
                mdq: mdq_index.get(record.item_code()).cloned(),
                ..record.clone()
            })
            .collect()
    }

    /// 剔除无门店名称的记录（门店主数据不完整）
    ///
    /// 返回 (保留记录, 剔除行数)
    pub fn retain_named_branches(
        &self,
        records: Vec<EnrichedRecord>,
    ) -> (Vec<EnrichedRecord>, usize) {
        let before = records.len();
        let kept: Vec<EnrichedRecord> = records
            .into_iter()
            .filter(|r| {
                !r.branch.branch_code.is_empty()
                    && r
                        .branch
                        .card_name
                        .as_deref()
                        .is_some_and(|name| !name.is_empty())
            })
            .collect();
        let dropped = before - kept.len();
        (kept, dropped)
    }
}

impl Default for EnrichmentJoiner {
    fn default() -> Self {
        Self::new()
    }
}
