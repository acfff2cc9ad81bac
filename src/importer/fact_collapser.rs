// ==========================================
// 门店补货系统 - 重复键折叠
// ==========================================
// 阶段 2: 原始行 → 唯一事实
// 规则:
// - 文本字段: 源读取顺序中第一个非空值
// - 数量/金额: 求和（空值按 0 计）或取最大值（忽略空值）
// - 输出顺序: 主键首次出现的顺序
// ==========================================

use crate::domain::source::{
    BranchFact, InventoryFact, ItemFact, MdqFact, OrderLimitFact, RawBranchRow,
    RawInventoryRow, RawItemRow, RawMdqRow, RawOrderLimitRow, RawSalesRow, SalesFact,
};
use std::collections::HashMap;
use std::hash::Hash;

/// 取两个可选值中的较大者（忽略 None）
pub fn max_opt(current: Option<f64>, next: Option<f64>) -> Option<f64> {
    match (current, next) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

/// 首个非空值：已有值时保持不变
pub fn first_non_null(current: &mut Option<String>, next: &Option<String>) {
    if current.is_none() {
        current.clone_from(next);
    }
}

/// 按主键分组折叠，保持首次出现顺序
fn collapse_by_key<R, K, T>(
    rows: &[R],
    key_of: impl Fn(&R) -> K,
    init: impl Fn(&R) -> T,
    mut merge: impl FnMut(&mut T, &R),
) -> Vec<T>
where
    K: Eq + Hash,
{
    let mut index: HashMap<K, usize> = HashMap::with_capacity(rows.len());
    let mut out: Vec<T> = Vec::new();

    for row in rows {
        let key = key_of(row);
        match index.get(&key) {
            Some(&pos) => merge(&mut out[pos], row),
            None => {
                index.insert(key, out.len());
                out.push(init(row));
            }
        }
    }

    out
}

pub struct FactCollapser;

impl FactCollapser {
    /// 销售: (门店, 商品) 求和
    pub fn collapse_sales(&self, rows: &[RawSalesRow]) -> Vec<SalesFact> {
        collapse_by_key(
            rows,
            |r| (r.branch_code.clone(), r.item_code.clone()),
            |r| SalesFact {
                branch_code: r.branch_code.clone(),
                item_code: r.item_code.clone(),
                ave_monthly_sales_qty: r.ave_monthly_sales_qty.unwrap_or(0.0),
            },
            |acc: &mut SalesFact, r: &RawSalesRow| {
                acc.ave_monthly_sales_qty += r.ave_monthly_sales_qty.unwrap_or(0.0)
            },
        )
    }

    /// 库存: (门店, 商品) 求和
    pub fn collapse_inventory(&self, rows: &[RawInventoryRow]) -> Vec<InventoryFact> {
        collapse_by_key(
            rows,
            |r| (r.branch_code.clone(), r.item_code.clone()),
            |r| InventoryFact {
                branch_code: r.branch_code.clone(),
                item_code: r.item_code.clone(),
                qty_on_hand: r.qty_on_hand.unwrap_or(0.0),
            },
            |acc: &mut InventoryFact, r: &RawInventoryRow| {
                acc.qty_on_hand += r.qty_on_hand.unwrap_or(0.0)
            },
        )
    }

    /// MDQ: uom 取首个，mdq/unit_cost 取最大，total_srp 求和
    pub fn collapse_mdq(&self, rows: &[RawMdqRow]) -> Vec<MdqFact> {
        collapse_by_key(
            rows,
            |r| r.item_code.clone(),
            |r| MdqFact {
                item_code: r.item_code.clone(),
                uom: r.uom.clone(),
                mdq: r.mdq,
                unit_cost: r.unit_cost,
                total_srp: r.total_srp.unwrap_or(0.0),
            },
            |acc: &mut MdqFact, r: &RawMdqRow| {
                first_non_null(&mut acc.uom, &r.uom);
                acc.mdq = max_opt(acc.mdq, r.mdq);
                acc.unit_cost = max_opt(acc.unit_cost, r.unit_cost);
                acc.total_srp += r.total_srp.unwrap_or(0.0);
            },
        )
    }

    /// 门店: 文本取首个，lead_time/ordering_limit 取最大
    pub fn collapse_branches(&self, rows: &[RawBranchRow]) -> Vec<BranchFact> {
        collapse_by_key(
            rows,
            |r| r.branch_code.clone(),
            |r| BranchFact {
                branch_code: r.branch_code.clone(),
                card_name: r.card_name.clone(),
                store_classification: r.store_classification.clone(),
                branch_type: r.branch_type.clone(),
                ordering_limit: r.ordering_limit,
                lead_time: r.lead_time,
            },
            |acc: &mut BranchFact, r: &RawBranchRow| {
                first_non_null(&mut acc.card_name, &r.card_name);
                first_non_null(&mut acc.store_classification, &r.store_classification);
                first_non_null(&mut acc.branch_type, &r.branch_type);
                acc.ordering_limit = max_opt(acc.ordering_limit, r.ordering_limit);
                acc.lead_time = max_opt(acc.lead_time, r.lead_time);
            },
        )
    }

    /// 商品: 全部文本取首个
    pub fn collapse_items(&self, rows: &[RawItemRow]) -> Vec<ItemFact> {
        collapse_by_key(
            rows,
            |r| r.item_code.clone(),
            |r| ItemFact {
                item_code: r.item_code.clone(),
                item_name: r.item_name.clone(),
                uom_group: r.uom_group.clone(),
                base_uom: r.base_uom.clone(),
                item_group_name: r.item_group_name.clone(),
            },
            |acc: &mut ItemFact, r: &RawItemRow| {
                first_non_null(&mut acc.item_name, &r.item_name);
                first_non_null(&mut acc.uom_group, &r.uom_group);
                first_non_null(&mut acc.base_uom, &r.base_uom);
                first_non_null(&mut acc.item_group_name, &r.item_group_name);
            },
        )
    }

    /// 订货额度: 按 Type 去重，保留首行
    pub fn collapse_order_limits(&self, rows: &[RawOrderLimitRow]) -> Vec<OrderLimitFact> {
        collapse_by_key(
            rows,
            |r| r.branch_type.clone(),
            |r| OrderLimitFact {
                branch_type: r.branch_type.clone(),
                ordering_limit: r.ordering_limit,
            },
            |acc: &mut OrderLimitFact, r: &RawOrderLimitRow| {
                if acc.ordering_limit.is_none() {
                    acc.ordering_limit = r.ordering_limit;
                }
            },
        )
    }
}
