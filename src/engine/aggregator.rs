// ==========================================
// 门店补货系统 - 全网商品级汇总
// ==========================================
// 输入: 过滤前的门店级关联记录
// 汇总规则（按 ItemCode 分组）:
// - UnitCost / 销量 / 库存: 求和（空值按 0）
// - MDQ / TotalSRP / LeadTime: 最大值
// - 文本字段: 首个非空值
// ==========================================
// 说明: 仅用于报表视图，不与门店级决策对账
// ==========================================

use crate::domain::record::{EnrichedRecord, ItemAggregate};
use crate::importer::fact_collapser::{first_non_null, max_opt};
use std::collections::HashMap;
use tracing::{debug, instrument};

pub struct ItemAggregator;

impl ItemAggregator {
    pub fn new() -> Self {
        Self
    }

    /// 按商品汇总，输出顺序为商品首次出现顺序
    #[instrument(skip_all, fields(records = records.len()))]
    pub fn aggregate(&self, records: &[EnrichedRecord]) -> Vec<ItemAggregate> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut out: Vec<ItemAggregate> = Vec::new();

        for record in records {
            let pos = *index.entry(record.item_code()).or_insert_with(|| {
                out.push(ItemAggregate {
                    item_code: record.item_code().to_string(),
                    item_name: None,
                    uom_group: None,
                    item_group_name: None,
                    store_classification: None,
                    uom: None,
                    unit_cost: 0.0,
                    sales_offtake: 0.0,
                    month_end_inventory: 0.0,
                    mdq: None,
                    total_srp: None,
                    lead_time: None,
                    branch_count: 0,
                });
                out.len() - 1
            });

            let acc = &mut out[pos];

            first_non_null(&mut acc.item_name, &record.item.item_name);
            first_non_null(&mut acc.uom_group, &record.item.uom_group);
            first_non_null(&mut acc.item_group_name, &record.item.item_group_name);
            first_non_null(
                &mut acc.store_classification,
                &record.branch.store_classification,
            );
            if acc.uom.is_none() {
                acc.uom = record.uom().map(str::to_string);
            }

            acc.unit_cost += record.unit_cost().unwrap_or(0.0);
            acc.sales_offtake += record.sales_offtake.unwrap_or(0.0);
            acc.month_end_inventory += record.month_end_inventory.unwrap_or(0.0);

            acc.mdq = max_opt(acc.mdq, record.mdq_qty());
            acc.total_srp = max_opt(acc.total_srp, record.total_srp());
            acc.lead_time = max_opt(acc.lead_time, record.branch.lead_time);

            acc.branch_count += 1;
        }

        debug!(items = out.len(), "商品级汇总完成");
        out
    }
}

impl Default for ItemAggregator {
    fn default() -> Self {
        Self::new()
    }
}
