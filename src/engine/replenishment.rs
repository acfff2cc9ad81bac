// ==========================================
// 门店补货系统 - 补货决策引擎
// ==========================================
// 红线: 纯函数，不读写文件，不抛错
// 门店级与商品级汇总复用同一套规则
// ==========================================
// 决策步骤（顺序执行）:
// 1. 空值填充: 库存/销量/MDQ/TotalSRP 缺失按 0
// 2. AveDailySales = round(销量 / 30, 2)
// 3. DaysToSell    = ceil(库存 / 日均)；日均为 0 时取 0
// 4. SuggestedPO   = 仅当 库存 < 销量 时: round(日均 × 提前期 − 库存)，否则 0
// 5. Conversion    = 仅当 MDQ > 0 时: round(SuggestedPO / MDQ)
// 6. Qty           = Conversion（MDQ 为 0 时按 0）
// 7. TotalAmount   = TotalSRP × Qty
// ==========================================
// 取整: 四舍六入五成双（ties-to-even），与源系统数值库一致
// ==========================================

use crate::domain::record::{Decided, Decision, EnrichedRecord, ItemAggregate};
use tracing::{debug, instrument};

/// 每月天数（日均销量换算）
pub const DAYS_PER_MONTH: f64 = 30.0;

// ==========================================
// ReplenishmentInput Trait
// ==========================================
// 用途: 决策引擎的输入视图
// 实现者: EnrichedRecord（门店级）, ItemAggregate（商品级）
pub trait ReplenishmentInput {
    fn sales_offtake(&self) -> Option<f64>;
    fn month_end_inventory(&self) -> Option<f64>;
    fn mdq(&self) -> Option<f64>;
    fn total_srp(&self) -> Option<f64>;
    fn lead_time(&self) -> Option<f64>;
}

impl ReplenishmentInput for EnrichedRecord {
    fn sales_offtake(&self) -> Option<f64> {
        self.sales_offtake
    }

    fn month_end_inventory(&self) -> Option<f64> {
        self.month_end_inventory
    }

    fn mdq(&self) -> Option<f64> {
        self.mdq_qty()
    }

    fn total_srp(&self) -> Option<f64> {
        EnrichedRecord::total_srp(self)
    }

    fn lead_time(&self) -> Option<f64> {
        self.branch.lead_time
    }
}

impl ReplenishmentInput for ItemAggregate {
    fn sales_offtake(&self) -> Option<f64> {
        Some(self.sales_offtake)
    }

    fn month_end_inventory(&self) -> Option<f64> {
        Some(self.month_end_inventory)
    }

    fn mdq(&self) -> Option<f64> {
        self.mdq
    }

    fn total_srp(&self) -> Option<f64> {
        self.total_srp
    }

    fn lead_time(&self) -> Option<f64> {
        self.lead_time
    }
}

/// 按小数位取整（ties-to-even）
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

// ==========================================
// ReplenishmentEngine - 补货决策引擎
// ==========================================
pub struct ReplenishmentEngine;

impl ReplenishmentEngine {
    pub fn new() -> Self {
        Self
    }

    /// 单条记录决策
    pub fn decide<R: ReplenishmentInput + ?Sized>(&self, record: &R) -> Decision {
        // 1. 空值填充
        let inventory = record.month_end_inventory().unwrap_or(0.0);
        let sales = record.sales_offtake().unwrap_or(0.0);
        let mdq = record.mdq().unwrap_or(0.0);
        let total_srp = record.total_srp().unwrap_or(0.0);
        let lead_time = record.lead_time().unwrap_or(0.0);

        // 2. 日均销量
        let ave_daily_sales = round_to(sales / DAYS_PER_MONTH, 2);

        // 3. 可售天数（日均为 0 时回退为 0）
        let days_to_sell = if ave_daily_sales == 0.0 {
            0
        } else {
            (inventory / ave_daily_sales).ceil() as i64
        };

        // 4. 建议订货量（断货风险闸门）
        // 负值表示库存已覆盖提前期，按 0 处理
        let suggested_po = if inventory < sales {
            (ave_daily_sales * lead_time - inventory)
                .round_ties_even()
                .max(0.0) as i64
        } else {
            0
        };

        // 5. 换算为整包数（MDQ 闸门）
        let conversion = if mdq > 0.0 {
            Some((suggested_po as f64 / mdq).round_ties_even() as i64)
        } else {
            None
        };

        // 6-7. 订货量与金额
        let qty = conversion.unwrap_or(0);
        let total_amount_order = total_srp * qty as f64;

        Decision {
            ave_daily_sales,
            days_to_sell,
            suggested_po,
            conversion,
            qty,
            total_amount_order,
        }
    }

    /// 批量决策（不过滤）
    #[instrument(skip_all, fields(count = records.len()))]
    pub fn decide_batch<R>(&self, records: Vec<R>) -> Vec<Decided<R>>
    where
        R: ReplenishmentInput,
    {
        records
            .into_iter()
            .map(|record| {
                let decision = self.decide(&record);
                Decided::new(record, decision)
            })
            .collect()
    }

    /// 剔除 Qty 为 0 的记录
    pub fn retain_orderable<R>(&self, decided: Vec<Decided<R>>) -> Vec<Decided<R>> {
        let before = decided.len();
        let kept: Vec<Decided<R>> = decided
            .into_iter()
            .filter(|d| d.decision.is_orderable())
            .collect();
        debug!(before, after = kept.len(), "剔除零订货量记录");
        kept
    }
}

impl Default for ReplenishmentEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Input {
        sales: Option<f64>,
        inventory: Option<f64>,
        mdq: Option<f64>,
        total_srp: Option<f64>,
        lead_time: Option<f64>,
    }

    impl ReplenishmentInput for Input {
        fn sales_offtake(&self) -> Option<f64> {
            self.sales
        }
        fn month_end_inventory(&self) -> Option<f64> {
            self.inventory
        }
        fn mdq(&self) -> Option<f64> {
            self.mdq
        }
        fn total_srp(&self) -> Option<f64> {
            self.total_srp
        }
        fn lead_time(&self) -> Option<f64> {
            self.lead_time
        }
    }

    fn input(inventory: f64, sales: f64, lead_time: f64, mdq: f64, total_srp: f64) -> Input {
        Input {
            sales: Some(sales),
            inventory: Some(inventory),
            mdq: Some(mdq),
            total_srp: Some(total_srp),
            lead_time: Some(lead_time),
        }
    }

    #[test]
    fn test_inventory_covering_lead_time_yields_zero() {
        let d = ReplenishmentEngine::new().decide(&input(10.0, 60.0, 5.0, 4.0, 100.0));

        assert_eq!(d.ave_daily_sales, 2.0);
        assert_eq!(d.days_to_sell, 5);
        assert_eq!(d.suggested_po, 0);
        assert_eq!(d.conversion, Some(0));
        assert_eq!(d.qty, 0);
        assert!(!d.is_orderable());
    }

    #[test]
    fn test_low_inventory_orders_whole_packs() {
        let d = ReplenishmentEngine::new().decide(&input(2.0, 60.0, 5.0, 4.0, 100.0));

        assert_eq!(d.suggested_po, 8);
        assert_eq!(d.conversion, Some(2));
        assert_eq!(d.qty, 2);
        assert_eq!(d.total_amount_order, 200.0);
        assert_eq!(d.days_to_sell, 1);
    }

    #[test]
    fn test_stockout_gate_closed_when_inventory_not_below_sales() {
        // 日均 × 提前期 远大于库存，但库存 ≥ 销量，闸门关闭
        let d = ReplenishmentEngine::new().decide(&input(60.0, 60.0, 90.0, 1.0, 10.0));

        assert_eq!(d.suggested_po, 0);
        assert_eq!(d.qty, 0);
    }

    #[test]
    fn test_all_missing_inputs_are_zero_filled() {
        let d = ReplenishmentEngine::new().decide(&Input::default());

        assert_eq!(d.ave_daily_sales, 0.0);
        assert_eq!(d.days_to_sell, 0);
        assert_eq!(d.suggested_po, 0);
        assert_eq!(d.conversion, None);
        assert_eq!(d.qty, 0);
        assert_eq!(d.total_amount_order, 0.0);
    }

    #[test]
    fn test_zero_daily_sales_days_to_sell_fallback() {
        // 销量 0.1/月 → 日均 round(0.0033, 2) = 0
        let d = ReplenishmentEngine::new().decide(&input(5.0, 0.1, 5.0, 1.0, 1.0));

        assert_eq!(d.ave_daily_sales, 0.0);
        assert_eq!(d.days_to_sell, 0);
    }

    #[test]
    fn test_zero_mdq_leaves_conversion_undefined() {
        let d = ReplenishmentEngine::new().decide(&input(0.0, 300.0, 5.0, 0.0, 100.0));

        assert_eq!(d.suggested_po, 50);
        assert_eq!(d.conversion, None);
        assert_eq!(d.qty, 0);
        assert_eq!(d.total_amount_order, 0.0);
    }

    #[test]
    fn test_missing_lead_time_never_orders() {
        let mut i = input(1.0, 300.0, 0.0, 1.0, 10.0);
        i.lead_time = None;

        let d = ReplenishmentEngine::new().decide(&i);

        // round(10 × 0 − 1) = −1 → 截为 0
        assert_eq!(d.suggested_po, 0);
        assert_eq!(d.qty, 0);
    }

    #[test]
    fn test_rounding_is_half_to_even() {
        // 日均 1.0，提前期 2.5 → 2.5 → 2
        let d = ReplenishmentEngine::new().decide(&input(0.0, 30.0, 2.5, 1.0, 1.0));
        assert_eq!(d.suggested_po, 2);

        // SuggestedPO 6 / MDQ 4 = 1.5 → 2
        let d = ReplenishmentEngine::new().decide(&input(0.0, 60.0, 3.0, 4.0, 1.0));
        assert_eq!(d.suggested_po, 6);
        assert_eq!(d.conversion, Some(2));

        // SuggestedPO 10 / MDQ 4 = 2.5 → 2
        let d = ReplenishmentEngine::new().decide(&input(0.0, 60.0, 5.0, 4.0, 1.0));
        assert_eq!(d.conversion, Some(2));
    }

    #[test]
    fn test_ave_daily_sales_two_decimals() {
        let d = ReplenishmentEngine::new().decide(&input(0.0, 100.0, 0.0, 0.0, 0.0));
        assert_eq!(d.ave_daily_sales, 3.33);
    }

    #[test]
    fn test_retain_orderable_drops_zero_qty() {
        let engine = ReplenishmentEngine::new();
        let decided = engine.decide_batch(vec![
            input(10.0, 60.0, 5.0, 4.0, 100.0),
            input(2.0, 60.0, 5.0, 4.0, 100.0),
        ]);

        let kept = engine.retain_orderable(decided);

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].decision.qty, 2);
    }
}
