// ==========================================
// 门店补货系统 - 调拨申请单生成
// ==========================================
// 输入: 过滤后的门店级决策记录
// 输出: 每个门店一张单据（单据头 + 单据行）
// ==========================================
// 红线: 单号只由 (门店, 运行日期) 决定，同日重跑结果一致
// 无保留记录的门店不生成单据
// ==========================================

use crate::domain::document::{
    format_doc_date, OrderDocument, OrderHeader, OrderLine, POS_TYPE, TRANS_TYPE,
};
use crate::domain::record::{Decided, EnrichedRecord};
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;
use tracing::{info, instrument};

/// 默认发货仓
pub const DEFAULT_WAREHOUSE: &str = "MAIN";

/// 默认到货期限（天）
pub const DEFAULT_DUE_OFFSET_DAYS: i64 = 3;

/// 到货期限上限（天）
pub const MAX_DUE_OFFSET_DAYS: i64 = 365;

pub struct DocumentEmitter {
    warehouse_code: String,
    due_offset_days: i64,
}

impl DocumentEmitter {
    /// 到货期限截断到 [0, MAX_DUE_OFFSET_DAYS]
    pub fn new(warehouse_code: impl Into<String>, due_offset_days: i64) -> Self {
        Self {
            warehouse_code: warehouse_code.into(),
            due_offset_days: due_offset_days.clamp(0, MAX_DUE_OFFSET_DAYS),
        }
    }

    /// 单号: "SR" + 门店 + 日期(MM-DD-YYYY) + 发货仓
    pub fn doc_number(&self, branch_code: &str, run_date: NaiveDate) -> String {
        format!(
            "SR{}{}{}",
            branch_code,
            format_doc_date(run_date),
            self.warehouse_code
        )
    }

    /// 生成单据头
    pub fn header(&self, branch_code: &str, run_date: NaiveDate) -> OrderHeader {
        OrderHeader {
            branch_code: branch_code.to_string(),
            pos_type: POS_TYPE.to_string(),
            trans_type: TRANS_TYPE.to_string(),
            doc_number: self.doc_number(branch_code, run_date),
            from_whse: self.warehouse_code.clone(),
            to_whse: branch_code.to_string(),
            doc_date: run_date,
            doc_due_date: run_date + Duration::days(self.due_offset_days),
            remarks: String::new(),
        }
    }

    fn line(&self, header: &OrderHeader, decided: &Decided<EnrichedRecord>) -> OrderLine {
        let record = &decided.record;
        OrderLine {
            branch_code: header.branch_code.clone(),
            doc_number: header.doc_number.clone(),
            from_whse: header.from_whse.clone(),
            to_whse: header.to_whse.clone(),
            item_code: record.item_code().to_string(),
            item_name: record.item.item_name.clone(),
            uom: record.uom().map(str::to_string),
            unit_cost: record.unit_cost(),
            qty: decided.decision.qty,
            gross_price: 0.0,
            tax_amt: 0.0,
            desc_amt: 0.0,
            net_sales: 0.0,
            gross_sales: 0.0,
        }
    }

    /// 按门店拆分并生成单据（门店代码升序）
    #[instrument(skip_all, fields(records = decided.len(), run_date = %run_date))]
    pub fn emit(
        &self,
        decided: &[Decided<EnrichedRecord>],
        run_date: NaiveDate,
    ) -> Vec<OrderDocument> {
        let mut by_branch: BTreeMap<&str, Vec<&Decided<EnrichedRecord>>> = BTreeMap::new();
        for d in decided.iter().filter(|d| d.decision.is_orderable()) {
            by_branch.entry(d.record.branch_code()).or_default().push(d);
        }

        let documents: Vec<OrderDocument> = by_branch
            .into_iter()
            .map(|(branch_code, records)| {
                let header = self.header(branch_code, run_date);
                let lines = records.iter().map(|d| self.line(&header, d)).collect();
                OrderDocument { header, lines }
            })
            .collect();

        info!(
            documents = documents.len(),
            lines = documents.iter().map(|d| d.lines.len()).sum::<usize>(),
            "调拨申请单生成完成"
        );
        documents
    }
}

impl Default for DocumentEmitter {
    fn default() -> Self {
        Self::new(DEFAULT_WAREHOUSE, DEFAULT_DUE_OFFSET_DAYS)
    }
}
