// ==========================================
// 门店补货系统 - 报表布局
// ==========================================
// 审计中间表: df_sales_inv / df_sales_branch / df_join
// 分析工作簿: groupby_plu_po_analysis / branch_po_analysis
// 调拨单工作簿: TransactionHeader / TransactionLine
// ==========================================
// 约定: 空值输出为空单元格
// ==========================================

use crate::domain::document::{format_doc_date, OrderDocument};
use crate::domain::record::{Decided, Decision, EnrichedRecord, ItemAggregate};
use crate::export::writer::{Sheet, Workbook};

pub const SALES_INVENTORY_TABLE: &str = "df_sales_inv";
pub const SALES_BRANCH_TABLE: &str = "df_sales_branch";
pub const JOIN_TABLE: &str = "df_join";

pub const ITEM_ANALYSIS_SHEET: &str = "groupby_plu_po_analysis";
pub const BRANCH_ANALYSIS_SHEET: &str = "branch_po_analysis";

pub const HEADER_SHEET: &str = "TransactionHeader";
pub const LINE_SHEET: &str = "TransactionLine";

const GRID_COLUMNS: [&str; 13] = [
    "BranchCode",
    "CardName",
    "StoreClassification",
    "Type",
    "OrderingLimit",
    "LeadTime",
    "ItemCode",
    "ItemName",
    "UoMGroup",
    "BaseUoM",
    "ItemGroupName",
    "AveMonthlySalesQty",
    "QtyOnHand",
];

const MDQ_COLUMNS: [&str; 4] = ["UOM", "MDQ", "UnitCost", "TotalSRP"];

const DECISION_COLUMNS: [&str; 6] = [
    "AveDailySales",
    "DaysToSell",
    "SuggestedPO",
    "Conversion",
    "Qty",
    "TotalAmountOrder",
];

const ANALYSIS_COLUMNS: [&str; 17] = [
    "ItemCode",
    "ItemName",
    "UoMGroup",
    "ItemGroupName",
    "StoreClassification",
    "LeadTime",
    "MDQ",
    "AveDailySales",
    "InventoryOnHand",
    "DaysToSell",
    "SuggestedPO",
    "Conversion",
    "UOM",
    "Qty",
    "UnitCost",
    "TotalAmountOrder",
    "SalesOfftake",
];

const HEADER_COLUMNS: [&str; 9] = [
    "BranchCode",
    "POSType",
    "TransType",
    "DocNumber",
    "frmWhse",
    "toWhse",
    "DocDate",
    "DocDueDate",
    "Remarks",
];

const LINE_COLUMNS: [&str; 14] = [
    "BranchCode",
    "DocNumber",
    "frmWhse",
    "toWhse",
    "ItemCode",
    "ItemName",
    "UOM",
    "UnitCost",
    "Qty",
    "GrossPrice",
    "TaxAmt",
    "DescAmt",
    "NetSales",
    "GrossSales",
];

// ===== 单元格格式化 =====

pub fn num_cell(value: f64) -> String {
    value.to_string()
}

pub fn opt_num_cell(value: Option<f64>) -> String {
    value.map(num_cell).unwrap_or_default()
}

pub fn opt_int_cell(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

pub fn text_cell(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

/// 拼接多组列名
fn concat_columns(groups: &[&[&'static str]]) -> Vec<&'static str> {
    groups.iter().flat_map(|g| g.iter().copied()).collect()
}

fn grid_cells(record: &EnrichedRecord) -> Vec<String> {
    let branch = &record.branch;
    let item = &record.item;
    vec![
        branch.branch_code.clone(),
        text_cell(branch.card_name.as_deref()),
        text_cell(branch.store_classification.as_deref()),
        text_cell(branch.branch_type.as_deref()),
        opt_num_cell(branch.ordering_limit),
        opt_num_cell(branch.lead_time),
        item.item_code.clone(),
        text_cell(item.item_name.as_deref()),
        text_cell(item.uom_group.as_deref()),
        text_cell(item.base_uom.as_deref()),
        text_cell(item.item_group_name.as_deref()),
        opt_num_cell(record.sales_offtake),
        opt_num_cell(record.month_end_inventory),
    ]
}

fn mdq_cells(record: &EnrichedRecord) -> Vec<String> {
    vec![
        text_cell(record.uom()),
        opt_num_cell(record.mdq_qty()),
        opt_num_cell(record.unit_cost()),
        opt_num_cell(record.total_srp()),
    ]
}

fn decision_cells(decision: &Decision) -> Vec<String> {
    vec![
        num_cell(decision.ave_daily_sales),
        decision.days_to_sell.to_string(),
        decision.suggested_po.to_string(),
        opt_int_cell(decision.conversion),
        decision.qty.to_string(),
        num_cell(decision.total_amount_order),
    ]
}

/// 分析表公共列（ItemCode ... SalesOfftake）
struct AnalysisCells<'a> {
    item_code: &'a str,
    item_name: Option<&'a str>,
    uom_group: Option<&'a str>,
    item_group_name: Option<&'a str>,
    store_classification: Option<&'a str>,
    lead_time: Option<f64>,
    mdq: Option<f64>,
    inventory: Option<f64>,
    uom: Option<&'a str>,
    unit_cost: Option<f64>,
    sales_offtake: Option<f64>,
}

impl AnalysisCells<'_> {
    fn render(&self, decision: &Decision) -> Vec<String> {
        vec![
            self.item_code.to_string(),
            text_cell(self.item_name),
            text_cell(self.uom_group),
            text_cell(self.item_group_name),
            text_cell(self.store_classification),
            opt_num_cell(self.lead_time),
            opt_num_cell(self.mdq),
            num_cell(decision.ave_daily_sales),
            opt_num_cell(self.inventory),
            decision.days_to_sell.to_string(),
            decision.suggested_po.to_string(),
            opt_int_cell(decision.conversion),
            text_cell(self.uom),
            decision.qty.to_string(),
            opt_num_cell(self.unit_cost),
            num_cell(decision.total_amount_order),
            opt_num_cell(self.sales_offtake),
        ]
    }
}

// ==========================================
// ReportBuilder - 记录 → 工作表
// ==========================================
pub struct ReportBuilder;

impl ReportBuilder {
    /// 关联前视图（df_sales_inv）
    pub fn sales_inventory_table(records: &[EnrichedRecord]) -> Sheet {
        let mut sheet = Sheet::new(SALES_INVENTORY_TABLE, &GRID_COLUMNS);
        for record in records {
            sheet.push_row(grid_cells(record));
        }
        sheet
    }

    /// MDQ 关联后视图（df_sales_branch）
    pub fn sales_branch_table(records: &[EnrichedRecord]) -> Sheet {
        let mut sheet = Sheet::new(
            SALES_BRANCH_TABLE,
            &concat_columns(&[&GRID_COLUMNS[..], &MDQ_COLUMNS[..]]),
        );
        for record in records {
            let mut row = grid_cells(record);
            row.extend(mdq_cells(record));
            sheet.push_row(row);
        }
        sheet
    }

    /// 决策后门店级视图（df_join）
    pub fn join_table(decided: &[Decided<EnrichedRecord>]) -> Sheet {
        let mut sheet = Sheet::new(
            JOIN_TABLE,
            &concat_columns(&[&GRID_COLUMNS[..], &MDQ_COLUMNS[..], &DECISION_COLUMNS[..]]),
        );
        for d in decided {
            let mut row = grid_cells(&d.record);
            row.extend(mdq_cells(&d.record));
            row.extend(decision_cells(&d.decision));
            sheet.push_row(row);
        }
        sheet
    }

    /// 商品级分析表
    pub fn item_analysis_sheet(decided: &[Decided<ItemAggregate>]) -> Sheet {
        let mut sheet = Sheet::new(ITEM_ANALYSIS_SHEET, &ANALYSIS_COLUMNS);
        for d in decided {
            let a = &d.record;
            let cells = AnalysisCells {
                item_code: &a.item_code,
                item_name: a.item_name.as_deref(),
                uom_group: a.uom_group.as_deref(),
                item_group_name: a.item_group_name.as_deref(),
                store_classification: a.store_classification.as_deref(),
                lead_time: a.lead_time,
                mdq: a.mdq,
                inventory: Some(a.month_end_inventory),
                uom: a.uom.as_deref(),
                unit_cost: Some(a.unit_cost),
                sales_offtake: Some(a.sales_offtake),
            };
            sheet.push_row(cells.render(&d.decision));
        }
        sheet
    }

    /// 门店级分析表（前置 BranchCode, CardName）
    pub fn branch_analysis_sheet(decided: &[Decided<EnrichedRecord>]) -> Sheet {
        let mut sheet = Sheet::new(
            BRANCH_ANALYSIS_SHEET,
            &concat_columns(&[&["BranchCode", "CardName"][..], &ANALYSIS_COLUMNS[..]]),
        );
        for d in decided {
            let r = &d.record;
            let cells = AnalysisCells {
                item_code: r.item_code(),
                item_name: r.item.item_name.as_deref(),
                uom_group: r.item.uom_group.as_deref(),
                item_group_name: r.item.item_group_name.as_deref(),
                store_classification: r.branch.store_classification.as_deref(),
                lead_time: r.branch.lead_time,
                mdq: r.mdq_qty(),
                inventory: r.month_end_inventory,
                uom: r.uom(),
                unit_cost: r.unit_cost(),
                sales_offtake: r.sales_offtake,
            };
            let mut row = vec![
                r.branch_code().to_string(),
                text_cell(r.branch.card_name.as_deref()),
            ];
            row.extend(cells.render(&d.decision));
            sheet.push_row(row);
        }
        sheet
    }

    /// 分析工作簿（商品级 + 门店级）
    pub fn analysis_workbook(
        name: &str,
        items: &[Decided<ItemAggregate>],
        branches: &[Decided<EnrichedRecord>],
    ) -> Workbook {
        Workbook {
            name: name.to_string(),
            sheets: vec![
                Self::item_analysis_sheet(items),
                Self::branch_analysis_sheet(branches),
            ],
        }
    }

    /// 单门店调拨单工作簿
    pub fn document_workbook(document: &OrderDocument) -> Workbook {
        let h = &document.header;

        let mut header = Sheet::new(HEADER_SHEET, &HEADER_COLUMNS);
        header.push_row(vec![
            h.branch_code.clone(),
            h.pos_type.clone(),
            h.trans_type.clone(),
            h.doc_number.clone(),
            h.from_whse.clone(),
            h.to_whse.clone(),
            format_doc_date(h.doc_date),
            format_doc_date(h.doc_due_date),
            h.remarks.clone(),
        ]);

        let mut lines = Sheet::new(LINE_SHEET, &LINE_COLUMNS);
        for l in &document.lines {
            lines.push_row(vec![
                l.branch_code.clone(),
                l.doc_number.clone(),
                l.from_whse.clone(),
                l.to_whse.clone(),
                l.item_code.clone(),
                text_cell(l.item_name.as_deref()),
                text_cell(l.uom.as_deref()),
                opt_num_cell(l.unit_cost),
                l.qty.to_string(),
                num_cell(l.gross_price),
                num_cell(l.tax_amt),
                num_cell(l.desc_amt),
                num_cell(l.net_sales),
                num_cell(l.gross_sales),
            ]);
        }

        Workbook {
            name: document.file_stem(),
            sheets: vec![header, lines],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::source::{BranchFact, ItemFact, MdqFact};
    use crate::engine::document::DocumentEmitter;
    use crate::engine::replenishment::ReplenishmentEngine;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn record(inventory: Option<f64>, with_mdq: bool) -> EnrichedRecord {
        EnrichedRecord {
            item: Arc::new(ItemFact {
                item_code: "ITM1".into(),
                item_name: Some("Widget".into()),
                uom_group: Some("EA".into()),
                base_uom: Some("PC".into()),
                item_group_name: None,
            }),
            branch: Arc::new(BranchFact {
                branch_code: "01-00002".into(),
                card_name: Some("Store Two".into()),
                store_classification: Some("A".into()),
                branch_type: Some("Mall".into()),
                ordering_limit: None,
                lead_time: Some(5.0),
            }),
            sales_offtake: Some(60.0),
            month_end_inventory: inventory,
            mdq: with_mdq.then(|| {
                Arc::new(MdqFact {
                    item_code: "ITM1".into(),
                    uom: Some("PACK".into()),
                    mdq: Some(4.0),
                    unit_cost: Some(25.0),
                    total_srp: 100.0,
                })
            }),
        }
    }

    #[test]
    fn test_sales_inventory_table_renders_nulls_as_empty() {
        let sheet = ReportBuilder::sales_inventory_table(&[record(None, false)]);

        assert_eq!(sheet.name, "df_sales_inv");
        assert_eq!(sheet.headers.len(), 13);
        let row = &sheet.rows[0];
        assert_eq!(row[0], "01-00002");
        assert_eq!(row[4], ""); // OrderingLimit
        assert_eq!(row[5], "5");
        assert_eq!(row[10], ""); // ItemGroupName
        assert_eq!(row[11], "60");
        assert_eq!(row[12], "");
        assert!(sheet.validate().is_ok());
    }

    #[test]
    fn test_join_table_has_decision_columns() {
        let engine = ReplenishmentEngine::new();
        let decided = engine.decide_batch(vec![record(Some(2.0), true)]);

        let sheet = ReportBuilder::join_table(&decided);

        assert_eq!(sheet.headers.len(), 13 + 4 + 6);
        assert_eq!(sheet.headers.last().map(String::as_str), Some("TotalAmountOrder"));
        let row = &sheet.rows[0];
        assert_eq!(row[13], "PACK");
        assert_eq!(row[19], "8"); // SuggestedPO
        assert_eq!(row[21], "2"); // Qty
        assert_eq!(row[22], "200");
        assert!(sheet.validate().is_ok());
    }

    #[test]
    fn test_branch_analysis_sheet_prefixes_branch_columns() {
        let decided = ReplenishmentEngine::new().decide_batch(vec![record(Some(2.0), true)]);

        let sheet = ReportBuilder::branch_analysis_sheet(&decided);

        assert_eq!(&sheet.headers[..3], ["BranchCode", "CardName", "ItemCode"]);
        assert_eq!(sheet.rows[0][1], "Store Two");
        assert_eq!(sheet.rows[0][2], "ITM1");
        assert!(sheet.validate().is_ok());
    }

    #[test]
    fn test_undefined_conversion_renders_empty() {
        let decided = ReplenishmentEngine::new().decide_batch(vec![record(Some(2.0), false)]);

        let sheet = ReportBuilder::branch_analysis_sheet(&decided);

        let conversion_col = sheet.headers.iter().position(|h| h == "Conversion").unwrap();
        assert_eq!(sheet.rows[0][conversion_col], "");
    }

    #[test]
    fn test_document_workbook_layout() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        let decided = ReplenishmentEngine::new().decide_batch(vec![record(Some(2.0), true)]);
        let documents = DocumentEmitter::default().emit(&decided, date);

        let workbook = ReportBuilder::document_workbook(&documents[0]);

        assert_eq!(workbook.name, "po_01-00002_10-15-2026_SR01-0000210-15-2026MAIN");
        assert_eq!(workbook.sheets[0].name, "TransactionHeader");
        assert_eq!(workbook.sheets[0].rows.len(), 1);
        assert_eq!(workbook.sheets[0].rows[0][6], "10-15-2026");
        assert_eq!(workbook.sheets[0].rows[0][7], "10-18-2026");
        assert_eq!(workbook.sheets[1].name, "TransactionLine");
        assert_eq!(workbook.sheets[1].rows[0][8], "2");
        assert_eq!(workbook.sheets[1].rows[0][13], "0");
    }
}
