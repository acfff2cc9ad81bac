// ==========================================
// 门店补货系统 - 字段映射器实现
// ==========================================
// 阶段 1: 源列 → 标准字段映射 + 类型转换
// 源列名与标准列名均可识别（别名）
// ==========================================

use crate::domain::source::{
    RawBranchRow, RawInventoryRow, RawItemRow, RawMdqRow, RawOrderLimitRow, RawSalesRow,
};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{RawRow, RawSheet};

// ==========================================
// 源工作簿中的工作表名
// ==========================================
pub mod sheets {
    pub const SALES: &str = "Sales";
    pub const INVENTORY: &str = "BranchesInventory";
    pub const MDQ: &str = "MDQ";
    pub const BRANCHES: &str = "Branches";
    pub const ORDER_LIMIT: &str = "Ordering Limit";
    pub const ITEM_MASTER: &str = "ItemMaster";
}

// ==========================================
// 标准字段名
// ==========================================
pub mod fields {
    pub const BRANCH_CODE: &str = "BranchCode";
    pub const ITEM_CODE: &str = "ItemCode";
    pub const AVE_MONTHLY_SALES_QTY: &str = "AveMonthlySalesQty";
    pub const QTY_ON_HAND: &str = "QtyOnHand";
    pub const UOM: &str = "UOM";
    pub const MDQ: &str = "MDQ";
    pub const UNIT_COST: &str = "UnitCost";
    pub const TOTAL_SRP: &str = "TotalSRP";
    pub const CARD_NAME: &str = "CardName";
    pub const STORE_CLASSIFICATION: &str = "StoreClassification";
    pub const TYPE: &str = "Type";
    pub const ORDERING_LIMIT: &str = "OrderingLimit";
    pub const LEAD_TIME: &str = "LeadTime";
    pub const ITEM_NAME: &str = "ItemName";
    pub const UOM_GROUP: &str = "UoMGroup";
    pub const BASE_UOM: &str = "BaseUoM";
    pub const ITEM_GROUP_NAME: &str = "ItemGroupName";
}

pub struct FieldMapper;

impl FieldMapper {
    /// 标准字段在指定工作表中可接受的列名（别名）
    fn aliases(sheet: &str, field: &str) -> Vec<&'static str> {
        match (sheet, field) {
            (sheets::SALES, fields::BRANCH_CODE) => vec!["CardCode", "BranchCode"],
            (sheets::INVENTORY, fields::BRANCH_CODE) => vec!["WhsCode", "BranchCode"],
            (sheets::INVENTORY, fields::ITEM_CODE) => vec!["itemcode", "ItemCode"],
            (sheets::MDQ, fields::ITEM_CODE) => vec!["PLU", "ItemCode"],
            (sheets::MDQ, fields::UOM) => vec!["UoM", "UOM"],
            (sheets::MDQ, fields::UNIT_COST) => vec!["SRP", "UnitCost"],
            (sheets::BRANCHES, fields::BRANCH_CODE) => vec!["CardCode", "BranchCode"],
            (sheets::BRANCHES, fields::LEAD_TIME) => vec!["Leadtime", "LeadTime"],
            (sheets::ITEM_MASTER, fields::ITEM_CODE) => vec!["PLU", "ItemCode"],
            (sheets::ITEM_MASTER, fields::ITEM_NAME) => vec!["Description", "ItemName"],
            (_, fields::BRANCH_CODE) => vec!["BranchCode"],
            (_, fields::ITEM_CODE) => vec!["ItemCode"],
            (_, fields::AVE_MONTHLY_SALES_QTY) => vec!["AveMonthlySalesQty"],
            (_, fields::QTY_ON_HAND) => vec!["QtyOnHand"],
            (_, fields::MDQ) => vec!["MDQ"],
            (_, fields::TOTAL_SRP) => vec!["TotalSRP"],
            (_, fields::CARD_NAME) => vec!["CardName"],
            (_, fields::STORE_CLASSIFICATION) => vec!["StoreClassification"],
            (_, fields::TYPE) => vec!["Type"],
            (_, fields::ORDERING_LIMIT) => vec!["OrderingLimit"],
            (_, fields::UOM_GROUP) => vec!["UoMGroup"],
            (_, fields::BASE_UOM) => vec!["BaseUoM"],
            (_, fields::ITEM_GROUP_NAME) => vec!["ItemGroupName"],
            _ => Vec::new(),
        }
    }

    /// 校验工作表包含所有必需字段（任一别名存在即可）
    pub fn require_columns(&self, sheet: &RawSheet, required: &[&str]) -> ImportResult<()> {
        for field in required {
            let found = Self::aliases(&sheet.name, field)
                .iter()
                .any(|alias| sheet.has_column(alias));
            if !found {
                return Err(ImportError::MissingColumn {
                    sheet: sheet.name.clone(),
                    column: field.to_string(),
                });
            }
        }
        Ok(())
    }

    // ==========================================
    // 各工作表映射
    // ==========================================
    // 主键为空的行返回 None（跳过）

    pub fn map_sales(&self, sheet: &RawSheet) -> ImportResult<Vec<RawSalesRow>> {
        self.require_columns(
            sheet,
            &[fields::BRANCH_CODE, fields::ITEM_CODE, fields::AVE_MONTHLY_SALES_QTY],
        )?;

        let mut out = Vec::with_capacity(sheet.rows.len());
        for row in &sheet.rows {
            let (Some(branch_code), Some(item_code)) = (
                self.get_string(sheet, row, fields::BRANCH_CODE),
                self.get_string(sheet, row, fields::ITEM_CODE),
            ) else {
                continue;
            };
            out.push(RawSalesRow {
                branch_code,
                item_code,
                ave_monthly_sales_qty: self.parse_f64(sheet, row, fields::AVE_MONTHLY_SALES_QTY)?,
                row_number: row.row_number,
            });
        }
        Ok(out)
    }

    pub fn map_inventory(&self, sheet: &RawSheet) -> ImportResult<Vec<RawInventoryRow>> {
        self.require_columns(
            sheet,
            &[fields::BRANCH_CODE, fields::ITEM_CODE, fields::QTY_ON_HAND],
        )?;

        let mut out = Vec::with_capacity(sheet.rows.len());
        for row in &sheet.rows {
            let (Some(branch_code), Some(item_code)) = (
                self.get_string(sheet, row, fields::BRANCH_CODE),
                self.get_string(sheet, row, fields::ITEM_CODE),
            ) else {
                continue;
            };
            out.push(RawInventoryRow {
                branch_code,
                item_code,
                qty_on_hand: self.parse_f64(sheet, row, fields::QTY_ON_HAND)?,
                row_number: row.row_number,
            });
        }
        Ok(out)
    }

    pub fn map_mdq(&self, sheet: &RawSheet) -> ImportResult<Vec<RawMdqRow>> {
        self.require_columns(
            sheet,
            &[
                fields::ITEM_CODE,
                fields::UOM,
                fields::MDQ,
                fields::UNIT_COST,
                fields::TOTAL_SRP,
            ],
        )?;

        let mut out = Vec::with_capacity(sheet.rows.len());
        for row in &sheet.rows {
            let Some(item_code) = self.get_string(sheet, row, fields::ITEM_CODE) else {
                continue;
            };
            out.push(RawMdqRow {
                item_code,
                uom: self.get_string(sheet, row, fields::UOM),
                mdq: self.parse_f64(sheet, row, fields::MDQ)?,
                unit_cost: self.parse_f64(sheet, row, fields::UNIT_COST)?,
                total_srp: self.parse_f64(sheet, row, fields::TOTAL_SRP)?,
                row_number: row.row_number,
            });
        }
        Ok(out)
    }

    pub fn map_branches(&self, sheet: &RawSheet) -> ImportResult<Vec<RawBranchRow>> {
        self.require_columns(
            sheet,
            &[
                fields::BRANCH_CODE,
                fields::CARD_NAME,
                fields::STORE_CLASSIFICATION,
                fields::TYPE,
                fields::ORDERING_LIMIT,
                fields::LEAD_TIME,
            ],
        )?;

        let mut out = Vec::with_capacity(sheet.rows.len());
        for row in &sheet.rows {
            let Some(branch_code) = self.get_string(sheet, row, fields::BRANCH_CODE) else {
                continue;
            };
            out.push(RawBranchRow {
                branch_code,
                card_name: self.get_string(sheet, row, fields::CARD_NAME),
                store_classification: self.get_string(sheet, row, fields::STORE_CLASSIFICATION),
                branch_type: self.get_string(sheet, row, fields::TYPE),
                ordering_limit: self.parse_f64(sheet, row, fields::ORDERING_LIMIT)?,
                lead_time: self.parse_f64(sheet, row, fields::LEAD_TIME)?,
                row_number: row.row_number,
            });
        }
        Ok(out)
    }

    pub fn map_order_limits(&self, sheet: &RawSheet) -> ImportResult<Vec<RawOrderLimitRow>> {
        self.require_columns(sheet, &[fields::TYPE, fields::ORDERING_LIMIT])?;

        let mut out = Vec::with_capacity(sheet.rows.len());
        for row in &sheet.rows {
            let Some(branch_type) = self.get_string(sheet, row, fields::TYPE) else {
                continue;
            };
            out.push(RawOrderLimitRow {
                branch_type,
                ordering_limit: self.parse_f64(sheet, row, fields::ORDERING_LIMIT)?,
                row_number: row.row_number,
            });
        }
        Ok(out)
    }

    pub fn map_items(&self, sheet: &RawSheet) -> ImportResult<Vec<RawItemRow>> {
        self.require_columns(
            sheet,
            &[
                fields::ITEM_CODE,
                fields::ITEM_NAME,
                fields::UOM_GROUP,
                fields::BASE_UOM,
                fields::ITEM_GROUP_NAME,
            ],
        )?;

        let mut out = Vec::with_capacity(sheet.rows.len());
        for row in &sheet.rows {
            let Some(item_code) = self.get_string(sheet, row, fields::ITEM_CODE) else {
                continue;
            };
            out.push(RawItemRow {
                item_code,
                item_name: self.get_string(sheet, row, fields::ITEM_NAME),
                uom_group: self.get_string(sheet, row, fields::UOM_GROUP),
                base_uom: self.get_string(sheet, row, fields::BASE_UOM),
                item_group_name: self.get_string(sheet, row, fields::ITEM_GROUP_NAME),
                row_number: row.row_number,
            });
        }
        Ok(out)
    }

    // ==========================================
    // 单元格提取
    // ==========================================

    /// 提取字符串字段（空白视为 None），按别名顺序查找
    fn get_string(&self, sheet: &RawSheet, row: &RawRow, field: &str) -> Option<String> {
        for alias in Self::aliases(&sheet.name, field) {
            if let Some(v) = row.get(alias) {
                let trimmed = v.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
        None
    }

    /// 解析浮点数（仅接受有限值）
    fn parse_f64(&self, sheet: &RawSheet, row: &RawRow, field: &str) -> ImportResult<Option<f64>> {
        match self.get_string(sheet, row, field) {
            None => Ok(None),
            Some(value) => match value.replace(',', "").parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(Some(v)),
                _ => Err(ImportError::TypeConversionError {
                    sheet: sheet.name.clone(),
                    row: row.row_number,
                    field: field.to_string(),
                    message: format!("无法解析为数值: {}", value),
                }),
            },
        }
    }
}
