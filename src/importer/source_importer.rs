// ==========================================
// 门店补货系统 - 源数据导入器
// ==========================================
// 导入流程（3个阶段）
// 0. 读取工作表（SheetReader）
// 1. 字段映射与类型转换（FieldMapper）
// 2. 重复键折叠（FactCollapser）
// ==========================================
// 任一阶段失败即整体失败，不产出部分结果
// ==========================================

use crate::domain::source::SourceTables;
use crate::importer::error::ImportResult;
use crate::importer::fact_collapser::FactCollapser;
use crate::importer::field_mapper::{sheets, FieldMapper};
use crate::importer::file_parser::SheetReader;
use tracing::{debug, info, instrument};

pub struct SourceImporter<R>
where
    R: SheetReader,
{
    reader: R,
    mapper: FieldMapper,
    collapser: FactCollapser,
}

impl<R> SourceImporter<R>
where
    R: SheetReader,
{
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            mapper: FieldMapper,
            collapser: FactCollapser,
        }
    }

    /// 读取全部六张源表并折叠为唯一事实
    #[instrument(skip(self))]
    pub fn load(&self) -> ImportResult<SourceTables> {
        let sales_raw = self.mapper.map_sales(&self.reader.read_sheet(sheets::SALES)?)?;
        let sales = self.collapser.collapse_sales(&sales_raw);
        debug!(raw = sales_raw.len(), facts = sales.len(), "销售表折叠完成");

        let inventory_raw = self
            .mapper
            .map_inventory(&self.reader.read_sheet(sheets::INVENTORY)?)?;
        let inventory = self.collapser.collapse_inventory(&inventory_raw);
        debug!(raw = inventory_raw.len(), facts = inventory.len(), "库存表折叠完成");

        let mdq_raw = self.mapper.map_mdq(&self.reader.read_sheet(sheets::MDQ)?)?;
        let mdq = self.collapser.collapse_mdq(&mdq_raw);
        debug!(raw = mdq_raw.len(), facts = mdq.len(), "MDQ 表折叠完成");

        let branch_raw = self
            .mapper
            .map_branches(&self.reader.read_sheet(sheets::BRANCHES)?)?;
        let branches = self.collapser.collapse_branches(&branch_raw);
        debug!(raw = branch_raw.len(), facts = branches.len(), "门店表折叠完成");

        let limit_raw = self
            .mapper
            .map_order_limits(&self.reader.read_sheet(sheets::ORDER_LIMIT)?)?;
        let order_limits = self.collapser.collapse_order_limits(&limit_raw);

        let item_raw = self
            .mapper
            .map_items(&self.reader.read_sheet(sheets::ITEM_MASTER)?)?;
        let items = self.collapser.collapse_items(&item_raw);
        debug!(raw = item_raw.len(), facts = items.len(), "商品表折叠完成");

        info!(
            sales = sales.len(),
            inventory = inventory.len(),
            mdq = mdq.len(),
            branches = branches.len(),
            order_limits = order_limits.len(),
            items = items.len(),
            "源数据导入完成"
        );

        Ok(SourceTables {
            sales,
            inventory,
            mdq,
            branches,
            order_limits,
            items,
        })
    }
}
