// ==========================================
// 门店补货系统 - 领域模型层
// ==========================================
// 职责: 定义源事实、管道记录、单据实体
// 红线: 不含文件读写逻辑,不含引擎逻辑
// ==========================================

pub mod document;
pub mod record;
pub mod source;

// 重导出核心类型
pub use document::{format_doc_date, OrderDocument, OrderHeader, OrderLine};
pub use record::{Decided, Decision, EnrichedRecord, GridRow, ItemAggregate};
pub use source::{
    BranchFact, InventoryFact, ItemFact, MdqFact, OrderLimitFact, RawBranchRow,
    RawInventoryRow, RawItemRow, RawMdqRow, RawOrderLimitRow, RawSalesRow, SalesFact,
    SourceTables,
};
