// ==========================================
// 门店补货系统 - 核心库
// ==========================================
// 批量计算管道: 源数据 → 全组合 → 关联 → 补货决策 → 汇总 → 调拨单
// 系统定位: 补货建议（单次批量运行，无增量计算）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 事实与记录
pub mod domain;

// 导入层 - 外部源数据
pub mod importer;

// 引擎层 - 补货计算
pub mod engine;

// 输出层 - 报表与单据
pub mod export;

// 配置层 - 运行配置
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{
    Decided, Decision, EnrichedRecord, GridRow, ItemAggregate, OrderDocument, OrderHeader,
    OrderLine, SourceTables,
};

// 引擎
pub use engine::{
    run_with_config, DocumentEmitter, EnrichmentJoiner, GridBuilder, ItemAggregator,
    PipelineError, PoPipeline, ReplenishmentEngine, RunSummary,
};

// 配置
pub use config::PipelineConfig;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "门店补货系统";
