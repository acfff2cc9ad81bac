// ==========================================
// 门店补货系统 - 引擎层
// ==========================================
// 职责: 补货计算各阶段（全组合 / 关联 / 决策 / 汇总 / 单据）
// 红线: 各阶段为纯函数，不读写文件；I/O 只在编排器 persist 中发生
// ==========================================

pub mod aggregator;
pub mod document;
pub mod enrichment;
pub mod error;
pub mod grid;
pub mod orchestrator;
pub mod replenishment;

// 重导出核心引擎
pub use aggregator::ItemAggregator;
pub use document::DocumentEmitter;
pub use enrichment::{EnrichedTables, EnrichmentJoiner};
pub use error::{PipelineError, PipelineResult};
pub use grid::GridBuilder;
pub use orchestrator::{run_with_config, PipelineOutput, PoPipeline, RunSummary, StageCounts};
pub use replenishment::{ReplenishmentEngine, ReplenishmentInput};
