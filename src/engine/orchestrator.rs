// ==========================================
// 门店补货系统 - 管道编排器
// ==========================================
// 用途: 串联各阶段并落盘结果
// ==========================================
// 计算主流程:
// 1. Grid        - 门店 × 商品 全组合
// 2. Enrichment  - 左关联销售/库存/MDQ（产出两份审计视图）
// 3. 剔除无名门店
// 4. Aggregator  - 商品级汇总（剔除无名门店后、Qty 过滤前的记录）
// 5. Replenishment - 门店级与商品级决策 + 剔除 Qty=0
// 6. Document    - 按门店生成调拨单
// ==========================================
// 红线: compute 为纯计算；所有文件写出集中在 persist
// ==========================================

use crate::config::PipelineConfig;
use crate::domain::document::OrderDocument;
use crate::domain::record::{Decided, EnrichedRecord, ItemAggregate};
use crate::domain::source::SourceTables;
use crate::engine::aggregator::ItemAggregator;
use crate::engine::document::DocumentEmitter;
use crate::engine::enrichment::{EnrichedTables, EnrichmentJoiner};
use crate::engine::error::PipelineResult;
use crate::engine::grid::GridBuilder;
use crate::engine::replenishment::ReplenishmentEngine;
use crate::export::document_sink::{DocumentSink, WorkbookDocumentSink};
use crate::export::report::ReportBuilder;
use crate::export::writer::{write_json_file, CsvWorkbookWriter, TabularWriter};
use crate::importer::{SourceImporter, SourceWorkbook};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// 运行摘要文件名
pub const RUN_SUMMARY_FILE: &str = "run_summary.json";

// ==========================================
// PipelineOutput - 单次计算结果
// ==========================================
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub run_date: NaiveDate,
    pub grid_rows: usize,
    /// 关联前/后视图（过滤无名门店之前）
    pub enriched: EnrichedTables,
    pub unnamed_branch_rows_dropped: usize,
    /// 参与门店级决策的记录数（过滤 Qty=0 之前）
    pub branch_decisions_total: usize,
    pub branch_orders: Vec<Decided<EnrichedRecord>>,
    pub item_aggregates_total: usize,
    pub item_orders: Vec<Decided<ItemAggregate>>,
    pub documents: Vec<OrderDocument>,
}

// ==========================================
// RunSummary - 运行摘要
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct StageCounts {
    pub branches: usize,
    pub items: usize,
    pub order_limit_types: usize,
    pub sales_facts: usize,
    pub inventory_facts: usize,
    pub mdq_facts: usize,
    pub grid_rows: usize,
    pub enriched_rows: usize,
    pub unnamed_branch_rows_dropped: usize,
    pub branch_decisions: usize,
    pub branch_orders: usize,
    pub item_aggregates: usize,
    pub item_orders: usize,
    pub documents: usize,
    pub document_lines: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub run_date: NaiveDate,
    pub finished_at: DateTime<Utc>,
    pub counts: StageCounts,
    pub files: Vec<PathBuf>,
}

// ==========================================
// PoPipeline - 管道编排器
// ==========================================
pub struct PoPipeline {
    grid: GridBuilder,
    joiner: EnrichmentJoiner,
    engine: ReplenishmentEngine,
    aggregator: ItemAggregator,
    emitter: DocumentEmitter,
    analysis_workbook: String,
}

impl PoPipeline {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            grid: GridBuilder::new(),
            joiner: EnrichmentJoiner::new(),
            engine: ReplenishmentEngine::new(),
            aggregator: ItemAggregator::new(),
            emitter: DocumentEmitter::new(config.warehouse_code.clone(), config.due_offset_days),
            analysis_workbook: config.analysis_workbook.clone(),
        }
    }

    /// 执行全部计算阶段（不落盘）
    #[instrument(skip_all, fields(run_date = %run_date))]
    pub fn compute(&self, tables: &SourceTables, run_date: NaiveDate) -> PipelineOutput {
        // 1. 全组合
        let grid = self.grid.build(&tables.items, &tables.branches);
        info!(
            items = tables.items.len(),
            branches = tables.branches.len(),
            rows = grid.len(),
            "全组合构建完成"
        );

        // 2. 关联
        let enriched =
            self.joiner
                .enrich(&grid, &tables.sales, &tables.inventory, &tables.mdq);

        // 3. 剔除无名门店
        let (named, dropped) = self.joiner.retain_named_branches(enriched.full.clone());
        if dropped > 0 {
            warn!(dropped, "剔除无门店名称的记录");
        }

        // 4. 商品级汇总（已剔除无名门店，Qty 过滤之前）
        let aggregates = self.aggregator.aggregate(&named);

        // 5. 门店级决策
        let decided = self.engine.decide_batch(named);
        let branch_decisions_total = decided.len();
        let branch_orders = self.engine.retain_orderable(decided);

        // 商品级决策
        let item_aggregates_total = aggregates.len();
        let item_orders = self
            .engine
            .retain_orderable(self.engine.decide_batch(aggregates));

        // 6. 调拨单
        let documents = self.emitter.emit(&branch_orders, run_date);

        info!(
            branch_orders = branch_orders.len(),
            item_orders = item_orders.len(),
            documents = documents.len(),
            "补货计算完成"
        );

        PipelineOutput {
            run_date,
            grid_rows: grid.len(),
            enriched,
            unnamed_branch_rows_dropped: dropped,
            branch_decisions_total,
            branch_orders,
            item_aggregates_total,
            item_orders,
            documents,
        }
    }

    /// 落盘审计中间表、分析工作簿与调拨单
    ///
    /// # 返回
    /// 全部写出的文件/目录路径（中间表 → 分析工作簿 → 调拨单）
    #[instrument(skip_all)]
    pub async fn persist(
        &self,
        output: &PipelineOutput,
        interim: &dyn TabularWriter,
        analysis: &dyn TabularWriter,
        documents: &dyn DocumentSink,
    ) -> PipelineResult<Vec<PathBuf>> {
        let mut files = Vec::new();

        files.push(interim.write_table(&ReportBuilder::sales_inventory_table(
            &output.enriched.sales_inventory,
        ))?);
        files.push(interim.write_table(&ReportBuilder::sales_branch_table(&output.enriched.full))?);
        files.push(interim.write_table(&ReportBuilder::join_table(&output.branch_orders))?);

        files.push(analysis.write_workbook(&ReportBuilder::analysis_workbook(
            &self.analysis_workbook,
            &output.item_orders,
            &output.branch_orders,
        ))?);

        files.extend(documents.write_documents(output.documents.clone()).await?);

        info!(files = files.len(), "结果落盘完成");
        Ok(files)
    }

    /// 汇总运行摘要
    pub fn summarize(
        &self,
        tables: &SourceTables,
        output: &PipelineOutput,
        files: Vec<PathBuf>,
    ) -> RunSummary {
        RunSummary {
            run_id: Uuid::new_v4(),
            run_date: output.run_date,
            finished_at: Utc::now(),
            counts: StageCounts {
                branches: tables.branches.len(),
                items: tables.items.len(),
                order_limit_types: tables.order_limits.len(),
                sales_facts: tables.sales.len(),
                inventory_facts: tables.inventory.len(),
                mdq_facts: tables.mdq.len(),
                grid_rows: output.grid_rows,
                enriched_rows: output.enriched.full.len(),
                unnamed_branch_rows_dropped: output.unnamed_branch_rows_dropped,
                branch_decisions: output.branch_decisions_total,
                branch_orders: output.branch_orders.len(),
                item_aggregates: output.item_aggregates_total,
                item_orders: output.item_orders.len(),
                documents: output.documents.len(),
                document_lines: output.documents.iter().map(|d| d.lines.len()).sum(),
            },
            files,
        }
    }
}

/// 按配置执行完整流程: 读取 → 计算 → 落盘 → 运行摘要
///
/// # 参数
/// - today: 配置未指定运行日期时使用
pub async fn run_with_config(config: &PipelineConfig, today: NaiveDate) -> PipelineResult<RunSummary> {
    config.validate()?;
    let run_date = config.resolve_run_date(today);
    info!(
        source = %config.source_path.display(),
        run_date = %run_date,
        "开始补货计算"
    );

    let tables = SourceImporter::new(SourceWorkbook::open(&config.source_path)?).load()?;
    if tables.order_limits.is_empty() {
        warn!("订货额度表为空");
    }

    let pipeline = PoPipeline::new(config);
    let output = pipeline.compute(&tables, run_date);

    let interim = CsvWorkbookWriter::new(&config.interim_dir);
    let analysis = CsvWorkbookWriter::new(&config.output_dir);
    let sink = WorkbookDocumentSink::new(CsvWorkbookWriter::new(config.document_output_dir()));

    let files = pipeline.persist(&output, &interim, &analysis, &sink).await?;
    let summary = pipeline.summarize(&tables, &output, files);

    let summary_path = write_json_file(&config.output_dir.join(RUN_SUMMARY_FILE), &summary)?;
    info!(
        run_id = %summary.run_id,
        summary = %summary_path.display(),
        documents = summary.counts.documents,
        "补货计算结束"
    );

    Ok(summary)
}
