// ==========================================
// 门店补货系统 - 命令行入口
// ==========================================
// 用法: po-replenish [配置文件路径]
// 未指定配置文件时使用用户配置目录下的 config.json（可选）
// ==========================================

use anyhow::Context;
use chrono::Local;
use po_replenish::{logging, run_with_config, PipelineConfig};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", po_replenish::APP_NAME);
    tracing::info!("系统版本: {}", po_replenish::VERSION);
    tracing::info!("==================================================");

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = PipelineConfig::load(config_path.as_deref()).context("加载配置失败")?;

    let summary = run_with_config(&config, Local::now().date_naive())
        .await
        .context("补货计算失败")?;

    tracing::info!(
        run_id = %summary.run_id,
        branch_orders = summary.counts.branch_orders,
        item_orders = summary.counts.item_orders,
        documents = summary.counts.documents,
        "运行完成"
    );

    Ok(())
}
