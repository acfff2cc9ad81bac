// ==========================================
// 集成测试公共模块
// ==========================================

#![allow(dead_code)]

pub mod source_builder;

use chrono::NaiveDate;
use po_replenish::PipelineConfig;
use std::path::Path;

/// 固定运行日期
pub fn run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()
}

/// 以临时目录为根的配置（raw / interim / processed）
pub fn test_config(root: &Path) -> PipelineConfig {
    PipelineConfig {
        source_path: root.join("raw"),
        interim_dir: root.join("interim"),
        output_dir: root.join("processed"),
        run_date: Some(run_date()),
        ..PipelineConfig::default()
    }
}

/// 读取 CSV 为行（含表头）
pub fn read_csv(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .unwrap();
    reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}
