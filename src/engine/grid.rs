// ==========================================
// 门店补货系统 - 门店 × 商品 全组合构建
// ==========================================
// 红线: 全组合必须完整且唯一，不做任何过滤
// 输出顺序: 商品优先，门店按输入顺序
// ==========================================

use crate::domain::record::GridRow;
use crate::domain::source::{BranchFact, ItemFact};
use std::sync::Arc;
use tracing::{debug, instrument};

pub struct GridBuilder;

impl GridBuilder {
    pub fn new() -> Self {
        Self
    }

    /// 构建 |items| × |branches| 的全组合
    ///
    /// 任一输入为空时返回空集合（非错误）
    #[instrument(skip_all, fields(items = items.len(), branches = branches.len()))]
    pub fn build(&self, items: &[ItemFact], branches: &[BranchFact]) -> Vec<GridRow> {
        let items: Vec<Arc<ItemFact>> = items.iter().cloned().map(Arc::new).collect();
        let branches: Vec<Arc<BranchFact>> = branches.iter().cloned().map(Arc::new).collect();

        let grid: Vec<GridRow> = items
            .iter()
            .flat_map(|item| {
                branches.iter().map(move |branch| GridRow {
                    item: Arc::clone(item),
                    branch: Arc::clone(branch),
                })
            })
            .collect();

        debug!(rows = grid.len(), "全组合构建完成");
        grid
    }
}

impl Default for GridBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn item(code: &str) -> ItemFact {
        ItemFact {
            item_code: code.to_string(),
            item_name: None,
            uom_group: None,
            base_uom: None,
            item_group_name: None,
        }
    }

    fn branch(code: &str) -> BranchFact {
        BranchFact {
            branch_code: code.to_string(),
            card_name: Some(format!("Store {}", code)),
            store_classification: None,
            branch_type: None,
            ordering_limit: None,
            lead_time: Some(5.0),
        }
    }

    #[test]
    fn test_grid_is_total_and_exact() {
        let items = vec![item("I1"), item("I2"), item("I3")];
        let branches = vec![branch("B1"), branch("B2")];

        let grid = GridBuilder::new().build(&items, &branches);

        assert_eq!(grid.len(), 6);
        let pairs: HashSet<(String, String)> = grid
            .iter()
            .map(|r| (r.branch_code().to_string(), r.item_code().to_string()))
            .collect();
        assert_eq!(pairs.len(), 6);
        for i in &items {
            for b in &branches {
                assert!(pairs.contains(&(b.branch_code.clone(), i.item_code.clone())));
            }
        }
    }

    #[test]
    fn test_empty_input_yields_empty_grid() {
        let builder = GridBuilder::new();
        assert!(builder.build(&[], &[branch("B1")]).is_empty());
        assert!(builder.build(&[item("I1")], &[]).is_empty());
    }

    #[test]
    fn test_grid_shares_fact_instances() {
        let grid = GridBuilder::new().build(&[item("I1")], &[branch("B1"), branch("B2")]);

        assert!(Arc::ptr_eq(&grid[0].item, &grid[1].item));
        assert!(!Arc::ptr_eq(&grid[0].branch, &grid[1].branch));
    }
}
