// ==========================================
// 源数据构建器 - 用于集成测试
// ==========================================
// 以 SAP 导出原始列名写出 CSV 源目录（每个工作表一个 <Sheet>.csv）
// ==========================================

use std::fs;
use std::path::Path;

const SALES_HEADERS: &str = "CardCode,ItemCode,AveMonthlySalesQty";
const INVENTORY_HEADERS: &str = "WhsCode,itemcode,QtyOnHand";
const MDQ_HEADERS: &str = "PLU,UoM,MDQ,SRP,TotalSRP";
const BRANCH_HEADERS: &str = "CardCode,CardName,StoreClassification,Type,OrderingLimit,Leadtime";
const ORDER_LIMIT_HEADERS: &str = "Type,OrderingLimit";
const ITEM_HEADERS: &str = "PLU,Description,UoMGroup,BaseUoM,ItemGroupName";

#[derive(Default)]
pub struct SourceDirBuilder {
    sales: Vec<String>,
    inventory: Vec<String>,
    mdq: Vec<String>,
    branches: Vec<String>,
    order_limits: Vec<String>,
    items: Vec<String>,
    skip_sheet: Option<&'static str>,
}

impl SourceDirBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sale(mut self, branch: &str, item: &str, qty: &str) -> Self {
        self.sales.push(format!("{},{},{}", branch, item, qty));
        self
    }

    pub fn inventory(mut self, branch: &str, item: &str, qty: &str) -> Self {
        self.inventory.push(format!("{},{},{}", branch, item, qty));
        self
    }

    pub fn mdq(mut self, item: &str, uom: &str, mdq: &str, srp: &str, total_srp: &str) -> Self {
        self.mdq
            .push(format!("{},{},{},{},{}", item, uom, mdq, srp, total_srp));
        self
    }

    pub fn branch(mut self, code: &str, name: &str, lead_time: &str) -> Self {
        self.branches
            .push(format!("{},{},A,MALL,50000,{}", code, name, lead_time));
        self
    }

    pub fn order_limit(mut self, branch_type: &str, limit: &str) -> Self {
        self.order_limits.push(format!("{},{}", branch_type, limit));
        self
    }

    pub fn item(mut self, code: &str, name: &str) -> Self {
        self.items
            .push(format!("{},{},EA,PC,General", code, name));
        self
    }

    /// 不写出指定工作表（模拟缺表）
    pub fn without_sheet(mut self, sheet: &'static str) -> Self {
        self.skip_sheet = Some(sheet);
        self
    }

    pub fn write(&self, dir: &Path) {
        fs::create_dir_all(dir).unwrap();
        let sheets: [(&str, &str, &Vec<String>); 6] = [
            ("Sales", SALES_HEADERS, &self.sales),
            ("BranchesInventory", INVENTORY_HEADERS, &self.inventory),
            ("MDQ", MDQ_HEADERS, &self.mdq),
            ("Branches", BRANCH_HEADERS, &self.branches),
            ("Ordering Limit", ORDER_LIMIT_HEADERS, &self.order_limits),
            ("ItemMaster", ITEM_HEADERS, &self.items),
        ];
        for (name, headers, rows) in sheets {
            if self.skip_sheet == Some(name) {
                continue;
            }
            let mut content = String::from(headers);
            content.push('\n');
            for row in rows {
                content.push_str(row);
                content.push('\n');
            }
            fs::write(dir.join(format!("{}.csv", name)), content).unwrap();
        }
    }
}

/// 单门店单商品场景: 销量 60，提前期 5，MDQ 4，TotalSRP 100
pub fn single_branch_scenario(inventory: &str) -> SourceDirBuilder {
    SourceDirBuilder::new()
        .branch("01-00002", "Store Two", "5")
        .item("ITM1", "Widget")
        .sale("01-00002", "ITM1", "60")
        .inventory("01-00002", "ITM1", inventory)
        .mdq("ITM1", "PACK", "4", "25", "100")
        .order_limit("MALL", "50000")
}
