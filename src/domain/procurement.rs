// ==========================================
// 零售需求引擎 - 采购建议领域模型
// ==========================================
// 职责: 供应商约束参数 + 补货建议
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// ProcurementParams - 商品主数据采购参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcurementParams {
    #[serde(default)]
    pub safety_stock_units: i64,
    /// 未配置时由 AlertGenerator::effective_reorder_point 推导
    #[serde(default)]
    pub reorder_point_units: Option<i64>,
    #[serde(default)]
    pub moq_units: i64,
    #[serde(default = "default_case_pack")]
    pub case_pack: i64,
    #[serde(default)]
    pub lead_time_days: i64,
}

fn default_case_pack() -> i64 {
    1
}

impl Default for ProcurementParams {
    fn default() -> Self {
        Self {
            safety_stock_units: 0,
            reorder_point_units: None,
            moq_units: 0,
            case_pack: default_case_pack(),
            lead_time_days: 0,
        }
    }
}

// ==========================================
// ProcurementInput - Procurement Suggester 输入
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcurementInput {
    pub demand_units_60: f64,
    pub safety_stock_units: i64,
    pub available_units: i64,
    pub on_order_units: i64,
    pub moq_units: i64,
    pub case_pack: i64,
    pub lead_time_days: i64,
}

// ==========================================
// ProcurementSuggestion - 补货建议
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcurementSuggestion {
    pub required_units: i64,
    pub suggested_order_units: i64,
    pub suggested_order_date: Option<NaiveDate>,
    /// 是否被 MOQ 抬升
    pub moq_applied: bool,
    /// 实际使用的箱规 (<=0 按 1)
    pub effective_case_pack: i64,
}

impl ProcurementSuggestion {
    pub fn needs_order(&self) -> bool {
        self.suggested_order_units > 0
    }
}
