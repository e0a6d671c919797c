// ==========================================
// 零售需求引擎 - 解释轨迹领域模型
// ==========================================
// 用途: 展示 / 调试 / 审计
// 红线: 每个数值都来自上游已算出的字段,此处不做任何计算
// ==========================================

use crate::domain::demand::{
    ConfidenceBreakdown, HorizonDemand, OpportunityContribution, RetailerPoSummary,
    TrailingSalesSummary,
};
use crate::domain::inventory::LocationBreakdown;
use crate::domain::procurement::{ProcurementInput, ProcurementSuggestion};
use crate::domain::types::{AlertType, RiskFlag, Severity};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 预测方法标识
pub const METHOD_BLENDED_MAX: &str = "blended_max";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryTrace {
    pub on_hand_units: i64,
    pub reserved_units: i64,
    pub available_units: i64,
    pub on_order_units: i64,
    pub in_transit_units: i64,
    /// None 表示无销量 (覆盖周数无穷大)
    pub weeks_of_cover: Option<f64>,
    pub locations: Vec<LocationBreakdown>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpportunityTrace {
    pub lines: Vec<OpportunityContribution>,
    pub weighted_monthly_units: f64,
    pub weighted_units_30: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcurementTrace {
    pub input: ProcurementInput,
    pub suggestion: ProcurementSuggestion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertTrace {
    pub alert_type: AlertType,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub sku: String,
    pub as_of: NaiveDate,
    pub method: String,
    pub inventory: InventoryTrace,
    pub trailing_sales: TrailingSalesSummary,
    pub opportunities: OpportunityTrace,
    pub retailer_po: RetailerPoSummary,
    pub horizons: Vec<HorizonDemand>,
    pub confidence: ConfidenceBreakdown,
    pub procurement: ProcurementTrace,
    pub alerts: Vec<AlertTrace>,
    pub risk_flags: Vec<RiskFlag>,
}
