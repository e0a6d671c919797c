// ==========================================
// 零售需求引擎 - 解释轨迹构建器
// ==========================================
// 职责: 汇总各引擎已产出的中间量,形成可审计的结构化解释
// 红线: 纯搬运,不重新计算、不近似任何数值
// ==========================================

use crate::domain::alert::Alert;
use crate::domain::demand::DemandCalculation;
use crate::domain::explanation::{
    AlertTrace, Explanation, InventoryTrace, OpportunityTrace, ProcurementTrace,
    METHOD_BLENDED_MAX,
};
use crate::domain::inventory::Position;
use crate::domain::procurement::{ProcurementInput, ProcurementSuggestion};
use crate::domain::types::RiskFlag;
use chrono::NaiveDate;

/// 解释轨迹的全部输入 (均为上游引擎输出)
pub struct ExplanationParts<'a> {
    pub as_of: NaiveDate,
    pub position: &'a Position,
    pub weeks_of_cover: Option<f64>,
    pub demand: &'a DemandCalculation,
    pub procurement_input: &'a ProcurementInput,
    pub procurement: &'a ProcurementSuggestion,
    pub alerts: &'a [Alert],
    pub risk_flags: &'a [RiskFlag],
}

// ==========================================
// ExplanationBuilder - 解释轨迹构建器
// ==========================================
pub struct ExplanationBuilder;

impl ExplanationBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, parts: &ExplanationParts<'_>) -> Explanation {
        let position = parts.position;
        let demand = parts.demand;

        Explanation {
            sku: position.sku.clone(),
            as_of: parts.as_of,
            method: METHOD_BLENDED_MAX.to_string(),
            inventory: InventoryTrace {
                on_hand_units: position.on_hand_units,
                reserved_units: position.reserved_units,
                available_units: position.available_units,
                on_order_units: position.on_order_units,
                in_transit_units: position.in_transit_units,
                weeks_of_cover: parts.weeks_of_cover,
                locations: position.breakdown.clone(),
            },
            trailing_sales: demand.trailing.clone(),
            opportunities: OpportunityTrace {
                lines: demand.opportunities.clone(),
                weighted_monthly_units: demand.weighted_opp_monthly_units,
                weighted_units_30: demand.estimate.weighted_opp_units_30,
            },
            retailer_po: demand.retailer_po.clone(),
            horizons: demand.horizons.clone(),
            confidence: demand.confidence.clone(),
            procurement: ProcurementTrace {
                input: parts.procurement_input.clone(),
                suggestion: parts.procurement.clone(),
            },
            alerts: parts
                .alerts
                .iter()
                .map(|a| AlertTrace {
                    alert_type: a.alert_type,
                    severity: a.severity,
                })
                .collect(),
            risk_flags: parts.risk_flags.to_vec(),
        }
    }
}

impl Default for ExplanationBuilder {
    fn default() -> Self {
        Self::new()
    }
}
