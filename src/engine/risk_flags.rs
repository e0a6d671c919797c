// ==========================================
// 零售需求引擎 - 风险标记
// ==========================================
// 职责: 由调用方在需求预测与头寸之后派生风险标记
// ==========================================

use crate::domain::demand::DemandCalculation;
use crate::domain::types::RiskFlag;

/// 低置信度阈值 (30 天)
pub const LOW_CONFIDENCE_THRESHOLD: u32 = 30;

/// 派生风险标记
///
/// - demand_30 > 0 且 available <= 0 → stockout
/// - confidence_30 < 30 → low_confidence
/// - 无任何销售记录 → no_sales_history
pub fn derive_risk_flags(demand: &DemandCalculation, available_units: i64) -> Vec<RiskFlag> {
    let mut flags = Vec::new();

    if demand.estimate.demand_units_30 > 0.0 && available_units <= 0 {
        flags.push(RiskFlag::Stockout);
    }
    if demand.estimate.confidence_30 < LOW_CONFIDENCE_THRESHOLD {
        flags.push(RiskFlag::LowConfidence);
    }
    if demand.trailing.history_record_count == 0 {
        flags.push(RiskFlag::NoSalesHistory);
    }

    flags
}
