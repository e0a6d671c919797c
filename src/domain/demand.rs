// ==========================================
// 零售需求引擎 - 需求信号领域模型
// ==========================================
// 职责: 销售流水 / 商机管道 / 零售商订单 三类需求信号
//       以及 Demand Blender 的输出与中间量
// ==========================================

use crate::domain::types::{ConfidenceTier, RetailerPoStatus, SignalSource};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 预测周期 (天)
pub const HORIZONS: [u32; 3] = [30, 60, 90];

// ==========================================
// SalesDay - 日销售记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesDay {
    pub date: NaiveDate,
    pub units_sold: f64,
}

// ==========================================
// OpportunitySignal - 商机管道需求
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpportunitySignal {
    #[serde(default)]
    pub opportunity_id: Option<String>,
    pub stage: String,
    pub expected_monthly_units: f64,
    /// 人工覆写概率 (0-100),优先于阶段权重
    #[serde(default)]
    pub probability_override: Option<f64>,
}

// ==========================================
// StageWeights - 商机阶段概率 (0-100)
// ==========================================
// 外部配置,随每次调用显式传入,不做全局缓存
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>")]
pub struct StageWeights(BTreeMap<String, f64>);

/// 阶段名归一化后重复时拒绝 (如 "Proposal" 与 "proposal")
impl TryFrom<BTreeMap<String, f64>> for StageWeights {
    type Error = String;

    fn try_from(raw: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        let mut weights = BTreeMap::new();
        for (stage, p) in raw {
            let key = normalize_stage(&stage);
            if weights.insert(key.clone(), p).is_some() {
                return Err(format!("阶段名归一化后重复: {}", key));
            }
        }
        Ok(Self(weights))
    }
}

impl StageWeights {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// 链式构造
    pub fn with(mut self, stage: &str, probability: f64) -> Self {
        self.insert(stage, probability);
        self
    }

    pub fn insert(&mut self, stage: &str, probability: f64) {
        self.0.insert(normalize_stage(stage), probability);
    }

    /// 查询阶段概率,阶段名大小写/首尾空白不敏感
    pub fn get(&self, stage: &str) -> Option<f64> {
        self.0.get(&normalize_stage(stage)).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &f64)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn normalize_stage(stage: &str) -> String {
    stage.trim().to_lowercase()
}

// ==========================================
// RetailerPoLine - 零售商采购订单行 (需求侧)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetailerPoLine {
    #[serde(default)]
    pub po_number: Option<String>,
    pub quantity_units: f64,
    #[serde(default)]
    pub expected_ship_date: Option<NaiveDate>,
    pub status: RetailerPoStatus,
}

// ==========================================
// DemandInput - Demand Blender 输入
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct DemandInput<'a> {
    pub sku: &'a str,
    pub as_of: NaiveDate,
    pub sales_history: &'a [SalesDay],
    pub opportunity_lines: &'a [OpportunitySignal],
    pub retailer_po_lines: &'a [RetailerPoLine],
    pub stage_weights: &'a StageWeights,
}

// ==========================================
// DemandEstimate - 需求预测结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandEstimate {
    pub sku: String,
    pub demand_units_30: f64,
    pub demand_units_60: f64,
    pub demand_units_90: f64,
    pub trailing_30_day_units: f64,
    pub weighted_opp_units_30: f64,
    pub confidence_30: u32,
    pub confidence_60: u32,
    pub confidence_90: u32,
}

// ==========================================
// 中间量 (供 Explanation Builder 审计)
// ==========================================

/// 历史销售汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailingSalesSummary {
    pub trailing_30_units: f64,
    pub trailing_60_units: f64,
    pub trailing_90_units: f64,
    pub distinct_selling_days_30: u32,
    pub history_record_count: usize,
    pub first_sale_date: Option<NaiveDate>,
    pub last_sale_date: Option<NaiveDate>,
}

/// 概率来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbabilitySource {
    Override,
    StageWeight,
    UnknownStage, // 阶段未配置权重,按 0 计
}

/// 单条商机贡献
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpportunityContribution {
    pub opportunity_id: Option<String>,
    pub stage: String,
    pub expected_monthly_units: f64,
    pub probability: f64,
    pub probability_source: ProbabilitySource,
    pub weighted_monthly_units: f64,
}

/// 零售商订单按周期汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetailerPoSummary {
    pub open_line_count: usize,
    pub undated_open_line_count: usize,
    pub units_30: f64,
    pub units_60: f64,
    pub units_90: f64,
}

/// 单周期 blended max 明细
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizonDemand {
    pub horizon_days: u32,
    pub trailing_units: f64,
    pub opportunity_units: f64,
    pub retailer_po_units: f64,
    pub demand_units: f64,
    pub driver: SignalSource,
}

/// 置信度因子明细
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBreakdown {
    pub distinct_selling_days_30: u32,
    pub density_weight: f64,
    pub opportunity_weight: f64,
    pub signal_type_count: u32,
    pub density_points: f64,
    pub opportunity_points: f64,
    pub signal_type_points: f64,
    pub confidence_30: u32,
    pub confidence_60: u32,
    pub confidence_90: u32,
    pub tier_30: ConfidenceTier,
}

/// Demand Blender 完整输出
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandCalculation {
    pub estimate: DemandEstimate,
    pub trailing: TrailingSalesSummary,
    pub opportunities: Vec<OpportunityContribution>,
    pub weighted_opp_monthly_units: f64,
    pub retailer_po: RetailerPoSummary,
    pub horizons: Vec<HorizonDemand>,
    pub confidence: ConfidenceBreakdown,
}

impl DemandCalculation {
    /// 按周期取 blended 需求
    pub fn demand_for(&self, horizon_days: u32) -> Option<f64> {
        self.horizons
            .iter()
            .find(|h| h.horizon_days == horizon_days)
            .map(|h| h.demand_units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_weights_case_insensitive() {
        let weights = StageWeights::new().with("Proposal", 50.0).with(" closed_won ", 100.0);
        assert_eq!(weights.get("proposal"), Some(50.0));
        assert_eq!(weights.get("CLOSED_WON"), Some(100.0));
        assert_eq!(weights.get("lead"), None);
        assert_eq!(weights.len(), 2);
    }

    #[test]
    fn test_stage_weights_from_json_map() {
        let weights: StageWeights =
            serde_json::from_str(r#"{"qualified": 25, "Negotiation": 75}"#).unwrap();
        assert_eq!(weights.get("negotiation"), Some(75.0));
        assert_eq!(serde_json::to_string(&weights).unwrap(), r#"{"negotiation":75.0,"qualified":25.0}"#);
    }

    #[test]
    fn test_stage_weights_reject_normalized_duplicates() {
        let parsed =
            serde_json::from_str::<StageWeights>(r#"{"Proposal": 40, " proposal": 60}"#);
        let err = parsed.unwrap_err().to_string();
        assert!(err.contains("proposal"));
    }
}
