// ==========================================
// 零售需求引擎 - 需求融合引擎 (Blended Max)
// ==========================================
// 职责: 融合历史销售 / 加权商机 / 零售商订单 三类信号,
//       生成 30/60/90 天需求预测与置信度
// 输入: DemandInput (含显式传入的 StageWeights 与 as_of)
// 输出: DemandCalculation (预测结果 + 全部中间量)
// 红线: 每个周期的需求不低于任一单项信号 (保守上限策略)
// ==========================================

use crate::config::engine_config::{ConfidenceWeights, HorizonDecay};
use crate::domain::demand::{
    ConfidenceBreakdown, DemandCalculation, DemandEstimate, DemandInput, HorizonDemand,
    OpportunityContribution, OpportunitySignal, ProbabilitySource, RetailerPoLine,
    RetailerPoSummary, SalesDay, StageWeights, TrailingSalesSummary, HORIZONS,
};
use crate::domain::types::{ConfidenceTier, RetailerPoStatus, SignalSource};
use chrono::{Duration, NaiveDate};
use std::collections::BTreeSet;

/// 商机按月口径,周期换算基准
const MONTH_DAYS: f64 = 30.0;

// ==========================================
// DemandBlender - 需求融合引擎
// ==========================================
pub struct DemandBlender {
    weights: ConfidenceWeights,
    decay: HorizonDecay,
}

impl DemandBlender {
    pub fn new(weights: ConfidenceWeights, decay: HorizonDecay) -> Self {
        Self { weights, decay }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 计算需求预测
    ///
    /// 每个周期 H ∈ {30, 60, 90}:
    /// demand_H = max(trailing_H, weighted_opp_H, retailer_po_H)
    pub fn calculate_demand(&self, input: &DemandInput<'_>) -> DemandCalculation {
        // 1. 历史销售
        let trailing = self.summarize_trailing(input.sales_history, input.as_of);

        // 2. 加权商机 (按月)
        let (opportunities, weighted_opp_monthly_units) =
            self.weigh_opportunities(input.opportunity_lines, input.stage_weights);

        // 3. 零售商订单
        let retailer_po = self.summarize_retailer_po(input.retailer_po_lines, input.as_of);

        // 4. 逐周期融合
        let horizons: Vec<HorizonDemand> = HORIZONS
            .iter()
            .map(|&h| {
                let trailing_units = trailing_for_horizon(&trailing, h);
                let opportunity_units = weighted_opp_monthly_units * h as f64 / MONTH_DAYS;
                let retailer_po_units = retailer_po_for_horizon(&retailer_po, h);
                blend(h, trailing_units, opportunity_units, retailer_po_units)
            })
            .collect();

        // 5. 置信度
        // 与 summarize_trailing 同口径: 只看 as_of 及之前的记录
        let has_sales = input
            .sales_history
            .iter()
            .any(|d| d.date <= input.as_of && d.units_sold > 0.0);
        let has_opportunity = opportunities.iter().any(|o| o.weighted_monthly_units > 0.0);
        let has_retailer_po = retailer_po.open_line_count > 0;
        let confidence = self.score_confidence(
            trailing.distinct_selling_days_30,
            has_sales,
            has_opportunity,
            has_retailer_po,
        );

        let estimate = DemandEstimate {
            sku: input.sku.to_string(),
            demand_units_30: horizons[0].demand_units,
            demand_units_60: horizons[1].demand_units,
            demand_units_90: horizons[2].demand_units,
            trailing_30_day_units: trailing.trailing_30_units,
            weighted_opp_units_30: horizons[0].opportunity_units,
            confidence_30: confidence.confidence_30,
            confidence_60: confidence.confidence_60,
            confidence_90: confidence.confidence_90,
        };

        tracing::debug!(
            sku = input.sku,
            demand_30 = estimate.demand_units_30,
            demand_60 = estimate.demand_units_60,
            demand_90 = estimate.demand_units_90,
            confidence_30 = estimate.confidence_30,
            "需求预测完成"
        );

        DemandCalculation {
            estimate,
            trailing,
            opportunities,
            weighted_opp_monthly_units,
            retailer_po,
            horizons,
            confidence,
        }
    }

    // ==========================================
    // 历史销售
    // ==========================================

    /// 汇总历史销售
    ///
    /// 窗口: (as_of - H, as_of],晚于 as_of 的记录忽略
    pub fn summarize_trailing(&self, sales: &[SalesDay], as_of: NaiveDate) -> TrailingSalesSummary {
        let visible: Vec<&SalesDay> = sales.iter().filter(|d| d.date <= as_of).collect();

        let window_start_30 = as_of - Duration::days(30);
        let distinct_selling_days_30 = visible
            .iter()
            .filter(|d| d.date > window_start_30 && d.units_sold > 0.0)
            .map(|d| d.date)
            .collect::<BTreeSet<_>>()
            .len() as u32;

        TrailingSalesSummary {
            trailing_30_units: trailing_units(&visible, as_of, 30),
            trailing_60_units: trailing_units(&visible, as_of, 60),
            trailing_90_units: trailing_units(&visible, as_of, 90),
            distinct_selling_days_30,
            history_record_count: visible.len(),
            first_sale_date: visible.iter().map(|d| d.date).min(),
            last_sale_date: visible.iter().map(|d| d.date).max(),
        }
    }

    // ==========================================
    // 商机管道
    // ==========================================

    /// 加权商机 = Σ expected_monthly_units × 概率/100
    ///
    /// 概率来源: probability_override 优先,其次阶段权重; 未知阶段按 0
    pub fn weigh_opportunities(
        &self,
        lines: &[OpportunitySignal],
        stage_weights: &StageWeights,
    ) -> (Vec<OpportunityContribution>, f64) {
        let contributions: Vec<OpportunityContribution> = lines
            .iter()
            .map(|line| {
                let (probability, probability_source) = match line.probability_override {
                    Some(p) => (p, ProbabilitySource::Override),
                    None => match stage_weights.get(&line.stage) {
                        Some(p) => (p, ProbabilitySource::StageWeight),
                        None => (0.0, ProbabilitySource::UnknownStage),
                    },
                };
                let probability = probability.clamp(0.0, 100.0);
                let expected = line.expected_monthly_units.max(0.0);

                OpportunityContribution {
                    opportunity_id: line.opportunity_id.clone(),
                    stage: line.stage.clone(),
                    expected_monthly_units: expected,
                    probability,
                    probability_source,
                    weighted_monthly_units: expected * probability / 100.0,
                }
            })
            .collect();

        let total = contributions.iter().map(|c| c.weighted_monthly_units).sum();
        (contributions, total)
    }

    // ==========================================
    // 零售商订单
    // ==========================================

    /// 零售商订单按周期汇总
    ///
    /// 只计 status=open; expected_ship_date <= as_of + H 计入该周期 (已逾期的未发订单也计入);
    /// 无发运日期的订单无法落到周期内,只计数不计量
    pub fn summarize_retailer_po(
        &self,
        lines: &[RetailerPoLine],
        as_of: NaiveDate,
    ) -> RetailerPoSummary {
        let open: Vec<&RetailerPoLine> = lines
            .iter()
            .filter(|l| l.status == RetailerPoStatus::Open)
            .collect();

        let due_within = |h: i64| -> f64 {
            let horizon_end = as_of + Duration::days(h);
            open.iter()
                .filter(|l| matches!(l.expected_ship_date, Some(d) if d <= horizon_end))
                .map(|l| l.quantity_units.max(0.0))
                .sum()
        };

        RetailerPoSummary {
            open_line_count: open.len(),
            undated_open_line_count: open.iter().filter(|l| l.expected_ship_date.is_none()).count(),
            units_30: due_within(30),
            units_60: due_within(60),
            units_90: due_within(90),
        }
    }

    // ==========================================
    // 置信度
    // ==========================================

    /// 置信度打分 (0-100)
    ///
    /// score = 密度权重 × density_points + 商机权重 × opportunity_points
    ///       + 信号类型数 × signal_type_points,四舍五入后封顶 100
    /// 60/90 天 = 30 天分值 × 衰减系数
    pub fn score_confidence(
        &self,
        distinct_selling_days_30: u32,
        has_sales: bool,
        has_opportunity: bool,
        has_retailer_po: bool,
    ) -> ConfidenceBreakdown {
        let w = &self.weights;

        let density_weight = if distinct_selling_days_30 >= w.high_density_days {
            w.high_density_weight
        } else if distinct_selling_days_30 >= w.medium_density_days {
            w.medium_density_weight
        } else {
            w.low_density_weight
        };
        let opportunity_weight = if has_opportunity { w.opportunity_weight } else { 0.0 };
        let signal_type_count = [has_sales, has_opportunity, has_retailer_po]
            .iter()
            .filter(|&&present| present)
            .count() as u32;

        let density_points = density_weight * w.density_points;
        let opportunity_points = opportunity_weight * w.opportunity_points;
        let signal_type_points = signal_type_count as f64 * w.signal_type_points;

        let confidence_30 = to_score(density_points + opportunity_points + signal_type_points);
        let confidence_60 = to_score(confidence_30 as f64 * self.decay.decay_60);
        let confidence_90 = to_score(confidence_30 as f64 * self.decay.decay_90);

        ConfidenceBreakdown {
            distinct_selling_days_30,
            density_weight,
            opportunity_weight,
            signal_type_count,
            density_points,
            opportunity_points,
            signal_type_points,
            confidence_30,
            confidence_60,
            confidence_90,
            tier_30: ConfidenceTier::from_score(confidence_30),
        }
    }
}

impl Default for DemandBlender {
    fn default() -> Self {
        Self::new(ConfidenceWeights::default(), HorizonDecay::default())
    }
}

// ==========================================
// 内部函数
// ==========================================

/// 窗口 (as_of - horizon, as_of] 内的销量合计 (净退货不低于 0)
fn trailing_units(visible: &[&SalesDay], as_of: NaiveDate, horizon: i64) -> f64 {
    let window_start = as_of - Duration::days(horizon);
    let total: f64 = visible
        .iter()
        .filter(|d| d.date > window_start)
        .map(|d| d.units_sold)
        .sum();
    total.max(0.0)
}

/// 周期 H 的历史销售贡献
///
/// 取该周期窗口原始合计,并以 trailing_30 × H/30 为下限 (短历史不低估长周期)
fn trailing_for_horizon(trailing: &TrailingSalesSummary, horizon: u32) -> f64 {
    let raw = match horizon {
        30 => trailing.trailing_30_units,
        60 => trailing.trailing_60_units,
        _ => trailing.trailing_90_units,
    };
    let extrapolated = trailing.trailing_30_units * horizon as f64 / MONTH_DAYS;
    raw.max(extrapolated)
}

fn retailer_po_for_horizon(summary: &RetailerPoSummary, horizon: u32) -> f64 {
    match horizon {
        30 => summary.units_30,
        60 => summary.units_60,
        _ => summary.units_90,
    }
}

/// 取三项信号最大值; 并列时按 历史销售 > 商机 > 零售商订单 归因
fn blend(horizon: u32, trailing: f64, opportunity: f64, retailer_po: f64) -> HorizonDemand {
    let demand_units = trailing.max(opportunity).max(retailer_po);

    let driver = if demand_units <= 0.0 {
        SignalSource::None
    } else if trailing >= demand_units {
        SignalSource::TrailingSales
    } else if opportunity >= demand_units {
        SignalSource::Opportunity
    } else {
        SignalSource::RetailerPo
    };

    HorizonDemand {
        horizon_days: horizon,
        trailing_units: trailing,
        opportunity_units: opportunity,
        retailer_po_units: retailer_po,
        demand_units,
        driver,
    }
}

fn to_score(raw: f64) -> u32 {
    raw.round().clamp(0.0, 100.0) as u32
}
