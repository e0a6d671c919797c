// ==========================================
// 零售需求引擎 - 引擎编排器
// ==========================================
// 用途: 协调五大核心引擎的执行顺序
// 单 SKU 流程:
//   PositionCalculator → AlertGenerator
//   DemandBlender → ProcurementSuggester → ExplanationBuilder
// 红线: 每次调用只依赖显式输入,SKU 之间无共享可变状态
// ==========================================

use crate::config::engine_config::EngineConfig;
use crate::domain::alert::Alert;
use crate::domain::demand::{DemandCalculation, DemandInput, StageWeights};
use crate::domain::explanation::Explanation;
use crate::domain::inventory::Position;
use crate::domain::procurement::{ProcurementInput, ProcurementSuggestion};
use crate::domain::snapshot::{BatchInput, SkuSnapshot};
use crate::domain::types::{RiskFlag, Severity};
use crate::engine::alert::AlertGenerator;
use crate::engine::demand::DemandBlender;
use crate::engine::explanation::{ExplanationBuilder, ExplanationParts};
use crate::engine::position::PositionCalculator;
use crate::engine::procurement::ProcurementSuggester;
use crate::engine::risk_flags::derive_risk_flags;
use crate::perf::PerfGuard;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

// ==========================================
// SkuOutcome - 单 SKU 结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuOutcome {
    pub sku: String,
    pub position: Position,
    pub alerts: Vec<Alert>,
    pub demand: DemandCalculation,
    pub procurement: ProcurementSuggestion,
    pub risk_flags: Vec<RiskFlag>,
    pub explanation: Explanation,
}

// ==========================================
// BatchSummary / BatchReport - 批次结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub sku_count: usize,
    pub critical_alerts: usize,
    pub warning_alerts: usize,
    pub info_alerts: usize,
    /// 建议补货的 SKU
    pub reorder_skus: Vec<String>,
    /// 存在 stockout 风险标记的 SKU
    pub stockout_risk_skus: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub as_of: NaiveDate,
    pub summary: BatchSummary,
    pub results: Vec<SkuOutcome>,
}

// ==========================================
// DemandPipeline - 引擎编排器
// ==========================================
pub struct DemandPipeline {
    position: PositionCalculator,
    alert: AlertGenerator,
    demand: DemandBlender,
    procurement: ProcurementSuggester,
    explanation: ExplanationBuilder,
}

impl DemandPipeline {
    /// 创建编排器
    ///
    /// # 参数
    /// - config: 引擎配置 (已校验)
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            position: PositionCalculator::new(),
            alert: AlertGenerator::new(config.alert.clone()),
            demand: DemandBlender::new(config.confidence.clone(), config.horizon_decay.clone()),
            procurement: ProcurementSuggester::new(),
            explanation: ExplanationBuilder::new(),
        }
    }

    /// 执行单 SKU 完整流程
    ///
    /// # 参数
    /// - snapshot: SKU 输入快照
    /// - stage_weights: 商机阶段概率
    /// - as_of: 计算基准日 (today)
    pub fn run_sku(
        &self,
        snapshot: &SkuSnapshot,
        stage_weights: &StageWeights,
        as_of: NaiveDate,
    ) -> SkuOutcome {
        let sku = snapshot.sku.as_str();
        let params = &snapshot.procurement;

        // ==========================================
        // 步骤1: 库存头寸
        // ==========================================
        let position = self.position.compute_position(
            sku,
            &snapshot.stock_levels,
            &snapshot.locations,
            &snapshot.reservations,
            &snapshot.po_lines,
        );

        // ==========================================
        // 步骤2: 需求预测
        // ==========================================
        let demand = self.demand.calculate_demand(&DemandInput {
            sku,
            as_of,
            sales_history: &snapshot.sales_history,
            opportunity_lines: &snapshot.opportunity_lines,
            retailer_po_lines: &snapshot.retailer_po_lines,
            stage_weights,
        });
        let trailing_30 = demand.estimate.trailing_30_day_units;

        // ==========================================
        // 步骤3: 告警
        // ==========================================
        let reorder_point = self.alert.effective_reorder_point(params, trailing_30);
        let alerts = self.alert.generate_alerts(
            sku,
            position.available_units,
            position.on_order_units,
            params.safety_stock_units,
            reorder_point,
            params.lead_time_days,
            trailing_30,
        );
        let weeks_of_cover = self.alert.weeks_of_cover(position.available_units, trailing_30);

        for alert in &alerts {
            match alert.severity {
                Severity::Critical => warn!(sku, alert_type = %alert.alert_type, "{}", alert.message),
                _ => debug!(sku, alert_type = %alert.alert_type, "{}", alert.message),
            }
        }

        // ==========================================
        // 步骤4: 补货建议
        // ==========================================
        let procurement_input = ProcurementInput {
            demand_units_60: demand.estimate.demand_units_60,
            safety_stock_units: params.safety_stock_units,
            available_units: position.available_units,
            on_order_units: position.on_order_units,
            moq_units: params.moq_units,
            case_pack: params.case_pack,
            lead_time_days: params.lead_time_days,
        };
        let procurement = self
            .procurement
            .compute_procurement_suggestion(&procurement_input, as_of);

        // ==========================================
        // 步骤5: 风险标记 + 解释轨迹
        // ==========================================
        let risk_flags = derive_risk_flags(&demand, position.available_units);
        let explanation = self.explanation.build(&ExplanationParts {
            as_of,
            position: &position,
            weeks_of_cover,
            demand: &demand,
            procurement_input: &procurement_input,
            procurement: &procurement,
            alerts: &alerts,
            risk_flags: &risk_flags,
        });

        SkuOutcome {
            sku: sku.to_string(),
            position,
            alerts,
            demand,
            procurement,
            risk_flags,
            explanation,
        }
    }

    /// 执行批次 (逐 SKU 独立计算)
    #[instrument(skip(self, input), fields(as_of = %input.as_of, sku_count = input.skus.len()))]
    pub fn run_batch(&self, input: &BatchInput) -> BatchReport {
        let perf = PerfGuard::new("run_batch");
        info!("开始执行需求预测批次");

        let results: Vec<SkuOutcome> = input
            .skus
            .iter()
            .map(|snapshot| self.run_sku(snapshot, &input.stage_weights, input.as_of))
            .collect();

        let summary = summarize(&results);
        perf.record_items(results.len());

        info!(
            critical_alerts = summary.critical_alerts,
            warning_alerts = summary.warning_alerts,
            reorder_skus = summary.reorder_skus.len(),
            "需求预测批次完成"
        );

        BatchReport {
            as_of: input.as_of,
            summary,
            results,
        }
    }
}

impl Default for DemandPipeline {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

fn summarize(results: &[SkuOutcome]) -> BatchSummary {
    let mut summary = BatchSummary {
        sku_count: results.len(),
        ..BatchSummary::default()
    };

    for outcome in results {
        for alert in &outcome.alerts {
            match alert.severity {
                Severity::Critical => summary.critical_alerts += 1,
                Severity::Warning => summary.warning_alerts += 1,
                Severity::Info => summary.info_alerts += 1,
            }
        }
        if outcome.procurement.needs_order() {
            summary.reorder_skus.push(outcome.sku.clone());
        }
        if outcome.risk_flags.contains(&RiskFlag::Stockout) {
            summary.stockout_risk_skus.push(outcome.sku.clone());
        }
    }

    summary
}
