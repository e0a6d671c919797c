// ==========================================
// DemandBlender 引擎集成测试
// ==========================================
// 测试目标: 验证 blended max 需求融合与置信度打分
// 覆盖范围: 历史销售窗口 / 商机加权 / 零售商订单周期 / 置信度档位
// ==========================================

#[path = "helpers/test_data_builder.rs"]
mod test_data_builder;

use chrono::Duration;
use retail_demand_engine::domain::demand::{DemandCalculation, DemandInput, ProbabilitySource};
use retail_demand_engine::domain::snapshot::SkuSnapshot;
use retail_demand_engine::domain::types::{ConfidenceTier, RetailerPoStatus, SignalSource};
use retail_demand_engine::engine::DemandBlender;
use test_data_builder::{as_of, default_stage_weights, SkuSnapshotBuilder};

fn calculate(snapshot: &SkuSnapshot) -> DemandCalculation {
    let weights = default_stage_weights();
    DemandBlender::default().calculate_demand(&DemandInput {
        sku: &snapshot.sku,
        as_of: as_of(),
        sales_history: &snapshot.sales_history,
        opportunity_lines: &snapshot.opportunity_lines,
        retailer_po_lines: &snapshot.retailer_po_lines,
        stage_weights: &weights,
    })
}

#[test]
fn test_no_signals_lowest_confidence_tier() {
    let calc = calculate(&SkuSnapshotBuilder::new("SKU-E").build());

    assert_eq!(calc.estimate.demand_units_30, 0.0);
    assert_eq!(calc.estimate.demand_units_90, 0.0);
    assert_eq!(calc.confidence.signal_type_count, 0);
    assert_eq!(calc.confidence.tier_30, ConfidenceTier::Low);
    // 低密度 0.2 × 50
    assert_eq!(calc.estimate.confidence_30, 10);
    assert!(calc.horizons.iter().all(|h| h.driver == SignalSource::None));
}

#[test]
fn test_no_signals_low_tier_regardless_of_procurement_fields() {
    let snapshot = SkuSnapshotBuilder::new("SKU-E")
        .stock("WH1", 5_000)
        .safety_stock(500)
        .moq(1_000)
        .case_pack(48)
        .lead_time(90)
        .build();

    assert_eq!(calculate(&snapshot).confidence.tier_30, ConfidenceTier::Low);
}

#[test]
fn test_blended_max_never_below_any_signal() {
    let cases = vec![
        SkuSnapshotBuilder::new("S1").daily_sales(as_of(), 30, 4.0).build(),
        SkuSnapshotBuilder::new("S2").opportunity("negotiation", 400.0).build(),
        SkuSnapshotBuilder::new("S3")
            .retailer_po(900.0, Some(as_of() + Duration::days(50)), RetailerPoStatus::Open)
            .build(),
        SkuSnapshotBuilder::new("S4")
            .daily_sales(as_of(), 90, 1.5)
            .opportunity("proposal", 120.0)
            .retailer_po(70.0, Some(as_of() + Duration::days(10)), RetailerPoStatus::Open)
            .build(),
    ];

    for snapshot in &cases {
        let calc = calculate(snapshot);
        for h in &calc.horizons {
            assert!(h.demand_units >= h.trailing_units, "{} H{}", snapshot.sku, h.horizon_days);
            assert!(h.demand_units >= h.opportunity_units, "{} H{}", snapshot.sku, h.horizon_days);
            assert!(h.demand_units >= h.retailer_po_units, "{} H{}", snapshot.sku, h.horizon_days);
        }
        assert_eq!(Some(calc.estimate.demand_units_60), calc.demand_for(60));
    }
}

#[test]
fn test_short_history_extrapolates_to_longer_horizons() {
    // 仅 30 天历史,每天 2 件
    let snapshot = SkuSnapshotBuilder::new("SKU-1").daily_sales(as_of(), 30, 2.0).build();
    let calc = calculate(&snapshot);

    assert_eq!(calc.trailing.trailing_30_units, 60.0);
    assert_eq!(calc.trailing.trailing_60_units, 60.0);
    assert_eq!(calc.horizons[1].trailing_units, 120.0);
    assert_eq!(calc.horizons[2].trailing_units, 180.0);
    assert_eq!(calc.horizons[1].driver, SignalSource::TrailingSales);
}

#[test]
fn test_full_history_uses_raw_window_sum() {
    // 前 60 天每天 3 件,最近 30 天每天 1 件
    let snapshot = SkuSnapshotBuilder::new("SKU-1")
        .daily_sales(as_of(), 30, 1.0)
        .daily_sales(as_of() - Duration::days(30), 60, 3.0)
        .build();
    let calc = calculate(&snapshot);

    assert_eq!(calc.trailing.trailing_30_units, 30.0);
    assert_eq!(calc.trailing.trailing_90_units, 210.0);
    assert_eq!(calc.estimate.demand_units_90, 210.0);
}

#[test]
fn test_future_sales_ignored() {
    let snapshot = SkuSnapshotBuilder::new("SKU-1")
        .sale(as_of(), 5.0)
        .sale(as_of() + Duration::days(1), 500.0)
        .build();
    let calc = calculate(&snapshot);

    assert_eq!(calc.trailing.trailing_30_units, 5.0);
    assert_eq!(calc.trailing.history_record_count, 1);
}

#[test]
fn test_future_only_sales_give_no_sales_signal() {
    let snapshot = SkuSnapshotBuilder::new("SKU-1")
        .sale(as_of() + Duration::days(1), 40.0)
        .sale(as_of() + Duration::days(7), 60.0)
        .build();
    let calc = calculate(&snapshot);

    assert_eq!(calc.trailing.history_record_count, 0);
    assert_eq!(calc.confidence.signal_type_count, 0);
    // 与无信号 SKU 相同: 0.2 × 50
    assert_eq!(calc.estimate.confidence_30, 10);
    assert_eq!(calc.estimate.demand_units_30, 0.0);
}

#[test]
fn test_density_thresholds() {
    // 仅有销售: 密度分 + 1 类信号 15 分
    for (days, expected) in [(25, 55), (24, 40), (15, 40), (14, 25)] {
        let snapshot = SkuSnapshotBuilder::new("SKU-1").daily_sales(as_of(), days, 1.0).build();
        let calc = calculate(&snapshot);

        assert_eq!(calc.confidence.distinct_selling_days_30, days as u32);
        assert_eq!(calc.estimate.confidence_30, expected, "{} selling days", days);
    }
}

#[test]
fn test_retailer_po_due_exactly_at_horizon_end() {
    let snapshot = SkuSnapshotBuilder::new("SKU-1")
        .retailer_po(10.0, Some(as_of() + Duration::days(30)), RetailerPoStatus::Open)
        .retailer_po(20.0, Some(as_of() + Duration::days(31)), RetailerPoStatus::Open)
        .retailer_po(40.0, Some(as_of() + Duration::days(90)), RetailerPoStatus::Open)
        .retailer_po(80.0, Some(as_of() + Duration::days(91)), RetailerPoStatus::Open)
        .build();
    let calc = calculate(&snapshot);

    assert_eq!(calc.retailer_po.units_30, 10.0);
    assert_eq!(calc.retailer_po.units_60, 30.0);
    assert_eq!(calc.retailer_po.units_90, 70.0);
}

#[test]
fn test_opportunity_weighting() {
    let snapshot = SkuSnapshotBuilder::new("SKU-1")
        .opportunity(" Negotiation ", 100.0)
        .opportunity_with_override("prospecting", 200.0, 40.0)
        .opportunity("mystery_stage", 1_000.0)
        .build();
    let calc = calculate(&snapshot);

    let sources: Vec<ProbabilitySource> =
        calc.opportunities.iter().map(|o| o.probability_source).collect();
    assert_eq!(
        sources,
        vec![
            ProbabilitySource::StageWeight,
            ProbabilitySource::Override,
            ProbabilitySource::UnknownStage,
        ]
    );
    // 100 × 75% + 200 × 40% + 0
    assert_eq!(calc.weighted_opp_monthly_units, 155.0);
    assert_eq!(calc.estimate.weighted_opp_units_30, 155.0);
    assert_eq!(calc.horizons[2].opportunity_units, 465.0);
    assert_eq!(calc.horizons[0].driver, SignalSource::Opportunity);
}

#[test]
fn test_retailer_po_horizons() {
    let snapshot = SkuSnapshotBuilder::new("SKU-1")
        .retailer_po(100.0, Some(as_of() - Duration::days(5)), RetailerPoStatus::Open)
        .retailer_po(200.0, Some(as_of() + Duration::days(45)), RetailerPoStatus::Open)
        .retailer_po(300.0, Some(as_of() + Duration::days(80)), RetailerPoStatus::Open)
        .retailer_po(999.0, Some(as_of() + Duration::days(10)), RetailerPoStatus::Shipped)
        .retailer_po(50.0, None, RetailerPoStatus::Open)
        .build();
    let calc = calculate(&snapshot);

    assert_eq!(calc.retailer_po.open_line_count, 4);
    assert_eq!(calc.retailer_po.undated_open_line_count, 1);
    assert_eq!(calc.retailer_po.units_30, 100.0);
    assert_eq!(calc.retailer_po.units_60, 300.0);
    assert_eq!(calc.retailer_po.units_90, 600.0);
    assert_eq!(calc.horizons[2].driver, SignalSource::RetailerPo);
}

#[test]
fn test_all_signals_high_confidence() {
    let snapshot = SkuSnapshotBuilder::new("SKU-1")
        .daily_sales(as_of(), 30, 2.0)
        .opportunity("negotiation", 100.0)
        .retailer_po(40.0, Some(as_of() + Duration::days(20)), RetailerPoStatus::Open)
        .build();
    let calc = calculate(&snapshot);

    // 0.8×50 + 0.6×25 + 3×15 = 100
    assert_eq!(calc.confidence.distinct_selling_days_30, 30);
    assert_eq!(calc.confidence.signal_type_count, 3);
    assert_eq!(calc.estimate.confidence_30, 100);
    assert_eq!(calc.estimate.confidence_60, 85);
    assert_eq!(calc.estimate.confidence_90, 70);
    assert_eq!(calc.confidence.tier_30, ConfidenceTier::High);
}

#[test]
fn test_medium_density_sales_only() {
    // 20 个销售日: 0.5×50 + 1×15 = 40
    let snapshot = SkuSnapshotBuilder::new("SKU-1").daily_sales(as_of(), 20, 1.0).build();
    let calc = calculate(&snapshot);

    assert_eq!(calc.estimate.confidence_30, 40);
    assert_eq!(calc.confidence.tier_30, ConfidenceTier::Medium);
}
