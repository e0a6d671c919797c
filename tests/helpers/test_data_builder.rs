// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================
#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use retail_demand_engine::domain::demand::{
    OpportunitySignal, RetailerPoLine, SalesDay, StageWeights,
};
use retail_demand_engine::domain::inventory::{
    LocationPolicy, PurchaseOrderLine, Reservation, StockLevel,
};
use retail_demand_engine::domain::procurement::ProcurementParams;
use retail_demand_engine::domain::snapshot::{BatchInput, SkuSnapshot};
use retail_demand_engine::domain::types::{PoStatus, RetailerPoStatus, ShipmentStatus};

/// 测试统一基准日
pub fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn default_stage_weights() -> StageWeights {
    StageWeights::new()
        .with("prospecting", 10.0)
        .with("qualified", 25.0)
        .with("proposal", 50.0)
        .with("negotiation", 75.0)
        .with("closed_won", 100.0)
}

// ==========================================
// SkuSnapshot 构建器
// ==========================================

pub struct SkuSnapshotBuilder {
    snapshot: SkuSnapshot,
}

impl SkuSnapshotBuilder {
    pub fn new(sku: &str) -> Self {
        Self {
            snapshot: SkuSnapshot {
                sku: sku.to_string(),
                procurement: ProcurementParams {
                    case_pack: 1,
                    ..ProcurementParams::default()
                },
                ..SkuSnapshot::default()
            },
        }
    }

    pub fn stock(mut self, location_id: &str, units: i64) -> Self {
        self.snapshot.stock_levels.push(StockLevel {
            location_id: location_id.to_string(),
            available_units: units,
        });
        self
    }

    pub fn location(mut self, location_id: &str, name: &str, include: bool) -> Self {
        self.snapshot.locations.push(LocationPolicy {
            location_id: location_id.to_string(),
            name: name.to_string(),
            include_in_on_hand: include,
        });
        self
    }

    pub fn reservation(mut self, units: i64, is_active: bool) -> Self {
        self.snapshot.reservations.push(Reservation { units, is_active });
        self
    }

    pub fn po_line(mut self, quantity: i64, received: i64, status: PoStatus) -> Self {
        self.snapshot.po_lines.push(PurchaseOrderLine {
            quantity,
            received_quantity: received,
            po_status: status,
            shipment_status: None,
        });
        self
    }

    pub fn po_line_in_transit(mut self, quantity: i64, status: PoStatus) -> Self {
        self.snapshot.po_lines.push(PurchaseOrderLine {
            quantity,
            received_quantity: 0,
            po_status: status,
            shipment_status: Some(ShipmentStatus::InTransit),
        });
        self
    }

    pub fn sale(mut self, date: NaiveDate, units: f64) -> Self {
        self.snapshot.sales_history.push(SalesDay {
            date,
            units_sold: units,
        });
        self
    }

    /// 以 end 为最后一天,连续 days 天每天销售 units_per_day
    pub fn daily_sales(mut self, end: NaiveDate, days: i64, units_per_day: f64) -> Self {
        for offset in 0..days {
            self.snapshot.sales_history.push(SalesDay {
                date: end - Duration::days(offset),
                units_sold: units_per_day,
            });
        }
        self
    }

    pub fn opportunity(mut self, stage: &str, monthly_units: f64) -> Self {
        self.snapshot.opportunity_lines.push(OpportunitySignal {
            opportunity_id: None,
            stage: stage.to_string(),
            expected_monthly_units: monthly_units,
            probability_override: None,
        });
        self
    }

    pub fn opportunity_with_override(
        mut self,
        stage: &str,
        monthly_units: f64,
        probability: f64,
    ) -> Self {
        self.snapshot.opportunity_lines.push(OpportunitySignal {
            opportunity_id: None,
            stage: stage.to_string(),
            expected_monthly_units: monthly_units,
            probability_override: Some(probability),
        });
        self
    }

    pub fn retailer_po(
        mut self,
        quantity: f64,
        ship_date: Option<NaiveDate>,
        status: RetailerPoStatus,
    ) -> Self {
        self.snapshot.retailer_po_lines.push(RetailerPoLine {
            po_number: None,
            quantity_units: quantity,
            expected_ship_date: ship_date,
            status,
        });
        self
    }

    pub fn safety_stock(mut self, units: i64) -> Self {
        self.snapshot.procurement.safety_stock_units = units;
        self
    }

    pub fn reorder_point(mut self, units: i64) -> Self {
        self.snapshot.procurement.reorder_point_units = Some(units);
        self
    }

    pub fn moq(mut self, units: i64) -> Self {
        self.snapshot.procurement.moq_units = units;
        self
    }

    pub fn case_pack(mut self, units: i64) -> Self {
        self.snapshot.procurement.case_pack = units;
        self
    }

    pub fn lead_time(mut self, days: i64) -> Self {
        self.snapshot.procurement.lead_time_days = days;
        self
    }

    pub fn build(self) -> SkuSnapshot {
        self.snapshot
    }
}

// ==========================================
// BatchInput 构建器
// ==========================================

pub fn create_test_batch(skus: Vec<SkuSnapshot>) -> BatchInput {
    BatchInput {
        as_of: as_of(),
        stage_weights: default_stage_weights(),
        skus,
    }
}
