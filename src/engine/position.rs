// ==========================================
// 零售需求引擎 - 库存头寸计算器
// ==========================================
// 职责: 汇总库位库存/预留/采购行,生成唯一可信的库存头寸
// 输入: StockLevel + LocationPolicy + Reservation + PurchaseOrderLine
// 输出: Position
// 红线: available_units 永不为负; 空输入按 0 处理,不报错
// ==========================================

use crate::domain::inventory::{
    LocationBreakdown, LocationPolicy, Position, PurchaseOrderLine, Reservation, StockLevel,
};
use crate::domain::types::ShipmentStatus;
use std::collections::HashMap;

const LABEL_INCLUDED: &str = "included";
const LABEL_EXCLUDED: &str = "excluded";

// ==========================================
// PositionCalculator - 库存头寸计算器
// ==========================================
pub struct PositionCalculator {
    // 无状态引擎
}

impl PositionCalculator {
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 计算单 SKU 库存头寸
    ///
    /// # 参数
    /// - `sku`: 商品编码
    /// - `levels`: 库位库存
    /// - `locations`: 库位计入策略 (空列表 = 全部计入)
    /// - `reservations`: 预留记录
    /// - `po_lines`: 供应商采购行
    pub fn compute_position(
        &self,
        sku: &str,
        levels: &[StockLevel],
        locations: &[LocationPolicy],
        reservations: &[Reservation],
        po_lines: &[PurchaseOrderLine],
    ) -> Position {
        let on_hand_units = self.compute_on_hand(levels, locations);
        let reserved_units = self.compute_reserved(reservations);
        let available_units = self.compute_available(on_hand_units, reserved_units);
        let on_order_units = self.compute_on_order(po_lines);
        let in_transit_units = self.compute_in_transit(po_lines);
        let breakdown = self.compute_location_breakdown(levels, locations);

        tracing::debug!(
            sku,
            on_hand_units,
            reserved_units,
            available_units,
            on_order_units,
            in_transit_units,
            "库存头寸计算完成"
        );

        Position {
            sku: sku.to_string(),
            on_hand_units,
            reserved_units,
            available_units,
            on_order_units,
            in_transit_units,
            breakdown,
        }
    }

    // ==========================================
    // 分项计算
    // ==========================================

    /// 可售现存 = 计入库位的库存之和
    ///
    /// 规则:
    /// - 策略列表为空: 所有库位计入 (fail-open)
    /// - 策略列表非空: 只计入 include_in_on_hand=true 的库位,未登记库位不计入
    pub fn compute_on_hand(&self, levels: &[StockLevel], locations: &[LocationPolicy]) -> i64 {
        let policies = policy_index(locations);
        levels
            .iter()
            .filter(|level| is_included(&level.location_id, locations, &policies))
            .map(|level| level.available_units)
            .sum()
    }

    /// 预留量 = 生效预留之和 (负数按 0)
    pub fn compute_reserved(&self, reservations: &[Reservation]) -> i64 {
        reservations
            .iter()
            .filter(|r| r.is_active)
            .map(|r| r.units.max(0))
            .sum()
    }

    /// 可用量 = max(现存 - 预留, 0)
    pub fn compute_available(&self, on_hand: i64, reserved: i64) -> i64 {
        (on_hand - reserved).max(0)
    }

    /// 在途订货量 = 已下发未收货的采购行未收数量之和
    pub fn compute_on_order(&self, po_lines: &[PurchaseOrderLine]) -> i64 {
        po_lines
            .iter()
            .filter(|line| line.po_status.counts_as_on_order())
            .map(|line| line.outstanding_units())
            .sum()
    }

    /// 运输中 = 在途订货中 shipment_status=in_transit 的部分
    pub fn compute_in_transit(&self, po_lines: &[PurchaseOrderLine]) -> i64 {
        po_lines
            .iter()
            .filter(|line| line.po_status.counts_as_on_order())
            .filter(|line| line.shipment_status == Some(ShipmentStatus::InTransit))
            .map(|line| line.outstanding_units())
            .sum()
    }

    /// 库位明细 (按首次出现顺序聚合同库位多条记录)
    ///
    /// 未登记库位以 location_id 作为名称; include_in_on_hand 与 compute_on_hand 口径一致
    pub fn compute_location_breakdown(
        &self,
        levels: &[StockLevel],
        locations: &[LocationPolicy],
    ) -> Vec<LocationBreakdown> {
        let policies = policy_index(locations);
        let mut breakdown: Vec<LocationBreakdown> = Vec::new();
        let mut slot: HashMap<&str, usize> = HashMap::new();

        for level in levels {
            if let Some(&idx) = slot.get(level.location_id.as_str()) {
                breakdown[idx].available_units += level.available_units;
                continue;
            }

            let included = is_included(&level.location_id, locations, &policies);
            let location_name = policies
                .get(level.location_id.as_str())
                .map(|p| p.name.clone())
                .unwrap_or_else(|| level.location_id.clone());

            slot.insert(level.location_id.as_str(), breakdown.len());
            breakdown.push(LocationBreakdown {
                location_id: level.location_id.clone(),
                location_name,
                available_units: level.available_units,
                include_in_on_hand: included,
                label: if included { LABEL_INCLUDED } else { LABEL_EXCLUDED }.to_string(),
            });
        }

        breakdown
    }
}

impl Default for PositionCalculator {
    fn default() -> Self {
        Self::new()
    }
}

fn policy_index(locations: &[LocationPolicy]) -> HashMap<&str, &LocationPolicy> {
    locations
        .iter()
        .map(|p| (p.location_id.as_str(), p))
        .collect()
}

fn is_included(
    location_id: &str,
    locations: &[LocationPolicy],
    policies: &HashMap<&str, &LocationPolicy>,
) -> bool {
    if locations.is_empty() {
        return true;
    }
    policies
        .get(location_id)
        .map(|p| p.include_in_on_hand)
        .unwrap_or(false)
}
