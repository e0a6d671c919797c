// ==========================================
// 零售需求引擎 - 库存头寸领域模型
// ==========================================
// 职责: 库存来源数据 (库位库存/库位策略/预留/采购行) 与派生头寸
// 红线: 值类型,引擎只读不改,不持有存储
// ==========================================

use crate::domain::types::{PoStatus, ShipmentStatus};
use serde::{Deserialize, Serialize};

// ==========================================
// StockLevel - 库位库存
// ==========================================
// 来源: 库存主数据 (per location on-hand)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockLevel {
    pub location_id: String,  // 库位ID
    pub available_units: i64, // 库位现存量 (可能为负: 超卖)
}

// ==========================================
// LocationPolicy - 库位计入策略
// ==========================================
// 例: 隔离仓 / 3PL 在途库位不计入可售现存
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationPolicy {
    pub location_id: String,
    pub name: String,
    pub include_in_on_hand: bool,
}

// ==========================================
// Reservation - 库存预留
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub units: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

// ==========================================
// PurchaseOrderLine - 供应商采购行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrderLine {
    pub quantity: i64,
    #[serde(default)]
    pub received_quantity: i64, // 缺省 0
    pub po_status: PoStatus,
    #[serde(default)]
    pub shipment_status: Option<ShipmentStatus>,
}

impl PurchaseOrderLine {
    /// 未收货数量 (不为负)
    pub fn outstanding_units(&self) -> i64 {
        (self.quantity - self.received_quantity).max(0)
    }
}

// ==========================================
// LocationBreakdown - 库位明细 (展示/审计)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationBreakdown {
    pub location_id: String,
    pub location_name: String,
    pub available_units: i64,
    pub include_in_on_hand: bool,
    pub label: String, // "included" / "excluded"
}

// ==========================================
// Position - 库存头寸 (派生)
// ==========================================
// 不变量: available_units = max(on_hand_units - reserved_units, 0)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub sku: String,
    pub on_hand_units: i64,
    pub reserved_units: i64,
    pub available_units: i64,
    pub on_order_units: i64,
    pub in_transit_units: i64,
    pub breakdown: Vec<LocationBreakdown>,
}
