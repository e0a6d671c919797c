// ==========================================
// 零售需求引擎 - 单 SKU 输入快照
// ==========================================
// 由外部数据访问层在调用前组装,调用后丢弃
// ==========================================

use crate::domain::demand::{OpportunitySignal, RetailerPoLine, SalesDay, StageWeights};
use crate::domain::inventory::{LocationPolicy, PurchaseOrderLine, Reservation, StockLevel};
use crate::domain::procurement::ProcurementParams;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// SkuSnapshot - 单 SKU 全部信号
// ==========================================
// 缺省字段在边界处补齐为空集合
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkuSnapshot {
    pub sku: String,
    #[serde(default)]
    pub stock_levels: Vec<StockLevel>,
    #[serde(default)]
    pub locations: Vec<LocationPolicy>,
    #[serde(default)]
    pub reservations: Vec<Reservation>,
    #[serde(default)]
    pub po_lines: Vec<PurchaseOrderLine>,
    #[serde(default)]
    pub sales_history: Vec<SalesDay>,
    #[serde(default)]
    pub opportunity_lines: Vec<OpportunitySignal>,
    #[serde(default)]
    pub retailer_po_lines: Vec<RetailerPoLine>,
    #[serde(default)]
    pub procurement: ProcurementParams,
}

// ==========================================
// BatchInput - 批次输入
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchInput {
    pub as_of: NaiveDate,
    #[serde(default)]
    pub stage_weights: StageWeights,
    #[serde(default)]
    pub skus: Vec<SkuSnapshot>,
}
