// ==========================================
// 零售需求引擎 - 领域模型层
// ==========================================
// 职责: 定义值类型、状态枚举、派生结果
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod alert;
pub mod demand;
pub mod explanation;
pub mod inventory;
pub mod procurement;
pub mod snapshot;
pub mod types;

// 重导出核心类型
pub use alert::Alert;
pub use demand::{
    ConfidenceBreakdown, DemandCalculation, DemandEstimate, DemandInput, HorizonDemand,
    OpportunityContribution, OpportunitySignal, ProbabilitySource, RetailerPoLine,
    RetailerPoSummary, SalesDay, StageWeights, TrailingSalesSummary, HORIZONS,
};
pub use explanation::{Explanation, InventoryTrace, OpportunityTrace, ProcurementTrace};
pub use inventory::{
    LocationBreakdown, LocationPolicy, Position, PurchaseOrderLine, Reservation, StockLevel,
};
pub use procurement::{ProcurementInput, ProcurementParams, ProcurementSuggestion};
pub use snapshot::{BatchInput, SkuSnapshot};
pub use types::{
    AlertType, ConfidenceTier, PoStatus, RetailerPoStatus, RiskFlag, Severity, ShipmentStatus,
    SignalSource,
};
