// ==========================================
// 零售需求引擎 - 引擎层
// ==========================================
// 职责: 库存头寸 / 告警 / 需求融合 / 补货建议 / 解释轨迹
// 红线: 引擎均为纯函数,不做 IO,不持有跨调用状态
// ==========================================

pub mod alert;
pub mod demand;
pub mod explanation;
pub mod orchestrator;
pub mod position;
pub mod procurement;
pub mod risk_flags;

// 重导出核心引擎
pub use alert::AlertGenerator;
pub use demand::DemandBlender;
pub use explanation::{ExplanationBuilder, ExplanationParts};
pub use orchestrator::{BatchReport, BatchSummary, DemandPipeline, SkuOutcome};
pub use position::PositionCalculator;
pub use procurement::ProcurementSuggester;
pub use risk_flags::derive_risk_flags;
