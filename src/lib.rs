// ==========================================
// 零售需求引擎 - 核心库
// ==========================================
// 技术栈: Rust + serde + tracing
// 系统定位: 单 SKU 库存头寸 / 需求预测 / 补货建议 纯计算管道
// 外部调度、持久化、展示均不在本库范围内
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 值类型
pub mod domain;

// 引擎层 - 计算规则
pub mod engine;

// 导入层 - 批次输入与边界校验
pub mod importer;

// 配置层 - 阈值与权重
pub mod config;

// 日志系统
pub mod logging;

// 性能统计
pub mod perf;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    AlertType, ConfidenceTier, PoStatus, RetailerPoStatus, RiskFlag, Severity, ShipmentStatus,
    SignalSource,
};

// 领域实体
pub use domain::{
    Alert, BatchInput, DemandCalculation, DemandEstimate, Explanation, Position,
    ProcurementParams, ProcurementSuggestion, SkuSnapshot, StageWeights,
};

// 引擎
pub use engine::{
    AlertGenerator, BatchReport, DemandBlender, DemandPipeline, ExplanationBuilder,
    PositionCalculator, ProcurementSuggester, SkuOutcome,
};

// 配置
pub use config::{ConfigManager, EngineConfig};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "零售需求引擎";
