// ==========================================
// 零售需求引擎 - 配置层
// ==========================================
// 职责: 引擎阈值/权重配置,支持文件 + 环境变量覆写
// 红线: 引擎只接收显式传入的 EngineConfig,不做隐式全局查找
// ==========================================

pub mod config_manager;
pub mod engine_config;
pub mod error;

// 重导出核心配置
pub use config_manager::{config_keys, ConfigManager};
pub use engine_config::{AlertThresholds, ConfidenceWeights, EngineConfig, HorizonDecay};
pub use error::ConfigError;
