// ==========================================
// 零售需求引擎 - 库存告警领域模型
// ==========================================
// 用途: 派生的瞬时信号,由外部持久化层决定是否落库
// ==========================================

use crate::domain::types::{AlertType, Severity};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub sku: String,
    pub alert_type: AlertType,
    pub severity: Severity,
    pub message: String, // 可读描述
    pub data: Value,     // 数值证据 (可解释性)
}
