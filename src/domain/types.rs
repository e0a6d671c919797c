// ==========================================
// 零售需求引擎 - 领域类型定义
// ==========================================
// 职责: 状态枚举、告警等级、信号来源
// 序列化格式: snake_case (与上游 JSON 一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 告警严重度 (Severity)
// ==========================================
// 顺序: Info < Warning < Critical
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,     // 提示
    Warning,  // 警告
    Critical, // 严重
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

// ==========================================
// 告警类型 (Alert Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    Stockout,          // 缺货 / 低于安全库存
    BelowReorderPoint, // 低于再订货点
    LowWeeksOfCover,   // 覆盖周数不足
    Overstock,         // 积压
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::Stockout => "stockout",
            AlertType::BelowReorderPoint => "below_reorder_point",
            AlertType::LowWeeksOfCover => "low_weeks_of_cover",
            AlertType::Overstock => "overstock",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 采购单状态 (Supplier PO Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoStatus {
    Draft,           // 草稿
    PendingApproval, // 待审批
    Approved,        // 已审批(未下发)
    Sent,            // 已下发供应商
    Acknowledged,    // 供应商已确认
    InProduction,    // 生产中
    Shipped,         // 已发运
    Received,        // 已收货
    Cancelled,       // 已取消
}

impl PoStatus {
    /// 是否计入在途订货量
    ///
    /// 只有已下发给供应商、尚未收货的状态才算 on-order
    pub fn counts_as_on_order(&self) -> bool {
        matches!(
            self,
            PoStatus::Sent | PoStatus::Acknowledged | PoStatus::InProduction | PoStatus::Shipped
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PoStatus::Draft => "draft",
            PoStatus::PendingApproval => "pending_approval",
            PoStatus::Approved => "approved",
            PoStatus::Sent => "sent",
            PoStatus::Acknowledged => "acknowledged",
            PoStatus::InProduction => "in_production",
            PoStatus::Shipped => "shipped",
            PoStatus::Received => "received",
            PoStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for PoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 货运状态 (Shipment Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
    Pending,
    Booked,
    InTransit,
    Delivered,
    Exception,
}

// ==========================================
// 零售商订单状态 (Retailer PO Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetailerPoStatus {
    Open,      // 未发货
    Shipped,   // 已发货
    Closed,    // 已关闭
    Cancelled, // 已取消
}

// ==========================================
// 需求信号来源 (Demand Signal Source)
// ==========================================
// 用于解释每个周期由哪个信号决定了 blended max
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalSource {
    TrailingSales,
    Opportunity,
    RetailerPo,
    None, // 三个信号均为 0
}

// ==========================================
// 置信度分档 (Confidence Tier)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    Low,
    Medium,
    High,
}

impl ConfidenceTier {
    /// 分档阈值: high >= 70, medium >= 30, low < 30
    pub fn from_score(score: u32) -> Self {
        if score >= 70 {
            ConfidenceTier::High
        } else if score >= 30 {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }
}

// ==========================================
// 风险标记 (Risk Flag)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFlag {
    Stockout,       // 有需求但无可用库存
    LowConfidence,  // 30 天置信度 < 30
    NoSalesHistory, // 无任何销售记录
}

impl fmt::Display for RiskFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskFlag::Stockout => write!(f, "stockout"),
            RiskFlag::LowConfidence => write!(f, "low_confidence"),
            RiskFlag::NoSalesHistory => write!(f, "no_sales_history"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_on_order_statuses() {
        let counted: Vec<PoStatus> = [
            PoStatus::Draft,
            PoStatus::PendingApproval,
            PoStatus::Approved,
            PoStatus::Sent,
            PoStatus::Acknowledged,
            PoStatus::InProduction,
            PoStatus::Shipped,
            PoStatus::Received,
            PoStatus::Cancelled,
        ]
        .into_iter()
        .filter(|s| s.counts_as_on_order())
        .collect();

        assert_eq!(
            counted,
            vec![
                PoStatus::Sent,
                PoStatus::Acknowledged,
                PoStatus::InProduction,
                PoStatus::Shipped
            ]
        );
    }

    #[test]
    fn test_severity_order_and_serde() {
        assert!(Severity::Critical > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
        assert_eq!(serde_json::to_string(&Severity::Critical).unwrap(), "\"critical\"");
        assert_eq!(
            serde_json::to_string(&AlertType::LowWeeksOfCover).unwrap(),
            "\"low_weeks_of_cover\""
        );
        let status: PoStatus = serde_json::from_str("\"in_production\"").unwrap();
        assert_eq!(status, PoStatus::InProduction);
    }

    #[test]
    fn test_confidence_tier() {
        assert_eq!(ConfidenceTier::from_score(0), ConfidenceTier::Low);
        assert_eq!(ConfidenceTier::from_score(29), ConfidenceTier::Low);
        assert_eq!(ConfidenceTier::from_score(30), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::from_score(70), ConfidenceTier::High);
    }
}
