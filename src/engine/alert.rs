// ==========================================
// 零售需求引擎 - 库存告警生成器
// ==========================================
// 职责: 基于库存头寸 + 采购参数 + 近 30 天销量生成告警
// 输入: available / on_order / safety_stock / reorder_point / lead_time / trailing_30
// 输出: Vec<Alert> (可同时触发多条)
// 红线: 每条告警必须附带数值证据 data
// ==========================================

use crate::config::engine_config::AlertThresholds;
use crate::domain::alert::Alert;
use crate::domain::procurement::ProcurementParams;
use crate::domain::types::{AlertType, Severity};
use serde_json::json;

// ==========================================
// AlertGenerator - 告警生成器
// ==========================================
pub struct AlertGenerator {
    thresholds: AlertThresholds,
}

impl AlertGenerator {
    pub fn new(thresholds: AlertThresholds) -> Self {
        Self { thresholds }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 生成告警
    ///
    /// 规则 (相互独立):
    /// 1. 缺货: available <= 0 → critical; available <= safety_stock → warning
    /// 2. 再订货点: reorder_point > 0 且 0 < available <= reorder_point → warning
    /// 3. 覆盖周数: < critical_cover_weeks → critical; < warning_cover_weeks → warning
    /// 4. 积压: 覆盖周数 > overstock_cover_weeks → info
    ///
    /// trailing_30 <= 0 时覆盖周数视为无穷大,规则 3/4 不触发
    #[allow(clippy::too_many_arguments)]
    pub fn generate_alerts(
        &self,
        sku: &str,
        available: i64,
        on_order: i64,
        safety_stock: i64,
        reorder_point: i64,
        lead_time_days: i64,
        trailing_30: f64,
    ) -> Vec<Alert> {
        let mut alerts = Vec::new();

        if let Some(alert) = self.check_stockout(sku, available, on_order, safety_stock) {
            alerts.push(alert);
        }

        if let Some(alert) =
            self.check_reorder_point(sku, available, on_order, reorder_point, lead_time_days)
        {
            alerts.push(alert);
        }

        let cover = self.weeks_of_cover(available, trailing_30);
        if let Some(alert) = self.check_low_cover(sku, available, trailing_30, cover) {
            alerts.push(alert);
        }
        if let Some(alert) = self.check_overstock(sku, available, trailing_30, cover) {
            alerts.push(alert);
        }

        alerts
    }

    /// 覆盖周数 = available / (trailing_30 / weeks_per_month)
    ///
    /// # 返回
    /// - None: trailing_30 <= 0 (无穷大)
    pub fn weeks_of_cover(&self, available: i64, trailing_30: f64) -> Option<f64> {
        if !(trailing_30 > 0.0) {
            return None;
        }
        let weekly_rate = trailing_30 / self.thresholds.weeks_per_month;
        Some(available.max(0) as f64 / weekly_rate)
    }

    /// 实际使用的再订货点
    ///
    /// 未配置时: safety_stock + ceil(日均销量 × 交期)
    pub fn effective_reorder_point(&self, params: &ProcurementParams, trailing_30: f64) -> i64 {
        if let Some(rop) = params.reorder_point_units {
            return rop.max(0);
        }
        let daily_rate = if trailing_30 > 0.0 { trailing_30 / 30.0 } else { 0.0 };
        let lead_demand = (daily_rate * params.lead_time_days.max(0) as f64).ceil() as i64;
        params.safety_stock_units.max(0).saturating_add(lead_demand)
    }

    // ==========================================
    // 规则
    // ==========================================

    fn check_stockout(
        &self,
        sku: &str,
        available: i64,
        on_order: i64,
        safety_stock: i64,
    ) -> Option<Alert> {
        let data = json!({
            "available_units": available,
            "on_order_units": on_order,
            "safety_stock_units": safety_stock,
        });

        if available <= 0 {
            return Some(Alert {
                sku: sku.to_string(),
                alert_type: AlertType::Stockout,
                severity: Severity::Critical,
                message: format!(
                    "Out of stock: {} units available, {} on order",
                    available, on_order
                ),
                data,
            });
        }

        if available <= safety_stock {
            return Some(Alert {
                sku: sku.to_string(),
                alert_type: AlertType::Stockout,
                severity: Severity::Warning,
                message: format!(
                    "Below safety stock: {} units available vs safety stock of {}",
                    available, safety_stock
                ),
                data,
            });
        }

        None
    }

    fn check_reorder_point(
        &self,
        sku: &str,
        available: i64,
        on_order: i64,
        reorder_point: i64,
        lead_time_days: i64,
    ) -> Option<Alert> {
        if reorder_point <= 0 || available <= 0 || available > reorder_point {
            return None;
        }

        Some(Alert {
            sku: sku.to_string(),
            alert_type: AlertType::BelowReorderPoint,
            severity: Severity::Warning,
            message: format!(
                "At or below reorder point: {} units available vs reorder point of {} ({} day lead time)",
                available, reorder_point, lead_time_days
            ),
            data: json!({
                "available_units": available,
                "on_order_units": on_order,
                "reorder_point_units": reorder_point,
                "lead_time_days": lead_time_days,
            }),
        })
    }

    fn check_low_cover(
        &self,
        sku: &str,
        available: i64,
        trailing_30: f64,
        cover: Option<f64>,
    ) -> Option<Alert> {
        let weeks = cover?;

        let severity = if weeks < self.thresholds.critical_cover_weeks {
            Severity::Critical
        } else if weeks < self.thresholds.warning_cover_weeks {
            Severity::Warning
        } else {
            return None;
        };

        Some(Alert {
            sku: sku.to_string(),
            alert_type: AlertType::LowWeeksOfCover,
            severity,
            message: format!("Low weeks of cover: {:.1} weeks remaining", weeks),
            data: json!({
                "available_units": available,
                "trailing_30_day_units": trailing_30,
                "weeks_of_cover": weeks,
                "weeks_per_month": self.thresholds.weeks_per_month,
            }),
        })
    }

    fn check_overstock(
        &self,
        sku: &str,
        available: i64,
        trailing_30: f64,
        cover: Option<f64>,
    ) -> Option<Alert> {
        let weeks = cover?;
        if weeks <= self.thresholds.overstock_cover_weeks {
            return None;
        }

        Some(Alert {
            sku: sku.to_string(),
            alert_type: AlertType::Overstock,
            severity: Severity::Info,
            message: format!(
                "Overstock: {:.1} weeks of cover exceeds {:.0} weeks",
                weeks, self.thresholds.overstock_cover_weeks
            ),
            data: json!({
                "available_units": available,
                "trailing_30_day_units": trailing_30,
                "weeks_of_cover": weeks,
                "overstock_cover_weeks": self.thresholds.overstock_cover_weeks,
            }),
        })
    }
}

impl Default for AlertGenerator {
    fn default() -> Self {
        Self::new(AlertThresholds::default())
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    fn types_of(alerts: &[Alert]) -> Vec<(AlertType, Severity)> {
        alerts.iter().map(|a| (a.alert_type, a.severity)).collect()
    }

    #[test]
    fn test_stockout_critical_with_velocity() {
        let engine = AlertGenerator::default();
        let alerts = engine.generate_alerts("SKU-1", 0, 40, 10, 20, 14, 86.6);

        assert_eq!(
            types_of(&alerts),
            vec![
                (AlertType::Stockout, Severity::Critical),
                (AlertType::LowWeeksOfCover, Severity::Critical),
            ]
        );
        assert_eq!(alerts[0].data["on_order_units"], 40);
    }

    #[test]
    fn test_stockout_message_reports_actual_available() {
        let engine = AlertGenerator::default();
        let alerts = engine.generate_alerts("SKU-1", -7, 12, 0, 0, 14, 0.0);

        assert_eq!(alerts[0].severity, Severity::Critical);
        assert_eq!(
            alerts[0].message,
            "Out of stock: -7 units available, 12 on order"
        );
        assert_eq!(alerts[0].data["available_units"], -7);
    }

    #[test]
    fn test_below_safety_stock_and_reorder_point() {
        let engine = AlertGenerator::default();
        // 8 units, no velocity → cover infinite
        let alerts = engine.generate_alerts("SKU-1", 8, 0, 10, 20, 14, 0.0);
        assert_eq!(
            types_of(&alerts),
            vec![
                (AlertType::Stockout, Severity::Warning),
                (AlertType::BelowReorderPoint, Severity::Warning),
            ]
        );
    }

    #[test]
    fn test_reorder_point_zero_disables_rule() {
        let engine = AlertGenerator::default();
        let alerts = engine.generate_alerts("SKU-1", 5, 0, 0, 0, 14, 0.0);
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_weeks_of_cover_bands() {
        let engine = AlertGenerator::default();
        // trailing 43.3 / 4.33 = 10 per week
        let warn = engine.generate_alerts("SKU-1", 15, 0, 0, 0, 0, 43.3);
        assert_eq!(types_of(&warn), vec![(AlertType::LowWeeksOfCover, Severity::Warning)]);

        let ok = engine.generate_alerts("SKU-1", 50, 0, 0, 0, 0, 43.3);
        assert!(ok.is_empty());

        let over = engine.generate_alerts("SKU-1", 130, 0, 0, 0, 0, 43.3);
        assert_eq!(types_of(&over), vec![(AlertType::Overstock, Severity::Info)]);
    }

    #[test]
    fn test_zero_velocity_means_infinite_cover() {
        let engine = AlertGenerator::default();
        assert_eq!(engine.weeks_of_cover(10_000, 0.0), None);
        let alerts = engine.generate_alerts("SKU-1", 10_000, 0, 0, 0, 0, 0.0);
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_effective_reorder_point() {
        let engine = AlertGenerator::default();
        let mut params = ProcurementParams {
            safety_stock_units: 10,
            lead_time_days: 14,
            ..ProcurementParams::default()
        };
        // 60 / 30 = 2 per day × 14 = 28
        assert_eq!(engine.effective_reorder_point(&params, 60.0), 38);

        params.reorder_point_units = Some(25);
        assert_eq!(engine.effective_reorder_point(&params, 60.0), 25);
    }
}
