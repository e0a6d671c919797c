// ==========================================
// 零售需求引擎 - 引擎参数
// ==========================================
// 默认值即业务口径:
// - 每月 4.33 周
// - 覆盖周数 < 1 严重, < 2 警告, > 12 积压
// - 置信度: 密度 50 分 / 商机 25 分 / 每类信号 15 分
// - 60/90 天置信度衰减 0.85 / 0.70
// ==========================================

use crate::config::error::ConfigError;
use serde::{Deserialize, Serialize};

// ==========================================
// AlertThresholds - 告警阈值
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertThresholds {
    pub weeks_per_month: f64,
    pub critical_cover_weeks: f64,
    pub warning_cover_weeks: f64,
    pub overstock_cover_weeks: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            weeks_per_month: 4.33,
            critical_cover_weeks: 1.0,
            warning_cover_weeks: 2.0,
            overstock_cover_weeks: 12.0,
        }
    }
}

// ==========================================
// ConfidenceWeights - 置信度打分权重
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceWeights {
    /// 近 30 天有销售的天数 >= 该值为高密度
    pub high_density_days: u32,
    /// 近 30 天有销售的天数 >= 该值为中密度
    pub medium_density_days: u32,
    pub high_density_weight: f64,
    pub medium_density_weight: f64,
    pub low_density_weight: f64,
    /// 存在商机信号时的权重
    pub opportunity_weight: f64,
    pub density_points: f64,
    pub opportunity_points: f64,
    /// 每类佐证信号 (销售/商机/零售商订单) 的加分
    pub signal_type_points: f64,
}

impl Default for ConfidenceWeights {
    fn default() -> Self {
        Self {
            high_density_days: 25,
            medium_density_days: 15,
            high_density_weight: 0.8,
            medium_density_weight: 0.5,
            low_density_weight: 0.2,
            opportunity_weight: 0.6,
            density_points: 50.0,
            opportunity_points: 25.0,
            signal_type_points: 15.0,
        }
    }
}

// ==========================================
// HorizonDecay - 长周期置信度衰减
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizonDecay {
    pub decay_60: f64,
    pub decay_90: f64,
}

impl Default for HorizonDecay {
    fn default() -> Self {
        Self {
            decay_60: 0.85,
            decay_90: 0.70,
        }
    }
}

// ==========================================
// EngineConfig - 引擎完整配置
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub alert: AlertThresholds,
    #[serde(default)]
    pub confidence: ConfidenceWeights,
    #[serde(default)]
    pub horizon_decay: HorizonDecay,
}

impl EngineConfig {
    /// 校验配置取值范围
    pub fn validate(&self) -> Result<(), ConfigError> {
        let a = &self.alert;
        require_positive("weeks_per_month", a.weeks_per_month)?;
        require_positive("critical_cover_weeks", a.critical_cover_weeks)?;
        if a.warning_cover_weeks < a.critical_cover_weeks {
            return Err(invalid(
                "warning_cover_weeks",
                a.warning_cover_weeks,
                "不能小于 critical_cover_weeks",
            ));
        }
        if a.overstock_cover_weeks <= a.warning_cover_weeks {
            return Err(invalid(
                "overstock_cover_weeks",
                a.overstock_cover_weeks,
                "必须大于 warning_cover_weeks",
            ));
        }

        let c = &self.confidence;
        if c.medium_density_days > c.high_density_days || c.high_density_days > 30 {
            return Err(invalid(
                "high_density_days",
                c.high_density_days as f64,
                "要求 medium_density_days <= high_density_days <= 30",
            ));
        }
        for (key, w) in [
            ("high_density_weight", c.high_density_weight),
            ("medium_density_weight", c.medium_density_weight),
            ("low_density_weight", c.low_density_weight),
            ("opportunity_weight", c.opportunity_weight),
        ] {
            require_unit_interval(key, w)?;
        }

        require_unit_interval("decay_60", self.horizon_decay.decay_60)?;
        require_unit_interval("decay_90", self.horizon_decay.decay_90)?;

        Ok(())
    }
}

fn invalid(key: &str, value: f64, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        message: message.to_string(),
    }
}

fn require_positive(key: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(key, value, "必须为正数"))
    }
}

fn require_unit_interval(key: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(key, value, "必须在 [0, 1] 区间"))
    }
}
