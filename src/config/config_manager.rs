// ==========================================
// 零售需求引擎 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 来源优先级: 环境变量 > 配置文件 > 默认值
// 存储: 扁平 key-value (与 config_keys 对应)
// ==========================================

use crate::config::engine_config::EngineConfig;
use crate::config::error::ConfigError;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

/// 环境变量前缀,例如 DEMAND_ENGINE_WEEKS_PER_MONTH=4.345
pub const ENV_PREFIX: &str = "DEMAND_ENGINE_";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    values: HashMap<String, String>,
}

impl ConfigManager {
    /// 创建空配置 (全部取默认值)
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 文件加载
    ///
    /// 文件格式为扁平对象: {"weeks_per_month": 4.33, "decay_60": 0.9}
    /// 未知 key 会被忽略并记录 warn 日志
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let raw = std::fs::read_to_string(path)?;
        let map: HashMap<String, Value> = serde_json::from_str(&raw)?;

        let mut manager = Self::new();
        for (key, value) in map {
            if !config_keys::ALL.contains(&key.as_str()) {
                tracing::warn!(key = %key, "忽略未知配置项");
                continue;
            }
            let value = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            manager.set(&key, &value);
        }

        tracing::info!(path = %path.display(), count = manager.values.len(), "配置文件已加载");
        Ok(manager)
    }

    /// 应用环境变量覆写
    pub fn with_env_overrides(mut self) -> Self {
        for key in config_keys::ALL {
            let env_key = format!("{}{}", ENV_PREFIX, key.to_uppercase());
            if let Ok(value) = std::env::var(&env_key) {
                tracing::debug!(env = %env_key, value = %value, "环境变量覆写配置");
                self.set(key, value.trim());
            }
        }
        self
    }

    /// 写入单个配置项
    pub fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    /// 读取原始配置值
    pub fn get_config_value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    /// 读取并解析配置值,不存在时返回默认值
    fn get_parsed_or_default<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get_config_value(key) {
            None => Ok(default),
            Some(raw) => raw.trim().parse::<T>().map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw.to_string(),
                message: e.to_string(),
            }),
        }
    }

    /// 组装并校验 EngineConfig
    pub fn engine_config(&self) -> Result<EngineConfig, ConfigError> {
        use crate::config::config_manager::config_keys::*;

        let defaults = EngineConfig::default();
        let mut config = defaults.clone();

        // ===== 告警阈值 =====
        config.alert.weeks_per_month =
            self.get_parsed_or_default(WEEKS_PER_MONTH, defaults.alert.weeks_per_month)?;
        config.alert.critical_cover_weeks =
            self.get_parsed_or_default(CRITICAL_COVER_WEEKS, defaults.alert.critical_cover_weeks)?;
        config.alert.warning_cover_weeks =
            self.get_parsed_or_default(WARNING_COVER_WEEKS, defaults.alert.warning_cover_weeks)?;
        config.alert.overstock_cover_weeks = self
            .get_parsed_or_default(OVERSTOCK_COVER_WEEKS, defaults.alert.overstock_cover_weeks)?;

        // ===== 置信度 =====
        config.confidence.high_density_days = self
            .get_parsed_or_default(HIGH_DENSITY_DAYS, defaults.confidence.high_density_days)?;
        config.confidence.medium_density_days = self
            .get_parsed_or_default(MEDIUM_DENSITY_DAYS, defaults.confidence.medium_density_days)?;
        config.confidence.opportunity_weight = self
            .get_parsed_or_default(OPPORTUNITY_WEIGHT, defaults.confidence.opportunity_weight)?;

        // ===== 周期衰减 =====
        config.horizon_decay.decay_60 =
            self.get_parsed_or_default(DECAY_60, defaults.horizon_decay.decay_60)?;
        config.horizon_decay.decay_90 =
            self.get_parsed_or_default(DECAY_90, defaults.horizon_decay.decay_90)?;

        config.validate()?;
        Ok(config)
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 告警
    pub const WEEKS_PER_MONTH: &str = "weeks_per_month";
    pub const CRITICAL_COVER_WEEKS: &str = "critical_cover_weeks";
    pub const WARNING_COVER_WEEKS: &str = "warning_cover_weeks";
    pub const OVERSTOCK_COVER_WEEKS: &str = "overstock_cover_weeks";

    // 置信度
    pub const HIGH_DENSITY_DAYS: &str = "high_density_days";
    pub const MEDIUM_DENSITY_DAYS: &str = "medium_density_days";
    pub const OPPORTUNITY_WEIGHT: &str = "opportunity_weight";

    // 长周期置信度衰减
    pub const DECAY_60: &str = "decay_60";
    pub const DECAY_90: &str = "decay_90";

    pub const ALL: [&str; 9] = [
        WEEKS_PER_MONTH,
        CRITICAL_COVER_WEEKS,
        WARNING_COVER_WEEKS,
        OVERSTOCK_COVER_WEEKS,
        HIGH_DENSITY_DAYS,
        MEDIUM_DENSITY_DAYS,
        OPPORTUNITY_WEIGHT,
        DECAY_60,
        DECAY_90,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_when_empty() {
        let config = ConfigManager::new().engine_config().unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_set_overrides_default() {
        let mut manager = ConfigManager::new();
        manager.set(config_keys::OVERSTOCK_COVER_WEEKS, "16");
        let config = manager.engine_config().unwrap();
        assert_eq!(config.alert.overstock_cover_weeks, 16.0);
    }

    #[test]
    fn test_unparseable_value() {
        let mut manager = ConfigManager::new();
        manager.set(config_keys::DECAY_60, "high");
        let err = manager.engine_config().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "decay_60"));
    }

    #[test]
    fn test_from_json_file_accepts_numbers_and_strings() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"weeks_per_month": 4.345, "decay_90": "0.6", "unknown_key": 1}}"#
        )
        .unwrap();

        let manager = ConfigManager::from_json_file(file.path()).unwrap();
        assert_eq!(manager.get_config_value("unknown_key"), None);

        let config = manager.engine_config().unwrap();
        assert_eq!(config.alert.weeks_per_month, 4.345);
        assert_eq!(config.horizon_decay.decay_90, 0.6);
    }

    #[test]
    fn test_missing_file() {
        let result = ConfigManager::from_json_file(Path::new("no_such_config.json"));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }
}
