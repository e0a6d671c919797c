// ==========================================
// 零售需求引擎 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（期望 .{1}）")]
    UnsupportedFormat(String, &'static str),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("JSON 解析失败: {0}")]
    JsonParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("日期格式错误 (行 {row}, 字段 {field}): 期望 YYYY-MM-DD，实际 {value}")]
    DateFormatError {
        row: usize,
        field: String,
        value: String,
    },

    #[error("数值格式错误 (行 {row}, 字段 {field}): {value}")]
    NumberFormatError {
        row: usize,
        field: String,
        value: String,
    },

    // ===== 数据校验错误 =====
    #[error("SKU 为空 (第 {0} 条)")]
    EmptySku(usize),

    #[error("SKU 重复: {0}")]
    DuplicateSku(String),

    #[error("数值非法 (SKU {sku}, 字段 {field}): 非有限数值")]
    NonFiniteValue { sku: String, field: String },

    #[error("数量为负 (SKU {sku}, 字段 {field}): {value}")]
    NegativeQuantity {
        sku: String,
        field: String,
        value: f64,
    },

    #[error("数值超出上限 (SKU {sku}, 字段 {field}): {value} > {max}")]
    ValueOutOfRange {
        sku: String,
        field: String,
        value: i64,
        max: i64,
    },

    #[error("概率超出范围 ({context}): 值 {value} 不在 [0, 100]")]
    ProbabilityOutOfRange { context: String, value: f64 },
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::JsonParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
