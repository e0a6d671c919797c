// ==========================================
// 零售需求引擎 - 导入层
// ==========================================
// 职责: 读取批次输入文件,在边界处完成校验
// 支持: JSON 批次文件 + CSV 销售流水
// ==========================================

pub mod batch_loader;
pub mod error;

pub use batch_loader::{load_batch, load_batch_file, load_sales_csv, merge_sales, validate_batch};
pub use error::{ImportError, ImportResult};
