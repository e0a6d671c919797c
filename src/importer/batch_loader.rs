// ==========================================
// 零售需求引擎 - 批次输入加载器
// ==========================================
// 阶段 1: 读取 JSON 批次文件 (as_of / stage_weights / skus)
// 阶段 2: 读取 CSV 销售流水 (sku,date,units_sold),按 SKU 归并
// 阶段 3: 边界校验 (fail fast,返回第一条错误)
// 红线: 引擎内部不再做类型/缺省处理,所有缺省在此补齐
// ==========================================

use crate::domain::demand::SalesDay;
use crate::domain::snapshot::{BatchInput, SkuSnapshot};
use crate::importer::error::{ImportError, ImportResult};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info, warn};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// 交期上限 (天)
pub const MAX_LEAD_TIME_DAYS: i64 = 3_650;
/// 箱规上限 (件)
pub const MAX_CASE_PACK: i64 = 1_000_000;

/// 加载批次文件,可选合并销售流水,并完成校验
pub fn load_batch(batch_path: &Path, sales_path: Option<&Path>) -> ImportResult<BatchInput> {
    let mut batch = load_batch_file(batch_path)?;

    if let Some(path) = sales_path {
        let sales = load_sales_csv(path)?;
        merge_sales(&mut batch, sales);
    }

    validate_batch(&batch)?;

    info!(
        as_of = %batch.as_of,
        sku_count = batch.skus.len(),
        stage_count = batch.stage_weights.len(),
        "批次输入加载完成"
    );
    Ok(batch)
}

/// 读取 JSON 批次文件 (不做业务校验)
pub fn load_batch_file(path: &Path) -> ImportResult<BatchInput> {
    check_file(path, "json")?;

    let reader = BufReader::new(File::open(path)?);
    let batch: BatchInput = serde_json::from_reader(reader)?;

    debug!(path = %path.display(), sku_count = batch.skus.len(), "批次文件解析完成");
    Ok(batch)
}

#[derive(Debug, Deserialize)]
struct RawSalesRow {
    sku: String,
    date: String,
    units_sold: String,
}

/// 读取销售流水 CSV
///
/// # 返回
/// - SKU → 按文件顺序排列的日销售记录
pub fn load_sales_csv(path: &Path) -> ImportResult<BTreeMap<String, Vec<SalesDay>>> {
    check_file(path, "csv")?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(File::open(path)?);

    let mut sales: BTreeMap<String, Vec<SalesDay>> = BTreeMap::new();
    let mut row_count = 0usize;

    for (idx, result) in reader.deserialize::<RawSalesRow>().enumerate() {
        // 行号按文件行计 (表头为第 1 行)
        let row = idx + 2;
        let raw = result?;

        // 跳过完全空白的行
        if raw.sku.is_empty() && raw.date.is_empty() && raw.units_sold.is_empty() {
            continue;
        }

        let date = NaiveDate::parse_from_str(&raw.date, DATE_FORMAT).map_err(|_| {
            ImportError::DateFormatError {
                row,
                field: "date".to_string(),
                value: raw.date.clone(),
            }
        })?;
        let units_sold = raw
            .units_sold
            .parse::<f64>()
            .map_err(|_| ImportError::NumberFormatError {
                row,
                field: "units_sold".to_string(),
                value: raw.units_sold.clone(),
            })?;

        sales
            .entry(raw.sku)
            .or_default()
            .push(SalesDay { date, units_sold });
        row_count += 1;
    }

    debug!(path = %path.display(), row_count, sku_count = sales.len(), "销售流水解析完成");
    Ok(sales)
}

/// 将 CSV 销售流水追加到对应 SKU 的 sales_history
///
/// 批次中不存在的 SKU 记录被忽略 (warn)
pub fn merge_sales(batch: &mut BatchInput, mut sales: BTreeMap<String, Vec<SalesDay>>) {
    for snapshot in &mut batch.skus {
        if let Some(days) = sales.remove(&snapshot.sku) {
            snapshot.sales_history.extend(days);
        }
    }

    for (sku, days) in &sales {
        warn!(sku = %sku, records = days.len(), "销售流水中的 SKU 不在批次内,已忽略");
    }
}

/// 边界校验
///
/// 规则:
/// 1. SKU 非空且批次内唯一
/// 2. 阶段概率与覆写概率在 [0, 100]
/// 3. 数量字段为有限数值且不为负
///    (库位现存量允许为负,预留量为负时引擎按 0 处理)
/// 4. 交期 <= MAX_LEAD_TIME_DAYS,箱规 <= MAX_CASE_PACK
pub fn validate_batch(batch: &BatchInput) -> ImportResult<()> {
    for (stage, probability) in batch.stage_weights.iter() {
        check_probability(&format!("stage_weights.{}", stage), *probability)?;
    }

    let mut seen = HashSet::new();
    for (idx, snapshot) in batch.skus.iter().enumerate() {
        if snapshot.sku.trim().is_empty() {
            return Err(ImportError::EmptySku(idx + 1));
        }
        if !seen.insert(snapshot.sku.as_str()) {
            return Err(ImportError::DuplicateSku(snapshot.sku.clone()));
        }
        validate_snapshot(snapshot)?;
    }

    Ok(())
}

fn validate_snapshot(s: &SkuSnapshot) -> ImportResult<()> {
    let sku = s.sku.as_str();

    for line in &s.po_lines {
        check_non_negative(sku, "po_lines.quantity", line.quantity as f64)?;
        check_non_negative(sku, "po_lines.received_quantity", line.received_quantity as f64)?;
    }

    for day in &s.sales_history {
        check_quantity(sku, "sales_history.units_sold", day.units_sold)?;
    }

    for opp in &s.opportunity_lines {
        check_quantity(sku, "opportunity_lines.expected_monthly_units", opp.expected_monthly_units)?;
        if let Some(p) = opp.probability_override {
            check_probability(&format!("SKU {} probability_override", sku), p)?;
        }
    }

    for line in &s.retailer_po_lines {
        check_quantity(sku, "retailer_po_lines.quantity_units", line.quantity_units)?;
    }

    let params = &s.procurement;
    check_non_negative(sku, "procurement.safety_stock_units", params.safety_stock_units as f64)?;
    check_non_negative(sku, "procurement.moq_units", params.moq_units as f64)?;
    if let Some(rop) = params.reorder_point_units {
        check_non_negative(sku, "procurement.reorder_point_units", rop as f64)?;
    }
    check_at_most(sku, "procurement.lead_time_days", params.lead_time_days, MAX_LEAD_TIME_DAYS)?;
    check_at_most(sku, "procurement.case_pack", params.case_pack, MAX_CASE_PACK)?;

    Ok(())
}

fn check_file(path: &Path, extension: &'static str) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if ext != extension {
        return Err(ImportError::UnsupportedFormat(
            path.display().to_string(),
            extension,
        ));
    }

    Ok(())
}

fn check_quantity(sku: &str, field: &str, value: f64) -> ImportResult<()> {
    if !value.is_finite() {
        return Err(ImportError::NonFiniteValue {
            sku: sku.to_string(),
            field: field.to_string(),
        });
    }
    check_non_negative(sku, field, value)
}

fn check_non_negative(sku: &str, field: &str, value: f64) -> ImportResult<()> {
    if value < 0.0 {
        return Err(ImportError::NegativeQuantity {
            sku: sku.to_string(),
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

fn check_at_most(sku: &str, field: &str, value: i64, max: i64) -> ImportResult<()> {
    if value > max {
        return Err(ImportError::ValueOutOfRange {
            sku: sku.to_string(),
            field: field.to_string(),
            value,
            max,
        });
    }
    Ok(())
}

fn check_probability(context: &str, value: f64) -> ImportResult<()> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(ImportError::ProbabilityOutOfRange {
            context: context.to_string(),
            value,
        });
    }
    Ok(())
}
