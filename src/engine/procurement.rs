// ==========================================
// 零售需求引擎 - 补货建议引擎
// ==========================================
// 职责: 根据 60 天需求、安全库存、当前头寸与供应商约束给出补货量和下单日期
// 输入: ProcurementInput + today
// 输出: ProcurementSuggestion
// 红线: 建议量必须 >= MOQ 且为箱规整数倍; required 不为负
// ==========================================

use crate::domain::procurement::{ProcurementInput, ProcurementSuggestion};
use chrono::{Days, NaiveDate};

// ==========================================
// ProcurementSuggester - 补货建议引擎
// ==========================================
pub struct ProcurementSuggester;

impl ProcurementSuggester {
    pub fn new() -> Self {
        Self
    }

    /// 计算补货建议
    ///
    /// 规则:
    /// 1. required = max(ceil(demand_60 + safety - (available + on_order)), 0)
    /// 2. required = 0 → 不建议下单
    /// 3. 否则 max(required, moq) 向上取整到箱规倍数 (箱规 <= 0 按 1)
    /// 4. 建议日期 = today + lead_time_days (自然日)
    pub fn compute_procurement_suggestion(
        &self,
        input: &ProcurementInput,
        today: NaiveDate,
    ) -> ProcurementSuggestion {
        let required_units = self.compute_required(input);
        let effective_case_pack = input.case_pack.max(1);

        if required_units == 0 {
            return ProcurementSuggestion {
                required_units,
                suggested_order_units: 0,
                suggested_order_date: None,
                moq_applied: false,
                effective_case_pack,
            };
        }

        let moq = input.moq_units.max(0);
        let moq_applied = moq > required_units;
        let before_rounding = required_units.max(moq);
        let suggested_order_units = round_up_to_multiple(before_rounding, effective_case_pack);
        let suggested_order_date = order_date(today, input.lead_time_days);

        ProcurementSuggestion {
            required_units,
            suggested_order_units,
            suggested_order_date: Some(suggested_order_date),
            moq_applied,
            effective_case_pack,
        }
    }

    /// 净需求 (不为负; 超出 i64 范围时饱和)
    pub fn compute_required(&self, input: &ProcurementInput) -> i64 {
        let supply = input
            .available_units
            .max(0)
            .saturating_add(input.on_order_units.max(0));
        let need = input.demand_units_60.max(0.0) + input.safety_stock_units.max(0) as f64
            - supply as f64;
        if need <= 0.0 {
            0
        } else {
            need.ceil() as i64
        }
    }
}

impl Default for ProcurementSuggester {
    fn default() -> Self {
        Self::new()
    }
}

/// ceil(units / multiple) × multiple,溢出时饱和到 i64::MAX
fn round_up_to_multiple(units: i64, multiple: i64) -> i64 {
    let packs = units / multiple + i64::from(units % multiple != 0);
    packs.saturating_mul(multiple)
}

/// today + lead_time_days (负数按 0); 超出日期范围时取 NaiveDate::MAX
fn order_date(today: NaiveDate, lead_time_days: i64) -> NaiveDate {
    let days = lead_time_days.max(0) as u64;
    today.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX)
}
