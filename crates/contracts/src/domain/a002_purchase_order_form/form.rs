//! Калькулятор формы заказа поставщику: строки ISBN / количество / цена,
//! итог по строке и общий итог.

use serde::{Deserialize, Serialize};

use crate::domain::a001_supplier_order::aggregate::LineItem;
use crate::shared::format::{format_currency, round_cents};

/// Строка формы. Значения хранятся так, как их ввёл пользователь.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormRow {
    pub isbn: String,
    pub quantity: String,
    pub unit_cost: String,
}

impl Default for FormRow {
    fn default() -> Self {
        Self {
            isbn: String::new(),
            quantity: "1".to_string(),
            unit_cost: "0.00".to_string(),
        }
    }
}

impl FormRow {
    pub fn quantity_value(&self) -> f64 {
        parse_amount(&self.quantity)
    }

    pub fn unit_cost_value(&self) -> f64 {
        parse_amount(&self.unit_cost)
    }

    pub fn line_total(&self) -> f64 {
        self.quantity_value() * self.unit_cost_value()
    }
}

/// Нечисловой или отрицательный ввод считается нулём
fn parse_amount(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(0.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrderForm {
    rows: Vec<FormRow>,
}

impl Default for PurchaseOrderForm {
    fn default() -> Self {
        Self::new()
    }
}

impl PurchaseOrderForm {
    /// Новая форма всегда содержит одну пустую строку
    pub fn new() -> Self {
        Self {
            rows: vec![FormRow::default()],
        }
    }

    pub fn rows(&self) -> &[FormRow] {
        &self.rows
    }

    pub fn add_row(&mut self) -> usize {
        self.rows.push(FormRow::default());
        self.rows.len() - 1
    }

    /// Индекс вне диапазона игнорируется
    pub fn delete_row(&mut self, index: usize) {
        if index < self.rows.len() {
            self.rows.remove(index);
        }
    }

    pub fn set_isbn(&mut self, index: usize, isbn: impl Into<String>) {
        if let Some(row) = self.rows.get_mut(index) {
            row.isbn = isbn.into();
        }
    }

    pub fn set_quantity(&mut self, index: usize, quantity: impl Into<String>) {
        if let Some(row) = self.rows.get_mut(index) {
            row.quantity = quantity.into();
        }
    }

    pub fn set_unit_cost(&mut self, index: usize, unit_cost: impl Into<String>) {
        if let Some(row) = self.rows.get_mut(index) {
            row.unit_cost = unit_cost.into();
        }
    }

    pub fn line_total(&self, index: usize) -> f64 {
        self.rows.get(index).map(FormRow::line_total).unwrap_or(0.0)
    }

    /// Сумма уже округлённых до центов итогов строк
    pub fn grand_total(&self) -> f64 {
        self.rows
            .iter()
            .map(|r| round_cents(r.line_total()))
            .sum()
    }

    pub fn grand_total_label(&self) -> String {
        format_currency(self.grand_total())
    }

    /// Строки с ISBN и положительным количеством превращаются в строки заказа.
    /// Дробное количество округляется вниз.
    pub fn into_line_items(self) -> Vec<LineItem> {
        self.rows
            .into_iter()
            .filter(|r| !r.isbn.trim().is_empty())
            .filter_map(|r| {
                let qty = r.quantity_value().floor();
                if qty < 1.0 || qty > f64::from(u32::MAX) {
                    return None;
                }
                Some(LineItem::new(
                    r.isbn.trim(),
                    String::new(),
                    qty as u32,
                    r.unit_cost_value(),
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_form_has_default_row() {
        let form = PurchaseOrderForm::new();
        assert_eq!(form.rows().len(), 1);
        assert_eq!(form.line_total(0), 0.0);
        assert_eq!(form.grand_total_label(), "$0.00");
    }

    #[test]
    fn test_totals() {
        let mut form = PurchaseOrderForm::new();
        form.set_quantity(0, "10");
        form.set_unit_cost(0, "12.5");
        let second = form.add_row();
        form.set_quantity(second, "3");
        form.set_unit_cost(second, "2.25");

        assert_eq!(form.line_total(0), 125.0);
        assert_eq!(form.line_total(second), 6.75);
        assert_eq!(form.grand_total_label(), "$131.75");
    }

    #[test]
    fn test_grand_total_adds_rounded_lines() {
        let mut form = PurchaseOrderForm::new();
        form.set_unit_cost(0, "0.125");
        let second = form.add_row();
        form.set_unit_cost(second, "0.125");

        assert_eq!(form.line_total(0), 0.125);
        assert_eq!(form.grand_total_label(), "$0.26");
    }

    #[test]
    fn test_invalid_input_counts_as_zero() {
        let mut form = PurchaseOrderForm::new();
        form.set_quantity(0, "abc");
        form.set_unit_cost(0, "5");
        assert_eq!(form.line_total(0), 0.0);
        form.set_quantity(0, "-2");
        assert_eq!(form.line_total(0), 0.0);
    }

    #[test]
    fn test_delete_row() {
        let mut form = PurchaseOrderForm::new();
        form.set_quantity(0, "2");
        form.set_unit_cost(0, "10");
        form.add_row();
        form.delete_row(0);
        form.delete_row(7);
        assert_eq!(form.rows().len(), 1);
        assert_eq!(form.grand_total(), 0.0);
    }

    #[test]
    fn test_into_line_items_skips_blank_rows() {
        let mut form = PurchaseOrderForm::new();
        form.set_isbn(0, " 978-0134685991 ");
        form.set_quantity(0, "2");
        form.set_unit_cost(0, "45");
        form.add_row();

        let items = form.into_line_items();
        assert_eq!(items, vec![LineItem::new("978-0134685991", "", 2, 45.0)]);
    }
}
