/// Округление до центов, половина от нуля (как `Number.toFixed(2)` в браузере)
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Форматирует сумму как `$` + два знака после точки
///
/// # Примеры
/// ```
/// use contracts::shared::format::format_currency;
/// assert_eq!(format_currency(125.0), "$125.00");
/// assert_eq!(format_currency(12.5), "$12.50");
/// ```
pub fn format_currency(amount: f64) -> String {
    format!("${:.2}", round_cents(amount))
}
