// src/grid/validation.rs
//! Pure cell-value validation against a column's declared type.

use super::definitions::MetricType;

/// Decides whether `value` is acceptable for a column of the given type.
/// `options` is consulted only for `Select` columns.
///
/// Empty values are always acceptable: the grid treats an empty cell as a
/// placeholder, not data. For `Select`, an empty option list makes every
/// non-empty value invalid.
pub fn validate_cell_value(value: &str, metric_type: MetricType, options: &[String]) -> bool {
    match metric_type {
        MetricType::Text => true,
        MetricType::Number => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return true;
            }
            match trimmed.parse::<f64>() {
                Ok(n) => n.is_finite() && n >= 0.0,
                Err(_) => false,
            }
        }
        MetricType::Select => value.is_empty() || options.iter().any(|o| o == value),
    }
}
