//! 显示格式化模块
//!
//! 金额与日期的 es-CL 展示格式。时间戳按其自带的偏移显示，不做本地时区转换。

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// 智利比索：无小数，千位分隔符为 `.`
pub fn format_clp(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }

    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if rounded < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// 服务价格列：缺失或为 0 时显示 "-"
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) if p != 0.0 => format_clp(p),
        _ => "-".to_string(),
    }
}

/// 解析 API 已知会发送的几种时间戳格式
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// 长日期，如 `5 de marzo de 2024`
pub fn format_long_date(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => format!(
            "{} de {} de {}",
            dt.day(),
            MONTHS[dt.month0() as usize],
            dt.year()
        ),
        None => raw.to_string(),
    }
}

/// `05-03-2024`
pub fn format_date(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format("%d-%m-%Y").to_string(),
        None => raw.to_string(),
    }
}

/// `05-03-2024, 14:30:00`
pub fn format_date_time(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format("%d-%m-%Y, %H:%M:%S").to_string(),
        None => raw.to_string(),
    }
}

pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
