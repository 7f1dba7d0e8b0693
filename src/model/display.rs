use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;

fn subcommittee_suffix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*(소위원회|소위).*").expect("valid subcommittee regex"))
}

/// 去掉小委员会后缀，得到所属常任委员会名称
///
/// "법제사법위원회-법안심사제1소위원회" -> "법제사법위원회"
pub fn main_committee_name(raw: &str) -> String {
    let base = raw.split('-').next().unwrap_or("").trim();
    subcommittee_suffix().replace_all(base, "").trim().to_string()
}

/// ISO 日期/时间 -> YYYY.MM.DD；无法解析时原样返回
pub fn format_date(raw: &str) -> String {
    let s = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.format("%Y.%m.%d").to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.format("%Y.%m.%d").to_string();
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y%m%d"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return dt.format("%Y.%m.%d").to_string();
        }
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.format("%Y.%m.%d").to_string();
        }
    }
    raw.to_string()
}

pub fn round_score(value: f64, places: usize) -> String {
    format!("{:.*}", places, value)
}

pub fn opt_score(value: Option<f64>, places: usize) -> String {
    value
        .filter(|v| v.is_finite())
        .map(|v| round_score(v, places))
        .unwrap_or_else(|| "N/A".to_string())
}

/// [-1, 1] 的得分概率映射到 0..=100
pub fn score_to_percent(prob: f64) -> u8 {
    if !prob.is_finite() {
        return 50;
    }
    ((prob + 1.0) / 2.0 * 100.0).round().clamp(0.0, 100.0) as u8
}

/// 数字当选次数显示为 "N선"，缺失时为 "초선"
pub fn elected_count_label(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        None | Some("") => "초선".to_string(),
        Some(s) if s.chars().all(|c| c.is_ascii_digit()) => format!("{}선", s),
        Some(s) => s.to_string(),
    }
}

pub fn or_dash(v: Option<&str>) -> &str {
    match v {
        Some(s) if !s.trim().is_empty() => s,
        _ => "-",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_subcommittee_suffix() {
        assert_eq!(
            main_committee_name("법제사법위원회-법안심사제1소위원회"),
            "법제사법위원회"
        );
        assert_eq!(
            main_committee_name("기획재정위원회 소위원회"),
            "기획재정위원회"
        );
        assert_eq!(main_committee_name("정무위원회소위"), "정무위원회");
        assert_eq!(main_committee_name("교육위원회"), "교육위원회");
        assert_eq!(main_committee_name(""), "");
    }

    #[test]
    fn formats_dates() {
        assert_eq!(format_date("2024-05-30"), "2024.05.30");
        assert_eq!(format_date("2024-05-30T09:10:00"), "2024.05.30");
        assert_eq!(format_date("2024-05-30T09:10:00+09:00"), "2024.05.30");
        assert_eq!(format_date("20240530"), "2024.05.30");
        assert_eq!(format_date("미정"), "미정");
    }

    #[test]
    fn score_mapping_is_clamped() {
        assert_eq!(score_to_percent(-1.0), 0);
        assert_eq!(score_to_percent(0.0), 50);
        assert_eq!(score_to_percent(1.0), 100);
        assert_eq!(score_to_percent(3.0), 100);
        assert_eq!(score_to_percent(f64::NAN), 50);
    }

    #[test]
    fn elected_count_labels() {
        assert_eq!(elected_count_label(Some("3")), "3선");
        assert_eq!(elected_count_label(Some("재선")), "재선");
        assert_eq!(elected_count_label(None), "초선");
    }

    #[test]
    fn score_rounding() {
        assert_eq!(round_score(0.12345, 3), "0.123");
        assert_eq!(opt_score(None, 2), "N/A");
        assert_eq!(opt_score(Some(f64::INFINITY), 2), "N/A");
        assert_eq!(opt_score(Some(65.44), 1), "65.4");
    }
}
