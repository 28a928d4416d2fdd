//! 时间解析模块
//!
//! 后端与 `datetime-local` 表单控件交换的都是无时区的 ISO 本地时间
//! 字符串，两者精度不同（表单不带秒）。本模块统一解析与展示，
//! 客户端的"结束晚于开始"浅层校验也在这里。

use chrono::{NaiveDate, NaiveDateTime};

/// 解析本地时间字符串
///
/// 依次尝试带秒（后端）与不带秒（表单控件）两种格式。
/// 解析失败返回 `None`，不报错。
pub fn parse_local(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .ok()
}

/// 解析 `YYYY-MM-DD` 日期（预订表单）
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// 活动时间段是否有效：两端均可解析且结束严格晚于开始
///
/// 任一端无法解析时返回 `false`，调用方把它当作校验失败处理。
pub fn ends_after_starts(starts_at: &str, ends_at: &str) -> bool {
    match (parse_local(starts_at), parse_local(ends_at)) {
        (Some(start), Some(end)) => end > start,
        _ => false,
    }
}

/// 列表展示格式：`2026-09-01 19:00`
///
/// 无法解析时原样返回，展示层不丢数据。
pub fn format_display(s: &str) -> String {
    match parse_local(s) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_local_both_precisions() {
        assert!(parse_local("2026-09-01T19:00:00").is_some());
        assert!(parse_local("2026-09-01T19:00").is_some());
        assert!(parse_local("2026-09-01").is_none());
        assert!(parse_local("").is_none());
    }

    #[test]
    fn test_ends_after_starts() {
        assert!(ends_after_starts("2026-09-01T19:00", "2026-09-01T22:00"));
        // 相等不算有效时间段
        assert!(!ends_after_starts("2026-09-01T19:00", "2026-09-01T19:00"));
        assert!(!ends_after_starts("2026-09-01T22:00", "2026-09-01T19:00"));
        // 无法解析按无效处理
        assert!(!ends_after_starts("garbage", "2026-09-01T19:00"));
    }

    #[test]
    fn test_format_display_keeps_unparseable() {
        assert_eq!(format_display("2026-09-01T19:00:00"), "2026-09-01 19:00");
        assert_eq!(format_display("TBD"), "TBD");
    }

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2026-09-01").is_some());
        assert!(parse_date("01/09/2026").is_none());
    }
}
