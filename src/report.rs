//! Telegram message bodies (HTML parse mode).

use std::fmt::Write;

use crate::models::AlertEntry;

pub const BAR_SEGMENTS: usize = 10;
const BAR_FILLED: &str = "🟥";
const BAR_EMPTY: &str = "⬜";
const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Ten-segment usage bar. Overfull usage renders as a full bar.
pub fn progress_bar(percentage: f64) -> String {
    let filled = (percentage / 100.0 * BAR_SEGMENTS as f64)
        .round()
        .clamp(0.0, BAR_SEGMENTS as f64) as usize;
    BAR_FILLED.repeat(filled) + &BAR_EMPTY.repeat(BAR_SEGMENTS - filled)
}

/// One decimal place with comma thousands separators: `1234.56` -> `1,234.6`.
pub fn format_number(value: f64) -> String {
    let fixed = format!("{:.1}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "0"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && fixed != "0.0" { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Summary-only report, also the trailing block of the alert report.
pub fn render_summary(checked: usize, over_threshold: usize, completed_at: &str) -> String {
    format!(
        "📋 <b>Monitoring Summary</b>\n\n\
         ✅ <b>Accounts checked:</b> {checked}\n\
         🚨 <b>Accounts over threshold:</b> {over_threshold}\n\
         🕐 <b>Completed:</b> {completed_at}"
    )
}

/// Consolidated alert listing every account at or above `threshold`.
pub fn render_alert(
    alerts: &[AlertEntry],
    checked: usize,
    threshold: f64,
    completed_at: &str,
) -> String {
    let mut message = String::from("🚨 <b>cPanel High Disk Usage Alert</b> 🚨\n\n");
    let _ = write!(
        message,
        "⚠️ <b>{} account(s) exceeding threshold of {threshold}%</b>\n\n",
        alerts.len()
    );

    for alert in alerts {
        let usage = &alert.usage;
        let percentage = format_number(usage.percentage);
        let _ = write!(
            message,
            "📊 <b>Account:</b> <code>{}</code>\n\
             💾 <b>Usage:</b> {}MB / {}MB\n\
             📈 <b>Percentage:</b> {percentage}%\n\
             📊 {} {percentage}%\n\n",
            escape_html(&alert.account),
            format_number(usage.used),
            format_number(usage.limit),
            progress_bar(usage.percentage),
        );
    }

    message.push_str(RULE);
    message.push('\n');
    message.push_str(&render_summary(checked, alerts.len(), completed_at));
    message
}

pub fn render_test_message(sent_at: &str) -> String {
    format!(
        "🔧 <b>WHM Disk Monitor Test</b>\n\n\
         This is a test message from your WHM Disk Usage Monitor.\n\
         If you receive this, Telegram notifications are working correctly!\n\n\
         📅 Test time: {sent_at}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UsageSample;

    fn filled(bar: &str) -> usize {
        bar.matches(BAR_FILLED).count()
    }

    #[test]
    fn bar_rounds_to_nearest_segment() {
        assert_eq!(filled(&progress_bar(95.0)), 10);
        assert_eq!(filled(&progress_bar(43.0)), 4);
        assert_eq!(filled(&progress_bar(45.0)), 5);
        assert_eq!(filled(&progress_bar(0.0)), 0);
    }

    #[test]
    fn bar_is_clamped_to_length() {
        let bar = progress_bar(250.0);
        assert_eq!(filled(&bar), BAR_SEGMENTS);
        assert_eq!(bar.matches(BAR_EMPTY).count(), 0);

        let bar = progress_bar(-20.0);
        assert_eq!(bar.matches(BAR_EMPTY).count(), BAR_SEGMENTS);
    }

    #[test]
    fn numbers_use_one_decimal_and_grouping() {
        assert_eq!(format_number(95.0), "95.0");
        assert_eq!(format_number(1234.56), "1,234.6");
        assert_eq!(format_number(1_000_000.0), "1,000,000.0");
        assert_eq!(format_number(999.94), "999.9");
        assert_eq!(format_number(-1234.5678), "-1,234.6");
        assert_eq!(format_number(-0.01), "0.0");
    }

    #[test]
    fn alert_lists_each_account_in_order() {
        let alerts = vec![
            AlertEntry {
                account: "bravo".into(),
                usage: UsageSample::new(95.0, 100.0).unwrap(),
            },
            AlertEntry {
                account: "delta<x>".into(),
                usage: UsageSample::new(2048.0, 2000.0).unwrap(),
            },
        ];
        let message = render_alert(&alerts, 7, 90.0, "2025-06-01 09:30:00 CEST");

        assert!(message.starts_with("🚨 <b>cPanel High Disk Usage Alert</b> 🚨\n\n"));
        assert!(message.contains("⚠️ <b>2 account(s) exceeding threshold of 90%</b>"));
        assert!(message.contains("<code>bravo</code>"));
        assert!(message.contains("<code>delta&lt;x&gt;</code>"));
        assert!(message.contains("💾 <b>Usage:</b> 95.0MB / 100.0MB"));
        assert!(message.contains("💾 <b>Usage:</b> 2,048.0MB / 2,000.0MB"));
        assert!(message.contains("📈 <b>Percentage:</b> 102.4%"));
        assert!(message.find("bravo").unwrap() < message.find("delta").unwrap());
        assert!(message.contains(RULE));
        assert!(message.contains("✅ <b>Accounts checked:</b> 7"));
        assert!(message.contains("🚨 <b>Accounts over threshold:</b> 2"));
        assert!(message.ends_with("🕐 <b>Completed:</b> 2025-06-01 09:30:00 CEST"));
    }

    #[test]
    fn threshold_prints_without_trailing_zeros() {
        let alerts = vec![AlertEntry {
            account: "a".into(),
            usage: UsageSample::new(90.0, 100.0).unwrap(),
        }];
        assert!(render_alert(&alerts, 1, 87.5, "t").contains("threshold of 87.5%"));
    }

    #[test]
    fn summary_has_no_alert_header() {
        let message = render_summary(4, 0, "2025-06-01 09:30:00 CEST");
        assert!(message.starts_with("📋 <b>Monitoring Summary</b>"));
        assert!(message.contains("✅ <b>Accounts checked:</b> 4"));
        assert!(message.contains("🚨 <b>Accounts over threshold:</b> 0"));
        assert!(!message.contains("High Disk Usage Alert"));
    }
}
