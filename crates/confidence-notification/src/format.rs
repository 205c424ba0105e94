//! 채널 공통 메시지 포맷.

use confidence_core::MarketUpdate;

use crate::types::{Notification, NotificationEvent};

/// 상세 분석 링크.
pub const ANALYSIS_URL: &str = "https://cbbi.info/";

/// 값 수준 아이콘 (높음 ≥ 0.7, 중간 ≥ 0.4, 그 외 낮음).
pub fn level_icon(value: f64) -> &'static str {
    if value >= 0.7 {
        "🔴"
    } else if value >= 0.4 {
        "🟡"
    } else {
        "🟢"
    }
}

/// 0~1 값을 소수 첫째 자리 백분율로 표시합니다.
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

/// 가격을 천 단위 구분 기호와 함께 표시합니다 (`$42,280.23`).
pub fn format_price(price: f64) -> String {
    let fixed = format!("{:.2}", price.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if price < 0.0 { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, fraction)
}

/// HTML 특수 문자를 이스케이프합니다.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn score_line(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{} {}", level_icon(v), format_percentage(v)),
        None => "n/a".to_string(),
    }
}

/// 채널에 독립적인 메시지 본문.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBody {
    pub subject: String,
    /// 일반 텍스트 본문
    pub text: String,
    /// HTML 본문
    pub html: String,
}

impl MessageBody {
    /// 알림 이벤트로 본문을 구성합니다.
    pub fn compose(notification: &Notification) -> Self {
        match &notification.event {
            NotificationEvent::MarketUpdate(update) => Self::market_update(update),
            NotificationEvent::Error { message } => Self::error(message),
        }
    }

    fn market_update(update: &MarketUpdate) -> Self {
        let price = format_price(update.price);
        let score = score_line(update.confidence);

        let mut text = format!(
            "Bitcoin Market Update\n\
             --------------------\n\
             Date: {}\n\
             Current Price: {}\n\
             Peak Confidence Score: {}\n\n\
             Individual Metrics:",
            update.date, price, score
        );
        let mut html = format!(
            "<h2>Bitcoin Market Update</h2>\
             <p><strong>Current Price:</strong> {}</p>\
             <p><strong>Peak Confidence Score:</strong> {}</p>\
             <h3>Individual Metrics:</h3><ul>",
            price, score
        );

        for (detail, value) in update.present_details() {
            let icon = level_icon(value);
            let pct = format_percentage(value);
            text.push_str(&format!("\n{} {}: {}", icon, detail.description, pct));
            html.push_str(&format!(
                "<li><strong>{}:</strong> {} {}</li>",
                escape_html(&detail.description),
                icon,
                pct
            ));
        }

        html.push_str("</ul>");
        html.push_str(&format!(
            "<p>For detailed analysis, visit: <a href='{0}'>{0}</a></p>",
            ANALYSIS_URL
        ));
        text.push_str(&format!("\n\nFor detailed analysis, visit: {}", ANALYSIS_URL));

        Self {
            subject: "Bitcoin Market Update".to_string(),
            text,
            html,
        }
    }

    fn error(message: &str) -> Self {
        Self {
            subject: "⚠️ Market Analysis Error".to_string(),
            text: format!("⚠️ Error in Market Analysis:\n\n{}", message),
            html: format!(
                "<h2>⚠️ Market Analysis Error</h2><pre>{}</pre>",
                escape_html(message)
            ),
        }
    }
}
