//! 콘솔 보고서.

use confidence_core::MarketUpdate;
use confidence_notification::format::{format_percentage, format_price, level_icon};

/// 실행 결과를 사람이 읽는 텍스트로 구성합니다.
///
/// 최신 값이 결측인 지표는 생략합니다.
pub fn format_report(update: &MarketUpdate) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Current Bitcoin price ({}): {}\n\n",
        update.date,
        format_price(update.price)
    ));
    out.push_str(":: Confidence we are at the peak ::\n");
    match update.confidence {
        Some(confidence) => out.push_str(&format!("   {}\n\n", format_percentage(confidence))),
        None => out.push_str("   n/a\n\n"),
    }

    for (detail, value) in update.present_details() {
        out.push_str(&format!(
            "{} {:>6}  - {}\n",
            level_icon(value),
            format_percentage(value),
            detail.description
        ));
    }

    out
}

/// 보고서를 표준 출력에 씁니다.
pub fn print_report(update: &MarketUpdate) {
    println!("\n{}", format_report(update));
}
