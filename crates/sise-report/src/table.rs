//! 터미널 표 포매팅.
//!
//! 렌더링 결과를 문자열로 돌려주므로 출력 없이 테스트할 수 있습니다.

use sise_core::{DailyPrice, ReturnSummary};

/// 일별 시세 표를 만듭니다. 마지막 `limit`건만 보여줍니다.
///
/// 표시 건수는 `min(전체 건수, limit)`입니다.
pub fn format_price_table(prices: &[DailyPrice], limit: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<12} {:>10} {:>10} {:>10} {:>10} {:>12}\n",
        "날짜", "시가", "고가", "저가", "종가", "거래량"
    ));
    out.push_str(&format!("{:-<70}\n", ""));

    let skip = prices.len().saturating_sub(limit);
    for p in prices.iter().skip(skip) {
        out.push_str(&format!(
            "{:<12} {:>10} {:>10} {:>10} {:>10} {:>12}\n",
            p.date.format("%Y-%m-%d"),
            p.open,
            p.high,
            p.low,
            p.close,
            p.volume
        ));
    }

    out
}

/// 수익률 요약 표를 만듭니다.
///
/// 입력은 이미 수익률 내림차순으로 정렬되어 있다고 가정합니다
/// (`return_summaries`가 정렬해서 돌려줍니다).
pub fn format_return_summary(rows: &[ReturnSummary]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<16} {:>12} {:>12} {:>10}\n",
        "기업명", "시작 종가", "마지막 종가", "수익률(%)"
    ));
    out.push_str(&format!("{:-<56}\n", ""));

    for row in rows {
        out.push_str(&format!(
            "{:<16} {:>12} {:>12} {:>10}\n",
            row.name, row.start_close, row.end_close, row.return_pct
        ));
    }

    out
}
