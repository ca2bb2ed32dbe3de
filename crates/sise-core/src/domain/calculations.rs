//! 파생 시계열 계산 공통 로직.
//!
//! 조회된 일별 시세에서 표시용 파생값을 계산합니다:
//! - 정규화 종가: 기간 첫 종가를 100으로 맞춘 비교용 시계열
//! - 기간 수익률: `(마지막 종가 / 첫 종가 - 1) × 100`

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::market_data::{CompanySeries, DailyPrice};

/// 정규화 종가 한 점.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    /// 거래일
    pub date: NaiveDate,
    /// 정규화 종가 (기간 시작 = 100)
    pub value: Decimal,
}

/// 종가 시계열을 기간 시작 100 기준으로 정규화합니다.
///
/// 첫 거래일의 값은 항상 정확히 100입니다. 입력이 비어 있거나
/// 첫 종가가 0이면 빈 시계열을 반환합니다.
///
/// # Arguments
///
/// * `prices` - 일별 시세 (날짜 오름차순 정렬)
pub fn normalized_closes(prices: &[DailyPrice]) -> Vec<NormalizedPoint> {
    let first = match prices.first() {
        Some(p) if !p.close.is_zero() => p.close,
        _ => return Vec::new(),
    };

    prices
        .iter()
        .map(|p| NormalizedPoint {
            date: p.date,
            value: p.close / first * dec!(100),
        })
        .collect()
}

/// 기간 수익률(%)을 계산합니다.
///
/// `(마지막 종가 / 첫 종가 - 1) × 100`. 입력이 비어 있거나
/// 첫 종가가 0이면 `None`을 반환합니다.
pub fn period_return_pct(prices: &[DailyPrice]) -> Option<Decimal> {
    let first = prices.first()?.close;
    if first.is_zero() {
        return None;
    }
    let last = prices.last()?.close;
    Some((last / first - Decimal::ONE) * dec!(100))
}

/// 수익률 요약표 한 행.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnSummary {
    /// 기업명
    pub name: String,
    /// 시작 종가
    pub start_close: Decimal,
    /// 마지막 종가
    pub end_close: Decimal,
    /// 수익률 (%)
    pub return_pct: Decimal,
}

/// 각 종목의 수익률 요약을 만들고 수익률 내림차순으로 정렬합니다.
///
/// 시세가 비어 있는 종목은 건너뜁니다 (비교 흐름에서는 분할 단계에서
/// 이미 실패로 걸러지므로 정상 경로에서는 발생하지 않습니다).
pub fn return_summaries(series: &[CompanySeries]) -> Vec<ReturnSummary> {
    let mut rows: Vec<ReturnSummary> = series
        .iter()
        .filter_map(|s| {
            let return_pct = period_return_pct(&s.prices)?;
            Some(ReturnSummary {
                name: s.name.clone(),
                start_close: s.first_close()?,
                end_close: s.last_close()?,
                return_pct: return_pct.round_dp(2),
            })
        })
        .collect();

    rows.sort_by(|a, b| b.return_pct.cmp(&a.return_pct));
    rows
}
