//! 시장 데이터 타입 및 구조체.
//!
//! 이 모듈은 시세 조회 결과를 담는 타입을 정의합니다:
//! - `DailyPrice` - 하루치 OHLCV 시세
//! - `CompanySeries` - 한 종목의 전체 조회 결과

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 하루치 OHLCV 시세.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPrice {
    /// 거래일
    pub date: NaiveDate,
    /// 시가
    pub open: Decimal,
    /// 고가
    pub high: Decimal,
    /// 저가
    pub low: Decimal,
    /// 종가
    pub close: Decimal,
    /// 거래량
    pub volume: Decimal,
}

impl DailyPrice {
    /// 새 일별 시세를 생성합니다.
    pub fn new(
        date: NaiveDate,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: Decimal,
    ) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// 캔들 범위(고가 - 저가)를 반환합니다.
    pub fn range(&self) -> Decimal {
        self.high - self.low
    }

    /// 양봉(종가 > 시가)인지 확인합니다.
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// 음봉(종가 < 시가)인지 확인합니다.
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}

/// 한 종목의 조회 결과.
///
/// `name`은 사용자가 입력한 표시용 이름을 그대로 유지합니다.
/// `prices`는 거래일 오름차순으로 정렬되어 있어야 합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanySeries {
    /// 표시용 회사명 (사용자 입력 그대로)
    pub name: String,
    /// 6자리 종목코드
    pub ticker: String,
    /// 일별 시세 (날짜 오름차순)
    pub prices: Vec<DailyPrice>,
}

impl CompanySeries {
    pub fn new(name: impl Into<String>, ticker: impl Into<String>, prices: Vec<DailyPrice>) -> Self {
        Self {
            name: name.into(),
            ticker: ticker.into(),
            prices,
        }
    }

    /// 조회된 거래일 수를 반환합니다.
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// 조회 결과가 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// 첫 거래일의 종가를 반환합니다.
    pub fn first_close(&self) -> Option<Decimal> {
        self.prices.first().map(|p| p.close)
    }

    /// 마지막 거래일의 종가를 반환합니다.
    pub fn last_close(&self) -> Option<Decimal> {
        self.prices.last().map(|p| p.close)
    }
}
