//! 일별 시세 Provider.

pub mod naver;

pub use naver::NaverChartProvider;

use async_trait::async_trait;
use chrono::NaiveDate;

use sise_core::DailyPrice;

use crate::error::Result;

/// 일별 시세 Provider trait.
///
/// 외부 시세 소스 하나에 대응합니다. 조회 기간에 거래 데이터가 없으면
/// 에러가 아니라 빈 시계열을 돌려줍니다.
#[async_trait]
pub trait DailyPriceProvider: Send + Sync {
    /// (종목코드, 기간)으로 일별 시세를 조회합니다.
    ///
    /// 반환되는 시계열은 거래일 오름차순으로 정렬되어 있습니다.
    async fn fetch(&self, ticker: &str, start: NaiveDate, end: NaiveDate)
        -> Result<Vec<DailyPrice>>;
}
