//! 단일/다종목 시세 조회 서비스.
//!
//! 해석(resolver) → 수집(provider)을 한 번에 묶어 CLI 명령이 얇아지도록
//! 합니다. 다종목 조회는 순차 루프이며, 한 종목의 실패가 나머지를
//! 멈추지 않습니다.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::warn;

use sise_core::{partition_attempts, CompanySeries, ComparisonPartition};

use crate::directory::ListingSource;
use crate::error::Result;
use crate::provider::DailyPriceProvider;
use crate::resolver::SymbolResolver;

/// 시세 조회 서비스.
pub struct QuoteService<S: ListingSource, P: DailyPriceProvider> {
    resolver: SymbolResolver<S>,
    provider: P,
}

impl<S: ListingSource, P: DailyPriceProvider> QuoteService<S, P> {
    /// 새 서비스를 생성합니다.
    pub fn new(resolver: SymbolResolver<S>, provider: P) -> Self {
        Self { resolver, provider }
    }

    /// 한 종목을 해석하고 시세를 수집합니다.
    ///
    /// 결과의 `name`에는 사용자가 입력한 표시용 이름이 그대로 남습니다.
    /// 해당 기간에 거래 데이터가 없으면 빈 시계열을 담은 성공으로
    /// 반환합니다.
    pub async fn fetch_company(
        &self,
        identifier: &str,
        start: NaiveDate,
        end: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<CompanySeries> {
        let ticker = self.resolver.resolve(identifier, now).await?;
        let prices = self.provider.fetch(&ticker, start, end).await?;
        Ok(CompanySeries::new(identifier.trim(), ticker, prices))
    }

    /// 여러 종목을 순차 조회하고 (성공, 실패)로 분할합니다.
    ///
    /// 각 종목의 수집이 끝나야(또는 실패해야) 다음 종목을 시작합니다.
    /// 재시도는 없습니다.
    pub async fn fetch_companies(
        &self,
        identifiers: &[String],
        start: NaiveDate,
        end: NaiveDate,
        now: DateTime<Utc>,
    ) -> ComparisonPartition {
        let mut attempts = Vec::with_capacity(identifiers.len());
        for identifier in identifiers {
            let outcome = self.fetch_company(identifier, start, end, now).await;
            if let Err(e) = &outcome {
                warn!(company = %identifier, error = %e, "종목 조회 실패, 계속 진행");
            }
            attempts.push((identifier.trim().to_string(), outcome));
        }

        partition_attempts(attempts)
    }
}
