//! 회사명/종목코드 → 종목코드 해석.

use chrono::{DateTime, Utc};
use tracing::debug;

use sise_core::is_ticker_code;

use crate::directory::{DirectoryCache, ListingSource};
use crate::error::{DataError, Result};

/// 심볼 해석기.
///
/// 디렉토리 캐시를 소유하며, 입력이 이미 6자리 종목코드면 디렉토리를
/// 조회하지 않고 그대로 돌려줍니다.
pub struct SymbolResolver<S: ListingSource> {
    directory: DirectoryCache<S>,
}

impl<S: ListingSource> SymbolResolver<S> {
    /// 새 해석기를 생성합니다.
    pub fn new(directory: DirectoryCache<S>) -> Self {
        Self { directory }
    }

    /// 회사명 또는 종목코드를 6자리 종목코드로 해석합니다.
    ///
    /// # Arguments
    ///
    /// * `identifier` - 회사명 또는 6자리 종목코드 (앞뒤 공백 허용)
    /// * `now` - 캐시 만료 판정에 쓰이는 현재 시각
    ///
    /// # Errors
    ///
    /// 디렉토리에 완전 일치하는 회사명이 없으면
    /// [`DataError::SymbolNotFound`]를 반환합니다.
    pub async fn resolve(&self, identifier: &str, now: DateTime<Utc>) -> Result<String> {
        let identifier = identifier.trim();

        // 종목코드를 직접 입력한 경우
        if is_ticker_code(identifier) {
            return Ok(identifier.to_string());
        }

        let directory = self.directory.get_or_refresh(now).await?;
        debug!(name = identifier, directory_size = directory.len(), "회사명 조회");

        directory
            .ticker_by_name(identifier)
            .map(|ticker| ticker.to_string())
            .ok_or_else(|| DataError::SymbolNotFound(identifier.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::Duration;

    use super::*;
    use crate::directory::CompanyListing;

    /// 수집 횟수를 세는 고정 목록 소스.
    struct StubSource {
        listings: Vec<CompanyListing>,
        calls: AtomicUsize,
    }

    impl StubSource {
        fn new(listings: Vec<CompanyListing>) -> Arc<Self> {
            Arc::new(Self {
                listings,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ListingSource for Arc<StubSource> {
        async fn fetch_all(&self) -> Result<Vec<CompanyListing>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.listings.clone())
        }
    }

    fn samsung() -> Vec<CompanyListing> {
        vec![CompanyListing {
            name: "삼성전자".to_string(),
            ticker: "005930".to_string(),
        }]
    }

    fn resolver(source: &Arc<StubSource>, ttl_hours: i64) -> SymbolResolver<Arc<StubSource>> {
        SymbolResolver::new(DirectoryCache::new(
            Arc::clone(source),
            Duration::hours(ttl_hours),
        ))
    }

    fn epoch() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-03T09:00:00+09:00")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[tokio::test]
    async fn test_ticker_code_bypasses_directory() {
        let source = StubSource::new(samsung());
        let resolver = resolver(&source, 24);

        let ticker = resolver.resolve("005930", epoch()).await.unwrap();
        assert_eq!(ticker, "005930");

        // 공백이 붙어 있어도 같은 경로를 탄다
        let ticker = resolver.resolve("  035720  ", epoch()).await.unwrap();
        assert_eq!(ticker, "035720");

        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_name_lookup_and_not_found() {
        let source = StubSource::new(samsung());
        let resolver = resolver(&source, 24);

        let ticker = resolver.resolve("삼성전자", epoch()).await.unwrap();
        assert_eq!(ticker, "005930");

        let err = resolver.resolve("없는회사", epoch()).await.unwrap_err();
        assert!(matches!(err, DataError::SymbolNotFound(name) if name == "없는회사"));
    }

    #[tokio::test]
    async fn test_ttl_window_fetches_directory_once() {
        let source = StubSource::new(samsung());
        let resolver = resolver(&source, 24);

        let now = epoch();
        resolver.resolve("삼성전자", now).await.unwrap();
        // 미해석 이름이라도 TTL 이내에는 재수집하지 않는다
        let _ = resolver.resolve("없는회사", now + Duration::hours(1)).await;

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_expired_snapshot_is_refetched() {
        let source = StubSource::new(samsung());
        let resolver = resolver(&source, 24);

        let now = epoch();
        resolver.resolve("삼성전자", now).await.unwrap();
        resolver
            .resolve("삼성전자", now + Duration::hours(25))
            .await
            .unwrap();

        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }
}
