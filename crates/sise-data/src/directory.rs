//! KRX 상장사 디렉토리.
//!
//! KRX 상장법인목록 페이지(EUC-KR HTML 테이블)를 내려받아
//! (회사명, 종목코드) 스냅샷을 만들고, TTL이 지나기 전까지는 같은
//! 스냅샷을 재사용합니다.
//!
//! 캐시는 전역 상태가 아니라 `DirectoryCache` 객체가 소유하며,
//! 시각(`now`)과 수집 소스(`ListingSource`)를 주입받으므로 네트워크
//! 없이 결정적으로 테스트할 수 있습니다.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use scraper::{Html, Selector};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::{DataError, Result};

/// KRX 상장법인목록 다운로드 주소.
const KRX_LISTING_URL: &str =
    "https://kind.krx.co.kr/corpgeneral/corpList.do?method=download&searchType=13";

/// 상장사 목록 한 건.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyListing {
    /// 회사명
    pub name: String,
    /// 6자리 종목코드 (0 채움 완료)
    pub ticker: String,
}

/// 상장사 목록 수집 소스.
///
/// 운영 구현은 [`KrxListingSource`]이며, 테스트에서는 고정 목록을
/// 돌려주는 스텁으로 대체합니다.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// 전체 상장사 목록을 수집합니다.
    async fn fetch_all(&self) -> Result<Vec<CompanyListing>>;
}

/// KRX 상장법인목록 페이지 수집기.
pub struct KrxListingSource {
    client: Client,
    url: String,
}

impl KrxListingSource {
    /// 새 수집기를 생성합니다.
    pub fn new(timeout: std::time::Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            url: KRX_LISTING_URL.to_string(),
        })
    }

    /// 다운로드 주소를 바꿉니다 (테스트용).
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

#[async_trait]
impl ListingSource for KrxListingSource {
    async fn fetch_all(&self) -> Result<Vec<CompanyListing>> {
        debug!(url = %self.url, "상장법인목록 다운로드");

        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(DataError::Fetch(format!(
                "상장법인목록 응답 오류: {}",
                response.status()
            )));
        }

        // 페이지는 EUC-KR로 인코딩되어 있다
        let bytes = response.bytes().await?;
        let (html, _, _) = encoding_rs::EUC_KR.decode(&bytes);

        parse_listing_html(&html)
    }
}

/// 상장법인목록 HTML 테이블을 파싱합니다.
///
/// 각 행의 첫 칸이 회사명, 둘째 칸이 종목코드입니다. 종목코드는
/// 6자리 미만이면 앞을 0으로 채웁니다.
pub fn parse_listing_html(html: &str) -> Result<Vec<CompanyListing>> {
    let document = Html::parse_document(html);
    let row_selector = Selector::parse("table tr")
        .map_err(|e| DataError::Parse(format!("잘못된 셀렉터: {}", e)))?;
    let cell_selector =
        Selector::parse("td").map_err(|e| DataError::Parse(format!("잘못된 셀렉터: {}", e)))?;

    let mut listings = Vec::new();
    for row in document.select(&row_selector) {
        let cells: Vec<String> = row
            .select(&cell_selector)
            .map(|td| td.text().collect::<String>().trim().to_string())
            .collect();

        // 헤더 행(th만 있는 행)이나 불완전한 행은 건너뛴다
        if cells.len() < 2 {
            continue;
        }

        let name = cells[0].clone();
        let code = &cells[1];
        if name.is_empty() || code.is_empty() || !code.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }

        listings.push(CompanyListing {
            name,
            ticker: format!("{:0>6}", code),
        });
    }

    Ok(listings)
}

/// 한 시점의 상장사 디렉토리 스냅샷.
#[derive(Debug)]
pub struct CompanyDirectory {
    by_name: HashMap<String, String>,
    fetched_at: DateTime<Utc>,
}

impl CompanyDirectory {
    /// 수집된 목록으로 스냅샷을 만듭니다.
    pub fn from_listings(listings: Vec<CompanyListing>, fetched_at: DateTime<Utc>) -> Self {
        let by_name = listings
            .into_iter()
            .map(|listing| (listing.name, listing.ticker))
            .collect();

        Self {
            by_name,
            fetched_at,
        }
    }

    /// 회사명 완전 일치로 종목코드를 찾습니다.
    pub fn ticker_by_name(&self, name: &str) -> Option<&str> {
        self.by_name.get(name).map(|s| s.as_str())
    }

    /// 스냅샷이 만들어진 시각.
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// 스냅샷에 담긴 회사 수.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// TTL 기반 디렉토리 캐시.
///
/// 스냅샷이 없거나 `now - fetched_at >= ttl`이면 소스에서 통째로
/// 다시 수집합니다. 부분 갱신은 없습니다.
pub struct DirectoryCache<S: ListingSource> {
    source: S,
    ttl: Duration,
    snapshot: RwLock<Option<Arc<CompanyDirectory>>>,
}

impl<S: ListingSource> DirectoryCache<S> {
    /// 새 캐시를 생성합니다. 첫 조회 전까지는 아무것도 수집하지 않습니다.
    pub fn new(source: S, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            snapshot: RwLock::new(None),
        }
    }

    /// 유효한 스냅샷을 돌려주거나, 만료되었으면 갱신합니다.
    ///
    /// # Arguments
    ///
    /// * `now` - 호출 시점. 주입받으므로 테스트에서 시간을 임의로
    ///   진행시킬 수 있습니다.
    pub async fn get_or_refresh(&self, now: DateTime<Utc>) -> Result<Arc<CompanyDirectory>> {
        {
            let guard = self.snapshot.read().await;
            if let Some(directory) = guard.as_ref() {
                if now - directory.fetched_at() < self.ttl {
                    return Ok(Arc::clone(directory));
                }
            }
        }

        let mut guard = self.snapshot.write().await;
        // 쓰기 잠금을 기다리는 동안 다른 호출이 갱신했을 수 있다
        if let Some(directory) = guard.as_ref() {
            if now - directory.fetched_at() < self.ttl {
                return Ok(Arc::clone(directory));
            }
        }

        let listings = self.source.fetch_all().await?;
        info!(count = listings.len(), "상장사 디렉토리 갱신 완료");

        let directory = Arc::new(CompanyDirectory::from_listings(listings, now));
        *guard = Some(Arc::clone(&directory));
        Ok(directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
        <html><body><table>
            <tr><th>회사명</th><th>종목코드</th><th>업종</th></tr>
            <tr><td>삼성전자</td><td>5930</td><td>통신 및 방송 장비 제조업</td></tr>
            <tr><td>카카오</td><td>035720</td><td>포털 서비스</td></tr>
            <tr><td></td><td>123456</td><td>이름 없음</td></tr>
        </table></body></html>
    "#;

    #[test]
    fn test_parse_listing_zero_pads_codes() {
        let listings = parse_listing_html(SAMPLE_HTML).unwrap();

        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].name, "삼성전자");
        assert_eq!(listings[0].ticker, "005930");
        assert_eq!(listings[1].ticker, "035720");
    }

    #[test]
    fn test_parse_listing_skips_header_and_blank_rows() {
        let listings = parse_listing_html("<table><tr><th>회사명</th></tr></table>").unwrap();
        assert!(listings.is_empty());
    }

    #[test]
    fn test_directory_lookup_is_exact_match() {
        let directory = CompanyDirectory::from_listings(
            vec![CompanyListing {
                name: "삼성전자".to_string(),
                ticker: "005930".to_string(),
            }],
            Utc::now(),
        );

        assert_eq!(directory.ticker_by_name("삼성전자"), Some("005930"));
        assert_eq!(directory.ticker_by_name("삼성"), None);
        assert_eq!(directory.ticker_by_name("삼성전자우"), None);
    }
}
