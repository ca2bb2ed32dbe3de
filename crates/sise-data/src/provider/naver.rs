//! 네이버 금융 일별 시세 수집기.
//!
//! 네이버 금융의 일별 차트 엔드포인트(`siseJson.naver`)에서 국내 종목의
//! OHLCV 시세를 수집합니다. 응답은 JSON과 비슷하지만 작은따옴표와
//! 빈 줄이 섞인 형태라서, 정규화 후 파싱합니다.
//!
//! ## 사용 예시
//! ```rust,ignore
//! let provider = NaverChartProvider::new(Duration::from_secs(30), "Mozilla/5.0")?;
//! let prices = provider.fetch("005930", start, end).await?;
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;

use sise_core::DailyPrice;

use crate::error::{DataError, Result};
use crate::provider::DailyPriceProvider;

/// 네이버 금융 API 기본 주소.
const NAVER_API_BASE: &str = "https://api.finance.naver.com";

/// 네이버 금융 일별 차트 수집기.
pub struct NaverChartProvider {
    client: Client,
    base_url: String,
}

impl NaverChartProvider {
    /// 새 수집기를 생성합니다.
    pub fn new(timeout: std::time::Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: NAVER_API_BASE.to_string(),
        })
    }

    /// API 기본 주소를 바꿉니다 (테스트용).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn chart_url(&self, ticker: &str, start: NaiveDate, end: NaiveDate) -> String {
        format!(
            "{}/siseJson.naver?symbol={}&requestType=1&startTime={}&endTime={}&timeframe=day",
            self.base_url,
            ticker,
            start.format("%Y%m%d"),
            end.format("%Y%m%d"),
        )
    }
}

#[async_trait]
impl DailyPriceProvider for NaverChartProvider {
    async fn fetch(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyPrice>> {
        let url = self.chart_url(ticker, start, end);
        debug!(%url, "일별 시세 요청");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(DataError::Fetch(format!(
                "시세 응답 오류: {} ({})",
                response.status(),
                ticker
            )));
        }

        let body = response.text().await?;
        parse_sise_json(&body)
    }
}

/// `siseJson.naver` 응답을 일별 시세로 파싱합니다.
///
/// 응답 형태:
///
/// ```text
/// [['날짜', '시가', '고가', '저가', '종가', '거래량', '외국인소진율'],
/// ["20240102", 79400, 79800, 78200, 79600, 17142847, 54.35],
/// ...]
/// ```
///
/// 헤더 행만 있으면(해당 기간 거래 없음) 빈 시계열을 반환합니다.
/// 결과는 거래일 오름차순으로 정렬됩니다.
pub fn parse_sise_json(body: &str) -> Result<Vec<DailyPrice>> {
    // 작은따옴표/빈 줄 섞인 유사 JSON을 표준 JSON으로 정규화
    let normalized = body.replace('\'', "\"");
    let rows: Vec<Vec<Value>> = serde_json::from_str(normalized.trim())
        .map_err(|e| DataError::Parse(format!("시세 응답 형식 오류: {}", e)))?;

    let mut prices = Vec::new();
    for row in rows {
        // 헤더 행은 첫 칸이 날짜 형식이 아니므로 자연스럽게 걸러진다
        let Some(date) = row
            .first()
            .and_then(Value::as_str)
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y%m%d").ok())
        else {
            continue;
        };

        if row.len() < 6 {
            continue;
        }

        let fields: Option<Vec<Decimal>> =
            row[1..6].iter().map(value_to_decimal).collect();
        let Some(fields) = fields else {
            continue;
        };

        prices.push(DailyPrice::new(
            date, fields[0], fields[1], fields[2], fields[3], fields[4],
        ));
    }

    prices.sort_by_key(|p| p.date);
    Ok(prices)
}

/// JSON 숫자 값을 Decimal로 변환합니다.
fn value_to_decimal(value: &Value) -> Option<Decimal> {
    if let Some(i) = value.as_i64() {
        return Some(Decimal::from(i));
    }
    value
        .as_f64()
        .and_then(|f| format!("{:.4}", f).parse().ok())
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    const SAMPLE_BODY: &str = "[['날짜', '시가', '고가', '저가', '종가', '거래량', '외국인소진율'], \n[\"20240103\", 78500, 78800, 77800, 78100, 21753644, 54.21], \n[\"20240102\", 79400, 79800, 78200, 79600, 17142847, 54.35]]\n";

    #[test]
    fn test_parse_rows_sorted_ascending() {
        let prices = parse_sise_json(SAMPLE_BODY).unwrap();

        assert_eq!(prices.len(), 2);
        assert_eq!(
            prices[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
        assert_eq!(prices[0].open, dec!(79400));
        assert_eq!(prices[0].close, dec!(79600));
        assert_eq!(prices[0].volume, dec!(17142847));
        assert_eq!(
            prices[1].date,
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
        );
    }

    #[test]
    fn test_header_only_payload_is_empty_series() {
        let body = "[['날짜', '시가', '고가', '저가', '종가', '거래량', '외국인소진율']]";
        let prices = parse_sise_json(body).unwrap();
        assert!(prices.is_empty());
    }

    #[test]
    fn test_garbage_payload_is_parse_error() {
        let err = parse_sise_json("<html>점검 중</html>").unwrap_err();
        assert!(matches!(err, DataError::Parse(_)));
    }

    #[tokio::test]
    async fn test_fetch_against_mock_server() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/siseJson.naver")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("symbol".into(), "005930".into()),
                mockito::Matcher::UrlEncoded("startTime".into(), "20240101".into()),
                mockito::Matcher::UrlEncoded("endTime".into(), "20240131".into()),
            ]))
            .with_status(200)
            .with_body(SAMPLE_BODY)
            .create_async()
            .await;

        let provider = NaverChartProvider::new(
            std::time::Duration::from_secs(5),
            "sise-test",
        )
        .unwrap()
        .with_base_url(server.url());

        let prices = provider
            .fetch(
                "005930",
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(prices.len(), 2);
    }

    #[tokio::test]
    #[ignore] // 실제 네트워크 테스트는 ignore
    async fn test_fetch_samsung() {
        let provider = NaverChartProvider::new(
            std::time::Duration::from_secs(30),
            "Mozilla/5.0",
        )
        .unwrap();

        let prices = provider
            .fetch(
                "005930",
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            )
            .await
            .unwrap();

        assert!(!prices.is_empty());
        println!("삼성전자 {}건", prices.len());
        for p in prices.iter().take(3) {
            println!("{} 종가 {}", p.date, p.close);
        }
    }
}
