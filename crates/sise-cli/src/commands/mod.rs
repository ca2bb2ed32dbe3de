//! CLI 명령 구현.

pub mod compare;
pub mod quote;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use indicatif::{ProgressBar, ProgressStyle};

use sise_core::AppConfig;
use sise_data::{
    DirectoryCache, KrxListingSource, NaverChartProvider, QuoteService, SymbolResolver,
};

/// 날짜 문자열 파싱 (YYYY-MM-DD).
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("잘못된 날짜 형식: {}. YYYY-MM-DD로 입력하세요.", s))
}

/// 조회 기간을 결정합니다.
///
/// 종료일 생략 시 오늘, 시작일 생략 시 종료일 30일 전을 사용합니다.
pub fn resolve_date_range(
    from: Option<&str>,
    to: Option<&str>,
) -> Result<(NaiveDate, NaiveDate)> {
    let end = match to {
        Some(s) => parse_date(s)?,
        None => Local::now().date_naive(),
    };
    let start = match from {
        Some(s) => parse_date(s)?,
        None => end - chrono::Duration::days(30),
    };

    Ok((start, end))
}

/// 회사명을 파일 이름 조각으로 다듬습니다.
pub fn file_stem(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            other => other,
        })
        .collect()
}

/// 출력 디렉토리를 결정하고 생성합니다.
pub fn ensure_output_dir(override_dir: Option<&str>, app: &AppConfig) -> Result<PathBuf> {
    let dir = PathBuf::from(override_dir.unwrap_or(&app.output.dir));
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("출력 디렉토리 생성 실패: {}", dir.display()))?;
    Ok(dir)
}

/// 조회 서비스를 구성합니다.
pub fn build_service(
    app: &AppConfig,
) -> Result<QuoteService<KrxListingSource, NaverChartProvider>> {
    let timeout = Duration::from_secs(app.fetch.timeout_secs);

    let listing_source = KrxListingSource::new(timeout, &app.fetch.user_agent)
        .context("HTTP 클라이언트 생성 실패")?;
    let directory = DirectoryCache::new(
        listing_source,
        chrono::Duration::hours(app.cache.directory_ttl_hours),
    );
    let provider = NaverChartProvider::new(timeout, &app.fetch.user_agent)
        .context("HTTP 클라이언트 생성 실패")?;

    Ok(QuoteService::new(SymbolResolver::new(directory), provider))
}

/// 진행 상태 스피너.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// 경로를 표시용 문자열로 바꿉니다.
pub fn display_path(path: &Path) -> String {
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use chrono::Datelike;

    use super::*;

    #[test]
    fn test_parse_date() {
        let date = parse_date("2024-01-15").unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 15);

        assert!(parse_date("2024/01/15").is_err());
        assert!(parse_date("20240115").is_err());
    }

    #[test]
    fn test_resolve_date_range_explicit() {
        let (start, end) = resolve_date_range(Some("2024-01-01"), Some("2024-01-31")).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
    }

    #[test]
    fn test_resolve_date_range_default_start_is_30_days_before_end() {
        let (start, end) = resolve_date_range(None, Some("2024-03-31")).unwrap();
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_file_stem_replaces_path_chars() {
        assert_eq!(file_stem("JYP Ent./우선주"), "JYP Ent._우선주");
        assert_eq!(file_stem("삼성전자"), "삼성전자");
    }
}
