//! 데이터 모듈 오류 타입.
//!
//! 조회 파이프라인의 닫힌 에러 분류입니다. "해당 기간에 데이터 없음"은
//! 에러가 아니라 빈 시계열(`Ok(vec![])`)로 표현합니다.

use thiserror::Error;

/// 데이터 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 회사명을 디렉토리에서 찾을 수 없음
    #[error("'{0}'을(를) 찾을 수 없습니다.")]
    SymbolNotFound(String),

    /// HTTP 요청 실패
    #[error("HTTP 요청 실패: {0}")]
    Http(#[from] reqwest::Error),

    /// 외부 소스 수집 실패 (비정상 응답 등)
    #[error("데이터 수집 실패: {0}")]
    Fetch(String),

    /// 응답 파싱 실패
    #[error("응답 파싱 실패: {0}")]
    Parse(String),
}

impl DataError {
    /// 종목 미발견 에러인지 확인합니다.
    ///
    /// 표시 계층이 메시지를 구분할 때 사용합니다. 나머지 에러 종류는
    /// 하나의 일반 조회 실패 메시지로 합쳐집니다.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::SymbolNotFound(_))
    }
}

/// 데이터 작업을 위한 Result 타입.
pub type Result<T> = std::result::Result<T, DataError>;
