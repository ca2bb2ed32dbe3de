//! 핵심 도메인 에러 타입.

use thiserror::Error;

/// 조회 파이프라인에 진입하기 전에 발생하는 에러.
///
/// 입력 검증 단계의 실패만 다룹니다. 조회(해석/수집) 단계의 에러는
/// `sise-data`의 `DataError`가 담당합니다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 잘못된 입력 (빈 회사명, 뒤집힌 날짜 범위 등)
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),
}

/// 핵심 도메인 작업을 위한 Result 타입.
pub type CoreResult<T> = Result<T, CoreError>;
