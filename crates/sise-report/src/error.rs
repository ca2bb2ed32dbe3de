//! 표현 계층 오류 타입.

use thiserror::Error;

/// 산출물 생성 오류.
#[derive(Debug, Error)]
pub enum ReportError {
    /// 차트 렌더링 실패
    #[error("차트 렌더링 실패: {0}")]
    Chart(String),

    /// 엑셀 저장 실패
    #[error("엑셀 저장 실패: {0}")]
    Excel(#[from] rust_xlsxwriter::XlsxError),

    /// 파일 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),

    /// 빈 시계열은 렌더링할 수 없음
    #[error("빈 시계열은 렌더링할 수 없습니다.")]
    EmptySeries,
}

/// 표현 작업을 위한 Result 타입.
pub type Result<T> = std::result::Result<T, ReportError>;
