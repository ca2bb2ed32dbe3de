//! 조회 조건 및 입력 검증.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// 6자리 종목코드인지 확인합니다.
///
/// 한국 주식의 종목코드는 6자리 숫자입니다 (예: "005930").
/// 앞뒤 공백은 호출 전에 제거되어 있어야 합니다.
pub fn is_ticker_code(s: &str) -> bool {
    s.len() == 6 && s.chars().all(|c| c.is_ascii_digit())
}

/// 시세 조회 조건.
///
/// 생성 시점에 입력을 검증하므로, 이 타입의 값이 존재한다는 것은
/// 조회를 시도해도 된다는 뜻입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceQuery {
    /// 회사명 또는 6자리 종목코드 (공백 제거됨)
    pub identifier: String,
    /// 조회 시작일
    pub start: NaiveDate,
    /// 조회 종료일
    pub end: NaiveDate,
}

impl PriceQuery {
    /// 입력을 검증하고 조회 조건을 생성합니다.
    ///
    /// # 검증 규칙
    /// - 회사명/종목코드는 공백 제거 후 비어 있으면 안 됩니다.
    /// - `start <= end` 이어야 합니다.
    pub fn new(identifier: &str, start: NaiveDate, end: NaiveDate) -> CoreResult<Self> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(CoreError::InvalidInput("회사명을 입력하세요.".to_string()));
        }
        if start > end {
            return Err(CoreError::InvalidInput(format!(
                "시작일({})이 종료일({})보다 늦을 수 없습니다.",
                start, end
            )));
        }

        Ok(Self {
            identifier: identifier.to_string(),
            start,
            end,
        })
    }
}
