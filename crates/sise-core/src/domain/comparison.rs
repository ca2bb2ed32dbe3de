//! 다종목 조회 결과의 성공/실패 분할.
//!
//! 비교 흐름은 종목별로 독립적으로 조회하고, 한 종목이 실패해도 나머지를
//! 계속 진행합니다. 이 모듈은 그 "계속 진행" 규칙을 UI와 무관한 순수
//! 함수로 표현합니다: 종목별 시도 결과를 (성공, 실패) 쌍으로 접습니다.

use serde::{Deserialize, Serialize};

use super::market_data::CompanySeries;

/// 한 종목의 조회 실패 기록.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyFailure {
    /// 사용자가 입력한 회사명
    pub name: String,
    /// 실패 사유 (표시용)
    pub reason: String,
}

/// 다종목 조회의 분할 결과.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComparisonPartition {
    /// 시세가 1건 이상 조회된 종목
    pub successes: Vec<CompanySeries>,
    /// 실패했거나 시세가 비어 있는 종목
    pub failures: Vec<CompanyFailure>,
}

impl ComparisonPartition {
    /// 모든 종목이 실패했는지 확인합니다.
    ///
    /// 이 경우 비교 흐름은 차트/표 렌더링에 도달하기 전에 중단됩니다.
    pub fn is_total_failure(&self) -> bool {
        self.successes.is_empty()
    }

    /// 실패한 회사명 목록을 반환합니다 (일괄 경고 메시지용).
    pub fn failed_names(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.name.as_str()).collect()
    }
}

/// 종목별 시도 결과를 (성공, 실패)로 분할합니다.
///
/// 입력 순서를 유지하며, 시세가 비어 있는 성공 응답도 실패로
/// 분류합니다 (해당 기간에 거래 데이터가 없는 종목은 비교에
/// 사용할 수 없으므로).
///
/// # Arguments
///
/// * `attempts` - (회사명, 조회 결과) 목록. 에러 타입은 표시 가능하기만
///   하면 됩니다.
pub fn partition_attempts<E: std::fmt::Display>(
    attempts: impl IntoIterator<Item = (String, Result<CompanySeries, E>)>,
) -> ComparisonPartition {
    attempts.into_iter().fold(
        ComparisonPartition::default(),
        |mut acc, (name, outcome)| {
            match outcome {
                Ok(series) if series.is_empty() => acc.failures.push(CompanyFailure {
                    name,
                    reason: "해당 기간의 주가 데이터가 없습니다.".to_string(),
                }),
                Ok(series) => acc.successes.push(series),
                Err(e) => acc.failures.push(CompanyFailure {
                    name,
                    reason: e.to_string(),
                }),
            }
            acc
        },
    )
}
