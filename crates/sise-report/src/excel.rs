//! 엑셀 파일 저장.
//!
//! 종목당 시트 하나씩, 날짜/OHLCV 전체 행을 기록합니다.

use std::path::Path;

use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook};
use tracing::info;

use sise_core::CompanySeries;

use crate::error::Result;

/// 시트 이름 최대 길이.
const MAX_SHEET_NAME_CHARS: usize = 30;

/// 열 머리글.
const HEADERS: [&str; 6] = ["Date", "Open", "High", "Low", "Close", "Volume"];

/// 회사명을 시트 이름으로 다듬습니다.
///
/// 30자(문자 기준)로 자르고, 엑셀이 허용하지 않는 문자는 밑줄로
/// 바꿉니다.
pub fn sheet_name(name: &str) -> String {
    name.chars()
        .take(MAX_SHEET_NAME_CHARS)
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            other => other,
        })
        .collect()
}

/// 종목별 시트를 담은 엑셀 파일을 저장합니다.
///
/// 시트 순서는 입력 순서를 따릅니다. 기록한 데이터 행 수 합계를
/// 반환합니다.
pub fn write_workbook(path: &Path, series: &[CompanySeries]) -> Result<usize> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let mut total_rows = 0usize;

    for company in series {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_name(&company.name))?;

        for (col, header) in HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &bold)?;
        }

        for (row, price) in company.prices.iter().enumerate() {
            let row = (row + 1) as u32;
            worksheet.write_string(row, 0, price.date.format("%Y-%m-%d").to_string())?;
            worksheet.write_number(row, 1, price.open.to_f64().unwrap_or(0.0))?;
            worksheet.write_number(row, 2, price.high.to_f64().unwrap_or(0.0))?;
            worksheet.write_number(row, 3, price.low.to_f64().unwrap_or(0.0))?;
            worksheet.write_number(row, 4, price.close.to_f64().unwrap_or(0.0))?;
            worksheet.write_number(row, 5, price.volume.to_f64().unwrap_or(0.0))?;
        }

        total_rows += company.prices.len();
    }

    workbook.save(path)?;
    info!(path = %path.display(), sheets = series.len(), rows = total_rows, "엑셀 저장 완료");
    Ok(total_rows)
}
