//! PNG 차트 렌더링.
//!
//! plotters 비트맵 백엔드로 세 종류의 차트를 그립니다:
//! - 종가 추이 선 차트
//! - OHLC 캔들차트 (상승 빨강 / 하락 파랑, 국내 관례)
//! - 정규화 종가 비교 차트 (기간 시작 = 100)

use std::path::Path;

use chrono::NaiveDate;
use plotters::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

use sise_core::{normalized_closes, CompanySeries, DailyPrice};

use crate::error::{ReportError, Result};

/// 차트 이미지 크기 (px).
const CHART_SIZE: (u32, u32) = (1200, 600);

/// 상승/하락 캔들 색 (국내 관례: 상승 빨강, 하락 파랑).
const BULL_COLOR: RGBColor = RED;
const BEAR_COLOR: RGBColor = BLUE;

fn to_f64(value: rust_decimal::Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// y축 범위를 계산합니다. 위아래 3% 여유를 둡니다.
fn y_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::MAX;
    let mut max = f64::MIN;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }

    let pad = ((max - min) * 0.03).max(1.0);
    (min - pad, max + pad)
}

fn date_range(prices: &[DailyPrice]) -> Result<(NaiveDate, NaiveDate)> {
    match (prices.first(), prices.last()) {
        (Some(first), Some(last)) => Ok((first.date, last.date)),
        _ => Err(ReportError::EmptySeries),
    }
}

/// 종가 추이 선 차트를 그립니다.
pub fn render_close_line(path: &Path, title: &str, prices: &[DailyPrice]) -> Result<()> {
    let (start, end) = date_range(prices)?;
    let (y_min, y_max) = y_bounds(prices.iter().map(|p| to_f64(p.close)));

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ReportError::Chart(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(80)
        .build_cartesian_2d(start..end, y_min..y_max)
        .map_err(|e| ReportError::Chart(e.to_string()))?;

    chart
        .configure_mesh()
        .x_labels(8)
        .y_label_formatter(&|v| format!("{:.0}", v))
        .draw()
        .map_err(|e| ReportError::Chart(e.to_string()))?;

    chart
        .draw_series(LineSeries::new(
            prices.iter().map(|p| (p.date, to_f64(p.close))),
            BULL_COLOR.stroke_width(2),
        ))
        .map_err(|e| ReportError::Chart(e.to_string()))?;

    root.present()
        .map_err(|e| ReportError::Chart(e.to_string()))?;
    debug!(path = %path.display(), points = prices.len(), "선 차트 저장");
    Ok(())
}

/// OHLC 캔들차트를 그립니다.
pub fn render_candles(path: &Path, title: &str, prices: &[DailyPrice]) -> Result<()> {
    let (start, end) = date_range(prices)?;
    let (y_min, y_max) = y_bounds(
        prices
            .iter()
            .flat_map(|p| [to_f64(p.low), to_f64(p.high)]),
    );

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ReportError::Chart(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(80)
        .build_cartesian_2d(start..end, y_min..y_max)
        .map_err(|e| ReportError::Chart(e.to_string()))?;

    chart
        .configure_mesh()
        .x_labels(8)
        .y_label_formatter(&|v| format!("{:.0}", v))
        .draw()
        .map_err(|e| ReportError::Chart(e.to_string()))?;

    // 캔들 폭은 거래일 수에 맞춰 조절한다
    let width = (CHART_SIZE.0 / (prices.len() as u32 + 1)).clamp(2, 12);

    chart
        .draw_series(prices.iter().map(|p| {
            CandleStick::new(
                p.date,
                to_f64(p.open),
                to_f64(p.high),
                to_f64(p.low),
                to_f64(p.close),
                BULL_COLOR.filled(),
                BEAR_COLOR.filled(),
                width,
            )
        }))
        .map_err(|e| ReportError::Chart(e.to_string()))?;

    root.present()
        .map_err(|e| ReportError::Chart(e.to_string()))?;
    debug!(path = %path.display(), bars = prices.len(), "캔들차트 저장");
    Ok(())
}

/// 정규화 종가 비교 차트를 그립니다.
///
/// 각 종목의 종가를 기간 시작 100 기준으로 정규화해 한 차트에
/// 겹쳐 그립니다. 시세가 비어 있는 종목이 있으면 에러입니다
/// (비교 흐름의 분할 단계에서 이미 걸러져 있어야 합니다).
pub fn render_normalized_comparison(
    path: &Path,
    title: &str,
    series: &[CompanySeries],
) -> Result<()> {
    let normalized: Vec<(&str, Vec<_>)> = series
        .iter()
        .map(|s| (s.name.as_str(), normalized_closes(&s.prices)))
        .collect();

    if normalized.is_empty() || normalized.iter().any(|(_, points)| points.is_empty()) {
        return Err(ReportError::EmptySeries);
    }

    let start = normalized
        .iter()
        .map(|(_, points)| points[0].date)
        .min()
        .ok_or(ReportError::EmptySeries)?;
    let end = normalized
        .iter()
        .filter_map(|(_, points)| points.last().map(|p| p.date))
        .max()
        .ok_or(ReportError::EmptySeries)?;
    let (y_min, y_max) = y_bounds(
        normalized
            .iter()
            .flat_map(|(_, points)| points.iter().map(|p| to_f64(p.value))),
    );

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ReportError::Chart(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(64)
        .build_cartesian_2d(start..end, y_min..y_max)
        .map_err(|e| ReportError::Chart(e.to_string()))?;

    chart
        .configure_mesh()
        .x_labels(8)
        .y_label_formatter(&|v| format!("{:.0}", v))
        .draw()
        .map_err(|e| ReportError::Chart(e.to_string()))?;

    for (idx, (name, points)) in normalized.iter().enumerate() {
        let style = Palette99::pick(idx).stroke_width(2);
        chart
            .draw_series(LineSeries::new(
                points.iter().map(|p| (p.date, to_f64(p.value))),
                style,
            ))
            .map_err(|e| ReportError::Chart(e.to_string()))?
            .label(*name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| ReportError::Chart(e.to_string()))?;

    root.present()
        .map_err(|e| ReportError::Chart(e.to_string()))?;
    debug!(path = %path.display(), companies = series.len(), "정규화 비교 차트 저장");
    Ok(())
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn prices(n: usize) -> Vec<DailyPrice> {
        (0..n)
            .map(|i| {
                let base = dec!(70000) + rust_decimal::Decimal::from(i as i64 * 100);
                DailyPrice::new(
                    NaiveDate::from_ymd_opt(2024, 1, 2)
                        .unwrap()
                        .checked_add_days(chrono::Days::new(i as u64))
                        .unwrap(),
                    base,
                    base + dec!(500),
                    base - dec!(500),
                    base + dec!(200),
                    dec!(100000),
                )
            })
            .collect()
    }

    fn temp_png(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("sise-chart-test-{}.png", name))
    }

    #[test]
    fn test_empty_series_is_rejected() {
        assert!(matches!(
            render_close_line(&temp_png("empty"), "빈 차트", &[]),
            Err(ReportError::EmptySeries)
        ));
        assert!(matches!(
            render_normalized_comparison(&temp_png("empty-cmp"), "빈 차트", &[]),
            Err(ReportError::EmptySeries)
        ));
    }

    #[test]
    #[ignore] // 시스템 폰트가 필요한 렌더링 테스트는 ignore
    fn test_render_line_and_candles() {
        let prices = prices(20);

        render_close_line(&temp_png("line"), "삼성전자 종가 추이", &prices).unwrap();
        render_candles(&temp_png("candle"), "삼성전자 캔들차트", &prices).unwrap();
    }

    #[test]
    #[ignore] // 시스템 폰트가 필요한 렌더링 테스트는 ignore
    fn test_render_normalized_comparison() {
        let series = vec![
            CompanySeries::new("삼성전자", "005930", prices(20)),
            CompanySeries::new("카카오", "035720", prices(20)),
        ];

        render_normalized_comparison(&temp_png("normalized"), "정규화 비교", &series).unwrap();
    }

    #[test]
    fn test_y_bounds_padding() {
        let (min, max) = y_bounds([100.0, 200.0].into_iter());
        assert!(min < 100.0);
        assert!(max > 200.0);

        // 값이 하나뿐이어도 범위가 생긴다
        let (min, max) = y_bounds([100.0].into_iter());
        assert!(min < max);
    }
}
