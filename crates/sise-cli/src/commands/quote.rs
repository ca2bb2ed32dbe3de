//! 단일 종목 조회 명령.
//!
//! 해석 → 수집 → 표/차트/엑셀 순서의 단선 파이프라인입니다.
//! 실패는 종류별로 메시지를 고릅니다: 입력 오류와 종목 미발견은
//! 안내 메시지, 빈 결과는 정보 메시지, 나머지는 일반 조회 실패
//! 메시지 하나로 합칩니다.

use anyhow::{anyhow, Result};
use chrono::Utc;
use tracing::info;

use sise_core::{AppConfig, PriceQuery};
use sise_report::{format_price_table, render_candles, render_close_line, write_workbook};

use super::{build_service, display_path, ensure_output_dir, file_stem, resolve_date_range, spinner};

/// `sise quote` 인자.
pub struct QuoteCommand {
    pub company: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub output: Option<String>,
    pub no_excel: bool,
}

/// 단일 종목 조회를 실행합니다.
pub async fn run_quote(command: QuoteCommand, app: &AppConfig) -> Result<()> {
    let (start, end) = resolve_date_range(command.from.as_deref(), command.to.as_deref())?;

    // 입력 검증 실패는 경고로 안내하고 조회 없이 끝낸다
    let query = match PriceQuery::new(&command.company, start, end) {
        Ok(query) => query,
        Err(e) => {
            println!("⚠️  {}", e);
            return Ok(());
        }
    };

    let service = build_service(app)?;

    let pb = spinner("데이터를 불러오는 중...");
    let outcome = service
        .fetch_company(&query.identifier, query.start, query.end, Utc::now())
        .await;
    pb.finish_and_clear();

    let series = match outcome {
        Ok(series) => series,
        Err(e) if e.is_not_found() => {
            println!("⚠️  {}", e);
            return Ok(());
        }
        Err(e) => return Err(anyhow!("데이터 조회 중 오류가 발생했습니다: {}", e)),
    };

    if series.is_empty() {
        println!("ℹ️  해당 기간의 주가 데이터가 없습니다.");
        return Ok(());
    }

    info!(
        company = %series.name,
        ticker = %series.ticker,
        rows = series.len(),
        "시세 조회 완료"
    );

    println!(
        "\n📊 [{}] 주가 데이터 ({} ~ {}, {}건 중 최근 {}건)",
        series.name,
        query.start,
        query.end,
        series.len(),
        series.len().min(10)
    );
    print!("{}", format_price_table(&series.prices, 10));

    let out_dir = ensure_output_dir(command.output.as_deref(), app)?;
    let stem = file_stem(&series.name);

    let line_path = out_dir.join(format!("{}_종가추이.png", stem));
    render_close_line(
        &line_path,
        &format!("{} 종가 추이", series.name),
        &series.prices,
    )?;
    println!("📈 종가 차트 저장: {}", display_path(&line_path));

    let candle_path = out_dir.join(format!("{}_캔들차트.png", stem));
    render_candles(
        &candle_path,
        &format!("{} 캔들차트", series.name),
        &series.prices,
    )?;
    println!("🕯️  캔들차트 저장: {}", display_path(&candle_path));

    if !command.no_excel {
        let excel_path = out_dir.join(format!("{}_주가데이터.xlsx", stem));
        write_workbook(&excel_path, std::slice::from_ref(&series))?;
        println!("💾 엑셀 저장: {}", display_path(&excel_path));
    }

    Ok(())
}
