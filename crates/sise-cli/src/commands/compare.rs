//! 다종목 비교 명령.
//!
//! 종목별로 독립 조회하고, 실패는 모아서 한 번에 경고합니다.
//! 모든 종목이 실패했을 때만 중단합니다.

use anyhow::{anyhow, Result};
use chrono::Utc;
use tracing::info;

use sise_core::{return_summaries, AppConfig, PriceQuery};
use sise_report::{
    format_price_table, format_return_summary, render_candles, render_normalized_comparison,
    write_workbook,
};

use super::{build_service, display_path, ensure_output_dir, file_stem, resolve_date_range, spinner};

/// `sise compare` 인자.
pub struct CompareCommand {
    /// 회사명/종목코드 (인자 파서가 1~3개로 제한)
    pub companies: Vec<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub output: Option<String>,
    pub candles: bool,
    pub full_tables: bool,
}

/// 다종목 비교를 실행합니다.
pub async fn run_compare(command: CompareCommand, app: &AppConfig) -> Result<()> {
    let (start, end) = resolve_date_range(command.from.as_deref(), command.to.as_deref())?;

    // 입력 검증 실패는 경고로 안내하고 조회 없이 끝낸다
    for company in &command.companies {
        if let Err(e) = PriceQuery::new(company, start, end) {
            println!("⚠️  {}", e);
            return Ok(());
        }
    }

    let service = build_service(app)?;

    let pb = spinner(format!("{}개 종목 조회 중...", command.companies.len()));
    let partition = service
        .fetch_companies(&command.companies, start, end, Utc::now())
        .await;
    pb.finish_and_clear();

    if !partition.failures.is_empty() {
        println!(
            "⚠️  다음 종목은 조회하지 못했습니다: {}",
            partition.failed_names().join(", ")
        );
    }

    if partition.is_total_failure() {
        return Err(anyhow!("모든 종목의 데이터를 가져오지 못했습니다."));
    }

    info!(
        successes = partition.successes.len(),
        failures = partition.failures.len(),
        "비교 조회 완료"
    );

    println!("\n📋 수익률 요약 ({} ~ {})", start, end);
    let summary = return_summaries(&partition.successes);
    print!("{}", format_return_summary(&summary));

    let out_dir = ensure_output_dir(command.output.as_deref(), app)?;
    let joined = file_stem(
        &partition
            .successes
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join("_"),
    );

    let comparison_path = out_dir.join(format!("{}_정규화비교.png", joined));
    render_normalized_comparison(
        &comparison_path,
        "정규화 종가 비교 (기간 시작 = 100)",
        &partition.successes,
    )?;
    println!("📈 정규화 비교 차트 저장: {}", display_path(&comparison_path));

    // 종목별 캔들차트는 설정 또는 --candles 플래그로 켠다
    if command.candles || app.compare.candle_charts {
        for series in &partition.successes {
            let candle_path = out_dir.join(format!("{}_캔들차트.png", file_stem(&series.name)));
            render_candles(
                &candle_path,
                &format!("{} 캔들차트", series.name),
                &series.prices,
            )?;
            println!("🕯️  캔들차트 저장: {}", display_path(&candle_path));
        }
    }

    if command.full_tables {
        for series in &partition.successes {
            println!("\n📊 [{}] 전체 시세 ({}건)", series.name, series.len());
            print!("{}", format_price_table(&series.prices, usize::MAX));
        }
    }

    let excel_path = out_dir.join(format!("{}_주가비교.xlsx", joined));
    write_workbook(&excel_path, &partition.successes)?;
    println!("💾 엑셀 저장: {}", display_path(&excel_path));

    Ok(())
}
