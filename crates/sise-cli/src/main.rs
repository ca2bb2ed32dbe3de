//! 국내 주가 조회 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 삼성전자 1월 시세 조회 (표 + 차트 + 엑셀)
//! sise quote 삼성전자 -f 2024-01-01 -t 2024-01-31
//!
//! # 종목코드를 직접 입력
//! sise quote 005930 -f 2024-01-01 -t 2024-01-31
//!
//! # 기간 생략 시 최근 30일
//! sise quote 카카오
//!
//! # 최대 3개 종목 비교 (정규화 차트 + 수익률 요약)
//! sise compare 삼성전자 카카오 NAVER -f 2024-01-01 -t 2024-06-30 --candles
//! ```

use clap::{Parser, Subcommand};
use tracing::error;

use sise_core::{init_logging, AppConfig};

mod commands;

use commands::compare::{run_compare, CompareCommand};
use commands::quote::{run_quote, QuoteCommand};

#[derive(Parser)]
#[command(name = "sise")]
#[command(about = "국내 주가 조회 CLI - 회사명 또는 종목코드로 일별 시세를 조회합니다", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 경로
    #[arg(long, default_value = "config/sise.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 한 종목의 일별 시세 조회 (표 + 차트 + 엑셀)
    Quote {
        /// 회사명 또는 6자리 종목코드 (예: 삼성전자, 005930)
        company: String,

        /// 조회 시작일 (YYYY-MM-DD, 생략 시 종료일 30일 전)
        #[arg(short = 'f', long)]
        from: Option<String>,

        /// 조회 종료일 (YYYY-MM-DD, 생략 시 오늘)
        #[arg(short, long)]
        to: Option<String>,

        /// 출력 디렉토리 (설정값 대신 사용)
        #[arg(short, long)]
        output: Option<String>,

        /// 엑셀 파일 저장 생략
        #[arg(long, default_value = "false")]
        no_excel: bool,
    },

    /// 최대 3개 종목 비교 (정규화 차트 + 수익률 요약 + 엑셀)
    Compare {
        /// 회사명 또는 종목코드 (1~3개)
        #[arg(num_args = 1..=3, required = true)]
        companies: Vec<String>,

        /// 조회 시작일 (YYYY-MM-DD, 생략 시 종료일 30일 전)
        #[arg(short = 'f', long)]
        from: Option<String>,

        /// 조회 종료일 (YYYY-MM-DD, 생략 시 오늘)
        #[arg(short, long)]
        to: Option<String>,

        /// 출력 디렉토리 (설정값 대신 사용)
        #[arg(short, long)]
        output: Option<String>,

        /// 종목별 캔들차트도 렌더링 (설정값보다 우선)
        #[arg(long, default_value = "false")]
        candles: bool,

        /// 종목별 전체 시세 표 출력
        #[arg(long, default_value = "false")]
        full_tables: bool,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let app_config = match AppConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ 설정 로드 실패: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(&app_config.logging) {
        eprintln!("⚠️  로깅 초기화 실패: {}", e);
    }

    let result = match cli.command {
        Commands::Quote {
            company,
            from,
            to,
            output,
            no_excel,
        } => {
            run_quote(
                QuoteCommand {
                    company,
                    from,
                    to,
                    output,
                    no_excel,
                },
                &app_config,
            )
            .await
        }
        Commands::Compare {
            companies,
            from,
            to,
            output,
            candles,
            full_tables,
        } => {
            run_compare(
                CompareCommand {
                    companies,
                    from,
                    to,
                    output,
                    candles,
                    full_tables,
                },
                &app_config,
            )
            .await
        }
    };

    if let Err(e) = result {
        error!("명령 실행 실패: {:#}", e);
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}
