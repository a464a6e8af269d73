use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::DEFAULT_CONFIG_PATH;

/// 구급차 이송 운영 월간 원가·수익성 시뮬레이터.
#[derive(Debug, Parser)]
#[command(name = "ambulance_cost_simulator", version, about)]
pub struct Cli {
    /// 설정 파일 경로
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// 표시 언어 (auto/ko/en)
    #[arg(long, short = 'L', global = true)]
    pub lang: Option<String>,

    /// 시나리오 소유자 ID
    #[arg(long, global = true)]
    pub owner: Option<String>,

    /// 디버그 로그 출력
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// 생략하면 대화형 메뉴를 실행한다
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 입력을 계산해 결과 보고서를 출력한다
    Run(RunArgs),
    /// 기본 입력을 TOML로 출력한다
    Template {
        /// 출력 파일 (생략 시 stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// 입력 파일의 파라미터 하나를 변경한다
    Set {
        key: String,
        value: f64,
        #[arg(long, short)]
        input: PathBuf,
    },
    /// 파라미터 출처 URL을 기록한다 (빈 문자열이면 삭제)
    Link {
        key: String,
        url: String,
        #[arg(long, short)]
        input: PathBuf,
    },
    /// 서비스 믹스를 변경한다
    Mix {
        service: String,
        percent: f64,
        #[arg(long, short)]
        input: PathBuf,
    },
    /// 고객 목록 편집
    #[command(subcommand)]
    Client(ClientCommand),
    /// 저장된 시나리오 관리
    #[command(subcommand)]
    Scenario(ScenarioCommand),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// 입력 TOML 파일 (생략 시 기본 입력)
    #[arg(long, short, conflicts_with = "scenario")]
    pub input: Option<PathBuf>,
    /// 저장된 시나리오 ID
    #[arg(long, short)]
    pub scenario: Option<String>,
    /// 결과를 JSON으로 출력
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum ClientCommand {
    /// 믹스 0%, 기본 요율로 고객을 추가한다
    Add {
        name: Option<String>,
        #[arg(long, short)]
        input: PathBuf,
    },
    /// 고객을 삭제한다
    Remove {
        id: u64,
        #[arg(long, short)]
        input: PathBuf,
    },
    /// 고객 믹스를 변경한다
    Mix {
        id: u64,
        percent: f64,
        #[arg(long, short)]
        input: PathBuf,
    },
    /// 고객 요율을 변경한다
    Tariff {
        id: u64,
        service: String,
        price: f64,
        #[arg(long, short)]
        input: PathBuf,
    },
}

#[derive(Debug, Subcommand)]
pub enum ScenarioCommand {
    /// 내 시나리오 목록
    List,
    /// 입력을 이름 붙여 저장한다
    Save {
        #[arg(long, short)]
        name: String,
        #[arg(long, short)]
        input: Option<PathBuf>,
    },
    /// 시나리오 입력을 TOML로 내보낸다
    Load {
        id: String,
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// 시나리오를 삭제한다
    Delete { id: String },
}
