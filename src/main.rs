use ambulance_cost_simulator::{
    app::{self, AppError},
    cli::Cli,
    i18n::{self, keys, Translator},
    logger,
};
use clap::Parser;

/// 프로그램의 엔트리 포인트. 인자를 파싱한 뒤 명령을 실행한다.
fn main() {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    let mut session = match app::open_session(&cli) {
        Ok(session) => session,
        Err(err) => {
            // 설정을 못 읽었으면 CLI 플래그와 시스템 로케일로 언어를 정한다
            let lang = i18n::resolve_language(cli.lang.as_deref(), None);
            exit_with(&Translator::new(&lang), &err)
        }
    };
    if let Err(err) = app::execute(&mut session, cli.command) {
        exit_with(&session.tr, &err);
    }
}

fn exit_with(tr: &Translator, err: &AppError) -> ! {
    eprintln!("{}: {}", tr.t(keys::ERROR_PREFIX), err.localized(tr));
    std::process::exit(1)
}
