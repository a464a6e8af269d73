use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::cli::{ClientCommand, Cli, Command, RunArgs, ScenarioCommand};
use crate::config::{self, Config};
use crate::i18n::{self, keys, Translator};
use crate::scenario::{
    resolve_owner, JsonFileStore, OwnerId, ScenarioError, ScenarioId, ScenarioStore,
};
use crate::simulation::{self, InputError, InputModel, SimulationError, SimulationResult};
use crate::ui_cli::{self, MenuChoice};
use crate::validation;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("입출력 오류: {0}")]
    Io(#[from] io::Error),
    #[error("설정 오류: {0}")]
    Config(#[from] config::ConfigError),
    #[error("입력 오류: {0}")]
    Input(#[from] InputError),
    #[error("계산 오류: {0}")]
    Simulation(#[from] SimulationError),
    #[error("시나리오 오류: {0}")]
    Scenario(#[from] ScenarioError),
    #[error("입력 파일 파싱 오류: {0}")]
    InputParse(#[from] toml::de::Error),
    #[error("입력 파일 직렬화 오류: {0}")]
    InputSerialize(#[from] toml::ser::Error),
    #[error("JSON 직렬화 오류: {0}")]
    Json(#[from] serde_json::Error),
    /// 대화형 입력 스트림이 닫힘 (EOF)
    #[error("입력이 종료되었습니다")]
    InputClosed,
}

impl AppError {
    /// 사용자 언어로 오류 메시지를 만든다.
    pub fn localized(&self, tr: &Translator) -> String {
        match self {
            AppError::Io(e) => format!("{}: {e}", tr.t(keys::ERR_IO)),
            AppError::Config(e) => {
                let detail = match e {
                    config::ConfigError::Io(e) => e.to_string(),
                    config::ConfigError::Serde(e) => e.to_string(),
                    config::ConfigError::Serialize(e) => e.to_string(),
                };
                format!("{}: {detail}", tr.t(keys::ERR_CONFIG))
            }
            AppError::Input(e) => match e {
                InputError::UnknownParameter(key) => {
                    fill(tr, keys::ERR_UNKNOWN_PARAMETER, &[key.as_str()])
                }
                InputError::UnknownService(id) => {
                    fill(tr, keys::ERR_UNKNOWN_SERVICE, &[id.as_str()])
                }
                InputError::UnknownClient(id) => {
                    fill(tr, keys::ERR_UNKNOWN_CLIENT, &[id.to_string().as_str()])
                }
                InputError::NotFinite(v) => {
                    fill(tr, keys::ERR_NOT_FINITE, &[v.to_string().as_str()])
                }
            },
            AppError::Simulation(e) => match e {
                SimulationError::MissingTariff { client, service } => {
                    fill(tr, keys::ERR_MISSING_TARIFF, &[client.as_str(), service.as_str()])
                }
                SimulationError::UnknownService(id) => {
                    fill(tr, keys::ERR_UNKNOWN_SERVICE, &[id.as_str()])
                }
            },
            AppError::Scenario(e) => match e {
                ScenarioError::NotSignedIn => tr.t(keys::ERR_NOT_SIGNED_IN).to_string(),
                ScenarioError::InvalidOwner(raw) => {
                    fill(tr, keys::ERR_INVALID_OWNER, &[raw.as_str()])
                }
                ScenarioError::EmptyName => tr.t(keys::ERR_EMPTY_NAME).to_string(),
                ScenarioError::NotFound(id) => {
                    fill(tr, keys::ERR_SCENARIO_NOT_FOUND, &[id.as_str()])
                }
                ScenarioError::Io(e) => format!("{}: {e}", tr.t(keys::ERR_SCENARIO_FILE)),
                ScenarioError::Serde(e) => format!("{}: {e}", tr.t(keys::ERR_SCENARIO_FILE)),
            },
            AppError::InputParse(e) => format!("{}: {e}", tr.t(keys::ERR_INPUT_FILE)),
            AppError::InputSerialize(e) => format!("{}: {e}", tr.t(keys::ERR_INPUT_FILE)),
            AppError::Json(e) => format!("{}: {e}", tr.t(keys::ERR_JSON)),
            AppError::InputClosed => tr.t(keys::ERR_INPUT_CLOSED).to_string(),
        }
    }
}

/// `{0}`, `{1}` 자리표시자를 순서대로 채운다.
fn fill(tr: &Translator, key: &str, args: &[&str]) -> String {
    args.iter()
        .enumerate()
        .fold(tr.t(key).to_string(), |acc, (i, arg)| {
            acc.replace(&format!("{{{i}}}"), arg)
        })
}

/// 대화형/명령형 실행이 공유하는 상태.
pub struct Session {
    pub config: Config,
    pub config_path: PathBuf,
    pub tr: Translator,
    pub catalog: Catalog,
    pub input: InputModel,
    /// 마지막으로 성공한 계산 결과. 운행량이 0이면 갱신되지 않는다.
    pub result: Option<SimulationResult>,
    /// 최근 계산이 건너뛰어져 `result`가 직전 값인지 여부
    pub result_is_stale: bool,
    pub owner: Option<OwnerId>,
    pub store: JsonFileStore,
}

impl Session {
    pub fn new(
        config: Config,
        config_path: PathBuf,
        cli_lang: Option<&str>,
        cli_owner: Option<&str>,
    ) -> Result<Self, AppError> {
        let lang = i18n::resolve_language(cli_lang, Some(config.language.as_str()));
        let owner = resolve_owner(cli_owner, config.owner.as_deref())?;
        let catalog = Catalog::standard();
        let input = InputModel::default_for(&catalog);
        let store = JsonFileStore::new(config.scenario_dir.clone());
        Ok(Self {
            tr: Translator::new_with_pack(&lang, None),
            config,
            config_path,
            catalog,
            input,
            result: None,
            result_is_stale: false,
            owner,
            store,
        })
    }

    /// 현재 입력으로 다시 계산한다. 결과가 없으면 직전 결과를 유지하고 false를 돌려준다.
    pub fn recompute(&mut self) -> Result<bool, AppError> {
        let options = self.config.simulation_options();
        match simulation::compute_with(&self.input, &self.catalog, &options)? {
            Some(result) => {
                self.result = Some(result);
                self.result_is_stale = false;
                Ok(true)
            }
            None => {
                self.result_is_stale = self.result.is_some();
                Ok(false)
            }
        }
    }

    pub fn require_owner(&self) -> Result<&OwnerId, ScenarioError> {
        self.owner.as_ref().ok_or(ScenarioError::NotSignedIn)
    }

    pub fn save_config(&self) -> Result<(), AppError> {
        self.config.save(&self.config_path)?;
        Ok(())
    }

    pub fn set_language(&mut self, code: &str) {
        self.config.language = code.trim().to_string();
        let lang = i18n::resolve_language(None, Some(self.config.language.as_str()));
        self.tr = Translator::new_with_pack(&lang, None);
    }
}

/// 입력 TOML 파일을 읽는다.
pub fn read_input(path: &Path) -> Result<InputModel, AppError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// 입력을 TOML 파일로 쓴다.
pub fn write_input(path: &Path, input: &InputModel) -> Result<(), AppError> {
    let content = toml::to_string_pretty(input)?;
    fs::write(path, content)?;
    Ok(())
}

/// 설정을 읽고 CLI 인자를 반영한 세션을 만든다.
pub fn open_session(cli: &Cli) -> Result<Session, AppError> {
    let config = config::load_or_default(&cli.config)?;
    let session = Session::new(
        config,
        cli.config.clone(),
        cli.lang.as_deref(),
        cli.owner.as_deref(),
    )?;
    debug!(owner = ?session.owner, "세션 시작");
    Ok(session)
}

/// 명령을 실행한다. 명령이 없으면 대화형 메뉴를 띄운다.
pub fn execute(session: &mut Session, command: Option<Command>) -> Result<(), AppError> {
    match command {
        None => run_interactive(session, &mut io::stdin().lock()),
        Some(Command::Run(args)) => run_report(session, args),
        Some(Command::Template { output }) => {
            let input = InputModel::default_for(&session.catalog);
            emit_input(session, &input, output.as_deref())
        }
        Some(Command::Set { key, value, input }) => edit_input_file(&input, |model| {
            model.set_parameter(&key, value)
        }),
        Some(Command::Link { key, url, input }) => {
            edit_input_file(&input, |model| model.set_source_link(&key, &url))
        }
        Some(Command::Mix {
            service,
            percent,
            input,
        }) => edit_input_file(&input, |model| {
            model.set_service_mix(&session.catalog, &service, percent)
        }),
        Some(Command::Client(cmd)) => run_client_command(session, cmd),
        Some(Command::Scenario(cmd)) => run_scenario_command(session, cmd),
    }
}

fn run_report(session: &mut Session, args: RunArgs) -> Result<(), AppError> {
    if let Some(path) = &args.input {
        session.input = read_input(path)?;
    } else if let Some(raw) = &args.scenario {
        let owner = session.require_owner()?;
        let scenario = session.store.load(owner, &ScenarioId::parse(raw)?)?;
        session.input = scenario.inputs;
    }
    session.recompute()?;

    if args.json {
        let json = serde_json::to_string_pretty(&session.result)?;
        println!("{json}");
        return Ok(());
    }
    let warnings = validation::check_mix(&session.input, session.config.mix_tolerance_percent);
    match &session.result {
        Some(result) => {
            ui_cli::render_report(&session.tr, result, &warnings, &mut io::stdout().lock())?
        }
        None => println!("{}", session.tr.t(keys::REPORT_NO_RESULT)),
    }
    Ok(())
}

fn emit_input(session: &Session, input: &InputModel, output: Option<&Path>) -> Result<(), AppError> {
    match output {
        Some(path) => {
            write_input(path, input)?;
            println!("{} {}", session.tr.t(keys::FILE_WRITTEN), path.display());
        }
        None => print!("{}", toml::to_string_pretty(input)?),
    }
    Ok(())
}

fn edit_input_file<F>(path: &Path, edit: F) -> Result<(), AppError>
where
    F: FnOnce(&mut InputModel) -> Result<(), InputError>,
{
    let mut model = read_input(path)?;
    edit(&mut model)?;
    write_input(path, &model)?;
    info!(path = %path.display(), "입력 파일 갱신");
    Ok(())
}

fn run_client_command(session: &Session, cmd: ClientCommand) -> Result<(), AppError> {
    let catalog = &session.catalog;
    match cmd {
        ClientCommand::Add { name, input } => {
            let mut model = read_input(&input)?;
            let id = model.add_client(catalog, name.as_deref());
            write_input(&input, &model)?;
            println!("{} {id}", session.tr.t(keys::CLIENT_ADDED));
        }
        ClientCommand::Remove { id, input } => {
            let mut model = read_input(&input)?;
            let removed = model.remove_client(id)?;
            write_input(&input, &model)?;
            println!("{} {}", session.tr.t(keys::CLIENT_REMOVED), removed.name);
        }
        ClientCommand::Mix { id, percent, input } => edit_input_file(&input, |model| {
            model.client_mut(id)?.mix_percent = percent;
            Ok(())
        })?,
        ClientCommand::Tariff {
            id,
            service,
            price,
            input,
        } => edit_input_file(&input, |model| {
            if catalog.find(&service).is_none() {
                return Err(InputError::UnknownService(service.clone()));
            }
            model.client_mut(id)?.tariffs.insert(service.clone(), price);
            Ok(())
        })?,
    }
    Ok(())
}

fn run_scenario_command(session: &Session, cmd: ScenarioCommand) -> Result<(), AppError> {
    let tr = &session.tr;
    match cmd {
        ScenarioCommand::List => {
            let Some(owner) = session.owner.as_ref() else {
                println!("{}", tr.t(keys::SCENARIOS_SIGN_IN_HINT));
                return Ok(());
            };
            let mut out = io::stdout().lock();
            ui_cli::render_scenario_list(tr, &session.store.list(owner)?, &mut out)?;
        }
        ScenarioCommand::Save { name, input } => {
            let owner = session.require_owner()?;
            let model = match input {
                Some(path) => read_input(&path)?,
                None => InputModel::default_for(&session.catalog),
            };
            let id = session.store.save(owner, &name, &model)?;
            println!("{} {id}", tr.t(keys::SCENARIO_SAVED));
        }
        ScenarioCommand::Load { id, output } => {
            let owner = session.require_owner()?;
            let scenario = session.store.load(owner, &ScenarioId::parse(&id)?)?;
            emit_input(session, &scenario.inputs, output.as_deref())?;
        }
        ScenarioCommand::Delete { id } => {
            let owner = session.require_owner()?;
            session.store.delete(owner, &ScenarioId::parse(&id)?)?;
            println!("{}", tr.t(keys::SCENARIO_DELETED));
        }
    }
    Ok(())
}

/// 대화형 메뉴 루프를 실행한다. 입력이 바뀔 때마다 다시 계산한다.
///
/// 메뉴 처리 중 오류는 출력만 하고 루프를 이어 간다. 입출력 오류만 세션을 끝내며,
/// 입력 스트림이 닫히면 종료 메뉴와 같이 설정을 저장하고 끝낸다.
pub fn run_interactive(
    session: &mut Session,
    input: &mut dyn BufRead,
) -> Result<(), AppError> {
    if let Err(e) = session.recompute() {
        report_error(&session.tr, &e);
    }
    loop {
        let step = match ui_cli::main_menu(&session.tr, input) {
            Ok(MenuChoice::Exit) | Err(AppError::InputClosed) => break,
            Ok(choice) => run_menu_choice(session, choice, input),
            Err(e) => return Err(e),
        };
        match step {
            Ok(()) => {}
            Err(AppError::InputClosed) => break,
            Err(e @ AppError::Io(_)) => return Err(e),
            Err(e) => report_error(&session.tr, &e),
        }
        if let Err(e) = session.recompute() {
            report_error(&session.tr, &e);
        }
    }
    session.save_config()?;
    println!("{}", session.tr.t(keys::APP_EXIT));
    Ok(())
}

fn run_menu_choice(
    session: &mut Session,
    choice: MenuChoice,
    input: &mut dyn BufRead,
) -> Result<(), AppError> {
    match choice {
        MenuChoice::Results => ui_cli::show_results(session),
        MenuChoice::Parameters => ui_cli::handle_parameters(session, input),
        MenuChoice::ServiceMix => ui_cli::handle_service_mix(session, input),
        MenuChoice::Clients => ui_cli::handle_clients(session, input),
        MenuChoice::Scenarios => ui_cli::handle_scenarios(session, input),
        MenuChoice::Settings => {
            ui_cli::handle_settings(session, input)?;
            session.save_config()
        }
        MenuChoice::Exit => Ok(()),
    }
}

fn report_error(tr: &Translator, err: &AppError) {
    eprintln!("{}: {}", tr.t(keys::ERROR_PREFIX), err.localized(tr));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_follow_translator_language() {
        let err = AppError::from(InputError::UnknownClient(99));
        assert_eq!(err.localized(&Translator::new("en")), "Unknown client ID: 99");
        assert_eq!(err.localized(&Translator::new("ko")), "알 수 없는 고객 ID: 99");
    }

    #[test]
    fn missing_tariff_fills_both_placeholders() {
        let err = AppError::from(SimulationError::MissingTariff {
            client: "Alfa".into(),
            service: "tam_fallido".into(),
        });
        assert_eq!(
            err.localized(&Translator::new("en")),
            "Client 'Alfa' has no tariff for service 'tam_fallido'"
        );
    }
}
