use std::io::{self, BufRead, Write};

use crate::app::{AppError, Session};
use crate::i18n::{keys, Translator};
use crate::scenario::{ScenarioId, ScenarioStore, ScenarioSummary};
use crate::simulation::{MissingTariffPolicy, SimulationResult, PARAMETER_KEYS};
use crate::validation::{self, MixWarning};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Results,
    Parameters,
    ServiceMix,
    Clients,
    Scenarios,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator, input: &mut dyn BufRead) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    for key in [
        keys::MAIN_MENU_RESULTS,
        keys::MAIN_MENU_PARAMETERS,
        keys::MAIN_MENU_SERVICE_MIX,
        keys::MAIN_MENU_CLIENTS,
        keys::MAIN_MENU_SCENARIOS,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = read_line(input, tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Results),
            "2" => return Ok(MenuChoice::Parameters),
            "3" => return Ok(MenuChoice::ServiceMix),
            "4" => return Ok(MenuChoice::Clients),
            "5" => return Ok(MenuChoice::Scenarios),
            "6" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 결과 보고서를 출력한다. 손익분기 무한대는 N/A로 표시한다.
pub fn render_report<W: Write>(
    tr: &Translator,
    result: &SimulationResult,
    warnings: &[MixWarning],
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "{}", tr.t(keys::REPORT_TITLE))?;
    writeln!(out, "{} {:.0}", tr.t(keys::REPORT_TOTAL_REVENUE), result.total_revenue)?;
    writeln!(out, "{} {:.0}", tr.t(keys::REPORT_TOTAL_COST), result.total_cost)?;
    writeln!(out, "{} {:.0}", tr.t(keys::REPORT_TOTAL_PROFIT), result.total_profit)?;
    writeln!(out, "{} {:.0}", tr.t(keys::REPORT_MONTHLY_TRIPS), result.total_monthly_trips)?;

    writeln!(out, "{}", tr.t(keys::REPORT_CLIENT_HEADING))?;
    writeln!(out, "{}", tr.t(keys::REPORT_CLIENT_COLUMNS))?;
    for (name, client) in &result.profitability_by_client {
        writeln!(
            out,
            "{:<28} {:>6.1}% {:>8.1}% {:>16.0}",
            name,
            client.mix_percent,
            client.margin_ratio() * 100.0,
            client.profit()
        )?;
    }

    writeln!(out, "{}", tr.t(keys::REPORT_SERVICE_HEADING))?;
    writeln!(out, "{}", tr.t(keys::REPORT_SERVICE_COLUMNS))?;
    for (_, svc) in result.services_by_profit() {
        writeln!(
            out,
            "{:<28} {:>6.1}% {:>8.1}% {:>16.0}",
            svc.name,
            svc.mix_percent,
            svc.margin_ratio * 100.0,
            svc.profit
        )?;
    }

    writeln!(out, "{}", tr.t(keys::REPORT_UNIT_COST_HEADING))?;
    for (id, cost) in &result.unit_costs {
        writeln!(out, "{id:<28} {cost:>16.0}")?;
    }

    let na = tr.t(keys::NOT_APPLICABLE);
    writeln!(out, "{}", tr.t(keys::REPORT_BREAK_EVEN_HEADING))?;
    writeln!(out, "{} {:.0}", tr.t(keys::REPORT_FIXED_COST), result.total_fixed_cost)?;
    match result.break_even_trips_ceil() {
        Some(trips) => writeln!(out, "{} {trips}", tr.t(keys::REPORT_BREAK_EVEN_TRIPS))?,
        None => writeln!(out, "{} {na}", tr.t(keys::REPORT_BREAK_EVEN_TRIPS))?,
    }
    match result.break_even_revenue.finite() {
        Some(revenue) => writeln!(out, "{} {revenue:.0}", tr.t(keys::REPORT_BREAK_EVEN_REVENUE))?,
        None => writeln!(out, "{} {na}", tr.t(keys::REPORT_BREAK_EVEN_REVENUE))?,
    }

    render_warnings(tr, warnings, out)
}

pub fn render_warnings<W: Write>(
    tr: &Translator,
    warnings: &[MixWarning],
    out: &mut W,
) -> io::Result<()> {
    for warning in warnings {
        match warning {
            MixWarning::ServiceMixTotal { total } => {
                writeln!(out, "{} {total:.1}%", tr.t(keys::WARN_SERVICE_MIX))?
            }
            MixWarning::ClientMixTotal { total } => {
                writeln!(out, "{} {total:.1}%", tr.t(keys::WARN_CLIENT_MIX))?
            }
            MixWarning::IncompleteTariffSheet { client, missing } => writeln!(
                out,
                "{} {client} ({})",
                tr.t(keys::WARN_TARIFF_SHEET),
                missing.join(", ")
            )?,
        }
    }
    Ok(())
}

pub fn render_scenario_list<W: Write>(
    tr: &Translator,
    scenarios: &[ScenarioSummary],
    out: &mut W,
) -> io::Result<()> {
    if scenarios.is_empty() {
        return writeln!(out, "{}", tr.t(keys::SCENARIOS_EMPTY));
    }
    for s in scenarios {
        writeln!(
            out,
            "{}  {:<24} {}",
            s.id,
            s.name,
            s.created_at.format("%Y-%m-%d %H:%M")
        )?;
    }
    Ok(())
}

/// 결과 메뉴를 처리한다.
pub fn show_results(session: &Session) -> Result<(), AppError> {
    let tr = &session.tr;
    let Some(result) = &session.result else {
        println!("{}", tr.t(keys::REPORT_NO_RESULT));
        return Ok(());
    };
    if session.result_is_stale {
        println!("{}", tr.t(keys::REPORT_STALE_RESULT));
    }
    let warnings = validation::check_mix(&session.input, session.config.mix_tolerance_percent);
    render_report(tr, result, &warnings, &mut io::stdout().lock())?;
    Ok(())
}

/// 비용/운영 파라미터 메뉴를 처리한다.
pub fn handle_parameters(
    session: &mut Session,
    input: &mut dyn BufRead,
) -> Result<(), AppError> {
    println!("{}", session.tr.t(keys::PARAMETERS_HEADING));
    for (i, key) in PARAMETER_KEYS.iter().enumerate() {
        let value = session.input.parameter(key).unwrap_or_default();
        let link = session
            .input
            .source_links
            .get(*key)
            .map(|l| format!("  [{l}]"))
            .unwrap_or_default();
        println!(
            "{:>2}) {:<40} {:>14}{link}",
            i + 1,
            session.tr.parameter_label(key),
            value
        );
    }
    let Some(idx) = read_index(
        input,
        &session.tr,
        keys::PROMPT_PARAMETER_NUMBER,
        PARAMETER_KEYS.len(),
    )?
    else {
        return Ok(());
    };
    let key = PARAMETER_KEYS[idx];
    let value = read_f64(input, &session.tr, keys::PROMPT_NEW_VALUE)?;
    session.input.set_parameter(key, value)?;
    let link = read_line(input, session.tr.t(keys::PROMPT_SOURCE_LINK))?;
    match link.trim() {
        "" => {}
        "-" => session.input.set_source_link(key, "")?,
        url => session.input.set_source_link(key, url)?,
    }
    Ok(())
}

/// 서비스 믹스 메뉴를 처리한다.
pub fn handle_service_mix(
    session: &mut Session,
    input: &mut dyn BufRead,
) -> Result<(), AppError> {
    let tr = &session.tr;
    println!("{}", tr.t(keys::SERVICE_MIX_HEADING));
    let services = session.catalog.services();
    for (i, svc) in services.iter().enumerate() {
        let mix = session.input.service_mix.get(&svc.id).copied().unwrap_or(0.0);
        println!("{:>2}) {:<28} {:>6.1}", i + 1, svc.display_name, mix);
    }
    println!(
        "{} {:.1}%",
        tr.t(keys::MIX_TOTAL),
        validation::service_mix_total(&session.input)
    );
    let Some(idx) = read_index(input, tr, keys::PROMPT_SERVICE_NUMBER, services.len())? else {
        return Ok(());
    };
    let value = read_f64(input, tr, keys::PROMPT_NEW_VALUE)?;
    let id = services[idx].id.clone();
    session
        .input
        .set_service_mix(&session.catalog, &id, value)?;
    Ok(())
}

/// 고객/요율표 메뉴를 처리한다.
pub fn handle_clients(
    session: &mut Session,
    input: &mut dyn BufRead,
) -> Result<(), AppError> {
    println!("{}", session.tr.t(keys::CLIENTS_HEADING));
    for client in &session.input.clients {
        println!("[{}] {:<28} {:>6.1}%", client.id, client.name, client.mix_percent);
    }
    println!(
        "{} {:.1}%",
        session.tr.t(keys::MIX_TOTAL),
        validation::client_mix_total(&session.input)
    );
    println!("{}", session.tr.t(keys::CLIENTS_OPTIONS));
    let sel = read_line(input, session.tr.t(keys::PROMPT_SELECT))?;
    match sel.trim() {
        "1" => {
            let name = read_line(input, session.tr.t(keys::PROMPT_CLIENT_NAME))?;
            let id = session.input.add_client(&session.catalog, Some(name.trim()));
            println!("{} {id}", session.tr.t(keys::CLIENT_ADDED));
        }
        "2" => {
            let id = read_client_id(input, &session.tr)?;
            let removed = session.input.remove_client(id)?;
            println!("{} {}", session.tr.t(keys::CLIENT_REMOVED), removed.name);
        }
        "3" => {
            let id = read_client_id(input, &session.tr)?;
            let name = read_line(input, session.tr.t(keys::PROMPT_CLIENT_NAME))?;
            if !name.trim().is_empty() {
                session.input.client_mut(id)?.name = name.trim().to_string();
            }
        }
        "4" => {
            let id = read_client_id(input, &session.tr)?;
            let value = read_f64(input, &session.tr, keys::PROMPT_NEW_VALUE)?;
            session.input.client_mut(id)?.mix_percent = value;
        }
        "5" => {
            let id = read_client_id(input, &session.tr)?;
            let client = session.input.client_mut(id)?;
            let services = session.catalog.services();
            for (i, svc) in services.iter().enumerate() {
                let price = client.tariff(&svc.id).unwrap_or(0.0);
                println!("{:>2}) {:<28} {:>12.0}", i + 1, svc.display_name, price);
            }
            let tr = &session.tr;
            if let Some(idx) = read_index(input, tr, keys::PROMPT_SERVICE_NUMBER, services.len())? {
                let value = read_f64(input, tr, keys::PROMPT_NEW_VALUE)?;
                client.tariffs.insert(services[idx].id.clone(), value);
            }
        }
        _ => println!("{}", session.tr.t(keys::INVALID_SELECTION)),
    }
    Ok(())
}

/// 시나리오 메뉴를 처리한다. 소유자 ID가 없으면 안내만 출력한다.
pub fn handle_scenarios(
    session: &mut Session,
    input: &mut dyn BufRead,
) -> Result<(), AppError> {
    println!("{}", session.tr.t(keys::SCENARIOS_HEADING));
    let Some(owner) = session.owner.clone() else {
        println!("{}", session.tr.t(keys::SCENARIOS_SIGN_IN_HINT));
        return Ok(());
    };
    println!("{}", session.tr.t(keys::SCENARIOS_OPTIONS));
    let sel = read_line(input, session.tr.t(keys::PROMPT_SELECT))?;
    match sel.trim() {
        "1" => {
            let list = session.store.list(&owner)?;
            render_scenario_list(&session.tr, &list, &mut io::stdout().lock())?;
        }
        "2" => {
            let name = read_line(input, session.tr.t(keys::PROMPT_SCENARIO_NAME))?;
            // 이름이 비어 있으면 저장하지 않는다
            if !name.trim().is_empty() {
                let id = session.store.save(&owner, &name, &session.input)?;
                println!("{} {id}", session.tr.t(keys::SCENARIO_SAVED));
            }
        }
        "3" => {
            let raw = read_line(input, session.tr.t(keys::PROMPT_SCENARIO_ID))?;
            let scenario = session.store.load(&owner, &ScenarioId::parse(&raw)?)?;
            session.input = scenario.inputs;
            println!("{} {}", session.tr.t(keys::SCENARIO_LOADED), scenario.name);
        }
        "4" => {
            let raw = read_line(input, session.tr.t(keys::PROMPT_SCENARIO_ID))?;
            session.store.delete(&owner, &ScenarioId::parse(&raw)?)?;
            println!("{}", session.tr.t(keys::SCENARIO_DELETED));
        }
        _ => println!("{}", session.tr.t(keys::INVALID_SELECTION)),
    }
    Ok(())
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(
    session: &mut Session,
    input: &mut dyn BufRead,
) -> Result<(), AppError> {
    println!("{}", session.tr.t(keys::SETTINGS_HEADING));
    println!(
        "{} language={} ({}) missing_tariff={:?} owner={}",
        session.tr.t(keys::SETTINGS_CURRENT),
        session.config.language,
        session.tr.language().as_code(),
        session.config.missing_tariff,
        session
            .owner
            .as_ref()
            .map(|o| o.to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    println!("{}", session.tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(input, session.tr.t(keys::PROMPT_SELECT))?;
    match sel.trim() {
        "1" => {
            let code = read_line(input, session.tr.t(keys::PROMPT_LANGUAGE))?;
            session.set_language(&code);
        }
        "2" => {
            session.config.missing_tariff = match session.config.missing_tariff {
                MissingTariffPolicy::Strict => MissingTariffPolicy::TreatAsZero,
                MissingTariffPolicy::TreatAsZero => MissingTariffPolicy::Strict,
            };
        }
        "3" => {
            let raw = read_line(input, session.tr.t(keys::PROMPT_OWNER))?;
            let owner = crate::scenario::resolve_owner(Some(raw.trim()), None)?;
            session.config.owner = owner.as_ref().map(|o| o.to_string());
            session.owner = owner;
        }
        _ => {
            println!("{}", session.tr.t(keys::INVALID_SELECTION));
            return Ok(());
        }
    }
    println!("{}", session.tr.t(keys::SETTINGS_SAVED));
    Ok(())
}

/// 프롬프트를 출력하고 한 줄을 읽는다. 입력이 끝났으면 `InputClosed`.
fn read_line(input: &mut dyn BufRead, prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        println!();
        return Err(AppError::InputClosed);
    }
    Ok(buf)
}

fn read_f64(input: &mut dyn BufRead, tr: &Translator, prompt_key: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(input, tr.t(prompt_key))?;
        match s.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => return Ok(v),
            _ => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn read_client_id(input: &mut dyn BufRead, tr: &Translator) -> Result<u64, AppError> {
    loop {
        let s = read_line(input, tr.t(keys::PROMPT_CLIENT_ID))?;
        match s.trim().parse::<u64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

/// 1부터 시작하는 번호를 읽어 0 기반 인덱스로 돌려준다. 빈 입력은 취소.
fn read_index(
    input: &mut dyn BufRead,
    tr: &Translator,
    prompt_key: &str,
    len: usize,
) -> Result<Option<usize>, AppError> {
    loop {
        let s = read_line(input, tr.t(prompt_key))?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(None);
        }
        match s.parse::<usize>() {
            Ok(n) if (1..=len).contains(&n) => return Ok(Some(n - 1)),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn read_line_reports_end_of_input() {
        let mut input = Cursor::new(Vec::<u8>::new());
        assert!(matches!(
            read_line(&mut input, "> "),
            Err(AppError::InputClosed)
        ));
    }

    #[test]
    fn main_menu_skips_invalid_lines_then_stops_at_eof() {
        let tr = Translator::new("en");
        let mut input = Cursor::new(b"x\n9\n".to_vec());
        assert!(matches!(main_menu(&tr, &mut input), Err(AppError::InputClosed)));

        let mut input = Cursor::new(b"x\n4\n".to_vec());
        assert_eq!(main_menu(&tr, &mut input).expect("menu"), MenuChoice::Clients);
    }

    #[test]
    fn read_index_accepts_only_listed_numbers() {
        let tr = Translator::new("en");
        let mut input = Cursor::new(b"0\n11\n3\n".to_vec());
        assert_eq!(
            read_index(&mut input, &tr, keys::PROMPT_SERVICE_NUMBER, 10).expect("index"),
            Some(2)
        );
        let mut input = Cursor::new(b"\n".to_vec());
        assert_eq!(
            read_index(&mut input, &tr, keys::PROMPT_SERVICE_NUMBER, 10).expect("index"),
            None
        );
    }
}
