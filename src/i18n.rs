use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const NOT_APPLICABLE: &str = "general.not_applicable";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_RESULTS: &str = "main_menu.results";
    pub const MAIN_MENU_PARAMETERS: &str = "main_menu.parameters";
    pub const MAIN_MENU_SERVICE_MIX: &str = "main_menu.service_mix";
    pub const MAIN_MENU_CLIENTS: &str = "main_menu.clients";
    pub const MAIN_MENU_SCENARIOS: &str = "main_menu.scenarios";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const INVALID_SELECTION: &str = "error.invalid_selection";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const REPORT_TITLE: &str = "report.title";
    pub const REPORT_TOTAL_REVENUE: &str = "report.total_revenue";
    pub const REPORT_TOTAL_COST: &str = "report.total_cost";
    pub const REPORT_TOTAL_PROFIT: &str = "report.total_profit";
    pub const REPORT_MONTHLY_TRIPS: &str = "report.monthly_trips";
    pub const REPORT_CLIENT_HEADING: &str = "report.client_heading";
    pub const REPORT_CLIENT_COLUMNS: &str = "report.client_columns";
    pub const REPORT_SERVICE_HEADING: &str = "report.service_heading";
    pub const REPORT_SERVICE_COLUMNS: &str = "report.service_columns";
    pub const REPORT_UNIT_COST_HEADING: &str = "report.unit_cost_heading";
    pub const REPORT_BREAK_EVEN_HEADING: &str = "report.break_even_heading";
    pub const REPORT_FIXED_COST: &str = "report.fixed_cost";
    pub const REPORT_BREAK_EVEN_TRIPS: &str = "report.break_even_trips";
    pub const REPORT_BREAK_EVEN_REVENUE: &str = "report.break_even_revenue";
    pub const REPORT_NO_RESULT: &str = "report.no_result";
    pub const REPORT_STALE_RESULT: &str = "report.stale_result";

    pub const WARN_SERVICE_MIX: &str = "warning.service_mix";
    pub const WARN_CLIENT_MIX: &str = "warning.client_mix";
    pub const WARN_TARIFF_SHEET: &str = "warning.tariff_sheet";

    pub const PARAMETERS_HEADING: &str = "parameters.heading";
    pub const PROMPT_PARAMETER_NUMBER: &str = "prompt.parameter_number";
    pub const PROMPT_NEW_VALUE: &str = "prompt.new_value";
    pub const PROMPT_SOURCE_LINK: &str = "prompt.source_link";

    pub const SERVICE_MIX_HEADING: &str = "service_mix.heading";
    pub const MIX_TOTAL: &str = "service_mix.total";
    pub const PROMPT_SERVICE_NUMBER: &str = "prompt.service_number";

    pub const CLIENTS_HEADING: &str = "clients.heading";
    pub const CLIENTS_OPTIONS: &str = "clients.options";
    pub const PROMPT_CLIENT_ID: &str = "prompt.client_id";
    pub const PROMPT_CLIENT_NAME: &str = "prompt.client_name";
    pub const CLIENT_ADDED: &str = "clients.added";
    pub const CLIENT_REMOVED: &str = "clients.removed";

    pub const SCENARIOS_HEADING: &str = "scenarios.heading";
    pub const SCENARIOS_OPTIONS: &str = "scenarios.options";
    pub const SCENARIOS_SIGN_IN_HINT: &str = "scenarios.sign_in_hint";
    pub const SCENARIOS_EMPTY: &str = "scenarios.empty";
    pub const PROMPT_SCENARIO_NAME: &str = "prompt.scenario_name";
    pub const PROMPT_SCENARIO_ID: &str = "prompt.scenario_id";
    pub const SCENARIO_SAVED: &str = "scenarios.saved";
    pub const SCENARIO_LOADED: &str = "scenarios.loaded";
    pub const SCENARIO_DELETED: &str = "scenarios.deleted";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT: &str = "settings.current";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const PROMPT_LANGUAGE: &str = "prompt.language";
    pub const PROMPT_OWNER: &str = "prompt.owner";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const FILE_WRITTEN: &str = "general.file_written";

    pub const ERR_IO: &str = "error.io";
    pub const ERR_CONFIG: &str = "error.config";
    pub const ERR_INPUT_FILE: &str = "error.input_file";
    pub const ERR_JSON: &str = "error.json";
    pub const ERR_INPUT_CLOSED: &str = "error.input_closed";
    pub const ERR_UNKNOWN_PARAMETER: &str = "error.unknown_parameter";
    pub const ERR_UNKNOWN_SERVICE: &str = "error.unknown_service";
    pub const ERR_UNKNOWN_CLIENT: &str = "error.unknown_client";
    pub const ERR_NOT_FINITE: &str = "error.not_finite";
    pub const ERR_MISSING_TARIFF: &str = "error.missing_tariff";
    pub const ERR_NOT_SIGNED_IN: &str = "error.not_signed_in";
    pub const ERR_INVALID_OWNER: &str = "error.invalid_owner";
    pub const ERR_EMPTY_NAME: &str = "error.empty_name";
    pub const ERR_SCENARIO_NOT_FOUND: &str = "error.scenario_not_found";
    pub const ERR_SCENARIO_FILE: &str = "error.scenario_file";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else {
            Language::Ko
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 번역을 가져온다. 영어 번역이 없으면 한국어 문자열을 폴백한다.
    pub fn t<'a>(&'a self, key: &str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v;
        }
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }

    /// 파라미터 키의 표시 이름. 모르는 키는 그대로 돌려준다.
    pub fn parameter_label<'a>(&'a self, key: &'a str) -> &'a str {
        let full = format!("param.{key}");
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(&full)) {
            return v;
        }
        let label = match self.lang {
            Language::En => parameter_label_en(key),
            Language::Ko => parameter_label_ko(key),
        };
        label.unwrap_or(key)
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: Option<&str>, config_lang: Option<&str>) -> String {
    cli_arg
        .and_then(normalize_lang)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let path = Path::new(dir).join(format!("{lang}.toml"));
    let content = fs::read_to_string(path).ok()?;
    parse_toml_to_map(&content)
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        NOT_APPLICABLE => "N/A",
        MAIN_MENU_TITLE => "\n=== 구급차 운영 원가 시뮬레이터 ===",
        MAIN_MENU_RESULTS => "1) 결과 보기",
        MAIN_MENU_PARAMETERS => "2) 비용/운영 파라미터",
        MAIN_MENU_SERVICE_MIX => "3) 서비스 믹스",
        MAIN_MENU_CLIENTS => "4) 고객/요율표",
        MAIN_MENU_SCENARIOS => "5) 시나리오",
        MAIN_MENU_SETTINGS => "6) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        PROMPT_SELECT => "선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        INVALID_SELECTION => "잘못된 선택입니다.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        REPORT_TITLE => "\n=== 월간 운영 결과 ===",
        REPORT_TOTAL_REVENUE => "예상 총매출:",
        REPORT_TOTAL_COST => "총 운영원가:",
        REPORT_TOTAL_PROFIT => "순이익/손실:",
        REPORT_MONTHLY_TRIPS => "월 총 운행 횟수:",
        REPORT_CLIENT_HEADING => "\n-- 고객별 수익성 --",
        REPORT_CLIENT_COLUMNS => "고객 | 믹스 | 평균 마진 | 추정 이익",
        REPORT_SERVICE_HEADING => "\n-- 서비스별 수익성 (이익 순) --",
        REPORT_SERVICE_COLUMNS => "서비스 | 믹스 | 평균 마진 | 추정 이익",
        REPORT_UNIT_COST_HEADING => "\n-- 서비스별 1회 단가 --",
        REPORT_BREAK_EVEN_HEADING => "\n-- 월 손익분기점 --",
        REPORT_FIXED_COST => "운영 총 고정비:",
        REPORT_BREAK_EVEN_TRIPS => "원가 회수에 필요한 운행 횟수:",
        REPORT_BREAK_EVEN_REVENUE => "필요 매출:",
        REPORT_NO_RESULT => "월 운행 횟수가 0이라 결과를 계산할 수 없습니다.",
        REPORT_STALE_RESULT => "(직전 결과를 표시합니다)",
        WARN_SERVICE_MIX => "경고: 서비스 믹스 합계가 100%가 아닙니다:",
        WARN_CLIENT_MIX => "경고: 고객 믹스 합계가 100%가 아닙니다:",
        WARN_TARIFF_SHEET => "경고: 요율표에 누락된 서비스가 있습니다:",
        PARAMETERS_HEADING => "\n-- 비용/운영 파라미터 --",
        PROMPT_PARAMETER_NUMBER => "변경할 번호 (엔터=취소): ",
        PROMPT_NEW_VALUE => "새 값: ",
        PROMPT_SOURCE_LINK => "출처 URL (엔터=유지, '-'=삭제): ",
        SERVICE_MIX_HEADING => "\n-- 서비스 믹스 (%) --",
        MIX_TOTAL => "합계:",
        PROMPT_SERVICE_NUMBER => "서비스 번호 (엔터=취소): ",
        CLIENTS_HEADING => "\n-- 고객 및 요율표 --",
        CLIENTS_OPTIONS => "1) 추가  2) 삭제  3) 이름 변경  4) 믹스 변경  5) 요율 변경",
        PROMPT_CLIENT_ID => "고객 ID: ",
        PROMPT_CLIENT_NAME => "고객 이름 (엔터=자동): ",
        CLIENT_ADDED => "고객을 추가했습니다. ID:",
        CLIENT_REMOVED => "고객을 삭제했습니다:",
        SCENARIOS_HEADING => "\n-- 시나리오 관리 --",
        SCENARIOS_OPTIONS => "1) 목록  2) 저장  3) 불러오기  4) 삭제",
        SCENARIOS_SIGN_IN_HINT => "시나리오를 저장하고 불러오려면 설정에서 소유자 ID를 지정하세요.",
        SCENARIOS_EMPTY => "저장된 시나리오가 없습니다.",
        PROMPT_SCENARIO_NAME => "시나리오 이름: ",
        PROMPT_SCENARIO_ID => "시나리오 ID: ",
        SCENARIO_SAVED => "시나리오를 저장했습니다. ID:",
        SCENARIO_LOADED => "시나리오를 불러왔습니다:",
        SCENARIO_DELETED => "시나리오를 삭제했습니다.",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT => "현재 설정:",
        SETTINGS_OPTIONS => "1) 언어  2) 요율 누락 처리 전환  3) 소유자 ID",
        PROMPT_LANGUAGE => "언어 (auto/ko/en): ",
        PROMPT_OWNER => "소유자 ID (엔터=로그아웃): ",
        SETTINGS_SAVED => "설정을 저장했습니다.",
        FILE_WRITTEN => "파일을 저장했습니다:",
        ERR_IO => "입출력 오류",
        ERR_CONFIG => "설정 오류",
        ERR_INPUT_FILE => "입력 파일 오류",
        ERR_JSON => "JSON 직렬화 오류",
        ERR_INPUT_CLOSED => "입력이 종료되었습니다",
        ERR_UNKNOWN_PARAMETER => "알 수 없는 파라미터: {0}",
        ERR_UNKNOWN_SERVICE => "카탈로그에 없는 서비스: {0}",
        ERR_UNKNOWN_CLIENT => "알 수 없는 고객 ID: {0}",
        ERR_NOT_FINITE => "값이 유한한 수가 아닙니다: {0}",
        ERR_MISSING_TARIFF => "고객 '{0}'의 요율표에 서비스 '{1}' 요율이 없습니다",
        ERR_NOT_SIGNED_IN => "소유자 ID가 필요합니다 (--owner 또는 설정의 owner)",
        ERR_INVALID_OWNER => "잘못된 소유자 ID: {0}",
        ERR_EMPTY_NAME => "시나리오 이름이 비어 있습니다",
        ERR_SCENARIO_NOT_FOUND => "시나리오를 찾을 수 없습니다: {0}",
        ERR_SCENARIO_FILE => "시나리오 파일 오류",
        _ => "[missing translation]",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        NOT_APPLICABLE => "N/A",
        MAIN_MENU_TITLE => "\n=== Ambulance Operation Cost Simulator ===",
        MAIN_MENU_RESULTS => "1) Results",
        MAIN_MENU_PARAMETERS => "2) Cost / operating parameters",
        MAIN_MENU_SERVICE_MIX => "3) Service mix",
        MAIN_MENU_CLIENTS => "4) Clients / tariff sheets",
        MAIN_MENU_SCENARIOS => "5) Scenarios",
        MAIN_MENU_SETTINGS => "6) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        PROMPT_SELECT => "Select: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        INVALID_SELECTION => "Invalid selection.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        REPORT_TITLE => "\n=== Monthly Operating Results ===",
        REPORT_TOTAL_REVENUE => "Estimated total revenue:",
        REPORT_TOTAL_COST => "Total operating cost:",
        REPORT_TOTAL_PROFIT => "Net profit / loss:",
        REPORT_MONTHLY_TRIPS => "Total monthly trips:",
        REPORT_CLIENT_HEADING => "\n-- Profitability by client --",
        REPORT_CLIENT_COLUMNS => "Client | Mix | Avg. margin | Est. profit",
        REPORT_SERVICE_HEADING => "\n-- Profitability by service (by profit) --",
        REPORT_SERVICE_COLUMNS => "Service | Mix | Avg. margin | Est. profit",
        REPORT_UNIT_COST_HEADING => "\n-- Unit cost per trip --",
        REPORT_BREAK_EVEN_HEADING => "\n-- Monthly break-even --",
        REPORT_FIXED_COST => "Total fixed cost of operation:",
        REPORT_BREAK_EVEN_TRIPS => "Trips needed to cover costs:",
        REPORT_BREAK_EVEN_REVENUE => "Required revenue:",
        REPORT_NO_RESULT => "Monthly trip volume is zero; no result available.",
        REPORT_STALE_RESULT => "(showing previous result)",
        WARN_SERVICE_MIX => "Warning: service mix does not total 100%:",
        WARN_CLIENT_MIX => "Warning: client mix does not total 100%:",
        WARN_TARIFF_SHEET => "Warning: incomplete tariff sheet:",
        PARAMETERS_HEADING => "\n-- Cost / operating parameters --",
        PROMPT_PARAMETER_NUMBER => "Number to change (enter to cancel): ",
        PROMPT_NEW_VALUE => "New value: ",
        PROMPT_SOURCE_LINK => "Source URL (enter=keep, '-'=remove): ",
        SERVICE_MIX_HEADING => "\n-- Service mix (%) --",
        MIX_TOTAL => "Total:",
        PROMPT_SERVICE_NUMBER => "Service number (enter to cancel): ",
        CLIENTS_HEADING => "\n-- Clients and tariff sheets --",
        CLIENTS_OPTIONS => "1) Add  2) Remove  3) Rename  4) Change mix  5) Change tariff",
        PROMPT_CLIENT_ID => "Client ID: ",
        PROMPT_CLIENT_NAME => "Client name (enter=auto): ",
        CLIENT_ADDED => "Client added. ID:",
        CLIENT_REMOVED => "Client removed:",
        SCENARIOS_HEADING => "\n-- Scenario management --",
        SCENARIOS_OPTIONS => "1) List  2) Save  3) Load  4) Delete",
        SCENARIOS_SIGN_IN_HINT => "Set an owner ID in settings to save and load scenarios.",
        SCENARIOS_EMPTY => "No saved scenarios.",
        PROMPT_SCENARIO_NAME => "Scenario name: ",
        PROMPT_SCENARIO_ID => "Scenario ID: ",
        SCENARIO_SAVED => "Scenario saved. ID:",
        SCENARIO_LOADED => "Scenario loaded:",
        SCENARIO_DELETED => "Scenario deleted.",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT => "Current settings:",
        SETTINGS_OPTIONS => "1) Language  2) Toggle missing-tariff policy  3) Owner ID",
        PROMPT_LANGUAGE => "Language (auto/ko/en): ",
        PROMPT_OWNER => "Owner ID (enter=sign out): ",
        SETTINGS_SAVED => "Settings saved.",
        FILE_WRITTEN => "File written:",
        ERR_IO => "I/O error",
        ERR_CONFIG => "Configuration error",
        ERR_INPUT_FILE => "Input file error",
        ERR_JSON => "JSON serialization error",
        ERR_INPUT_CLOSED => "Input closed",
        ERR_UNKNOWN_PARAMETER => "Unknown parameter: {0}",
        ERR_UNKNOWN_SERVICE => "Service not in catalog: {0}",
        ERR_UNKNOWN_CLIENT => "Unknown client ID: {0}",
        ERR_NOT_FINITE => "Value is not a finite number: {0}",
        ERR_MISSING_TARIFF => "Client '{0}' has no tariff for service '{1}'",
        ERR_NOT_SIGNED_IN => "An owner ID is required (--owner or owner in config)",
        ERR_INVALID_OWNER => "Invalid owner ID: {0}",
        ERR_EMPTY_NAME => "Scenario name is empty",
        ERR_SCENARIO_NOT_FOUND => "Scenario not found: {0}",
        ERR_SCENARIO_FILE => "Scenario file error",
        _ => return None,
    })
}

fn parameter_label_ko(key: &str) -> Option<&'static str> {
    Some(match key {
        "basic_driver_salary" => "운전원 급여 (TAB)",
        "basic_assistant_salary" => "간호조무사 급여 (TAB)",
        "medicalized_driver_salary" => "운전원 급여 (TAM)",
        "medicalized_assistant_salary" => "간호조무사 급여 (TAM)",
        "medicalized_physician_salary" => "의사 급여 (TAM)",
        "burden_rate_percent" => "급여 부담률 (%)",
        "admin_payroll" => "관리직 인건비 (합계)",
        "rent" => "운영 기지 임차료",
        "utilities" => "공과금",
        "insurance" => "보험료",
        "licensing" => "인허가 비용 (월할)",
        "software" => "소프트웨어",
        "vehicle_depreciation" => "차량 감가상각 (대당)",
        "basic_equipment_depreciation" => "기본 장비 감가상각 (TAB)",
        "medicalized_equipment_depreciation" => "의료 장비 감가상각 (TAM)",
        "fuel_per_km" => "연료비 (km당)",
        "maintenance_per_km" => "정비비 (km당)",
        "basic_consumables_per_trip" => "소모품비 (TAB 1회)",
        "medicalized_consumables_per_trip" => "소모품비 (TAM 1회)",
        "basic_vehicles" => "기본 구급차 대수 (TAB)",
        "medicalized_vehicles" => "의료 구급차 대수 (TAM)",
        "operating_days" => "월 운행일수",
        "trips_per_day" => "일 평균 운행 횟수 (대당)",
        "km_per_trip" => "운행당 평균 km",
        _ => return None,
    })
}

fn parameter_label_en(key: &str) -> Option<&'static str> {
    Some(match key {
        "basic_driver_salary" => "Driver salary (TAB)",
        "basic_assistant_salary" => "Nursing assistant salary (TAB)",
        "medicalized_driver_salary" => "Driver salary (TAM)",
        "medicalized_assistant_salary" => "Nursing assistant salary (TAM)",
        "medicalized_physician_salary" => "Physician salary (TAM)",
        "burden_rate_percent" => "Payroll burden (%)",
        "admin_payroll" => "Administrative payroll (total)",
        "rent" => "Base rent",
        "utilities" => "Utilities",
        "insurance" => "Insurance",
        "licensing" => "Licences and permits (monthly)",
        "software" => "Software",
        "vehicle_depreciation" => "Vehicle depreciation (per vehicle)",
        "basic_equipment_depreciation" => "Basic equipment depreciation (TAB)",
        "medicalized_equipment_depreciation" => "Medical equipment depreciation (TAM)",
        "fuel_per_km" => "Fuel cost per km",
        "maintenance_per_km" => "Maintenance cost per km",
        "basic_consumables_per_trip" => "Consumables per basic trip (TAB)",
        "medicalized_consumables_per_trip" => "Consumables per medicalized trip (TAM)",
        "basic_vehicles" => "Basic ambulances (TAB)",
        "medicalized_vehicles" => "Medicalized ambulances (TAM)",
        "operating_days" => "Operating days per month",
        "trips_per_day" => "Average trips per day (per vehicle)",
        "km_per_trip" => "Average km per trip",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::PARAMETER_KEYS;

    #[test]
    fn every_parameter_has_labels() {
        for key in PARAMETER_KEYS {
            assert!(parameter_label_ko(key).is_some(), "ko {key}");
            assert!(parameter_label_en(key).is_some(), "en {key}");
        }
    }

    #[test]
    fn english_falls_back_to_korean_for_unknown_keys() {
        let tr = Translator::new("en-us");
        assert_eq!(tr.language(), Language::En);
        assert_eq!(tr.t(keys::APP_EXIT), "Exiting application.");
        assert_eq!(tr.t("nope"), "[missing translation]");
    }

    #[test]
    fn language_codes_round_trip() {
        assert_eq!(Translator::new("en-GB").language().as_code(), "en");
        assert_eq!(Translator::new("ko").language().as_code(), "ko");
        assert_eq!(Translator::new("xx").language().as_code(), "ko");
    }

    #[test]
    fn resolve_language_prefers_cli_then_config() {
        assert_eq!(resolve_language(Some("ko-KR"), Some("en")), "ko");
        assert_eq!(resolve_language(Some("auto"), Some("en")), "en");
        assert_eq!(resolve_language(None, Some("ko")), "ko");
    }

    #[test]
    fn override_pack_wins() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join("en.toml"),
            "[general]\napp_exit = \"Bye\"\n[param]\nrent = \"Lease\"\n",
        )
        .expect("write");
        let tr = Translator::new_with_pack("en", dir.path().to_str());
        assert_eq!(tr.t(keys::APP_EXIT), "Bye");
        assert_eq!(tr.parameter_label("rent"), "Lease");
        assert_eq!(tr.parameter_label("fuel_per_km"), "Fuel cost per km");
    }
}
