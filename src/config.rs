use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::simulation::{MissingTariffPolicy, SimulationOptions};
use crate::validation::DEFAULT_MIX_TOLERANCE;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// auto / ko / en
    pub language: String,
    /// 시나리오 저장 디렉터리
    pub scenario_dir: PathBuf,
    /// 기본 소유자 ID. 없으면 익명으로 실행한다.
    pub owner: Option<String>,
    pub missing_tariff: MissingTariffPolicy,
    /// 믹스 합계 경고 허용 오차 [%p]
    pub mix_tolerance_percent: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            scenario_dir: PathBuf::from("scenarios"),
            owner: None,
            missing_tariff: MissingTariffPolicy::Strict,
            mix_tolerance_percent: DEFAULT_MIX_TOLERANCE,
        }
    }
}

impl Config {
    pub fn simulation_options(&self) -> SimulationOptions {
        SimulationOptions {
            missing_tariff: self.missing_tariff,
        }
    }

    /// 설정을 지정 경로에 저장한다.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 파싱 오류: {0}")]
    Serde(#[from] toml::de::Error),
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save(path)?;
        Ok(cfg)
    }
}
