//! 이름 붙은 입력 스냅샷(시나리오)의 저장/조회.
//!
//! 시나리오는 소유자 ID 단위로 격리되며, 엔진은 저장 형식에 의존하지 않고
//! 다시 읽어 온 `InputModel`만 받는다.

pub mod file_store;

pub use file_store::JsonFileStore;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::simulation::InputModel;

#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("로그인(소유자 ID)이 필요합니다")]
    NotSignedIn,
    #[error("잘못된 소유자 ID: {0}")]
    InvalidOwner(String),
    #[error("시나리오 이름이 비어 있습니다")]
    EmptyName,
    #[error("시나리오를 찾을 수 없습니다: {0}")]
    NotFound(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

/// 시나리오 가시성을 결정하는 불투명 소유자 ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(String);

impl OwnerId {
    /// 경로에 안전한 문자(ASCII 영숫자, `-`, `_`, `.`)만 허용한다.
    pub fn parse(raw: &str) -> Result<Self, ScenarioError> {
        let raw = raw.trim();
        let valid = !raw.is_empty()
            && raw != "."
            && raw != ".."
            && raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if valid {
            Ok(Self(raw.to_string()))
        } else {
            Err(ScenarioError::InvalidOwner(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// CLI 플래그 → 설정 순으로 소유자 ID를 결정한다. 둘 다 없으면 익명(None).
pub fn resolve_owner(
    cli_owner: Option<&str>,
    config_owner: Option<&str>,
) -> Result<Option<OwnerId>, ScenarioError> {
    match cli_owner.or(config_owner) {
        Some(raw) if !raw.trim().is_empty() => OwnerId::parse(raw).map(Some),
        _ => Ok(None),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScenarioId(String);

impl ScenarioId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn parse(raw: &str) -> Result<Self, ScenarioError> {
        Uuid::parse_str(raw.trim())
            .map(|u| Self(u.to_string()))
            .map_err(|_| ScenarioError::NotFound(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 저장된 시나리오 전체 레코드.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: ScenarioId,
    pub name: String,
    pub owner: OwnerId,
    pub created_at: DateTime<Utc>,
    pub inputs: InputModel,
}

/// 목록 표시용 요약.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioSummary {
    pub id: ScenarioId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Scenario> for ScenarioSummary {
    fn from(s: &Scenario) -> Self {
        Self {
            id: s.id.clone(),
            name: s.name.clone(),
            created_at: s.created_at,
        }
    }
}

/// 소유자 범위의 시나리오 저장소.
pub trait ScenarioStore {
    /// 생성 시각 순으로 정렬된 요약 목록.
    fn list(&self, owner: &OwnerId) -> Result<Vec<ScenarioSummary>, ScenarioError>;
    fn save(
        &self,
        owner: &OwnerId,
        name: &str,
        inputs: &InputModel,
    ) -> Result<ScenarioId, ScenarioError>;
    fn load(&self, owner: &OwnerId, id: &ScenarioId) -> Result<Scenario, ScenarioError>;
    fn delete(&self, owner: &OwnerId, id: &ScenarioId) -> Result<(), ScenarioError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_id_rejects_path_tricks() {
        assert!(OwnerId::parse("alice-01").is_ok());
        assert!(OwnerId::parse("../etc").is_err());
        assert!(OwnerId::parse("..").is_err());
        assert!(OwnerId::parse("a/b").is_err());
        assert!(OwnerId::parse("   ").is_err());
    }

    #[test]
    fn resolve_owner_prefers_cli() {
        let owner = resolve_owner(Some("cli"), Some("cfg")).expect("owner");
        assert_eq!(owner.map(|o| o.to_string()), Some("cli".to_string()));
        let owner = resolve_owner(None, Some("cfg")).expect("owner");
        assert_eq!(owner.map(|o| o.to_string()), Some("cfg".to_string()));
        assert!(resolve_owner(None, None).expect("anon").is_none());
    }

    #[test]
    fn scenario_id_parse_requires_uuid() {
        let id = ScenarioId::generate();
        assert_eq!(ScenarioId::parse(id.as_str()).expect("parse"), id);
        assert!(matches!(
            ScenarioId::parse("../x"),
            Err(ScenarioError::NotFound(_))
        ));
    }
}
