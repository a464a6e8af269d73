use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{info, warn};

use super::{OwnerId, Scenario, ScenarioError, ScenarioId, ScenarioStore, ScenarioSummary};
use crate::simulation::InputModel;

/// `<root>/<owner>/<id>.json` 형태로 시나리오를 저장하는 로컬 저장소.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn owner_dir(&self, owner: &OwnerId) -> PathBuf {
        self.root.join(owner.as_str())
    }

    fn scenario_path(&self, owner: &OwnerId, id: &ScenarioId) -> PathBuf {
        self.owner_dir(owner).join(format!("{}.json", id.as_str()))
    }

    fn read(path: &Path) -> Result<Scenario, ScenarioError> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

impl ScenarioStore for JsonFileStore {
    fn list(&self, owner: &OwnerId) -> Result<Vec<ScenarioSummary>, ScenarioError> {
        let dir = self.owner_dir(owner);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut summaries = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match Self::read(&path) {
                Ok(scenario) => summaries.push(ScenarioSummary::from(&scenario)),
                // 손상된 파일 하나 때문에 목록 전체가 막히지 않게 한다
                Err(e) => warn!(path = %path.display(), error = %e, "시나리오 파일을 읽지 못함"),
            }
        }
        summaries.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.name.cmp(&b.name)));
        Ok(summaries)
    }

    fn save(
        &self,
        owner: &OwnerId,
        name: &str,
        inputs: &InputModel,
    ) -> Result<ScenarioId, ScenarioError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ScenarioError::EmptyName);
        }
        let scenario = Scenario {
            id: ScenarioId::generate(),
            name: name.to_string(),
            owner: owner.clone(),
            created_at: Utc::now(),
            inputs: inputs.clone(),
        };
        fs::create_dir_all(self.owner_dir(owner))?;
        let json = serde_json::to_string_pretty(&scenario)?;
        fs::write(self.scenario_path(owner, &scenario.id), json)?;
        info!(owner = %owner, id = %scenario.id, name, "시나리오 저장");
        Ok(scenario.id)
    }

    fn load(&self, owner: &OwnerId, id: &ScenarioId) -> Result<Scenario, ScenarioError> {
        let path = self.scenario_path(owner, id);
        if !path.exists() {
            return Err(ScenarioError::NotFound(id.to_string()));
        }
        let scenario = Self::read(&path)?;
        if &scenario.owner != owner {
            return Err(ScenarioError::NotFound(id.to_string()));
        }
        Ok(scenario)
    }

    fn delete(&self, owner: &OwnerId, id: &ScenarioId) -> Result<(), ScenarioError> {
        let path = self.scenario_path(owner, id);
        match fs::remove_file(&path) {
            Ok(()) => {
                info!(owner = %owner, id = %id, "시나리오 삭제");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(ScenarioError::NotFound(id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
