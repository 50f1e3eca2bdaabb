//! Scenario persistence as YAML.

use std::fs;
use std::path::Path;

use futurebank_core::Scenario;

#[derive(Debug)]
pub enum ScenarioFileError {
    Io(String),
    Parse(String),
    Serialize(String),
}

impl std::fmt::Display for ScenarioFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScenarioFileError::Io(msg) => write!(f, "IO error: {}", msg),
            ScenarioFileError::Parse(msg) => write!(f, "Parse error: {}", msg),
            ScenarioFileError::Serialize(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for ScenarioFileError {}

/// Parse a scenario from YAML; omitted fields take their defaults
pub fn from_yaml(yaml: &str) -> Result<Scenario, serde_saphyr::Error> {
    serde_saphyr::from_str(yaml)
}

pub fn to_yaml(scenario: &Scenario) -> Result<String, serde_saphyr::ser::Error> {
    serde_saphyr::to_string(scenario)
}

/// Read and validate a scenario file
pub fn load_scenario(path: &Path) -> Result<Scenario, ScenarioFileError> {
    let content = fs::read_to_string(path).map_err(|e| {
        ScenarioFileError::Io(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let scenario = from_yaml(&content).map_err(|e| {
        ScenarioFileError::Parse(format!("Failed to parse {}: {}", path.display(), e))
    })?;

    scenario
        .validate()
        .map_err(|e| ScenarioFileError::Parse(format!("Invalid scenario {}: {}", path.display(), e)))?;

    tracing::debug!(
        path = %path.display(),
        goals = scenario.profile.goals.len(),
        loans = scenario.profile.loans.len(),
        "Loaded scenario"
    );
    Ok(scenario)
}

/// Write `scenario` to `path`, creating parent directories as needed
pub fn save_scenario(path: &Path, scenario: &Scenario) -> Result<(), ScenarioFileError> {
    let yaml = to_yaml(scenario)
        .map_err(|e| ScenarioFileError::Serialize(format!("Failed to serialize scenario: {}", e)))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            ScenarioFileError::Io(format!("Failed to create {}: {}", parent.display(), e))
        })?;
    }

    fs::write(path, yaml).map_err(|e| {
        ScenarioFileError::Io(format!("Failed to write {}: {}", path.display(), e))
    })?;

    tracing::info!(path = %path.display(), "Saved scenario");
    Ok(())
}
