use crate::infrastructure::error::EngineError;
use crate::infrastructure::snapshot::ScheduleSnapshot;
use chrono::Utc;
use serde::{Deserialize, Serialize};

pub const EXPORT_VERSION: &str = "1.0";
pub const APP_NAME: &str = "Daily Time Planner";

/// The file shape produced by "export data" and accepted by "import data".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEnvelope {
    pub export_date: String,
    pub version: String,
    pub app_name: String,
    pub data: ScheduleSnapshot,
}

pub fn export_state(snapshot: &ScheduleSnapshot) -> ExportEnvelope {
    ExportEnvelope {
        export_date: Utc::now().to_rfc3339(),
        version: EXPORT_VERSION.to_string(),
        app_name: APP_NAME.to_string(),
        data: snapshot.clone(),
    }
}

/// Parses an import file, enforcing the envelope structure before handing the
/// snapshot back: the version and data object must be present, the wake/sleep
/// fields must be non-empty strings, and every clock string must parse. A bad
/// file is rejected whole; nothing is partially applied.
pub fn parse_import(raw: &str) -> Result<ScheduleSnapshot, EngineError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;

    let Some(version) = value.get("version").and_then(serde_json::Value::as_str) else {
        return Err(EngineError::InvalidImport("missing version".to_string()));
    };
    if version != EXPORT_VERSION {
        return Err(EngineError::InvalidImport(format!(
            "unsupported version {version}"
        )));
    }
    let Some(data) = value.get("data") else {
        return Err(EngineError::InvalidImport("missing data".to_string()));
    };
    for field in ["wakeTime", "sleepTime"] {
        let present = data
            .get(field)
            .and_then(serde_json::Value::as_str)
            .map(str::trim)
            .is_some_and(|time| !time.is_empty());
        if !present {
            return Err(EngineError::InvalidImport(format!("missing {field}")));
        }
    }

    let snapshot: ScheduleSnapshot = serde_json::from_value(data.clone())?;
    snapshot.to_model()?;
    Ok(snapshot)
}
