use std::{fs, path::Path};

use log::*;
use serde_json::Value;

use crate::LojaApiError;

/// Where the prober keeps the last response it received.
pub const DEFAULT_SNAPSHOT_FILE: &str = "resposta_api_teste.json";

/// Writes `payload` as indented UTF-8 JSON, so it can be read by people and replayed into the combiner later.
pub fn save_snapshot<P: AsRef<Path>>(path: P, payload: &Value) -> Result<(), LojaApiError> {
    let path = path.as_ref();
    let mut json = serde_json::to_string_pretty(payload).map_err(|e| LojaApiError::JsonError(e.to_string()))?;
    json.push('\n');
    fs::write(path, json)?;
    info!("Saved API response snapshot to {}", path.display());
    Ok(())
}

pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Value, LojaApiError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)?;
    let payload = serde_json::from_str(&json)
        .map_err(|e| LojaApiError::JsonError(format!("{} is not valid JSON. {e}", path.display())))?;
    debug!("Loaded snapshot from {}", path.display());
    Ok(payload)
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn snapshot_is_readable_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_SNAPSHOT_FILE);
        let payload = json!([{"id": 1, "nome": "Hélice de Baixo Ruído"}]);
        save_snapshot(&path, &payload).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("Hélice de Baixo Ruído"), "non-ASCII text must not be escaped");
        assert!(text.contains("\n  {\n    \"id\": 1"));
        assert_eq!(load_snapshot(&path).unwrap(), payload);
    }

    #[test]
    fn load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(load_snapshot(&missing), Err(LojaApiError::Io(_))));
        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{not json").unwrap();
        assert!(matches!(load_snapshot(&broken), Err(LojaApiError::JsonError(_))));
    }
}
