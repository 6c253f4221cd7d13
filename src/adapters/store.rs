use crate::domain::model::SnipeabilityResult;
use crate::domain::ports::Storage;
use crate::utils::error::{Result, SnipeError};
use std::collections::HashMap;

/// Results file kept across runs.
pub struct JsonResultStore<S: Storage> {
    storage: S,
    path: String,
}

impl<S: Storage> JsonResultStore<S> {
    pub fn new(storage: S, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// 檔案不存在時視為空清單
    pub async fn load_existing(&self) -> Result<Vec<SnipeabilityResult>> {
        let data = match self.storage.read_file(&self.path).await {
            Ok(data) => data,
            Err(SnipeError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No existing results at {}", self.path);
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_slice(&data)?)
    }

    pub async fn save(&self, results: &[SnipeabilityResult]) -> Result<()> {
        let json = serde_json::to_string_pretty(results)?;
        self.storage.write_file(&self.path, json.as_bytes()).await
    }
}

/// Fresh results replace earlier ones for the same domain; new domains are appended.
pub fn merge_results(
    existing: Vec<SnipeabilityResult>,
    fresh: Vec<SnipeabilityResult>,
) -> Vec<SnipeabilityResult> {
    let mut merged = existing;
    let mut positions: HashMap<String, usize> = merged
        .iter()
        .enumerate()
        .map(|(i, r)| (r.domain.clone(), i))
        .collect();

    for result in fresh {
        match positions.get(&result.domain) {
            Some(&i) => merged[i] = result,
            None => {
                positions.insert(result.domain.clone(), merged.len());
                merged.push(result);
            }
        }
    }
    merged
}
