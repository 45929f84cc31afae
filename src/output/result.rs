use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

/// Free-form per-command parameters reported alongside a result.
pub type Params = serde_json::Map<String, serde_json::Value>;

/// Metadata about one written image, printed by `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationResult {
    pub path: PathBuf,
    pub command: String,
    pub prompt: String,
    pub elapsed_ms: u64,
    #[serde(skip_serializing_if = "Params::is_empty")]
    pub params: Params,
}

impl GenerationResult {
    pub fn new(path: PathBuf, command: &str, prompt: &str, start: Instant) -> Self {
        Self {
            path,
            command: command.to_string(),
            prompt: prompt.to_string(),
            elapsed_ms: start.elapsed().as_millis() as u64,
            params: Params::new(),
        }
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }
}

/// Pretty JSON for a batch of results: a bare object when there is exactly
/// one result and `always_array` is false, an array otherwise.
pub fn render_json(results: &[GenerationResult], always_array: bool) -> serde_json::Result<String> {
    match results {
        [single] if !always_array => serde_json::to_string_pretty(single),
        _ => serde_json::to_string_pretty(results),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(path: &str) -> GenerationResult {
        GenerationResult {
            path: PathBuf::from(path),
            command: "generate".to_string(),
            prompt: "a cat".to_string(),
            elapsed_ms: 12,
            params: Params::new(),
        }
    }

    #[test]
    fn test_empty_params_are_omitted() {
        let json: serde_json::Value =
            serde_json::from_str(&render_json(&[result("/tmp/a.png")], false).unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "path": "/tmp/a.png",
                "command": "generate",
                "prompt": "a cat",
                "elapsed_ms": 12
            })
        );
    }

    #[test]
    fn test_params_are_reported() {
        let mut params = Params::new();
        params.insert("style".to_string(), "anime".into());
        params.insert("count".to_string(), 2.into());
        let r = result("/tmp/a.png").with_params(params);

        let json: serde_json::Value =
            serde_json::from_str(&render_json(&[r], false).unwrap()).unwrap();
        assert_eq!(json["params"]["style"], "anime");
        assert_eq!(json["params"]["count"], 2);
    }

    #[test]
    fn test_array_shape() {
        let many = render_json(&[result("/a.png"), result("/b.png")], false).unwrap();
        assert!(many.trim_start().starts_with('['));

        let forced = render_json(&[result("/a.png")], true).unwrap();
        assert!(forced.trim_start().starts_with('['));
    }
}
