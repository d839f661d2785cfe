use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

pub trait Serializer {
    fn deserialize<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T>;
}

pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn deserialize<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T> {
        serde_json::from_slice(data).map_err(Into::into)
    }
}

pub struct YamlSerializer;

impl Serializer for YamlSerializer {
    fn deserialize<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T> {
        serde_yaml::from_slice(data).map_err(Into::into)
    }
}

/// Reads `path` as YAML when it ends in `.yaml`/`.yml`, JSON otherwise.
pub fn load_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
    let parsed = if is_yaml {
        YamlSerializer.deserialize(&content)
    } else {
        JsonSerializer.deserialize(&content)
    };
    parsed.with_context(|| format!("failed to parse {}", path.display()))
}
