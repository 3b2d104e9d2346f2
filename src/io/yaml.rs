use std::{fs, path::Path};

use log::info;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{ArtifactError, ArtifactIo, DocumentFormat};
use crate::config::ConfigDocument;

impl ArtifactIo {
    /// Read a YAML configuration file into a ConfigDocument. Null documents and empty mappings are
    /// rejected with `EmptyDocument`, and the top level must be a mapping with string keys.
    pub fn read_config<P: AsRef<Path>>(&self, path: P) -> Result<ConfigDocument, ArtifactError> {
        let path = path.as_ref();
        let doc = parse_yaml(path)?;

        info!(target: self.target(), "yaml file: {} loaded successfully", path.display());

        Ok(doc)
    }

    /// Read a YAML configuration file directly into a typed configuration struct
    pub fn read_config_as<T, P>(&self, path: P) -> Result<T, ArtifactError>
    where
        T: DeserializeOwned,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let config = parse_yaml(path)?
            .into_typed()
            .map_err(|e| ArtifactError::parse(path, DocumentFormat::Yaml, e))?;

        info!(target: self.target(), "yaml file: {} loaded successfully", path.display());

        Ok(config)
    }
}

fn parse_yaml(path: &Path) -> Result<ConfigDocument, ArtifactError> {
    let text = fs::read_to_string(path).map_err(|e| ArtifactError::on_read(path, e))?;

    if !has_content(&text) {
        return Err(ArtifactError::EmptyDocument(path.to_path_buf()));
    }

    let mut raw: serde_yaml::Value = serde_yaml::from_str(&text)
        .map_err(|e| ArtifactError::parse(path, DocumentFormat::Yaml, e))?;

    raw.apply_merge()
        .map_err(|e| ArtifactError::parse(path, DocumentFormat::Yaml, e))?;

    let is_empty = match &raw {
        serde_yaml::Value::Null => true,
        serde_yaml::Value::Mapping(mapping) => mapping.is_empty(),
        _ => false,
    };

    if is_empty {
        return Err(ArtifactError::EmptyDocument(path.to_path_buf()));
    }

    if let Some(key) = non_finite_float(&raw) {
        return Err(ArtifactError::parse(
            path,
            DocumentFormat::Yaml,
            format!("non-finite float at {} cannot be represented", key),
        ));
    }

    // Non-string keys fail here, since JSON objects only allow string keys
    let value: Value = serde_yaml::from_value(raw)
        .map_err(|e| ArtifactError::parse(path, DocumentFormat::Yaml, e))?;

    ConfigDocument::try_from(value).map_err(|e| ArtifactError::parse(path, DocumentFormat::Yaml, e))
}

/// Find the first `.inf`/`.nan` value, returning its dotted location. Such values would otherwise
/// turn into `null` once converted.
fn non_finite_float(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::Number(n) if n.as_f64().is_some_and(|f| !f.is_finite()) => {
            Some(String::new())
        }
        serde_yaml::Value::Sequence(items) => items.iter().enumerate().find_map(|(i, item)| {
            non_finite_float(item).map(|inner| join_location(&i.to_string(), &inner))
        }),
        serde_yaml::Value::Mapping(mapping) => mapping.iter().find_map(|(key, item)| {
            non_finite_float(item).map(|inner| {
                let key = match key {
                    serde_yaml::Value::String(s) => s.clone(),
                    other => format!("{:?}", other),
                };
                join_location(&key, &inner)
            })
        }),
        serde_yaml::Value::Tagged(tagged) => non_finite_float(&tagged.value),
        _ => None,
    }
}

fn join_location(head: &str, tail: &str) -> String {
    if tail.is_empty() {
        head.to_string()
    } else {
        format!("{}.{}", head, tail)
    }
}

/// Whether the text holds anything besides blank lines, comments and document markers
fn has_content(text: &str) -> bool {
    text.lines().map(str::trim).any(|line| {
        !(line.is_empty() || line.starts_with('#') || line == "---" || line == "...")
    })
}
