use std::{fs, path::Path};

use log::info;
use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Value};

use super::{ArtifactError, ArtifactIo, DocumentFormat};
use crate::config::ConfigDocument;

const INDENT: &[u8] = b"    ";

impl ArtifactIo {
    /// Save a mapping to `path` as 4-space indented JSON, replacing any existing file. The value
    /// must serialize to a JSON object.
    pub fn save_json<T, P>(&self, path: P, data: &T) -> Result<(), ArtifactError>
    where
        T: Serialize + ?Sized,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let encoded = encode(path, data)?;

        fs::write(path, encoded).map_err(|e| ArtifactError::on_write(path, e))?;

        info!(target: self.target(), "json file saved at: {}", path.display());

        Ok(())
    }

    /// Load a JSON object from `path` into a ConfigDocument
    pub fn load_json<P: AsRef<Path>>(&self, path: P) -> Result<ConfigDocument, ArtifactError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| ArtifactError::on_read(path, e))?;

        let value: Value = serde_json::from_str(&text)
            .map_err(|e| ArtifactError::parse(path, DocumentFormat::Json, e))?;

        let doc = ConfigDocument::try_from(value)
            .map_err(|e| ArtifactError::parse(path, DocumentFormat::Json, e))?;

        info!(target: self.target(), "json file loaded successfully from: {}", path.display());

        Ok(doc)
    }
}

fn encode<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<Vec<u8>, ArtifactError> {
    let serialization_error = |source: Box<dyn std::error::Error + Send + Sync>| {
        ArtifactError::Serialization {
            path: path.to_path_buf(),
            source,
        }
    };

    let value = serde_json::to_value(data).map_err(|e| serialization_error(e.into()))?;

    if !value.is_object() {
        return Err(serialization_error(
            "a json document must be a mapping at the top level".into(),
        ));
    }

    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    value
        .serialize(&mut serializer)
        .map_err(|e| serialization_error(e.into()))?;
    buf.push(b'\n');

    Ok(buf)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn writes_four_space_indented_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("scores.json");
        let scores = ConfigDocument::try_from(json!({ "mse": 0.25, "r2": 0.9 })).unwrap();

        ArtifactIo::default().save_json(&path, &scores).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "{\n    \"mse\": 0.25,\n    \"r2\": 0.9\n}\n");
    }

    #[test]
    fn overwrites_existing_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("metrics.json");
        let io = ArtifactIo::default();

        io.save_json(&path, &json!({ "epoch": 1, "loss": 0.5 }))
            .unwrap();
        io.save_json(&path, &json!({ "epoch": 2 })).unwrap();

        let doc = io.load_json(&path).unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc["epoch"], json!(2));
    }

    #[test]
    fn saves_any_serializable_mapping() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("labels.json");
        let io = ArtifactIo::default();

        let id2label: BTreeMap<usize, String> =
            [(0, "AddToPlaylist".to_string()), (1, "BookRestaurant".to_string())]
                .into_iter()
                .collect();

        io.save_json(&path, &id2label).unwrap();

        let doc = io.load_json(&path).unwrap();
        assert_eq!(doc["1"], json!("BookRestaurant"));
    }

    #[test]
    fn rejects_non_mappings_on_save() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("list.json");

        let result = ArtifactIo::default().save_json(&path, &vec![1, 2, 3]);

        assert!(matches!(result, Err(ArtifactError::Serialization { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn load_errors() {
        let dir = tempfile::tempdir().expect("tempdir");
        let io = ArtifactIo::default();

        let missing = dir.path().join("missing.json");
        assert!(matches!(
            io.load_json(&missing),
            Err(ArtifactError::NotFound(p)) if p == missing
        ));

        let malformed = dir.path().join("malformed.json");
        fs::write(&malformed, "{ \"a\": ").unwrap();
        assert!(matches!(
            io.load_json(&malformed),
            Err(ArtifactError::Parse {
                format: DocumentFormat::Json,
                ..
            })
        ));

        let array = dir.path().join("array.json");
        fs::write(&array, "[1, 2]").unwrap();
        assert!(matches!(
            io.load_json(&array),
            Err(ArtifactError::Parse { .. })
        ));
    }

    #[test]
    fn empty_objects_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("empty.json");
        fs::write(&path, "{}").unwrap();

        let doc = ArtifactIo::default().load_json(&path).unwrap();

        assert!(doc.is_empty());
    }
}
