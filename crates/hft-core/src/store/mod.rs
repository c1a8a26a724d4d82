//! Durable name → definition mapping backed by one JSON file.
//!
//! Write-through: every mutation saves the whole file. A failed save is
//! returned as [`Persistence::Failed`] and logged, the in-memory change stays.
mod error;
pub use error::{Persistence, StoreError};

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{debug, error, trace};

use hft_model::{LabelDefinition, LabelName};

/// Default file name inside the agent data directory.
pub const DATA_FILE_NAME: &str = "floating_texts.json";

pub struct LabelStore {
    path: PathBuf,
    labels: BTreeMap<LabelName, LabelDefinition>,
}

impl LabelStore {
    /// Empty store backed by `path`. Nothing is read until [`LabelStore::load`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            labels: BTreeMap::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the in-memory mapping with the file contents.
    ///
    /// A missing file is created empty. A blank file counts as empty.
    /// On any error the in-memory mapping is left as it was.
    pub fn load(&mut self) -> Result<(), StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "data file missing, creating an empty one");
                let previous = std::mem::take(&mut self.labels);
                if let Err(e) = self.save() {
                    self.labels = previous;
                    return Err(e);
                }
                return Ok(());
            }
            Err(e) => return Err(StoreError::io(&self.path)(e)),
        };

        let labels = if raw.trim().is_empty() {
            BTreeMap::new()
        } else {
            serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?
        };
        self.labels = labels;
        debug!(path = %self.path.display(), count = self.labels.len(), "labels loaded");
        Ok(())
    }

    /// Persist the full mapping: write a sibling temp file, then rename over the target.
    pub fn save(&self) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(StoreError::io(dir))?;
        }
        let json = serde_json::to_string_pretty(&self.labels).map_err(StoreError::Encode)?;

        let tmp = self.tmp_path();
        fs::write(&tmp, json).map_err(StoreError::io(&tmp))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            StoreError::io(&self.path)(e)
        })?;
        trace!(path = %self.path.display(), count = self.labels.len(), "labels saved");
        Ok(())
    }

    /// Insert or replace a definition, then save.
    pub fn add_or_update(&mut self, name: impl Into<LabelName>, def: LabelDefinition) -> Persistence {
        self.labels.insert(name.into(), def);
        self.persist()
    }

    /// Replace the text of an existing definition, then save.
    ///
    /// Returns `None` (and does not save) when `name` is unknown.
    pub fn set_text(&mut self, name: &str, text: impl Into<String>) -> Option<Persistence> {
        let def = self.labels.get_mut(name)?;
        def.text = text.into();
        Some(self.persist())
    }

    /// Remove a definition, then save.
    ///
    /// Returns `None` (and does not save) when `name` is unknown.
    pub fn remove(&mut self, name: &str) -> Option<Persistence> {
        self.labels.remove(name)?;
        Some(self.persist())
    }

    pub fn get(&self, name: &str) -> Option<&LabelDefinition> {
        self.labels.get(name)
    }

    /// Mutable access without saving; call [`LabelStore::save`] afterwards.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut LabelDefinition> {
        self.labels.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.labels.contains_key(name)
    }

    /// The whole mapping, ordered by name.
    pub fn all(&self) -> &BTreeMap<LabelName, LabelDefinition> {
        &self.labels
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LabelDefinition)> {
        self.labels.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    fn persist(&self) -> Persistence {
        let res = self.save();
        if let Err(e) = &res {
            error!(path = %self.path.display(), error = %e, "failed to save labels; file lags behind memory");
        }
        res.into()
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| DATA_FILE_NAME.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hft_model::{DimensionId, LabelKind, Position};

    fn welcome() -> LabelDefinition {
        LabelDefinition::new_static("Hello", Position::new(0.0, 64.0, 0.0), DimensionId::OVERWORLD)
    }

    fn clock() -> LabelDefinition {
        LabelDefinition::new_dynamic("{time}", Position::new(1.0, 65.0, 1.0), DimensionId::OVERWORLD, Some(1000))
    }

    #[test]
    fn load_creates_missing_file_and_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("nested").join(DATA_FILE_NAME);
        let mut store = LabelStore::new(&path);

        store.load().expect("missing file must not be an error");

        assert!(store.is_empty());
        let raw = fs::read_to_string(&path).unwrap();
        assert_eq!(raw.trim(), "{}");
    }

    #[test]
    fn mutations_are_written_through() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DATA_FILE_NAME);
        let mut store = LabelStore::new(&path);
        store.load().unwrap();

        assert!(store.add_or_update("welcome", welcome()).is_saved());
        assert!(store.add_or_update("clock", clock()).is_saved());

        let mut reread = LabelStore::new(&path);
        reread.load().unwrap();
        assert_eq!(reread.all(), store.all());
        assert_eq!(reread.get("clock").unwrap().kind, LabelKind::dynamic(1000));
    }

    #[test]
    fn file_uses_the_documented_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DATA_FILE_NAME);
        let mut store = LabelStore::new(&path);
        let _ = store.add_or_update("welcome", welcome());

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["welcome"]["text"], "Hello");
        assert_eq!(value["welcome"]["pos"]["y"], 64.0);
        assert_eq!(value["welcome"]["dimid"], 0);
        assert_eq!(value["welcome"]["type"], "static");
        assert!(value["welcome"].get("interval").is_none());
    }

    #[test]
    fn set_text_and_remove_report_unknown_names() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LabelStore::new(dir.path().join(DATA_FILE_NAME));
        let _ = store.add_or_update("welcome", welcome());

        assert!(store.set_text("missing", "x").is_none());
        assert!(store.remove("missing").is_none());

        assert!(store.set_text("welcome", "Hi").unwrap().is_saved());
        assert_eq!(store.get("welcome").unwrap().text, "Hi");

        assert!(store.remove("welcome").unwrap().is_saved());
        assert!(!store.contains("welcome"));
    }

    #[test]
    fn get_mut_is_saved_explicitly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DATA_FILE_NAME);
        let mut store = LabelStore::new(&path);
        let _ = store.add_or_update("welcome", welcome());

        store.get_mut("welcome").unwrap().position = Position::new(5.0, 5.0, 5.0);
        assert!(!fs::read_to_string(&path).unwrap().contains("5.0"));

        store.save().unwrap();
        let mut reread = LabelStore::new(&path);
        reread.load().unwrap();
        assert_eq!(reread.get("welcome").unwrap().position, Position::new(5.0, 5.0, 5.0));
    }

    #[test]
    fn unparsable_file_fails_and_keeps_memory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DATA_FILE_NAME);
        let mut store = LabelStore::new(&path);
        let _ = store.add_or_update("welcome", welcome());

        fs::write(&path, "{ not json").unwrap();
        let err = store.load().unwrap_err();

        assert!(matches!(err, StoreError::Parse { .. }), "unexpected: {err:?}");
        assert!(store.contains("welcome"));
    }

    #[test]
    fn unknown_label_type_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DATA_FILE_NAME);
        fs::write(
            &path,
            r#"{"x": {"text": "t", "pos": {"x": 0, "y": 0, "z": 0}, "dimid": 0, "type": "marquee"}}"#,
        )
        .unwrap();

        let mut store = LabelStore::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Parse { .. })));
    }

    #[test]
    fn blank_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DATA_FILE_NAME);
        fs::write(&path, "  \n").unwrap();

        let mut store = LabelStore::new(&path);
        store.load().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn failed_save_keeps_the_mutation() {
        let dir = tempfile::tempdir().unwrap();
        // Parent "directory" is a regular file, so create_dir_all fails.
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let mut store = LabelStore::new(blocker.join(DATA_FILE_NAME));

        let outcome = store.add_or_update("welcome", welcome());

        assert!(!outcome.is_saved());
        assert!(matches!(outcome.error(), Some(StoreError::Io { .. })));
        assert!(store.contains("welcome"));
    }

    #[test]
    fn save_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DATA_FILE_NAME);
        let mut store = LabelStore::new(&path);
        let _ = store.add_or_update("welcome", welcome());

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec![DATA_FILE_NAME.to_string()]);
    }
}
