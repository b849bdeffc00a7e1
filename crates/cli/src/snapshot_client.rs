use mesh_doctor_analysis::{FetchError, Resource, ResourceClient, ResourceKind};
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Reads resources from snapshot files in one directory.
///
/// A kind is looked up as `<resource>.<version>.<group>.json` first, then as
/// `<resource>.json`. Each file holds a `kubectl get -o json` List, a bare
/// array or a single object. A kind without a file lists as empty.
#[derive(Debug, Clone)]
pub(crate) struct FileSnapshotClient {
    dir: PathBuf,
}

impl FileSnapshotClient {
    pub(crate) fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, kind: &ResourceKind) -> PathBuf {
        let qualified = self.dir.join(format!("{kind}.json"));
        if qualified.is_file() {
            return qualified;
        }
        self.dir.join(format!("{}.json", kind.resource))
    }
}

impl ResourceClient for FileSnapshotClient {
    fn list(&self, kind: &ResourceKind) -> Result<Vec<Resource>, FetchError> {
        let path = self.path_for(kind);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("{} missing; {kind} lists as empty", path.display());
                return Ok(Vec::new());
            }
            Err(source) => return Err(FetchError::Io { path, source }),
        };
        let document: Value = serde_json::from_str(&text).map_err(|err| malformed(&path, err))?;
        Ok(items(document, &path)?
            .into_iter()
            .map(Resource::from)
            .collect())
    }

    fn get(&self, kind: &ResourceKind, name: &str) -> Result<Resource, FetchError> {
        self.list(kind)?
            .into_iter()
            .find(|item| item.name() == name)
            .ok_or_else(|| FetchError::NotFound {
                kind: kind.to_string(),
                name: name.to_string(),
            })
    }
}

fn items(document: Value, path: &Path) -> Result<Vec<Value>, FetchError> {
    match document {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove("items") {
            Some(Value::Array(items)) => Ok(items),
            Some(other) => {
                map.insert("items".to_string(), other);
                Ok(vec![Value::Object(map)])
            }
            None => Ok(vec![Value::Object(map)]),
        },
        _ => Err(malformed(path, "expected a List, an array or an object")),
    }
}

fn malformed(path: &Path, reason: impl ToString) -> FetchError {
    FetchError::Malformed {
        location: path.display().to_string(),
        reason: reason.to_string(),
    }
}
