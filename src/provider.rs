//! Test case providers
//! Resolve a source path into one or more runnable case definitions

use parking_lot::RwLock;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::LoadError;
use crate::runner::Runner;

/// One case as a source defines it. `run` is optional here so providers can
/// report definitions that lack it; the harness rejects those.
#[derive(Debug, Clone, Default)]
pub struct CaseDescriptor {
    pub title: Option<String>,
    pub run: Option<Runner>,
}

impl CaseDescriptor {
    pub fn new(run: Runner) -> Self {
        Self {
            title: None,
            run: Some(run),
        }
    }

    pub fn titled(title: impl Into<String>, run: Runner) -> Self {
        Self {
            title: Some(title.into()),
            run: Some(run),
        }
    }
}

/// What a source exports: a single case or a list of cases
#[derive(Debug, Clone)]
pub enum Export {
    Single(CaseDescriptor),
    Many(Vec<CaseDescriptor>),
}

/// Loads test cases from a source path
pub trait TestCaseProvider {
    fn load(&self, path: &Path) -> Result<Export, LoadError>;
}

/// Make `path` absolute against the current directory
pub fn resolve_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}

/// In-process provider: exports registered up front, keyed by resolved path
#[derive(Default)]
pub struct RegistryProvider {
    exports: RwLock<HashMap<PathBuf, Export>>,
}

impl RegistryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `export` under `path`, replacing any previous export
    pub fn register(&self, path: impl AsRef<Path>, export: Export) -> &Self {
        self.exports.write().insert(resolve_path(path), export);
        self
    }

    pub fn len(&self) -> usize {
        self.exports.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.exports.read().is_empty()
    }
}

impl TestCaseProvider for RegistryProvider {
    fn load(&self, path: &Path) -> Result<Export, LoadError> {
        self.exports
            .read()
            .get(path)
            .cloned()
            .ok_or_else(|| LoadError::NotFound {
                path: path.to_path_buf(),
            })
    }
}

/// Reads JSON manifests describing command-line test cases.
///
/// A manifest holds one object or an array of objects:
///
/// ```json
/// [
///   { "title": "gzip", "run": ["gzip", "-kf", "data.bin"] },
///   { "run": "xz -kf data.bin" }
/// ]
/// ```
///
/// An argv array is spawned directly; a string goes through the platform shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestProvider;

#[derive(Deserialize)]
#[serde(untagged)]
enum ManifestExport {
    Many(Vec<ManifestCase>),
    Single(ManifestCase),
}

#[derive(Deserialize)]
struct ManifestCase {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    run: Option<RunSpec>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RunSpec {
    Argv(Vec<String>),
    Shell(String),
}

impl RunSpec {
    fn into_argv(self) -> Vec<String> {
        match self {
            RunSpec::Argv(argv) => argv,
            RunSpec::Shell(line) if line.trim().is_empty() => Vec::new(),
            #[cfg(windows)]
            RunSpec::Shell(line) => vec!["cmd".to_string(), "/C".to_string(), line],
            #[cfg(not(windows))]
            RunSpec::Shell(line) => vec!["sh".to_string(), "-c".to_string(), line],
        }
    }
}

impl ManifestCase {
    fn into_descriptor(self) -> CaseDescriptor {
        let run = self
            .run
            .map(RunSpec::into_argv)
            .filter(|argv| !argv.is_empty())
            .map(Runner::command);

        CaseDescriptor {
            title: self.title,
            run,
        }
    }
}

impl TestCaseProvider for ManifestProvider {
    fn load(&self, path: &Path) -> Result<Export, LoadError> {
        if !path.exists() {
            return Err(LoadError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest: ManifestExport =
            serde_json::from_str(&content).map_err(|source| LoadError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let export = match manifest {
            ManifestExport::Single(case) => Export::Single(case.into_descriptor()),
            ManifestExport::Many(cases) => Export::Many(
                cases.into_iter().map(ManifestCase::into_descriptor).collect(),
            ),
        };
        debug!(path = %path.display(), "loaded manifest");
        Ok(export)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_manifest(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_resolve_path() {
        let abs = resolve_path("/tmp/case.json");
        assert_eq!(abs, PathBuf::from("/tmp/case.json"));

        let rel = resolve_path("case.json");
        assert!(rel.is_absolute());
        assert!(rel.ends_with("case.json"));
    }

    #[test]
    fn test_registry_lookup() {
        let registry = RegistryProvider::new();
        registry.register(
            "noop.rs",
            Export::Single(CaseDescriptor::new(Runner::sync(|| Ok(())))),
        );
        assert_eq!(registry.len(), 1);

        let export = registry.load(&resolve_path("noop.rs")).unwrap();
        assert!(matches!(export, Export::Single(ref case) if case.run.is_some()));

        let missing = registry.load(&resolve_path("other.rs"));
        assert!(matches!(missing, Err(LoadError::NotFound { .. })));
    }

    #[test]
    fn test_manifest_single() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(&dir, "one.json", r#"{ "title": "echo", "run": ["echo", "hi"] }"#);

        match ManifestProvider.load(&path).unwrap() {
            Export::Single(case) => {
                assert_eq!(case.title.as_deref(), Some("echo"));
                assert!(case.run.unwrap().is_deferred());
            }
            Export::Many(_) => panic!("expected a single export"),
        }
    }

    #[test]
    fn test_manifest_many() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(
            &dir,
            "many.json",
            r#"[ { "run": ["true"] }, { "run": "exit 0" } ]"#,
        );

        match ManifestProvider.load(&path).unwrap() {
            Export::Many(cases) => {
                assert_eq!(cases.len(), 2);
                assert!(cases.iter().all(|c| c.title.is_none() && c.run.is_some()));
            }
            Export::Single(_) => panic!("expected an array export"),
        }
    }

    #[test]
    fn test_manifest_without_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(&dir, "norun.json", r#"{ "title": "nothing" }"#);

        match ManifestProvider.load(&path).unwrap() {
            Export::Single(case) => assert!(case.run.is_none()),
            Export::Many(_) => panic!("expected a single export"),
        }

        let path = write_manifest(&dir, "empty.json", r#"{ "run": [] }"#);
        match ManifestProvider.load(&path).unwrap() {
            Export::Single(case) => assert!(case.run.is_none()),
            Export::Many(_) => panic!("expected a single export"),
        }
    }

    #[test]
    fn test_manifest_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = ManifestProvider.load(&dir.path().join("absent.json"));
        assert!(matches!(missing, Err(LoadError::NotFound { .. })));

        let path = write_manifest(&dir, "bad.json", "[1, 2");
        assert!(matches!(
            ManifestProvider.load(&path),
            Err(LoadError::Parse { .. })
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_manifest_runner_executes() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(&dir, "ok.json", r#"{ "run": "exit 0" }"#);

        let Export::Single(case) = ManifestProvider.load(&path).unwrap() else {
            panic!("expected a single export");
        };
        case.run.unwrap().call().await.unwrap();
    }
}
