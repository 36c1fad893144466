//! Contract for the collaborator that supplies hardware-specific block kinds.
//!
//! The robot controller generates extra kinds for the active hardware
//! configuration. Fetching them is the host's job; this module fixes the
//! completion contract and turns a completed fetch into registered kinds.

use crate::{BlockRegistry, FetchError, SourceError};
use std::path::PathBuf;

/// Outcome of one fetch: a non-empty payload or an error, never both.
pub type FetchResult = Result<String, FetchError>;

/// Callback-style supplier of generated kinds and the configuration name.
///
/// Each `done` callback is invoked at most once; sources that complete
/// synchronously invoke it before returning.
pub trait KindSource {
    /// Fetch the JSON kind definitions generated for the active configuration.
    fn fetch_generated_kinds<F: FnOnce(FetchResult)>(&self, done: F);

    /// Fetch the name of the active hardware configuration.
    fn fetch_configuration_name<F: FnOnce(FetchResult)>(&self, done: F);
}

/// Enforces the payload-or-error contract: an empty payload becomes an error.
pub fn normalize(outcome: FetchResult) -> FetchResult {
    match outcome {
        Ok(payload) if payload.trim().is_empty() => Err(FetchError::failed("empty response")),
        other => other,
    }
}

/// Registers the kinds carried by a completed fetch.
///
/// Call this from the host's completion callback.
pub fn install_generated_kinds(
    registry: &mut BlockRegistry,
    outcome: FetchResult,
) -> Result<Vec<String>, SourceError> {
    let payload = normalize(outcome)?;
    let names = registry.register_json(&payload)?;
    log::debug!("installed {} generated block kinds", names.len());
    Ok(names)
}

/// Fetches from a synchronously completing source and registers the result.
pub fn load_generated_kinds(
    registry: &mut BlockRegistry,
    source: &impl KindSource,
) -> Result<Vec<String>, SourceError> {
    let mut outcome = None;
    source.fetch_generated_kinds(|result| outcome = Some(result));
    let outcome = outcome.ok_or(SourceError::Incomplete)?;
    install_generated_kinds(registry, outcome)
}

/// Fetches the configuration name from a synchronously completing source.
pub fn configuration_name(source: &impl KindSource) -> Result<String, SourceError> {
    let mut outcome = None;
    source.fetch_configuration_name(|result| outcome = Some(result));
    let name = normalize(outcome.ok_or(SourceError::Incomplete)?)?;
    Ok(name)
}

/// In-memory source with fixed outcomes.
#[derive(Debug, Clone)]
pub struct StaticSource {
    kinds: FetchResult,
    configuration_name: FetchResult,
}

impl StaticSource {
    /// Source that succeeds with the given payloads.
    pub fn new(kinds: impl Into<String>, configuration_name: impl Into<String>) -> Self {
        Self {
            kinds: Ok(kinds.into()),
            configuration_name: Ok(configuration_name.into()),
        }
    }

    /// Source whose every fetch fails with `error`.
    pub fn failing(error: FetchError) -> Self {
        Self {
            kinds: Err(error.clone()),
            configuration_name: Err(error),
        }
    }
}

impl KindSource for StaticSource {
    fn fetch_generated_kinds<F: FnOnce(FetchResult)>(&self, done: F) {
        done(normalize(self.kinds.clone()))
    }

    fn fetch_configuration_name<F: FnOnce(FetchResult)>(&self, done: F) {
        done(normalize(self.configuration_name.clone()))
    }
}

/// Source reading both payloads from files.
#[derive(Debug, Clone)]
pub struct FileSource {
    kinds_path: PathBuf,
    configuration_path: PathBuf,
}

impl FileSource {
    /// Source over a kinds JSON file and a file holding the configuration name.
    pub fn new(kinds_path: impl Into<PathBuf>, configuration_path: impl Into<PathBuf>) -> Self {
        Self {
            kinds_path: kinds_path.into(),
            configuration_path: configuration_path.into(),
        }
    }

    fn read(path: &PathBuf) -> FetchResult {
        std::fs::read_to_string(path)
            .map_err(|err| FetchError::failed(format!("{}: {}", path.display(), err)))
    }
}

impl KindSource for FileSource {
    fn fetch_generated_kinds<F: FnOnce(FetchResult)>(&self, done: F) {
        done(normalize(Self::read(&self.kinds_path)))
    }

    fn fetch_configuration_name<F: FnOnce(FetchResult)>(&self, done: F) {
        done(normalize(
            Self::read(&self.configuration_path).map(|name| name.trim().to_string()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RegistryError;

    const CLAW: &str = r#"[{
        "name": "claw_open",
        "connection": {"type": "statement"},
        "tooltip": {"kind": "fixed", "text": "Opens the claw."},
        "javascript": {"form": "call", "receiver": {"family": "claw"}, "method": "open"},
        "java": {"form": "call", "receiver": {"identifier": "claw"}, "method": "open"}
    }]"#;

    #[test]
    fn loads_kinds_from_static_source() {
        let mut registry = BlockRegistry::new();
        let source = StaticSource::new(CLAW, "Competition Bot");
        let names = load_generated_kinds(&mut registry, &source).unwrap();
        assert_eq!(names, vec!["claw_open"]);
        assert!(registry.contains("claw_open"));
        assert_eq!(configuration_name(&source).unwrap(), "Competition Bot");
    }

    #[test]
    fn status_failure_is_reported_with_code() {
        let mut registry = BlockRegistry::new();
        let source = StaticSource::failing(FetchError::Status(404));
        let err = load_generated_kinds(&mut registry, &source).unwrap_err();
        assert_eq!(err.to_string(), "fetch failed, code 404");
        assert!(registry.is_empty());
    }

    #[test]
    fn empty_payload_becomes_error() {
        let mut registry = BlockRegistry::new();
        let err = install_generated_kinds(&mut registry, Ok("  ".into())).unwrap_err();
        assert!(matches!(err, SourceError::Fetch(FetchError::Failed(_))));
    }

    #[test]
    fn bad_payload_surfaces_registry_error() {
        let mut registry = BlockRegistry::new();
        let err = install_generated_kinds(&mut registry, Ok("[{}]".into())).unwrap_err();
        assert!(matches!(
            err,
            SourceError::Registry(RegistryError::Definition(_))
        ));
    }

    struct NeverCompletes;

    impl KindSource for NeverCompletes {
        fn fetch_generated_kinds<F: FnOnce(FetchResult)>(&self, _done: F) {}
        fn fetch_configuration_name<F: FnOnce(FetchResult)>(&self, _done: F) {}
    }

    #[test]
    fn pending_source_is_incomplete() {
        let mut registry = BlockRegistry::new();
        assert!(matches!(
            load_generated_kinds(&mut registry, &NeverCompletes),
            Err(SourceError::Incomplete)
        ));
    }

    #[test]
    fn missing_file_is_fetch_failure() {
        let source = FileSource::new("/nonexistent/kinds.json", "/nonexistent/name.txt");
        let err = configuration_name(&source).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/name.txt"));
    }
}
