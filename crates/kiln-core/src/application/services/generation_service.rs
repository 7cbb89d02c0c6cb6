//! Generation Service - main application orchestrator.
//!
//! This service coordinates one generation:
//! 1. Validate the request (nothing else happens if this fails)
//! 2. Start the progress emitter
//! 3. Compose the scaffold
//! 4. Hold for the settle delay, then finalize progress at 100
//!
//! Export and catalog listings are exposed here too, so front ends only
//! ever talk to this service.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::ArtifactWriter,
        progress::{ProgressCanceller, ProgressEmitter, ProgressSink},
    },
    domain::{
        ComposeOptions, PlatformCategory, ScaffoldRequest, ScaffoldResult, catalog, compatibility,
        compose_resolved, export,
    },
    error::KilnResult,
};

/// Delay between composing and finalizing progress when none is configured.
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(2500);

/// Information about a framework for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameworkInfo {
    pub id: String,
    pub name: String,
    pub platforms: Vec<String>,
    pub extension: String,
}

/// Information about a feature for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Wrapper kind, if the feature nests around the application root.
    pub wraps: Option<String>,
    pub frameworks: Vec<String>,
}

/// Main generation service.
#[derive(Debug, Clone)]
pub struct GenerationService {
    emitter: ProgressEmitter,
    settle: Duration,
}

impl Default for GenerationService {
    fn default() -> Self {
        Self::new(ProgressEmitter::default(), DEFAULT_SETTLE)
    }
}

impl GenerationService {
    pub fn new(emitter: ProgressEmitter, settle: Duration) -> Self {
        Self { emitter, settle }
    }

    pub fn settle(&self) -> Duration {
        self.settle
    }

    pub fn emitter(&self) -> &ProgressEmitter {
        &self.emitter
    }

    /// Lets another thread abort an in-flight [`generate`](Self::generate).
    pub fn canceller(&self) -> ProgressCanceller {
        self.emitter.canceller()
    }

    /// Generate a scaffold, streaming progress to `sink`.
    ///
    /// An invalid request fails before any progress is reported. A run that
    /// is cancelled, or superseded by a newer call, fails with
    /// [`ApplicationError::Cancelled`] and reports nothing further.
    #[instrument(
        skip_all,
        fields(
            project = %request.project_name().trim(),
            platform = %request.platform(),
            framework = request.framework_id().unwrap_or("-"),
        )
    )]
    pub fn generate(
        &self,
        request: &ScaffoldRequest,
        options: &ComposeOptions,
        sink: impl ProgressSink + 'static,
    ) -> KilnResult<ScaffoldResult> {
        let resolved = request.resolve().inspect_err(|e| {
            warn!(error = %e, "Request rejected");
        })?;

        let run = self.emitter.start(sink)?;
        debug!(%run, "Progress started");

        let result = compose_resolved(&resolved, options);
        debug!(bytes = result.text().len(), "Scaffold composed");

        if !self.emitter.hold(run, self.settle) || !self.emitter.finish(run) {
            info!(%run, "Generation cancelled");
            return Err(ApplicationError::Cancelled.into());
        }

        info!(
            filename = result.suggested_filename(),
            features = resolved.features().len(),
            "Scaffold generated"
        );
        Ok(result)
    }

    /// Encode `result` for `framework_id` and write it into `dir`.
    ///
    /// Returns the path written. An existing file is only replaced when
    /// `force` is set.
    #[instrument(skip(self, result, writer, dir), fields(dir = %dir.display()))]
    pub fn export(
        &self,
        result: &ScaffoldResult,
        framework_id: &str,
        writer: &dyn ArtifactWriter,
        dir: &Path,
        force: bool,
    ) -> KilnResult<PathBuf> {
        let artifact = export::encode(result, framework_id);
        let path = dir.join(&artifact.filename);

        if writer.exists(&path) {
            if !force {
                return Err(ApplicationError::ArtifactExists { path }.into());
            }
            warn!(path = %path.display(), "Overwriting existing file");
        }

        writer.create_dir_all(dir)?;
        writer.write_bytes(&path, &artifact.payload)?;

        info!(path = %path.display(), bytes = artifact.len(), "Artifact written");
        Ok(path)
    }

    /// Frameworks selectable for `platform` (all of them when `None`).
    pub fn list_frameworks(&self, platform: Option<PlatformCategory>) -> Vec<FrameworkInfo> {
        let frameworks = match platform {
            Some(platform) => compatibility::frameworks_for(platform),
            None => catalog::list_frameworks().iter().collect(),
        };

        frameworks
            .into_iter()
            .map(|def| FrameworkInfo {
                id: def.id.to_string(),
                name: def.display_name.to_string(),
                platforms: def
                    .supported_platforms
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
                extension: export::file_extension(def.id).to_string(),
            })
            .collect()
    }

    /// Features selectable for `framework` (all of them when `None`).
    ///
    /// An unknown framework id is an error rather than an empty list.
    pub fn list_features(&self, framework: Option<&str>) -> KilnResult<Vec<FeatureInfo>> {
        let framework_id = framework
            .map(catalog::resolve_framework)
            .transpose()?
            .map(|def| def.id);

        Ok(compatibility::features_for(framework_id)
            .into_iter()
            .map(|def| FeatureInfo {
                id: def.id.to_string(),
                name: def.display_name.to_string(),
                description: def.description.to_string(),
                wraps: def.wrapper.map(|kind| kind.to_string()),
                frameworks: def
                    .compatible_frameworks
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::{
        application::progress::{COMPLETE, FixedSteps, ProgressConfig, ProgressPhase},
        error::KilnError,
    };

    fn service(settle: Duration) -> GenerationService {
        let emitter = ProgressEmitter::with_steps(
            ProgressConfig {
                tick_interval: Duration::from_millis(1),
                ..ProgressConfig::default()
            },
            FixedSteps(7.0),
        );
        GenerationService::new(emitter, settle)
    }

    fn recorder() -> (Arc<Mutex<Vec<f64>>>, impl FnMut(f64) + Send + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let seen = Arc::clone(&seen);
            move |v| seen.lock().unwrap().push(v)
        };
        (seen, sink)
    }

    fn my_app() -> ScaffoldRequest {
        ScaffoldRequest::new("My App", PlatformCategory::Website)
            .with_framework("react")
            .with_features(["theme", "auth"])
    }

    #[test]
    fn successful_generation_ends_on_a_single_hundred() {
        let (seen, sink) = recorder();
        let result = service(Duration::from_millis(20))
            .generate(&my_app(), &ComposeOptions::default(), sink)
            .unwrap();

        assert_eq!(result.suggested_filename(), "my-app.jsx");
        let values = seen.lock().unwrap().clone();
        assert_eq!(values.last(), Some(&COMPLETE));
        assert_eq!(values.iter().filter(|v| **v == COMPLETE).count(), 1);
        assert!(values.iter().all(|v| *v <= COMPLETE));
    }

    #[test]
    fn invalid_request_reports_no_progress() {
        let (seen, sink) = recorder();
        let request =
            ScaffoldRequest::new("   ", PlatformCategory::Website).with_framework("react");
        let err = service(Duration::ZERO)
            .generate(&request, &ComposeOptions::default(), sink)
            .unwrap_err();

        assert!(err.is_validation());
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn cancelled_generation_returns_cancelled() {
        let svc = service(Duration::from_secs(30));
        let emitter = svc.emitter().clone();
        let (seen, sink) = recorder();

        let worker = std::thread::spawn(move || {
            while emitter.phase() != ProgressPhase::Running {
                std::thread::sleep(Duration::from_millis(1));
            }
            emitter.cancel()
        });
        let err = svc
            .generate(&my_app(), &ComposeOptions::default(), sink)
            .unwrap_err();
        worker.join().unwrap();

        assert!(err.is_cancelled());
        assert!(!seen.lock().unwrap().contains(&COMPLETE));
    }

    #[test]
    fn export_refuses_to_overwrite_without_force() {
        let svc = service(Duration::ZERO);
        let result = svc
            .generate(&my_app(), &ComposeOptions::default(), |_: f64| {})
            .unwrap();
        let writer = RecordingWriter::default();
        let dir = Path::new("out");

        let path = svc.export(&result, "react", &writer, dir, false).unwrap();
        assert_eq!(path, Path::new("out/my-app.jsx"));

        let err = svc.export(&result, "react", &writer, dir, false).unwrap_err();
        assert!(matches!(
            err,
            KilnError::Application(ApplicationError::ArtifactExists { .. })
        ));
        assert!(svc.export(&result, "react", &writer, dir, true).is_ok());
        assert_eq!(writer.writes.lock().unwrap().len(), 2);
    }

    #[test]
    fn export_keeps_path_like_names_inside_dir() {
        let svc = service(Duration::ZERO);
        let writer = RecordingWriter::default();
        let dir = Path::new("out");

        for (name, expected) in [
            ("../escaped", "out/escaped.jsx"),
            ("Client/Server App", "out/client-server-app.jsx"),
        ] {
            let request =
                ScaffoldRequest::new(name, PlatformCategory::Website).with_framework("react");
            let result = svc
                .generate(&request, &ComposeOptions::default(), |_: f64| {})
                .unwrap();
            let path = svc.export(&result, "react", &writer, dir, false).unwrap();
            assert_eq!(path, Path::new(expected));
            assert_eq!(path.parent(), Some(dir));
        }
    }

    #[test]
    fn listings_follow_the_filter() {
        let svc = service(Duration::ZERO);
        let mobile: Vec<_> = svc
            .list_frameworks(Some(PlatformCategory::Mobile))
            .into_iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(mobile, ["flutter", "react-native", "ionic"]);
        assert_eq!(svc.list_frameworks(None).len(), 10);

        let electron = svc.list_features(Some("electron")).unwrap();
        assert!(electron.iter().all(|f| f.id != "pwa" && f.id != "analytics"));
        assert_eq!(electron[0].wraps.as_deref(), Some("theme"));

        assert!(svc.list_features(Some("cobol")).unwrap_err().is_unknown_id());
    }

    #[derive(Default)]
    struct RecordingWriter {
        writes: Mutex<Vec<(PathBuf, Vec<u8>)>>,
    }

    impl ArtifactWriter for RecordingWriter {
        fn create_dir_all(&self, _path: &Path) -> KilnResult<()> {
            Ok(())
        }

        fn write_bytes(&self, path: &Path, payload: &[u8]) -> KilnResult<()> {
            self.writes
                .lock()
                .unwrap()
                .push((path.to_path_buf(), payload.to_vec()));
            Ok(())
        }

        fn exists(&self, path: &Path) -> bool {
            self.writes.lock().unwrap().iter().any(|(p, _)| p == path)
        }
    }
}
