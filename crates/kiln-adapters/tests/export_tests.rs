//! Generation plus export through the real adapters.

use std::{path::Path, time::Duration};

use kiln_adapters::{LocalFilesystem, MemoryFilesystem};
use kiln_core::{application::ProgressEmitter, prelude::*};

fn generate(name: &str, platform: PlatformCategory, framework: &str) -> ScaffoldResult {
    GenerationService::new(ProgressEmitter::default(), Duration::ZERO)
        .generate(
            &ScaffoldRequest::new(name, platform)
                .with_framework(framework)
                .with_features(["auth"]),
            &ComposeOptions::default(),
            |_: f64| {},
        )
        .unwrap()
}

#[test]
fn export_to_disk_uses_framework_extension() {
    let temp = tempfile::tempdir().unwrap();
    let service = GenerationService::default();
    let result = generate("Field Notes", PlatformCategory::Mobile, "ionic");

    let path = service
        .export(&result, "ionic", &LocalFilesystem::new(), temp.path(), false)
        .unwrap();

    assert_eq!(path, temp.path().join("field-notes.tsx"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), result.text());
}

#[test]
fn export_to_disk_refuses_to_overwrite() {
    let temp = tempfile::tempdir().unwrap();
    let service = GenerationService::default();
    let result = generate("Twice", PlatformCategory::Website, "angular");
    let fs = LocalFilesystem::new();

    service.export(&result, "angular", &fs, temp.path(), false).unwrap();
    let err = service
        .export(&result, "angular", &fs, temp.path(), false)
        .unwrap_err();
    assert!(err.suggestions().iter().any(|s| s.contains("--force")));

    assert!(service.export(&result, "angular", &fs, temp.path(), true).is_ok());
}

#[test]
fn export_to_memory_creates_nested_dirs() {
    let fs = MemoryFilesystem::new();
    let service = GenerationService::default();
    let result = generate("Desk", PlatformCategory::Desktop, "electron");

    let path = service
        .export(&result, "electron", &fs, Path::new("/out/apps"), false)
        .unwrap();

    assert_eq!(path, Path::new("/out/apps/desk.js"));
    assert_eq!(fs.read_file(&path).as_deref(), Some(result.text()));
}
