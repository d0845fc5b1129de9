// argo-env: ArgoCD manifest environment editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for manifest reading, writing and editing.
//!
//! Uses the fixture manifest at `tests/fixtures/manifest.yaml`.

use argo_env::config::types::{ActionType, DeploymentStrategy, Lifecycle};
use argo_env::error::ManifestError;
use argo_env::manifest::Manifest;
use argo_env::manifest::edit::{EditOptions, delete_env, exists_env, get_env, put_env};
use argo_env::manifest::environment::{DeploymentSpec, EnvKey, Environment, ImageSpec};
use serde_json::json;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/manifest.yaml");

fn fixture() -> Manifest {
    Manifest::read(FIXTURE).expect("fixture should parse")
}

fn as_json(manifest: &Manifest) -> serde_json::Value {
    serde_json::from_str(&manifest.to_json()).expect("manifest should render as JSON")
}

// =============================================================================
// Reading
// =============================================================================

#[test]
fn manifest_read_fixture_as_strings() {
    let value = as_json(&fixture());

    assert_eq!(value["application"]["health"]["port"], json!("5000"));
    assert_eq!(value["ingress"]["enabled"], json!("true"));
    assert_eq!(value["ingress"]["environments"]["dev"]["acm"], json!(["1", "2"]));
    assert_eq!(value["deployment"]["canary"]["maxUnavailable"], json!("0"));
    assert_eq!(
        value["deployment"]["canary"]["steps"],
        json!([
            {"setWeight": "10"},
            {"pause": {"duration": "1h"}},
            {"setWeight": "20"},
            {"pause": {}}
        ])
    );
    assert_eq!(
        value["deployment"]["blue_green"],
        json!({"activeService": null, "previewService": null, "autoPromotionEnabled": "true"})
    );
    assert_eq!(
        value["environments"],
        json!([{
            "env": "dev",
            "lifecycle": "temporary",
            "key": "183",
            "action_type": "pull_request",
            "action_labels": {"worker_number": "", "commit_message": "", "commit_sha": ""},
            "image": {"tag": "IMAGE_TAG"},
            "deployment": {"strategy": "blue_green"}
        }])
    );
}

#[test]
fn manifest_read_missing_file() {
    let err = Manifest::read("/nonexistent/argo-env/manifest.yaml").unwrap_err();
    assert!(matches!(err, ManifestError::Read { .. }));
}

#[test]
fn manifest_read_empty_file() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("empty.yaml");
    std::fs::write(&path, "\n").unwrap();

    let err = Manifest::read(&path).unwrap_err();
    assert!(err.to_string().contains("document is empty"), "{err}");
}

#[test]
fn manifest_write_then_read_round_trip() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("out.yaml");

    let original = fixture();
    original.write(&path).unwrap();
    let reread = Manifest::read(&path).unwrap();

    assert_eq!(reread, original);
    assert_eq!(as_json(&reread), as_json(&original));
}

#[test]
fn manifest_write_keeps_key_order() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("out.yaml");
    fixture().write(&path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    let top_level: Vec<&str> = written
        .lines()
        .filter(|line| !line.starts_with([' ', '-']) && line.contains(':'))
        .filter_map(|line| line.split(':').next())
        .collect();
    assert_eq!(
        top_level,
        [
            "name",
            "description",
            "repository",
            "image",
            "destination",
            "deployment",
            "application",
            "ingress",
            "environments"
        ]
    );
}

// =============================================================================
// Editing
// =============================================================================

fn candidate(key: &str, tag: &str) -> Environment {
    Environment::builder()
        .env("dev")
        .key(key)
        .action_type(ActionType::Push)
        .image(ImageSpec {
            tag: tag.to_string(),
        })
        .deployment(DeploymentSpec {
            strategy: DeploymentStrategy::Canary,
        })
        .build()
}

#[test]
fn manifest_put_then_delete_restores_list() {
    let original = fixture();
    let options = EditOptions::default();

    let added = put_env(&candidate("184", "v2"), &original, &options).unwrap();
    assert_eq!(added.environments().len(), 2);
    assert!(exists_env("dev", "184", &added));

    let removed = delete_env(&EnvKey::new("dev", "184"), &added, &options).unwrap();
    assert_eq!(removed, original);
}

#[test]
fn manifest_put_update_leaves_other_sections() {
    let original = fixture();
    let updated = put_env(&candidate("183", "v3"), &original, &EditOptions::default()).unwrap();

    let before = as_json(&original);
    let after = as_json(&updated);
    for section in ["name", "destination", "deployment", "application", "ingress"] {
        assert_eq!(after[section], before[section], "{section} changed");
    }
    assert_eq!(after["environments"][0]["image"]["tag"], json!("v3"));
    assert_eq!(after["environments"][0]["deployment"]["strategy"], json!("canary"));
}

#[test]
fn manifest_put_numeric_key_matches_string_key() {
    let original = fixture();
    let options = EditOptions {
        enable_update: false,
        enable_permanent_protection: true,
    };
    let err = put_env(&candidate("183", "v3"), &original, &options).unwrap_err();
    assert!(matches!(err, ManifestError::AlreadyExists { .. }));
}

#[test]
fn manifest_delete_protected_then_unprotected() {
    let permanent = Environment::builder()
        .env("prod")
        .key("main")
        .lifecycle(Lifecycle::Permanent)
        .action_type(ActionType::Push)
        .build();
    let manifest = put_env(&permanent, &fixture(), &EditOptions::default()).unwrap();
    let target = permanent.id();

    let err = delete_env(&target, &manifest, &EditOptions::default()).unwrap_err();
    assert!(matches!(err, ManifestError::Protected { .. }));
    assert!(get_env("prod", "main", &manifest).is_ok());

    let unprotected = EditOptions {
        enable_update: true,
        enable_permanent_protection: false,
    };
    let result = delete_env(&target, &manifest, &unprotected).unwrap();
    assert!(!exists_env("prod", "main", &result));
}
