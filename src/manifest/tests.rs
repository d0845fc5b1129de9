// argo-env: ArgoCD manifest environment editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::Manifest;
use super::edit::{EditOptions, delete_env, exists_env, get_env, get_env_index_of, put_env};
use super::environment::{EnvKey, Environment, ImageSpec};
use crate::config::types::{ActionType, Lifecycle};
use crate::error::ManifestError;
use serde_yaml::Value;

fn manifest(yaml: &str) -> Manifest {
    Manifest::parse(yaml, "<test>").expect("test manifest should parse")
}

fn ids(manifest: &Manifest) -> Vec<(String, String)> {
    manifest
        .environments()
        .iter()
        .map(|e| {
            (
                e["env"].as_str().unwrap_or_default().to_string(),
                e["key"].as_str().unwrap_or_default().to_string(),
            )
        })
        .collect()
}

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(env, key)| ((*env).to_string(), (*key).to_string()))
        .collect()
}

const fn options(enable_update: bool, enable_permanent_protection: bool) -> EditOptions {
    EditOptions {
        enable_update,
        enable_permanent_protection,
    }
}

const COLLECTION: &str = r"
environments:
  - { env: dev, key: unknown_key }
  - { env: stage, key: randomn }
  - { env: stage, key: u_key_1 }
  - { env: dev, key: u_key_1 }
  - { env: prod, key: u_key_1 }
";

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn test_parse_coerces_scalars_to_strings() {
    let m = manifest(
        r"
name: api
replicas: 3
enabled: true
ratio: 0.5
activeService:
environments:
  - { env: dev, key: 183 }
",
    );

    let root = m.as_mapping();
    assert_eq!(root.get("replicas"), Some(&Value::String("3".into())));
    assert_eq!(root.get("enabled"), Some(&Value::String("true".into())));
    assert_eq!(root.get("ratio"), Some(&Value::String("0.5".into())));
    assert_eq!(root.get("activeService"), Some(&Value::Null));
    assert!(exists_env("dev", "183", &m));
}

#[test]
fn test_parse_keeps_scalar_source_text() {
    let m = manifest(
        r"
image: { tag: 1.10 }
sha: 1234e5
mode: 010
big: 123456789012345678901234
huge: 1234567890123456789012345678901234567890123
marker: ~
flag: yes
environments:
  - { env: dev, key: 1.20 }
",
    );

    let root = m.as_mapping();
    let text = |name: &str| root.get(name).and_then(Value::as_str).map(str::to_string);
    let tag = root.get("image").and_then(|image| image.get("tag"));
    assert_eq!(tag.and_then(Value::as_str), Some("1.10"));
    assert_eq!(text("sha").as_deref(), Some("1234e5"));
    assert_eq!(text("mode").as_deref(), Some("010"));
    assert_eq!(text("big").as_deref(), Some("123456789012345678901234"));
    assert_eq!(
        text("huge").as_deref(),
        Some("1234567890123456789012345678901234567890123")
    );
    assert_eq!(text("marker").as_deref(), Some("~"));
    assert_eq!(text("flag").as_deref(), Some("yes"));

    assert!(exists_env("dev", "1.20", &m));
    assert!(!exists_env("dev", "1.2", &m));
    assert_eq!(manifest(&m.to_yaml().unwrap()), m);
}

#[test]
fn test_edits_match_key_by_source_text() {
    let m = manifest("environments:\n  - { env: dev, key: 1.20, lifecycle: temporary }\n");

    let replaced = put_env(&candidate("dev", "1.20", "v2"), &m, &options(true, true)).unwrap();
    assert_eq!(ids(&replaced), pairs(&[("dev", "1.20")]));
    assert_eq!(replaced.environments()[0]["image"]["tag"].as_str(), Some("v2"));

    let err = put_env(&candidate("dev", "1.20", "v2"), &m, &options(false, true)).unwrap_err();
    assert!(matches!(err, ManifestError::AlreadyExists { .. }));

    let removed = delete_env(&EnvKey::new("dev", "1.20"), &m, &options(true, true)).unwrap();
    assert!(removed.environments().is_empty());
}

#[test]
fn test_parse_rejects_unusable_documents() {
    let cases = [
        ("", "empty"),
        ("# only a comment\n", ""),
        ("- a\n- b\n", "not a mapping"),
        ("environments: nope\n", "not a sequence"),
        ("environments: ~\n", "not a sequence"),
        ("name: a\nname: b\n", "duplicated mapping key name"),
        ("name: !custom api\n", "custom tag"),
        ("name: [unclosed\n", ""),
    ];

    for (content, fragment) in cases {
        let err = Manifest::parse(content, "manifest.yaml").unwrap_err();
        assert!(
            matches!(err, ManifestError::Read { ref path, .. } if path == "manifest.yaml"),
            "{content:?} gave {err:?}"
        );
        assert!(err.to_string().contains(fragment), "{content:?} gave {err}");
    }
}

#[test]
fn test_missing_or_null_environments_is_empty() {
    assert!(manifest("name: api\n").environments().is_empty());
    assert!(manifest("environments:\n").environments().is_empty());
}

#[test]
fn test_yaml_round_trip_preserves_key_order() {
    let m = manifest(
        r"
name: api
destination:
  namespace: api
  clusters:
    prod: { name: Production, cluster: eks-prod }
    dev: { name: Development, cluster: eks-dev }
environments:
  - { env: dev, key: 1 }
",
    );

    let reparsed = manifest(&m.to_yaml().unwrap());
    assert_eq!(reparsed, m);

    let keys: Vec<_> = reparsed
        .as_mapping()
        .keys()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(keys, ["name", "destination", "environments"]);

    let clusters: Vec<_> = reparsed.as_mapping().get("destination").unwrap()["clusters"]
        .as_mapping()
        .unwrap()
        .keys()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(clusters, ["prod", "dev"]);
}

// =============================================================================
// Lookups
// =============================================================================

#[test]
fn test_get_env_single_item() {
    let m = manifest("environments:\n  - { env: dev, key: my_key1 }\n");
    let entry = get_env("dev", "my_key1", &m).unwrap();
    assert_eq!(entry["env"], Value::String("dev".into()));
    assert_eq!(entry["key"], Value::String("my_key1".into()));
}

#[test]
fn test_get_env_in_collection_needs_both_fields() {
    let m = manifest(COLLECTION);
    assert_eq!(get_env_index_of("dev", "u_key_1", &m), Some(3));
    let entry = get_env("dev", "u_key_1", &m).unwrap();
    assert_eq!(entry["env"].as_str(), Some("dev"));
    assert_eq!(entry["key"].as_str(), Some("u_key_1"));
}

#[test]
fn test_lookup_of_absent_key() {
    let m = manifest(
        r"
environments:
  - { env: dev, key: a }
  - { env: dev, key: b }
  - { env: prod, key: unknown }
",
    );

    assert!(!exists_env("dev", "unknown", &m));
    assert_eq!(get_env_index_of("dev", "unknown", &m), None);
    let err = get_env("dev", "unknown", &m).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"environment dev - unknown does not exist");
}

#[test]
fn test_non_mapping_entries_never_match() {
    let m = manifest("environments:\n  - dev\n  - [dev, 1]\n  - { env: dev }\n");
    assert!(!exists_env("dev", "1", &m));
    assert!(!exists_env("dev", "", &m));
}

// =============================================================================
// put_env
// =============================================================================

fn candidate(env: &str, key: &str, tag: &str) -> Environment {
    Environment::builder()
        .env(env)
        .key(key)
        .action_type(ActionType::Push)
        .image(ImageSpec {
            tag: tag.to_string(),
        })
        .build()
}

#[test]
fn test_put_creates_item_in_empty_list() {
    let m = manifest("environments: []\n");
    let result = put_env(&candidate("dev", "1", "v1"), &m, &options(false, false)).unwrap();

    assert_eq!(ids(&result), pairs(&[("dev", "1")]));
    assert!(m.environments().is_empty(), "input must stay untouched");
}

#[test]
fn test_put_creates_missing_environments_field() {
    let m = manifest("name: api\n");
    let result = put_env(&candidate("dev", "1", "v1"), &m, &options(false, false)).unwrap();

    let keys: Vec<_> = result
        .as_mapping()
        .keys()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(keys, ["name", "environments"]);
    assert_eq!(result.environments().len(), 1);

    let m = manifest("environments:\nname: api\n");
    let result = put_env(&candidate("dev", "1", "v1"), &m, &options(false, false)).unwrap();
    let keys: Vec<_> = result
        .as_mapping()
        .keys()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(keys, ["environments", "name"]);
}

#[test]
fn test_put_appends_item() {
    let m = manifest(
        r"
environments:
  - { env: prod, action_type: pull_request, key: 1 }
  - { env: dev, action_type: push, key: 0 }
",
    );
    let result = put_env(&candidate("dev", "1", "v1"), &m, &options(false, false)).unwrap();

    assert_eq!(
        ids(&result),
        pairs(&[("prod", "1"), ("dev", "0"), ("dev", "1")])
    );
    assert_eq!(result.environments()[..2], m.environments()[..]);
}

#[test]
fn test_put_then_get_returns_candidate() {
    let m = manifest(COLLECTION);
    let put = Environment::builder()
        .env("qa")
        .key("42")
        .lifecycle(Lifecycle::Permanent)
        .action_type(ActionType::PullRequest)
        .build();

    let result = put_env(&put, &m, &EditOptions::default()).unwrap();
    let stored = get_env("qa", "42", &result).unwrap();
    assert_eq!(*stored, put.to_value().unwrap());

    let back: Environment = serde_yaml::from_value(stored.clone()).unwrap();
    assert_eq!(back, put);
}

#[test]
fn test_put_writes_fields_in_entry_order() {
    let m = manifest("environments: []\n");
    let result = put_env(&candidate("dev", "1", "v1"), &m, &options(false, false)).unwrap();

    let fields: Vec<_> = result.environments()[0]
        .as_mapping()
        .unwrap()
        .keys()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(
        fields,
        [
            "env",
            "key",
            "lifecycle",
            "action_type",
            "action_labels",
            "image",
            "deployment"
        ]
    );
}

#[test]
fn test_put_updates_item_in_place() {
    let m = manifest(
        r"
environments:
  - { env: prod, action_type: pull_request, key: 1 }
  - { env: dev, action_type: push, image: { tag: BEFORE }, key: 1 }
  - { env: dev, action_type: push, key: 2 }
  - { env: stage, action_type: pull_request, key: 1 }
",
    );
    let result = put_env(&candidate("dev", "1", "UPDATE_TO"), &m, &options(true, false)).unwrap();

    assert_eq!(ids(&result), ids(&m));
    assert_eq!(
        result.environments()[1]["image"]["tag"].as_str(),
        Some("UPDATE_TO")
    );
    for index in [0, 2, 3] {
        assert_eq!(result.environments()[index], m.environments()[index]);
    }
    assert_eq!(m.environments()[1]["image"]["tag"].as_str(), Some("BEFORE"));
}

#[test]
fn test_put_existing_without_update_fails() {
    let m = manifest("environments:\n  - { env: prod, action_type: pull_request, key: 1 }\n");
    let before = m.clone();

    let err = put_env(&candidate("prod", "1", "v2"), &m, &options(false, false)).unwrap_err();
    assert!(matches!(err, ManifestError::AlreadyExists { .. }));
    insta::assert_snapshot!(err.to_string(), @"environment prod - 1 already exists");
    assert_eq!(m, before);
}

// =============================================================================
// delete_env
// =============================================================================

#[test]
fn test_delete_single_item_to_empty_collection() {
    let m = manifest("environments:\n  - { env: dev, lifecycle: temporary, key: 1 }\n");
    let result = delete_env(&EnvKey::new("dev", "1"), &m, &options(false, true)).unwrap();

    assert_eq!(result, manifest("environments: []\n"));
    assert_eq!(m.environments().len(), 1);
}

#[test]
fn test_delete_removes_first_match_only() {
    let m = manifest(
        r"
environments:
  - { env: prod, lifecycle: temporary, key: 2 }
  - { env: dev, lifecycle: temporary, key: 1 }
  - { env: dev, lifecycle: temporary, key: 2 }
  - { env: dev, lifecycle: temporary, key: 1 }
",
    );
    let result = delete_env(&EnvKey::new("dev", "2"), &m, &options(true, true)).unwrap();

    assert_eq!(result.environments().len(), m.environments().len() - 1);
    assert_eq!(
        ids(&result),
        pairs(&[("prod", "2"), ("dev", "1"), ("dev", "1")])
    );
}

#[test]
fn test_delete_absent_fails() {
    let m = manifest(COLLECTION);
    let err = delete_env(&EnvKey::new("dev", "nope"), &m, &options(true, true)).unwrap_err();
    assert!(matches!(err, ManifestError::NotFound { .. }));
}

#[test]
fn test_delete_protected_permanent_fails() {
    let m = manifest(
        r"
environments:
  - { env: prod, lifecycle: temporary, key: 2 }
  - { env: dev, lifecycle: permanent, key: 2 }
",
    );
    let before = m.clone();

    let err = delete_env(&EnvKey::new("dev", "2"), &m, &options(true, true)).unwrap_err();
    assert!(matches!(err, ManifestError::Protected { .. }));
    assert_eq!(m, before);

    let result = delete_env(&EnvKey::new("dev", "2"), &m, &options(true, false)).unwrap();
    assert_eq!(ids(&result), pairs(&[("prod", "2")]));
}

#[test]
fn test_edit_options_display() {
    insta::assert_snapshot!(EditOptions::default().to_string(), @"ENABLE_UPDATE / ENABLE_PER_PROTECT");
    insta::assert_snapshot!(options(false, false).to_string(), @"DISABLE_UPDATE / DISABLE_PER_PROTECT");
}
