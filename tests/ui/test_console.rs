// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tests for the terminal collaborator implementations

use safegen::imagen::GeneratedImage;
use safegen::ui::{
    ConsoleControlGate, ControlGate, CredentialStore, EnvCredentialStore, FileImageSink, ImageSink,
};

fn png(bytes_base64: &str) -> GeneratedImage {
    GeneratedImage {
        mime_type: "image/png".to_string(),
        bytes_base64: bytes_base64.to_string(),
    }
}

#[test]
fn test_file_sink_writes_one_file_per_image() {
    let dir = tempfile::tempdir().unwrap();
    let sink = FileImageSink::new(dir.path().to_path_buf());

    sink.render(&[png("aGVsbG8="), png("d29ybGQ=")]).unwrap();

    let first = std::fs::read(dir.path().join("image-1.png")).unwrap();
    let second = std::fs::read(dir.path().join("image-2.png")).unwrap();
    assert_eq!(first, b"hello");
    assert_eq!(second, b"world");
}

#[test]
fn test_file_sink_extension_follows_mime_type() {
    let dir = tempfile::tempdir().unwrap();
    let sink = FileImageSink::new(dir.path().to_path_buf());

    sink.render(&[GeneratedImage {
        mime_type: "image/jpeg".to_string(),
        bytes_base64: "aGVsbG8=".to_string(),
    }])
    .unwrap();

    assert!(dir.path().join("image-1.jpg").exists());
}

#[test]
fn test_file_sink_clears_previous_render() {
    let dir = tempfile::tempdir().unwrap();
    let sink = FileImageSink::new(dir.path().to_path_buf());

    sink.render(&[png("aGVsbG8="), png("d29ybGQ=")]).unwrap();
    sink.render(&[png("bmV3")]).unwrap();

    assert!(dir.path().join("image-1.png").exists());
    assert!(
        !dir.path().join("image-2.png").exists(),
        "stale render must be removed"
    );
}

#[test]
fn test_file_sink_rejects_invalid_base64() {
    let dir = tempfile::tempdir().unwrap();
    let sink = FileImageSink::new(dir.path().to_path_buf());

    let result = sink.render(&[png("not base64!!!")]);
    assert!(result.is_err());
}

#[test]
fn test_credential_override_takes_precedence() {
    let store = EnvCredentialStore::new();
    store.set_api_key("session-key");
    assert_eq!(store.api_key().as_deref(), Some("session-key"));
}

#[test]
fn test_console_gate_tracks_disabled_state() {
    let gate = ConsoleControlGate::default();
    assert!(!gate.is_disabled());
    gate.set_disabled(true);
    assert!(gate.is_disabled());
    gate.set_disabled(false);
    assert!(!gate.is_disabled());
}
