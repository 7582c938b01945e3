use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use pretty_assertions::assert_eq;

use crate::commands::common::{
    build_controller, build_endpoints, parse_note_id, render_output, resolve_settings,
    ResolvedSettings,
};
use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::profiles::{normalize_profile_name, Profile, ProfilesConfig};

fn profile() -> Profile {
    Profile {
        base_url: Some("https://profile.example.com/rna".to_string()),
        release: Some("7".to_string()),
        edit_url_base: None,
        bug_url_base: None,
    }
}

#[test]
fn resolve_settings_prefers_flags_over_env_and_profile() {
    let profile = profile();
    let settings = resolve_settings(
        Some("https://flag.example.com/rna".to_string()),
        Some("9".to_string()),
        Some("https://env.example.com/rna".to_string()),
        Some("8".to_string()),
        Some(&profile),
    )
    .unwrap();

    assert_eq!(settings.base_url, "https://flag.example.com/rna");
    assert_eq!(settings.release, "9");
}

#[test]
fn resolve_settings_falls_back_to_env_then_profile() {
    let profile = profile();
    let settings = resolve_settings(
        None,
        None,
        Some("https://env.example.com/rna".to_string()),
        None,
        Some(&profile),
    )
    .unwrap();

    assert_eq!(settings.base_url, "https://env.example.com/rna");
    assert_eq!(settings.release, "7");
}

#[test]
fn resolve_settings_requires_base_url_and_release() {
    let error = resolve_settings(None, None, None, None, None).unwrap_err();
    assert!(matches!(error, CliError::Config(_)));

    let error = resolve_settings(
        Some("https://flag.example.com/rna".to_string()),
        None,
        None,
        None,
        None,
    )
    .unwrap_err();
    assert!(matches!(error, CliError::Config(_)));
}

#[test]
fn parse_note_id_accepts_digits_only() {
    assert_eq!(parse_note_id("42").unwrap().as_i64(), 42);
    assert!(matches!(
        parse_note_id("note-42"),
        Err(CliError::InvalidNoteId(_))
    ));
}

#[test]
fn build_endpoints_applies_profile_overrides() {
    let settings = ResolvedSettings {
        base_url: "https://example.com/rna".to_string(),
        release: "7".to_string(),
        edit_url_base: Some("/admin/notes/".to_string()),
        bug_url_base: Some("https://bugs.example.com/".to_string()),
    };

    let endpoints = build_endpoints(&settings).unwrap();
    assert_eq!(
        endpoints.edit_url(relnotes_core::NoteId::new(5)),
        "/admin/notes/5/"
    );
    assert_eq!(endpoints.bug_url(9), "https://bugs.example.com/9");
}

#[test]
fn render_output_of_fresh_controller_is_an_empty_table() {
    let settings = ResolvedSettings {
        base_url: "https://example.com/rna".to_string(),
        release: "7".to_string(),
        edit_url_base: None,
        bug_url_base: None,
    };

    let controller = build_controller(&settings).unwrap();
    let html = render_output(&controller, OutputFormat::Html).unwrap();
    assert!(html.contains("<table"));
    assert!(!html.contains("<th>"));

    let json = render_output(&controller, OutputFormat::Json).unwrap();
    assert_eq!(json, "[]");
}

#[test]
fn normalize_profile_name_rejects_empty() {
    assert_eq!(normalize_profile_name(None), None);
    assert_eq!(normalize_profile_name(Some(" ")), None);
    assert_eq!(normalize_profile_name(Some(" work ")), Some("work".to_string()));
}

#[test]
fn resolve_profile_name_prefers_explicit_then_env_then_active() {
    let config = ProfilesConfig {
        version: 1,
        active_profile: Some("work".to_string()),
        profiles: BTreeMap::new(),
    };
    assert_eq!(config.resolve_profile_name(Some("staging"), Some("env")), "staging");
    assert_eq!(config.resolve_profile_name(None, Some("env")), "env");
    assert_eq!(config.resolve_profile_name(None, None), "work");

    let empty = ProfilesConfig::default();
    assert_eq!(empty.resolve_profile_name(None, None), "default");
}

#[test]
fn profiles_config_roundtrip_normalizes_values() {
    let path = std::env::temp_dir().join(format!(
        "relnotes-cli-config-test-{}.json",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |duration| duration.as_nanos())
    ));

    let mut config = ProfilesConfig {
        version: 1,
        active_profile: Some("default".to_string()),
        profiles: BTreeMap::new(),
    };
    config.profiles.insert(
        "default".to_string(),
        Profile {
            base_url: Some(" https://example.com/rna ".to_string()),
            release: Some(" 7 ".to_string()),
            edit_url_base: None,
            bug_url_base: Some("   ".to_string()),
        },
    );

    config.save_to_path(&path).unwrap();
    let loaded = ProfilesConfig::load_from_path(&path).unwrap();
    let profile = loaded.profiles.get("default").unwrap();
    assert_eq!(profile.base_url.as_deref(), Some("https://example.com/rna"));
    assert_eq!(profile.release.as_deref(), Some("7"));
    assert_eq!(profile.bug_url_base, None);

    let _ = std::fs::remove_file(path);
}

#[test]
fn missing_config_file_loads_defaults() {
    let path = std::env::temp_dir().join("relnotes-cli-config-missing.json");
    let _ = std::fs::remove_file(&path);

    let loaded = ProfilesConfig::load_from_path(&path).unwrap();
    assert_eq!(loaded, ProfilesConfig::default());
}
