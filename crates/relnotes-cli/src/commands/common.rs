//! Shared helpers for CLI commands.

use std::sync::Arc;

use relnotes_core::auth::AuthSession;
use relnotes_core::config::Endpoints;
use relnotes_core::markup::{MarkdownRenderer, MarkupPipeline, Passthrough};
use relnotes_core::remote::RemoteNoteStore;
use relnotes_core::sync::SyncController;
use relnotes_core::util::normalize_text_option;
use relnotes_core::NoteId;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::profiles::Profile;

/// Settings after merging flags, environment, and the active profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSettings {
    pub base_url: String,
    pub release: String,
    pub edit_url_base: Option<String>,
    pub bug_url_base: Option<String>,
}

/// Merge precedence: command-line flag, then environment, then profile.
pub fn resolve_settings(
    flag_base_url: Option<String>,
    flag_release: Option<String>,
    env_base_url: Option<String>,
    env_release: Option<String>,
    profile: Option<&Profile>,
) -> Result<ResolvedSettings, CliError> {
    let base_url = normalize_text_option(flag_base_url)
        .or_else(|| normalize_text_option(env_base_url))
        .or_else(|| profile.and_then(|p| normalize_text_option(p.base_url.clone())))
        .ok_or_else(|| {
            CliError::Config(
                "Base URL is not configured. Pass --base-url, set RELNOTES_BASE_URL, or run `relnotes config set --base-url <URL>`.".to_string(),
            )
        })?;

    let release = normalize_text_option(flag_release)
        .or_else(|| normalize_text_option(env_release))
        .or_else(|| profile.and_then(|p| normalize_text_option(p.release.clone())))
        .ok_or_else(|| {
            CliError::Config(
                "Release is not configured. Pass --release, set RELNOTES_RELEASE, or run `relnotes config set --release <ID_OR_URL>`.".to_string(),
            )
        })?;

    Ok(ResolvedSettings {
        base_url,
        release,
        edit_url_base: profile.and_then(|p| normalize_text_option(p.edit_url_base.clone())),
        bug_url_base: profile.and_then(|p| normalize_text_option(p.bug_url_base.clone())),
    })
}

pub fn build_endpoints(settings: &ResolvedSettings) -> Result<Endpoints, CliError> {
    let mut endpoints = Endpoints::new(&settings.base_url, &settings.release)?;
    if let Some(base) = &settings.edit_url_base {
        endpoints = endpoints.with_edit_url_base(base);
    }
    if let Some(base) = &settings.bug_url_base {
        endpoints = endpoints.with_bug_url_base(base);
    }
    Ok(endpoints)
}

/// Stand-in for the host page's markdown converter.
///
/// The terminal has no converter collaborator, so note bodies pass through
/// unconverted. The trust boundary stays in place: output still flows
/// through the sanitizer before injection.
pub struct VerbatimMarkdown;

impl MarkdownRenderer for VerbatimMarkdown {
    fn to_html(&self, source: &str) -> String {
        source.to_string()
    }
}

pub fn build_controller(settings: &ResolvedSettings) -> Result<SyncController, CliError> {
    let endpoints = build_endpoints(settings)?;
    let session = AuthSession::new(endpoints.auth_token_url())?;
    let store = RemoteNoteStore::new(session)?;
    let pipeline = MarkupPipeline::new(Arc::new(VerbatimMarkdown), Arc::new(Passthrough));
    Ok(SyncController::new(store, endpoints, pipeline))
}

pub fn parse_note_id(raw: &str) -> Result<NoteId, CliError> {
    raw.parse()
        .map_err(|_| CliError::InvalidNoteId(raw.to_string()))
}

pub fn render_output(controller: &SyncController, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Html => Ok(controller.table().to_html()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(controller.notes().as_slice())?),
    }
}

pub fn print_output(controller: &SyncController, format: OutputFormat) -> Result<(), CliError> {
    println!("{}", render_output(controller, format)?);
    Ok(())
}
