use relnotes_core::util::normalize_text_option;

use crate::error::CliError;
use crate::profiles::ProfilesConfig;

pub fn run_config_show(config: &ProfilesConfig, profile_name: &str) -> Result<(), CliError> {
    let profile = config.profile(profile_name).cloned().unwrap_or_default();
    println!("profile: {profile_name}");
    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}

#[allow(clippy::struct_field_names)]
pub struct ConfigSetArgs {
    pub base_url: Option<String>,
    pub release: Option<String>,
    pub edit_url_base: Option<String>,
    pub bug_url_base: Option<String>,
}

pub fn run_config_set(
    config: &mut ProfilesConfig,
    profile_name: &str,
    args: ConfigSetArgs,
) -> Result<(), CliError> {
    let profile = config.profile_mut_or_default(profile_name);
    if let Some(value) = normalize_text_option(args.base_url) {
        profile.base_url = Some(value);
    }
    if let Some(value) = normalize_text_option(args.release) {
        profile.release = Some(value);
    }
    if let Some(value) = normalize_text_option(args.edit_url_base) {
        profile.edit_url_base = Some(value);
    }
    if let Some(value) = normalize_text_option(args.bug_url_base) {
        profile.bug_url_base = Some(value);
    }
    config.active_profile = Some(profile_name.to_string());

    let path = config.save()?;
    println!("Saved profile '{profile_name}' to {}", path.display());
    Ok(())
}
