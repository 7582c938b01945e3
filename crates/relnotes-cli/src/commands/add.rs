use crate::cli::OutputFormat;
use crate::commands::common::{build_controller, parse_note_id, print_output, ResolvedSettings};
use crate::error::CliError;

pub async fn run_add(
    id: &str,
    settings: &ResolvedSettings,
    format: OutputFormat,
) -> Result<(), CliError> {
    let id = parse_note_id(id)?;

    let mut controller = build_controller(settings)?;
    controller.bootstrap().await?;
    controller.add_note(id).await?;
    print_output(&controller, format)
}
