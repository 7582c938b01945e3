use relnotes_core::table::remove_control_name;

use crate::cli::OutputFormat;
use crate::commands::common::{build_controller, parse_note_id, print_output, ResolvedSettings};
use crate::error::CliError;

pub async fn run_remove(
    id: &str,
    settings: &ResolvedSettings,
    format: OutputFormat,
) -> Result<(), CliError> {
    let id = parse_note_id(id)?;

    let mut controller = build_controller(settings)?;
    controller.bootstrap().await?;
    // Go through the rendered control, the same path a row's button takes.
    controller.remove_note(&remove_control_name(id)).await?;
    print_output(&controller, format)
}
