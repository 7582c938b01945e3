use crate::cli::OutputFormat;
use crate::commands::common::{build_controller, print_output, ResolvedSettings};
use crate::error::CliError;

pub async fn run_show(settings: &ResolvedSettings, format: OutputFormat) -> Result<(), CliError> {
    let mut controller = build_controller(settings)?;
    controller.bootstrap().await?;
    print_output(&controller, format)
}
