//! Capabilities command - list resource kinds a map server supports.

use tilefetch::ngw::Connection;

use super::common::GlobalArgs;
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the capabilities command.
pub struct CapabilitiesArgs {
    pub url: String,
    pub login: String,
    pub password: String,
}

/// Run the capabilities command.
pub fn run(global: &GlobalArgs, args: CapabilitiesArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(global)?;
    runner.log_startup("capabilities");

    let mut connection = Connection::new(
        "cli",
        args.login,
        args.password,
        &args.url,
        &runner.config().http_config(),
    )?;
    connection.connect()?;

    println!("Connected to {}", connection.url());
    let kinds = connection.supported_kinds();
    if kinds.is_empty() {
        println!("  Server did not describe its resources; all kinds assumed supported");
        return Ok(());
    }

    for kind in kinds {
        println!("  {:<20} (0x{:04x})", kind.name(), kind.bits());
    }
    Ok(())
}
