//! Template command - show how a URL template will be used.

use tilefetch::budget::ThreadBudget;
use tilefetch::coord::TileCoord;
use tilefetch::template::UrlTemplate;

use super::common::{load_config, GlobalArgs, LayerArgs, TileSpec};
use crate::error::CliError;

/// Run the template command.
pub fn run(
    global: &GlobalArgs,
    layer: LayerArgs,
    sample: Option<TileSpec>,
) -> Result<(), CliError> {
    let config = load_config(global)?;
    let template = UrlTemplate::parse(layer.resolve_url(&config)?);
    let sample = sample.map(|s| s.0).unwrap_or(TileCoord::new(1, 0, 0));

    for line in describe(&template, &sample) {
        println!("{}", line);
    }
    Ok(())
}

/// Report lines for `template`, with one sample URL per subdomain.
///
/// Builds sample URLs through the rotation cursor, so the template should
/// be a fresh one.
pub fn describe(template: &UrlTemplate, sample: &TileCoord) -> Vec<String> {
    let budget = ThreadBudget::new(template.subdomain_count());
    let mut lines = vec![format!("Template:   {}", template.as_str())];

    if template.subdomain_count() == 0 {
        lines.push("Subdomains: (none)".to_string());
    } else {
        lines.push(format!("Subdomains: {}", template.subdomains().join(", ")));
        lines.push(format!("Mask:       {}", template.mask()));
    }
    lines.push(format!("Workers:    {}", budget.max_concurrent_fetches()));
    lines.push(format!("Sample {}:", sample));

    for _ in 0..template.subdomain_count().max(1) {
        lines.push(format!("  {}", template.url_for(sample)));
    }
    lines
}
