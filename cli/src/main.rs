mod commands;
mod files;
mod print;

use commands::CommandLine;
use dipscan_core::{setup_tracing, start_scan, SystemResolver};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    let domains = files::read_domains(&commands.input)?;
    let config = commands.to_config(domains);
    setup_tracing(config.tracing())?;

    let scan = start_scan(config, &SystemResolver).await;
    print::resolved(&scan.resolved, &scan.failures);

    print::waiting();
    let outcome = scan.probe().await;
    for result in &outcome.results {
        print::probe_result(result);
    }

    files::write_report(&commands.output, &outcome.report())?;
    print::finished(&commands.output);
    Ok(())
}
