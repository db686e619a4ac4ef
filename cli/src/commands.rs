use std::{path::PathBuf, time::Duration};

use clap::Parser;
use dipscan_core::{ConfigBuilder, DomainName, DEFAULT_PORTS, DEFAULT_TIMEOUT};

#[derive(Parser, Debug)]
#[command(name = "dipscan")]
#[command(about = "Resolve a list of domains and check which ports answer on each address.")]
pub struct CommandLine {
    /// File with one domain name per line
    #[arg(short, long, default_value = "domains.txt")]
    pub input: PathBuf,

    /// Where to write the CSV report.  Overwritten on every run
    #[arg(short, long, default_value = "net_data.csv")]
    pub output: PathBuf,

    /// Ports to probe, comma separated.  The order is the column order
    #[arg(short, long, value_delimiter = ',', default_values_t = DEFAULT_PORTS)]
    pub ports: Vec<u16>,

    /// Connection timeout per probe in milliseconds
    #[arg(short, long = "timeout-ms", default_value_t = DEFAULT_TIMEOUT.as_millis() as u64)]
    pub timeout_ms: u64,

    /// Dump detailed traces, including why each port was closed
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self, domains: Vec<DomainName>) -> ConfigBuilder {
        let mut config = ConfigBuilder::default();
        config.set_domains(domains);
        config.set_port_list(self.ports.clone());
        config.set_timeout(Duration::from_millis(self.timeout_ms));
        config.set_tracing(self.verbose);
        config
    }
}
