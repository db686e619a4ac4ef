use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use dipscan_core::{parse_domain_list, DomainName, ReportTable};

pub fn read_domains(path: &Path) -> anyhow::Result<Vec<DomainName>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read domain list {}", path.display()))?;
    Ok(parse_domain_list(&text))
}

/// Replaces whatever was at `path` with the report.
pub fn write_report(path: &Path, table: &ReportTable) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create report {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    table
        .write_csv(&mut writer)
        .with_context(|| format!("failed to write report {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("failed to write report {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{fs, net::Ipv4Addr, path::PathBuf, process};

    use dipscan_core::{PortStatus, ProbeResult, ReportTable};

    use super::{read_domains, write_report};

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("dipscan-{}-{}", process::id(), name))
    }

    #[test]
    fn reads_domains_from_file() {
        let path = scratch_path("domains.txt");
        fs::write(&path, "example.com\r\n\r\n  example.org \n").unwrap();
        let domains = read_domains(&path).unwrap();
        fs::remove_file(&path).unwrap();
        let domains: Vec<String> = domains.iter().map(|domain| domain.to_string()).collect();
        assert_eq!(domains, vec!["example.com", "example.org"]);
    }

    #[test]
    fn missing_input_is_an_error() {
        let path = scratch_path("does-not-exist.txt");
        let err = read_domains(&path).unwrap_err();
        assert!(err.to_string().contains("failed to read domain list"));
    }

    #[test]
    fn report_overwrites_previous_file() {
        let path = scratch_path("net_data.csv");
        fs::write(&path, "stale contents that are much longer than the report\n").unwrap();
        let results = vec![ProbeResult {
            domain: "example.com".parse().unwrap(),
            ip: Ipv4Addr::new(93, 184, 216, 34),
            port: 80,
            status: PortStatus::Open,
        }];
        let table = ReportTable::build(&results, &[80, 443]);
        write_report(&path, &table).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(
            written,
            "\"DomainName\",\"IP\",\":80\",\":443\"\r\n\"example.com\",\"93.184.216.34\",\"OK\",\"-\"\r\n"
        );
    }

    #[test]
    fn unwritable_output_is_an_error() {
        let path = scratch_path("no-such-dir").join("net_data.csv");
        let table = ReportTable::build(&[], &[80]);
        assert!(write_report(&path, &table).is_err());
    }
}
