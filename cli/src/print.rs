use colored::*;
use dipscan_core::{PortStatus, ProbeResult, ResolutionError, ResolvedAddress};

pub fn resolved(resolved: &[ResolvedAddress], failures: &[ResolutionError]) {
    let mut current = None;
    for address in resolved {
        if current != Some(&address.domain) {
            println!("domain: {}", address.domain);
            current = Some(&address.domain);
        }
        println!("-> ip: {}", address.ip);
    }
    for failure in failures {
        println!("domain: {} {}", failure.domain(), "unresolved".red().bold());
    }
}

pub fn waiting() {
    println!("{}", "checking ports, please, wait...".yellow().bold());
}

pub fn probe_result(result: &ProbeResult) {
    let status = match result.status {
        PortStatus::Open => result.status.to_string().green().bold(),
        PortStatus::Closed => result.status.to_string().red().bold(),
    };
    println!(
        "[{}] {}:{} is {}",
        result.domain, result.ip, result.port, status
    );
}

pub fn finished(output: &std::path::Path) {
    println!("report written to {}", output.display());
    println!("finished");
}
