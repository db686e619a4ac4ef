use tracing::{subscriber::SetGlobalDefaultError, Level};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter, FmtSubscriber};

/// Set up the tracing module.  With `verbose` set this dumps out detailed
/// traces of the exact code path, including why each probe was classified
/// closed.  Otherwise the filter comes from `RUST_LOG` and falls back to
/// warnings only, which is enough to see skipped domains.
pub fn setup_tracing(verbose: bool) -> Result<(), SetGlobalDefaultError> {
    let builder = FmtSubscriber::builder().with_writer(std::io::stderr);
    if verbose {
        let subscriber = builder
            .with_max_level(Level::TRACE)
            .with_span_events(FmtSpan::FULL)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let subscriber = builder.with_env_filter(filter).finish();
        tracing::subscriber::set_global_default(subscriber)
    }
}
