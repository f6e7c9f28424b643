use anyhow::Result;
use helixcourse_core::config::DEFAULT_LOG_FILTER;
use tracing_subscriber::{
    EnvFilter, filter::ParseError, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Parse `filter`, falling back to the default filter when it is invalid.
/// The parse error is returned alongside so the fallback can be reported.
fn parse_filter(filter: &str) -> (EnvFilter, Option<ParseError>) {
    match EnvFilter::try_new(filter) {
        Ok(env_filter) => (env_filter, None),
        Err(e) => (EnvFilter::new(DEFAULT_LOG_FILTER), Some(e)),
    }
}

/// Initialize the tracing subscriber. Logs go to stderr so they never mix
/// with command output.
pub fn init(filter: &str) -> Result<()> {
    let (env_filter, rejected) = parse_filter(filter);

    let fmt_layer = fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    if let Some(e) = rejected {
        tracing::warn!(
            filter,
            error = %e,
            "invalid log filter, falling back to {DEFAULT_LOG_FILTER}"
        );
    }

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "helixcourse starting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_filter_is_kept() {
        let (_, rejected) = parse_filter("helixcourse_core=debug");
        assert!(rejected.is_none());
    }

    #[test]
    fn invalid_filter_is_reported() {
        let (_, rejected) = parse_filter("helixcourse_core=loudest");
        assert!(rejected.is_some());
    }
}
