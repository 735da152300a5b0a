use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global subscriber. Logs go to stderr so stdout carries only
/// countdown output.
pub fn init(configured: Option<&str>) {
    let from_env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let env_filter = build_filter(from_env.as_deref(), configured);

    let initialized = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(env_filter)
        .try_init();

    if initialized.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// `RUST_LOG` wins over the configured directive; without either, or when
/// both fail to parse, only warnings are shown.
pub fn build_filter(from_env: Option<&str>, configured: Option<&str>) -> EnvFilter {
    from_env
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .or_else(|| configured.and_then(|directive| EnvFilter::try_new(directive).ok()))
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_env_directive_wins() {
        let filter = build_filter(Some("debug"), Some("error"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_configured_directive_used_without_env() {
        let filter = build_filter(None, Some("info"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_invalid_env_falls_back_to_configured() {
        let filter = build_filter(Some("potion_timer=loud"), Some("error"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::ERROR));
    }

    #[test]
    fn test_defaults_to_warn() {
        assert_eq!(
            build_filter(None, None).max_level_hint(),
            Some(LevelFilter::WARN)
        );
        assert_eq!(
            build_filter(None, Some("potion_timer=verbose")).max_level_hint(),
            Some(LevelFilter::WARN)
        );
    }
}
