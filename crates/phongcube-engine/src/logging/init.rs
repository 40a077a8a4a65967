use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "phongcube_engine=debug,wgpu=warn").
///
/// `write_style` controls ANSI coloring behavior.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

/// Filter used when neither the config nor `RUST_LOG` provides one.
///
/// wgpu's internal crates are chatty at `info`.
pub const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// This function is idempotent; subsequent calls are ignored.
/// Intended usage is early in `main`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&resolve_filter(config.env_filter, std::env::var("RUST_LOG").ok()));
        builder.write_style(config.write_style);
        builder.init();

        log::debug!("logging initialized");
    });
}

/// Picks the active filter: explicit config, then `RUST_LOG`, then [`DEFAULT_FILTER`].
fn resolve_filter(explicit: Option<String>, env: Option<String>) -> String {
    explicit
        .filter(|f| !f.trim().is_empty())
        .or_else(|| env.filter(|f| !f.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_wins() {
        let f = resolve_filter(Some("debug".into()), Some("warn".into()));
        assert_eq!(f, "debug");
    }

    #[test]
    fn env_filter_is_second() {
        assert_eq!(resolve_filter(None, Some("warn".into())), "warn");
    }

    #[test]
    fn blank_values_fall_through() {
        assert_eq!(resolve_filter(Some("  ".into()), Some(String::new())), DEFAULT_FILTER);
    }

    #[test]
    fn default_filter_quiets_wgpu() {
        assert_eq!(resolve_filter(None, None), DEFAULT_FILTER);
        assert!(DEFAULT_FILTER.contains("wgpu_core=warn"));
    }
}
