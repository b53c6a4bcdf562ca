//! Logging setup and structured log helpers.
//!
//! Logging goes to stderr via env_logger so result blobs on stdout stay
//! machine-consumable. `RUST_LOG` overrides the default info filter.

use anyhow::Result;
use log::Level;
use std::sync::Once;

static INIT: Once = Once::new();

/// Log message with optional key-value context.
pub struct LogMessage {
    pub message: String,

    /// The module where the log originated.
    pub module: &'static str,

    /// Optional key-value pairs of additional context.
    pub context: Option<Vec<(&'static str, String)>>,
}

/// Initializes stderr logging once; later calls are no-ops.
pub fn init() -> Result<()> {
    INIT.call_once(|| {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .format_timestamp(None)
            .format_target(true)
            .format_module_path(false)
            .init();
    });
    Ok(())
}

/// Logs `msg` at `level`, rendering context as `key=value` pairs.
pub fn log_with_context(level: Level, msg: LogMessage) {
    match level {
        Level::Error => log::error!(target: msg.module, "{}", format_context(&msg)),
        Level::Warn => log::warn!(target: msg.module, "{}", format_context(&msg)),
        Level::Info => log::info!(target: msg.module, "{}", format_context(&msg)),
        Level::Debug => log::debug!(target: msg.module, "{}", format_context(&msg)),
        Level::Trace => log::trace!(target: msg.module, "{}", format_context(&msg)),
    }
}

fn format_context(msg: &LogMessage) -> String {
    if let Some(context) = &msg.context {
        let context_str = context
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{} [{}]", msg.message, context_str)
    } else {
        msg.message.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_renders_as_key_value_pairs() {
        let rendered = format_context(&LogMessage {
            message: "Write".to_string(),
            module: "edit",
            context: Some(vec![
                ("file_path", "a.txt".to_string()),
                ("bytes", "12".to_string()),
            ]),
        });
        assert_eq!(rendered, "Write [file_path=a.txt, bytes=12]");
    }

    #[test]
    fn message_without_context_is_unchanged() {
        let rendered = format_context(&LogMessage {
            message: "plain".to_string(),
            module: "search",
            context: None,
        });
        assert_eq!(rendered, "plain");
    }

    #[test]
    fn init_is_idempotent() {
        init().unwrap();
        init().unwrap();
    }
}
