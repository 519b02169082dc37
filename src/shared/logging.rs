use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// ログ設定の初期化。`RUST_LOG` が設定されていればそちらを優先する。
pub fn init(level: &str, json: bool) -> Result<(), String> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let result = if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
    };

    result.map_err(|err| format!("Failed to initialize logging: {err}"))?;
    tracing::debug!(level, json, "logging initialized");
    Ok(())
}
