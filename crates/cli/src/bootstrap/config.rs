use hoopoe_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}

/// Logged once the subscriber is installed.
pub fn log_config_summary(config: &Config, config_path: Option<&str>) {
    let config_file = config_path
        .map(str::to_string)
        .or_else(Config::get_config_path)
        .unwrap_or_else(|| "default".to_string());

    info!(
        config_file = %config_file,
        listen = %config.server.listen_addr(),
        upstreams = config.upstream.servers.len(),
        rules = config.proxy.rules.len(),
        scan_all = config.proxy.scan_all,
        load_balancing = config.upstream.load_balancing.as_str(),
        timeout = %config.upstream.timeout,
        "Configuration loaded"
    );
}
