use super::Config;
use anyhow::Result;

/// Returns human-readable findings. `[X]` entries are fatal for commands
/// that need the network; `[!]` entries are warnings only.
pub fn validate_config(config: &Config) -> Result<Vec<String>> {
    let mut warnings = Vec::new();

    let endpoint = config.api.endpoint.trim();
    if endpoint.is_empty() {
        warnings.push(
            "[X] api.endpoint is not configured. Set it in the config file, via --endpoint, or WAF_CONSOLE_ENDPOINT".to_string(),
        );
    } else if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
        warnings.push(format!(
            "[X] api.endpoint must be an http:// or https:// URL, got: {}",
            endpoint
        ));
    }

    if config.api.timeout_seconds == 0 {
        warnings.push("[X] api.timeout_seconds cannot be 0. Every request must be bounded".to_string());
    }

    if config.api.timeout_seconds > 60 {
        warnings.push(format!(
            "[!] api.timeout_seconds ({}) is very high. The dashboard blocks while a request is in flight",
            config.api.timeout_seconds
        ));
    }

    if !["trace", "debug", "info", "warn", "error"].contains(&config.logging.level.as_str()) {
        warnings.push(format!(
            "[X] Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
            config.logging.level
        ));
    }

    if !["json", "pretty", "compact"].contains(&config.logging.format.as_str()) {
        warnings.push(format!(
            "[X] Invalid log format: {}. Must be 'json', 'pretty', or 'compact'",
            config.logging.format
        ));
    }

    if config.ui.refresh_seconds == 0 {
        warnings.push("[!] ui.refresh_seconds is 0. The dashboard will refresh on every tick".to_string());
    }

    if config.ui.alert_ttl_seconds == 0 {
        warnings.push("[!] ui.alert_ttl_seconds is 0. Alert banners will disappear immediately".to_string());
    }

    Ok(warnings)
}

/// An endpoint string usable for outbound requests. Kept in sync with the
/// `[X]` checks above so the CLI can fail fast before building a client.
pub fn endpoint_is_usable(endpoint: &str) -> bool {
    let endpoint = endpoint.trim();
    !endpoint.is_empty() && (endpoint.starts_with("http://") || endpoint.starts_with("https://"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_endpoint_is_fatal() {
        let config = Config::default();
        let warnings = validate_config(&config).unwrap();
        assert!(warnings.iter().any(|w| w.starts_with("[X]") && w.contains("api.endpoint")));
    }

    #[test]
    fn test_valid_config_has_no_fatal_findings() {
        let mut config = Config::default();
        config.api.endpoint = "https://waf.example.com".to_string();
        let warnings = validate_config(&config).unwrap();
        assert!(!warnings.iter().any(|w| w.starts_with("[X]")), "{:?}", warnings);
    }

    #[test]
    fn test_endpoint_scheme_is_checked() {
        assert!(endpoint_is_usable("http://127.0.0.1:5000"));
        assert!(endpoint_is_usable("https://waf.example.com/"));
        assert!(!endpoint_is_usable("waf.example.com"));
        assert!(!endpoint_is_usable("   "));
    }
}
