//! Environment fixtures. Every test sets the same values, tests run in parallel
//! inside one process.

pub const CLIENT_ENV: &str = r#"
    CLIENT_CONFIG_RPC_URL="http://127.0.0.1:3030"
    CLIENT_CONFIG_REQUEST_TIMEOUT_SECS=15
"#;

pub const LAYER1_ENV: &str = r#"
    LAYER1_CONFIG_CHAIN_ID=1
    LAYER1_CONFIG_L1_CLIENT_ID="5"
    LAYER1_CONFIG_MAIN_CONTRACT="0x70a0F165d6f8054d0d0CF8dFd4DD2005f0AF6B55"
"#;

/// Parses `KEY=value` lines (values optionally quoted) and exports them.
pub fn set_env(fixture: &str) {
    for line in fixture.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let (key, value) = line
            .split_once('=')
            .unwrap_or_else(|| panic!("malformed env line: {line}"));
        std::env::set_var(key.trim(), value.trim().trim_matches('"'));
    }
}
