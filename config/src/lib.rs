pub use crate::{client::ClientConfig, layer1::Layer1Config};

mod client;
mod layer1;
#[cfg(test)]
pub(crate) mod test_utils;

/// Everything the sdk reads from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ZkLinkSdkConfig {
    pub client: ClientConfig,
    pub layer1: Layer1Config,
}

impl ZkLinkSdkConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            client: ClientConfig::from_env()?,
            layer1: Layer1Config::from_env()?,
        })
    }
}

/// Convenience macro that loads the structure from the environment variable given the prefix.
#[macro_export]
macro_rules! envy_load {
    ($name:expr, $prefix:expr) => {
        envy::prefixed($prefix)
            .from_env()
            .map_err(|err| anyhow::anyhow!("Cannot load config <{}>: {}", $name, err))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{set_env, CLIENT_ENV, LAYER1_ENV};

    #[test]
    fn from_env() {
        set_env(CLIENT_ENV);
        set_env(LAYER1_ENV);

        let config = ZkLinkSdkConfig::from_env().unwrap();
        assert_eq!(config.client, ClientConfig::from_env().unwrap());
        assert_eq!(config.layer1, Layer1Config::from_env().unwrap());
    }
}
