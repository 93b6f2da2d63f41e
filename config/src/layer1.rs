// External uses
use serde::Deserialize;
// Workspace uses
use zklink_types::{ChainId, ZkLinkAddress};
// Local uses
use crate::envy_load;

/// The layer-1 chain whose main contract authorizes `ChangePubKey`.
#[derive(Default, Debug, Deserialize, Clone, PartialEq)]
pub struct Layer1Config {
    /// chain id defined by zkLink
    pub chain_id: ChainId,
    /// Numeric identifier of the L1 network (EIP-155 chain id, e.g. `5` for goerli).
    pub l1_client_id: u32,
    /// The zkLink main contract address, the EIP-712 verifying contract.
    pub main_contract: ZkLinkAddress,
}

impl Layer1Config {
    pub fn from_env() -> anyhow::Result<Self> {
        envy_load!("layer1", "LAYER1_CONFIG_")
    }
}
