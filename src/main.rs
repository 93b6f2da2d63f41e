use anyhow::Context;
use num::BigUint;
use structopt::StructOpt;
use tracing::info;
use zklink_crypto::{PrivateKeySigner, ZkLinkSigner};
use zklink_sdk::log::init;
use zklink_sdk::{
    create_submitter_signature, sign_change_pubkey, sign_transfer, ChangePubKeyAuthRequest,
    RpcRequest, RpcSubmitter, TxSignature,
};
use zklink_sdk_config::{ClientConfig, ZkLinkSdkConfig};
use zklink_types::{
    AccountId, ChangePubKeyBuilder, Nonce, SubAccountId, TokenId, TransferBuilder, ZkLinkAddress,
};
use zklink_utils::parse_units;

#[derive(StructOpt)]
#[structopt(name = "zkLink sdk cli", author = "N Labs", rename_all = "snake_case")]
struct Opt {
    /// Layer-1 private key, the layer-2 key is derived from it
    #[structopt(long, env = "ZKLINK_PRIVATE_KEY", hide_env_values = true)]
    private_key: String,

    /// Post the request to `CLIENT_CONFIG_RPC_URL` instead of printing it
    #[structopt(long)]
    submit: bool,

    #[structopt(subcommand)]
    command: Command,
}

#[derive(StructOpt)]
#[structopt(rename_all = "snake_case")]
enum Command {
    /// Print the layer-1 address and the layer-2 public key hash of the key
    Address,
    /// Set the derived layer-2 key as the signing key of the account
    ChangePubkey {
        #[structopt(long)]
        account_id: AccountId,
        #[structopt(long)]
        sub_account_id: SubAccountId,
        #[structopt(long)]
        fee_token: TokenId,
        #[structopt(long, default_value = "0")]
        fee: BigUint,
        #[structopt(long)]
        nonce: Nonce,
        /// Authorize with the main contract instead of an EIP-712 signature
        #[structopt(long)]
        onchain: bool,
    },
    Transfer {
        #[structopt(long)]
        account_id: AccountId,
        #[structopt(long)]
        to: ZkLinkAddress,
        #[structopt(long)]
        from_sub_account_id: SubAccountId,
        #[structopt(long)]
        to_sub_account_id: SubAccountId,
        #[structopt(long)]
        token: TokenId,
        /// Symbol shown in the message signed by the layer-1 key
        #[structopt(long)]
        token_symbol: String,
        #[structopt(long, default_value = "18")]
        decimals: u8,
        /// Decimal amount, e.g. `1.5`
        #[structopt(long)]
        amount: String,
        #[structopt(long, default_value = "0")]
        fee: String,
        #[structopt(long)]
        nonce: Nonce,
    },
}

/// Posts the transaction when `client` is given, prints the request otherwise.
async fn publish(
    client: Option<&ClientConfig>,
    tx_signature: TxSignature,
    zklink_signer: &ZkLinkSigner,
) -> anyhow::Result<()> {
    let submitter_signature =
        create_submitter_signature(&tx_signature.tx.get_bytes(), zklink_signer)?;
    if let Some(config) = client {
        let submitter = RpcSubmitter::new(config)?;
        let response = submitter
            .send_transaction(&tx_signature, Some(&submitter_signature))
            .await?;
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        let request = RpcRequest::send_transaction(1, &tx_signature, Some(&submitter_signature))?;
        println!("{}", serde_json::to_string_pretty(&request)?);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // a missing .env is fine, the variables may come from the shell
    dotenvy::dotenv().ok();
    init();

    let opt = Opt::from_args();
    let eth_signer = PrivateKeySigner::new(&opt.private_key).context("Invalid private key")?;
    let zklink_signer = ZkLinkSigner::new_from_hex_eth_signer(&opt.private_key)
        .context("Failed to derive the zklink signer")?;
    let address = ZkLinkAddress::from(eth_signer.address());

    match opt.command {
        Command::Address => {
            println!("address: {address}");
            println!("pubkey hash: {}", zklink_signer.public_key_hash());
        }
        Command::ChangePubkey {
            account_id,
            sub_account_id,
            fee_token,
            fee,
            nonce,
            onchain,
        } => {
            let config = ZkLinkSdkConfig::from_env()?;
            let layer1 = &config.layer1;
            let tx = ChangePubKeyBuilder {
                chain_id: layer1.chain_id,
                account_id,
                sub_account_id,
                new_pubkey_hash: zklink_signer.public_key_hash(),
                fee_token,
                fee,
                nonce,
                ts: None,
            }
            .build()?;
            let auth_request = if onchain {
                ChangePubKeyAuthRequest::OnChain
            } else {
                ChangePubKeyAuthRequest::EthECDSA
            };
            info!("Signing change pubkey of account {}", *account_id);
            let tx_signature = sign_change_pubkey(
                &eth_signer,
                &zklink_signer,
                tx,
                layer1.main_contract,
                layer1.l1_client_id,
                address,
                auth_request,
            )?;
            publish(opt.submit.then_some(&config.client), tx_signature, &zklink_signer).await?;
        }
        Command::Transfer {
            account_id,
            to,
            from_sub_account_id,
            to_sub_account_id,
            token,
            token_symbol,
            decimals,
            amount,
            fee,
            nonce,
        } => {
            let tx = TransferBuilder {
                account_id,
                to_address: to,
                from_sub_account_id,
                to_sub_account_id,
                token,
                amount: parse_units(&amount, decimals)?,
                fee: parse_units(&fee, decimals)?,
                nonce,
                ts: None,
            }
            .build()?;
            info!("Signing transfer of account {}", *account_id);
            let tx_signature = sign_transfer(&zklink_signer, Some(&eth_signer), tx, &token_symbol)?;
            let client = opt.submit.then(ClientConfig::from_env).transpose()?;
            publish(client.as_ref(), tx_signature, &zklink_signer).await?;
        }
    }
    Ok(())
}
