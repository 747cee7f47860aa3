//! Donation flow: connect the wallet, move it to the target chain, and send a native
//! transfer to the fixed burn address. Signing is left entirely to the wallet.

use num_bigint::BigUint;
use serde_json::{json, Value};

use crate::chains::{chain_by_hex, ChainDescriptor, NATIVE_DECIMALS};
use crate::error::{AppError, WalletError};
use crate::rpc::{parse_quantity, to_quantity};
use crate::wallet::{switch_to_chain, SwitchOutcome, Wallet};

/// Every donation is sent here.
pub const DONATION_ADDRESS: &str = "0x000000000000000000000000000000000000dEaD";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonationReceipt<'a> {
    pub chain: &'a ChainDescriptor,
    pub from: String,
    pub amount_wei: BigUint,
    pub tx_hash: String,
    pub explorer_url: Option<String>,
}

/// Parses a decimal ether amount (e.g. "0.05") into wei. Rejects zero, signs, exponents,
/// and more than 18 fractional digits.
pub fn parse_ether(amount: &str) -> Result<BigUint, AppError> {
    let invalid = || AppError::InvalidAmount(amount.to_string());
    let decimals = NATIVE_DECIMALS as usize;

    let trimmed = amount.trim();
    let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty())
        || !all_digits(whole)
        || !all_digits(fraction)
        || fraction.len() > decimals
    {
        return Err(invalid());
    }

    let digits = format!("{whole}{fraction:0<decimals$}");
    let wei = BigUint::parse_bytes(digits.as_bytes(), 10).ok_or_else(invalid)?;
    if wei == BigUint::from(0u32) {
        return Err(invalid());
    }
    Ok(wei)
}

/// Formats wei as a decimal ether string, trimming trailing fractional zeros.
pub fn format_ether(wei: &BigUint) -> String {
    let decimals = NATIVE_DECIMALS as usize;
    let digits = format!("{:0>width$}", wei.to_string(), width = decimals + 1);
    let (whole, fraction) = digits.split_at(digits.len() - decimals);
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{whole}.{fraction}")
    }
}

/// Asks the wallet for account access and returns the first account.
pub async fn connect(wallet: Option<&dyn Wallet>) -> Result<String, WalletError> {
    let wallet = wallet.ok_or(WalletError::NoWallet)?;
    let accounts = wallet.request("eth_requestAccounts", json!([])).await?;

    accounts
        .as_array()
        .and_then(|list| list.first())
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| WalletError::InvalidResponse(format!("no accounts returned: {accounts}")))
}

/// Sends `amount_wei` of the native asset on `chain` to `DONATION_ADDRESS`.
///
/// When the chain had to be added to the wallet, the active chain is read back before
/// sending, since adding a network does not guarantee the wallet switched to it.
pub async fn donate<'a>(
    wallet: Option<&dyn Wallet>,
    chain: &'a ChainDescriptor,
    amount_wei: &BigUint,
) -> Result<DonationReceipt<'a>, WalletError> {
    let wallet = wallet.ok_or(WalletError::NoWallet)?;

    let from = connect(Some(wallet)).await?;

    if switch_to_chain(Some(wallet), chain).await? == SwitchOutcome::Added {
        ensure_active_chain(wallet, chain).await?;
    }

    let tx = json!([{
        "from": from,
        "to": DONATION_ADDRESS,
        "value": to_quantity(amount_wei),
    }]);
    let tx_hash = wallet
        .request("eth_sendTransaction", tx)
        .await?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| {
            WalletError::InvalidResponse("eth_sendTransaction returned no hash".into())
        })?;

    tracing::info!(
        chain = chain.name,
        chain_id = chain.chain_id,
        from = %from,
        amount_wei = %amount_wei,
        tx_hash = %tx_hash,
        outcome = "sent",
        "donation sent"
    );

    Ok(DonationReceipt {
        chain,
        explorer_url: chain.tx_url(&tx_hash),
        from,
        amount_wei: amount_wei.clone(),
        tx_hash,
    })
}

async fn ensure_active_chain(
    wallet: &dyn Wallet,
    chain: &ChainDescriptor,
) -> Result<(), WalletError> {
    let active = wallet.request("eth_chainId", json!([])).await?;
    let active = active
        .as_str()
        .ok_or_else(|| WalletError::InvalidResponse(format!("eth_chainId returned {active}")))?;
    let active_id =
        parse_quantity(active).map_err(|e| WalletError::InvalidResponse(e.to_string()))?;

    if active_id != BigUint::from(chain.chain_id) {
        let actual = match chain_by_hex(active) {
            Some(known) => format!("{} ({active})", known.name),
            None => active.to_string(),
        };
        return Err(WalletError::ChainMismatch {
            expected: format!("{} ({})", chain.name, chain.chain_id_hex),
            actual,
        });
    }
    Ok(())
}
