use anyhow::Context;
use custody_wallet_core::{init_logging, WalletCoreConfig, NAME, VERSION};

fn main() -> anyhow::Result<()> {
    let config = WalletCoreConfig::from_env().context("Failed to load WALLET_CORE_* configuration")?;
    init_logging(&config.log_level);

    let fees = config.fee_settings();
    let retry = config.retry_options();

    println!("{} {} configuration:\n", NAME, VERSION);
    println!("  Master encryption key: [REDACTED] ({} hex chars)", config.master_encryption_key.len());
    println!("  Tron node URL: {}", config.tron_node_url);
    println!(
        "  Tron API key: {}",
        if config.tron_api_key.is_some() { "[REDACTED]" } else { "(not set)" }
    );
    println!("  USDT-TRC20 contract: {}", fees.usdt_contract);
    println!("  RPC timeout: {:?}", fees.rpc_timeout);
    println!("  Energy price: {} sun", fees.energy_price_sun);
    println!("  Fee safety multiplier: {}", fees.safety_multiplier);
    println!("  Fallback fee: {} TRX", fees.fallback_fee_trx);
    println!(
        "  Retry: {} attempts, {:?} initial delay, x{} backoff",
        retry.retries, retry.initial_delay, retry.backoff_factor
    );
    println!("  Log level: {}", config.log_level);

    Ok(())
}
