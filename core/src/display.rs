//! Ether denomination conversion and display helpers.
//!
//! Native balances are tracked in wei (18 decimal places). The dashboard
//! shows every balance truncated to 8 decimal places.

use alloy::primitives::U256;

const WEI_PER_ETH: u128 = 1_000_000_000_000_000_000;

fn wei_per_eth() -> U256 {
    U256::from(WEI_PER_ETH)
}

/// Convert wei to an ether string with exactly 8 decimal places, truncating.
/// Examples: 500_000_000_000_000_000 -> "0.50000000", 0 -> "0.00000000"
#[must_use]
pub fn wei_to_eth_8(wei: U256) -> String {
    let whole = wei / wei_per_eth();
    let frac8 = (wei % wei_per_eth()) / U256::from(10_000_000_000u64);
    format!("{whole}.{:08}", frac8.to::<u64>())
}

/// Convert wei to a full-precision ether string (18 decimal places).
/// Round-trips exactly through [`parse_eth_amount`].
#[must_use]
pub fn wei_to_eth_full(wei: U256) -> String {
    let whole = wei / wei_per_eth();
    let frac = wei % wei_per_eth();
    format!("{whole}.{:018}", frac.to::<u128>())
}

/// Format a balance for display.
#[must_use]
pub fn format_balance(wei: U256) -> String {
    format!("{} ETH", wei_to_eth_8(wei))
}

/// Parse a human-readable ether amount string into wei.
/// Accepts: "1.5" -> 1_500_000_000_000_000_000, "0.001" -> 10^15.
/// Bare integers are always ether, never wei.
pub fn parse_eth_amount(input: &str) -> Result<U256, String> {
    let input = input.trim();

    if input.is_empty() {
        return Err("Amount cannot be empty".to_string());
    }

    if input.starts_with('-') {
        return Err("Amount must be positive".to_string());
    }

    if let Ok(eth) = input.parse::<u128>() {
        return U256::from(eth)
            .checked_mul(wei_per_eth())
            .ok_or_else(|| "Amount too large".to_string());
    }

    let parts: Vec<&str> = input.split('.').collect();
    if parts.len() > 2 {
        return Err("Invalid amount format. Use ether units like '1.5' or '0.001'.".to_string());
    }

    let whole: u128 = parts[0]
        .parse()
        .map_err(|_| format!("Invalid whole part: '{}'", parts[0]))?;

    let frac_wei: u128 = if parts.len() == 2 {
        let frac_str = parts[1];
        if frac_str.is_empty() {
            // Trailing dot: "1." is treated as "1.0"
            0
        } else if frac_str.len() > 18 {
            return Err("Too many decimal places. Ether supports up to 18.".to_string());
        } else {
            let padded = format!("{:0<18}", frac_str);
            padded
                .parse::<u128>()
                .map_err(|_| format!("Invalid fractional part: '{frac_str}'"))?
        }
    } else {
        0
    };

    U256::from(whole)
        .checked_mul(wei_per_eth())
        .and_then(|w| w.checked_add(U256::from(frac_wei)))
        .ok_or_else(|| "Amount too large".to_string())
}
