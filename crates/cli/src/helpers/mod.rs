// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::{bail, Result};
use zeroize::{Zeroize, Zeroizing};

pub mod context;
pub mod telemetry;

/// Parse to a Zeroizing String
pub fn parse_zeroizing(s: &str) -> Result<Zeroizing<String>> {
    Ok(Zeroizing::new(s.to_string()))
}

/// Ensure a private key of the form 0x followed by 32 hex encoded bytes
pub fn ensure_hex_zeroizing(s: &str) -> Result<Zeroizing<String>> {
    parse_zeroizing(ensure_private_key(s)?)
}

fn ensure_private_key(s: &str) -> Result<&str> {
    let Some(digits) = s.strip_prefix("0x") else {
        bail!("private key must start with '0x'")
    };
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        bail!("private key must only contain hex characters [0-9a-fA-F]");
    }
    let mut bytes = hex::decode(digits)?;
    let len = bytes.len();
    bytes.zeroize();
    if len != 32 {
        bail!("private key must be 32 bytes, got {len}");
    }
    Ok(s)
}
