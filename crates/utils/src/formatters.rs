// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::hex;

const MAX_FULL_BYTES: usize = 50;
const EDGE_BYTES: usize = 12;

/// Hex encode bytes, eliding the middle of long values such as input proofs.
pub fn short_hex(data: &[u8]) -> String {
    if data.len() <= MAX_FULL_BYTES {
        return hex::encode_prefixed(data);
    }
    let head = hex::encode(&data[..EDGE_BYTES]);
    let tail = hex::encode(&data[data.len() - EDGE_BYTES..]);
    format!("<bytes({}):0x{head}..{tail}>", data.len())
}
