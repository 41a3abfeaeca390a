// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayerError {
    #[error("Relayer request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Relayer answered {status} for {endpoint}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Malformed relayer response: {0}")]
    Malformed(String),

    #[error("Invalid relayer url: {0}")]
    Url(#[from] url::ParseError),
}
