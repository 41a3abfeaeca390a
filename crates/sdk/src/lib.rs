// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

mod aggregate;
mod config;
mod events;
mod models;
mod sdk;

pub use aggregate::*;
pub use config::*;
pub use events::*;
pub use models::*;
pub use sdk::*;

pub use cdon_evm_helpers as evm_helpers;
pub use cdon_relayer_client as relayer_client;
pub use cdon_wallet as wallet;
