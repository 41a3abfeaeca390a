// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

mod client;
mod encryptor;
mod error;
mod mock;
mod session;

pub use client::*;
pub use encryptor::*;
pub use error::*;
pub use mock::*;
pub use session::*;
