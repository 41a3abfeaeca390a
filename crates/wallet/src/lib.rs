// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

mod local;
mod network_guard;
mod provider;
mod session;
mod switch;

pub use local::*;
pub use network_guard::*;
pub use provider::*;
pub use session::*;
pub use switch::*;
