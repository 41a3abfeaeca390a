// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

pub mod error;
pub mod formatters;
pub mod units;
pub use error::*;
pub use formatters::*;
pub use units::*;
