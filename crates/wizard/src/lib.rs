// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

mod action;
mod blob;
mod errors;
mod reducer;
mod state;

pub use action::*;
pub use errors::*;
pub use reducer::*;
pub use state::*;
