// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

mod attestor;
pub mod contracts;
pub mod helpers;
mod vote;

pub use attestor::*;
pub use vote::*;
