// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

mod chains;
mod directory;
mod evm;
mod quoter;

pub use chains::*;
pub use directory::*;
pub use evm::*;
pub use quoter::*;
