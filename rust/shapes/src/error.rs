// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for shape materialization.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while materializing shapes.
///
/// The materialization variants indicate geometry the parser should
/// have rejected reaching the materializer; they signal a broken
/// parser/materializer invariant, not bad user input.
#[derive(Error, Debug)]
pub enum Error {
    #[error("degenerate ring reached materialization: {0} vertices")]
    DegenerateRing(usize),

    #[error("core parser error: {0}")]
    Core(#[from] wkt_lite_core::Error),
}
