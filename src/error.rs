/*
Copyright 2014 Google Inc. All rights reserved.
Copyright 2017 Jihyun Yu. All rights reserved.

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! Error types for cell union construction and parameter validation.

use std::num::ParseIntError;

use thiserror::Error;

/// Cell union errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A decimal cell id string could not be parsed as a u64.
    #[error("cannot parse cell id {value:?}: {source}")]
    ParseCellId {
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// An entry of a raw id list could not be parsed; no union is built.
    #[error("invalid cell id at index {index}: {value:?}")]
    InvalidCellId { index: usize, value: String },

    /// A hex token is empty, too long or contains non-hex characters.
    #[error("invalid cell token: {0:?}")]
    InvalidToken(String),

    /// A level argument is outside 0..=30.
    #[error("level {0} is outside 0..=30")]
    InvalidLevel(u64),

    /// A level_mod argument is outside 1..=3.
    #[error("level_mod {0} is outside 1..=3")]
    InvalidLevelMod(u64),
}

/// Result type for cell union operations.
pub type Result<T> = std::result::Result<T, Error>;
