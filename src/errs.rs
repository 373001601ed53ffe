// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use std::result;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkipListError {
    #[error("out of bounds: {0}")]
    OutOfBounds(String),
    #[error("no such element")]
    NoSuchElement,
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = result::Result<T, SkipListError>;

impl SkipListError {
    pub(crate) fn index_out_of_bounds(index: impl std::fmt::Display, len: usize) -> Self {
        SkipListError::OutOfBounds(format!("index {} for a list of length {}", index, len))
    }
}
