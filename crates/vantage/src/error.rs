//! Error types for the Vantage pipeline.
//!
//! This module provides the main error type [`VantageError`] which wraps the
//! error conditions of the generate, render, and upload stages.

use std::io;

use thiserror::Error;

use crate::generate::GenerateError;
use crate::render::RenderError;
use crate::storage::StorageError;

/// The main error type for pipeline operations.
#[derive(Debug, Error)]
pub enum VantageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
