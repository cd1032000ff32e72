/*
 * This file is part of FAU201 Panel.
 *
 * Copyright (C) 2025 FAU201 Panel contributors
 *
 * FAU201 Panel is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * FAU201 Panel is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with FAU201 Panel. If not, see <https://www.gnu.org/licenses/>.
 */

//! File boundary for settings documents.
//!
//! The codec and applier never touch the filesystem; this module reads and
//! writes whole files around them. Structural failures (I/O, malformed XML,
//! wrong target) abort a load with zero changes applied; per-field failures
//! come back as a count for the host's warning dialog.

use std::fs;
use std::io;
use std::path::Path;

use serde_json::json;
use thiserror::Error;

use crate::document::{self, ParseError, SchemaError};
use crate::logger;
use crate::settings::{self, DeviceConfig, VoltageBounds};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Result of a successful load: the updated configuration and how many
/// recognized settings carried invalid values.
#[derive(Debug, Clone, Copy)]
pub struct LoadOutcome {
    pub config: DeviceConfig,
    pub invalid_settings: usize,
}

/// Load a settings file and apply it to `config`.
///
/// The file is read in full before any parsing, so the handle is released on
/// every path. On any [`LoadError`] the caller's configuration is untouched;
/// the error distinguishes unreadable, corrupted, and incompatible files.
pub fn load_settings(
    path: &Path,
    config: DeviceConfig,
    bounds: VoltageBounds,
) -> Result<LoadOutcome, LoadError> {
    let bytes = fs::read(path)?;
    let doc = document::parse(&bytes)?;
    doc.validate_schema()?;
    let (config, invalid_settings) = settings::apply(&doc, config, bounds);
    logger::log_event(
        "settings_loaded",
        json!({
            "path": path.display().to_string(),
            "voltage": config.voltage,
            "invalid_settings": invalid_settings,
        }),
    );
    Ok(LoadOutcome {
        config,
        invalid_settings,
    })
}

/// Write the settings file for the current configuration. The in-memory
/// configuration is unaffected whether or not the write succeeds.
pub fn save_settings(path: &Path, config: &DeviceConfig) -> io::Result<()> {
    fs::write(path, document::serialize(config.voltage))?;
    logger::log_event(
        "settings_saved",
        json!({
            "path": path.display().to_string(),
            "voltage": config.voltage,
        }),
    );
    Ok(())
}
