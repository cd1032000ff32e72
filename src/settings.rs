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

//! Device configuration values and the settings applier.
//!
//! The applier folds the records of a schema-valid settings document into a
//! [`DeviceConfig`], validating each recognized field against host-supplied
//! bounds and counting the records it rejects. Structural problems are the
//! codec's business; everything here is per-field and non-fatal.

use std::path::PathBuf;

use crate::document::{SettingsDocument, VOLTAGE_FIELD};

/// Live device configuration. Mutated only by the applier on load or by
/// direct user edits in the host UI.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DeviceConfig {
    pub voltage: f64,
}

impl DeviceConfig {
    pub fn new(voltage: f64) -> Self {
        Self { voltage }
    }
}

/// Acceptance range for the voltage field, inclusive on both ends.
///
/// Owned by the host (in the original panel, the spin-box limits) and passed
/// in explicitly so the core stays UI-independent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoltageBounds {
    pub min: f64,
    pub max: f64,
}

impl VoltageBounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, volts: f64) -> bool {
        volts >= self.min && volts <= self.max
    }
}

/// Caller-owned panel context: the live configuration plus the window-lifetime
/// strings the original kept as hidden instance state (last settings file,
/// device serial number).
#[derive(Debug, Clone, Default)]
pub struct PanelState {
    pub config: DeviceConfig,
    pub file_path: Option<PathBuf>,
    pub serial: String,
}

/// Apply a document's settings to `config`, returning the updated config and
/// the number of recognized-but-invalid settings.
///
/// Records are visited in document order. A `voltage` record whose value
/// parses and lies within `bounds` is assigned (the last valid one wins when
/// duplicates are present); one that fails to parse or falls outside the
/// bounds is counted and skipped. Records with unrecognized names are ignored
/// without being counted. Never fails: an empty document returns the config
/// unchanged with a zero count.
pub fn apply(
    doc: &SettingsDocument,
    config: DeviceConfig,
    bounds: VoltageBounds,
) -> (DeviceConfig, usize) {
    let mut updated = config;
    let mut invalid = 0usize;

    for record in doc.settings() {
        if !record.name.eq_ignore_ascii_case(VOLTAGE_FIELD) {
            continue;
        }
        match record.raw_value.trim().parse::<f64>() {
            // NaN compares false against both bounds and lands in the
            // invalid arm below.
            Ok(volts) if bounds.contains(volts) => updated.voltage = volts,
            _ => invalid += 1,
        }
    }

    (updated, invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse;

    const BOUNDS: VoltageBounds = VoltageBounds { min: 0.0, max: 30.0 };

    fn doc(body: &str) -> SettingsDocument {
        let text = format!("<settings target=\"FAU200\">{}</settings>", body);
        parse(text.as_bytes()).unwrap()
    }

    #[test]
    fn test_valid_voltage_applied() {
        let (cfg, errors) = apply(
            &doc("<setting name=\"voltage\" value=\"5.25\"/>"),
            DeviceConfig::default(),
            BOUNDS,
        );
        assert_eq!(cfg.voltage, 5.25);
        assert_eq!(errors, 0);
    }

    #[test]
    fn test_boundary_values_are_in_range() {
        let (cfg, errors) = apply(
            &doc("<setting name=\"voltage\" value=\"0\"/>"),
            DeviceConfig::new(9.0),
            BOUNDS,
        );
        assert_eq!(cfg.voltage, 0.0);
        assert_eq!(errors, 0);

        let (cfg, errors) = apply(
            &doc("<setting name=\"voltage\" value=\"30\"/>"),
            DeviceConfig::new(9.0),
            BOUNDS,
        );
        assert_eq!(cfg.voltage, 30.0);
        assert_eq!(errors, 0);
    }

    #[test]
    fn test_out_of_range_counted_and_skipped() {
        let (cfg, errors) = apply(
            &doc("<setting name=\"voltage\" value=\"-1\"/>"),
            DeviceConfig::new(9.0),
            BOUNDS,
        );
        assert_eq!(cfg.voltage, 9.0);
        assert_eq!(errors, 1);

        let (cfg, errors) = apply(
            &doc("<setting name=\"voltage\" value=\"31\"/>"),
            DeviceConfig::new(9.0),
            BOUNDS,
        );
        assert_eq!(cfg.voltage, 9.0);
        assert_eq!(errors, 1);
    }

    #[test]
    fn test_non_numeric_counted_and_skipped() {
        let (cfg, errors) = apply(
            &doc("<setting name=\"voltage\" value=\"abc\"/>"),
            DeviceConfig::new(9.0),
            BOUNDS,
        );
        assert_eq!(cfg.voltage, 9.0);
        assert_eq!(errors, 1);
    }

    #[test]
    fn test_missing_value_counted_as_invalid() {
        let (cfg, errors) = apply(
            &doc("<setting name=\"voltage\"/>"),
            DeviceConfig::new(9.0),
            BOUNDS,
        );
        assert_eq!(cfg.voltage, 9.0);
        assert_eq!(errors, 1);
    }

    #[test]
    fn test_nan_counted_as_invalid() {
        let (cfg, errors) = apply(
            &doc("<setting name=\"voltage\" value=\"NaN\"/>"),
            DeviceConfig::new(9.0),
            BOUNDS,
        );
        assert_eq!(cfg.voltage, 9.0);
        assert_eq!(errors, 1);
    }

    #[test]
    fn test_unrecognized_name_ignored_without_error() {
        let (cfg, errors) = apply(
            &doc("<setting name=\"current\" value=\"1\"/>"),
            DeviceConfig::new(9.0),
            BOUNDS,
        );
        assert_eq!(cfg.voltage, 9.0);
        assert_eq!(errors, 0);
    }

    #[test]
    fn test_name_matched_case_insensitively() {
        let (cfg, errors) = apply(
            &doc("<setting name=\"Voltage\" value=\"7.5\"/>"),
            DeviceConfig::default(),
            BOUNDS,
        );
        assert_eq!(cfg.voltage, 7.5);
        assert_eq!(errors, 0);
    }

    #[test]
    fn test_last_valid_duplicate_wins() {
        let (cfg, errors) = apply(
            &doc(
                "<setting name=\"voltage\" value=\"5\"/>\
                 <setting name=\"voltage\" value=\"12\"/>",
            ),
            DeviceConfig::default(),
            BOUNDS,
        );
        assert_eq!(cfg.voltage, 12.0);
        assert_eq!(errors, 0);
    }

    #[test]
    fn test_invalid_duplicate_does_not_clobber_earlier_valid_one() {
        let (cfg, errors) = apply(
            &doc(
                "<setting name=\"voltage\" value=\"15.0\"/>\
                 <setting name=\"voltage\" value=\"99.0\"/>\
                 <setting name=\"brightness\" value=\"5\"/>",
            ),
            DeviceConfig::default(),
            BOUNDS,
        );
        assert_eq!(cfg.voltage, 15.0);
        assert_eq!(errors, 1);
    }

    #[test]
    fn test_empty_document_leaves_config_unchanged() {
        let doc = parse(b"<settings target=\"FAU200\"/>").unwrap();
        let (cfg, errors) = apply(&doc, DeviceConfig::new(3.3), BOUNDS);
        assert_eq!(cfg.voltage, 3.3);
        assert_eq!(errors, 0);
    }

    #[test]
    fn test_bounds_contains() {
        let bounds = VoltageBounds::new(1.0, 2.0);
        assert!(bounds.contains(1.0));
        assert!(bounds.contains(2.0));
        assert!(bounds.contains(1.5));
        assert!(!bounds.contains(0.999));
        assert!(!bounds.contains(2.001));
        assert!(!bounds.contains(f64::NAN));
    }
}
