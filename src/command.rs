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

//! Shell command lines for the `fau201-*` device tools.
//!
//! The panel drives the power supply by running these tools through `sh`;
//! building the command strings is pure and lives here, running them is the
//! host's job. The serial argument may be empty, in which case it is omitted
//! from the command line entirely.

/// Collapse whitespace: trim the ends and reduce interior runs to single
/// spaces, so an empty serial never leaves a trailing space.
fn simplified(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `fau201-volt <volts> [serial]` - set the output voltage.
pub fn volt(volts: f64, serial: &str) -> String {
    simplified(&format!("fau201-volt {} {}", volts, serial))
}

/// `fau201-clear [serial]` - clear the output.
pub fn clear(serial: &str) -> String {
    simplified(&format!("fau201-clear {}", serial))
}

/// `fau201-reset [serial]` - reset the device, optionally chaining a clear
/// two seconds later when the panel's reset-also-clears option is on.
pub fn reset(serial: &str, clear_after: bool) -> String {
    if clear_after {
        simplified(&format!(
            "fau201-reset {} && sleep 2 && fau201-clear {}",
            serial, serial
        ))
    } else {
        simplified(&format!("fau201-reset {}", serial))
    }
}
