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

mod command;
mod document;
mod logger;
mod settings;
mod store;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};

use settings::{DeviceConfig, PanelState, VoltageBounds};

// Spin-box limits of the panel UI. The core takes bounds as a parameter;
// these are this host's values.
const MIN_VOLT: f64 = 0.0;
const MAX_VOLT: f64 = 30.0;

fn usage() -> ! {
    eprintln!("Usage: fau201-panel [--logging] <command>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  show <file.xml>            load a settings file and print the voltage");
    eprintln!("  write <file.xml> <volts>   write a settings file for the given voltage");
    eprintln!("  cmd volt <volts> [serial]  print the shell command to set the voltage");
    eprintln!("  cmd clear [serial]         print the shell command to clear the output");
    eprintln!("  cmd reset [serial] [--clear-after]");
    eprintln!("                             print the shell command to reset the device");
    std::process::exit(1);
}

fn show(path: &Path) -> anyhow::Result<()> {
    let bounds = VoltageBounds::new(MIN_VOLT, MAX_VOLT);
    let mut state = PanelState::default();

    let outcome = store::load_settings(path, state.config, bounds)
        .with_context(|| format!("failed to load {}", path.display()))?;
    state.config = outcome.config;
    state.file_path = Some(path.to_path_buf());

    println!("voltage: {} V", state.config.voltage);
    if outcome.invalid_settings > 0 {
        eprintln!(
            "Warning: {} setting(s) had invalid attribute values",
            outcome.invalid_settings
        );
    }
    Ok(())
}

fn write(path: &Path, volts_arg: &str) -> anyhow::Result<()> {
    let volts: f64 = volts_arg
        .parse()
        .with_context(|| format!("invalid voltage '{}'", volts_arg))?;
    if !(MIN_VOLT..=MAX_VOLT).contains(&volts) {
        bail!("voltage {} outside panel range {}..{} V", volts, MIN_VOLT, MAX_VOLT);
    }
    let config = DeviceConfig::new(volts);
    store::save_settings(path, &config)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Wrote settings to {}", path.display());
    Ok(())
}

fn device_command(args: &[String], clear_after: bool) -> anyhow::Result<()> {
    let line = match args.first().map(String::as_str) {
        Some("volt") => {
            let volts_arg = args.get(1).unwrap_or_else(|| usage());
            let volts: f64 = volts_arg
                .parse()
                .with_context(|| format!("invalid voltage '{}'", volts_arg))?;
            let serial = args.get(2).map(String::as_str).unwrap_or("");
            command::volt(volts, serial)
        }
        Some("clear") => command::clear(args.get(1).map(String::as_str).unwrap_or("")),
        Some("reset") => command::reset(args.get(1).map(String::as_str).unwrap_or(""), clear_after),
        _ => usage(),
    };
    println!("{}", line);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();

    let logging_enabled = args.iter().any(|a| a == "--logging");
    let clear_after = args.iter().any(|a| a == "--clear-after");
    args.retain(|a| a != "--logging" && a != "--clear-after");

    if logging_enabled {
        logger::init_logging();
        logger::log_event("startup", serde_json::json!({ "args": args }));
    }

    match args.first().map(String::as_str) {
        Some("show") => {
            let path = args.get(1).map(PathBuf::from).unwrap_or_else(|| usage());
            show(&path)
        }
        Some("write") => {
            let path = args.get(1).map(PathBuf::from).unwrap_or_else(|| usage());
            let volts = args.get(2).cloned().unwrap_or_else(|| usage());
            write(&path, &volts)
        }
        Some("cmd") => device_command(&args[1..], clear_after),
        _ => usage(),
    }
}
