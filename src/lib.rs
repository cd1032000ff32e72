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

//! FAU201 Panel - control-panel core for FAU201 USB power supplies
//!
//! This library provides the settings persistence subsystem of the panel:
//! the XML settings document codec, the validating applier that maps parsed
//! settings onto the live device configuration, and the builders for the
//! `fau201-*` shell commands the panel runs. GUI rendering and process
//! execution live in the host application, not here.

pub mod command;
pub mod document;
pub mod logger;
pub mod settings;
pub mod store;
