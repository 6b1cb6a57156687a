// UI module - text front end for a patch session
//
// This module contains:
// - ConsoleController: hosts a Session on a terminal, prints the log and
//   drives the select/process triggers

pub mod controller;

pub use controller::{Command, ConsoleController};
