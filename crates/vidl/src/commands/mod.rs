//! Module for all (longer) commands

pub mod download;
