//! Module for all data types used across the library
pub mod quality;
