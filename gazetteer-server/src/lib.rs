//! Region gazetteer server.
//!
//! Resolves Korean administrative place names to forecast grid cells and
//! latitude/longitude, and back, and hosts a comment board per region.

pub mod comments;
pub mod config;
pub mod gazetteer;
pub mod web;
