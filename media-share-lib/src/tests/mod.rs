//! Integration testing module
//!
//! Exercises the catalog and the subtitle transcoder against real temporary
//! directories:
//! - Listing order, links and sizes
//! - Error classification for wrong or missing paths
//! - SubRip and MicroDVD conversion, including frame-rate fallback

pub mod catalog;
