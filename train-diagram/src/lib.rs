//! Train diagram renderer.
//!
//! Reads per-station departure timetables and draws them as a train
//! diagram: time of day across the page, stations down it, one marker per
//! departure coloured by train category.

pub mod diagram;
pub mod domain;
pub mod timetable;
