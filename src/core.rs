//! Conversion core
//!
//! - `catalog`: static table of categories and rules
//! - `converter`: rule resolution, conversion, formatting, input parsing
//! - `history`: bounded list of recent conversions
//! - `screen`: state owned by one converter screen and its event handlers

pub mod catalog;
pub mod converter;
pub mod history;
pub mod screen;
