// Local file search

pub mod locator;

pub use locator::*;
