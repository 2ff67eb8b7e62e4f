//! Paint model: the color type carried by line vertices and clear values.

pub mod color;

pub use color::Color;
