//! Layout engine for column widths.
//!
//! This module handles:
//! - Distributing the viewport width across visible columns
//! - Preserving user-resized columns when the visible set changes
//! - Total sheet width and the sticky scrollbar's spacer width

mod widths;

pub use widths::{
    enforce_blank_minimum, initial_widths, recompute_widths, resize_column, sticky_spacer_width,
    total_width,
};
