//! Data types shared by the layout engine and sheet state.

mod column;
mod widths;

pub use column::*;
pub use widths::*;
