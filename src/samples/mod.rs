//! Small documentation examples living next to the filter.

mod arithmetic;
mod rectangle;

pub use arithmetic::multiply;
pub use rectangle::Rectangle;
