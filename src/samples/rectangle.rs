/// A rectangle with a color.
///
/// ```
/// use admonition_filter::samples::Rectangle;
///
/// let mut r = Rectangle::new(3.0, 2.0, "red");
/// assert_eq!(r.area(), 6.0);
///
/// r.make_square(4.0);
/// assert_eq!(r.area(), 16.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    pub length: f64,
    pub width: f64,
    pub color: String,
}

impl Default for Rectangle {
    fn default() -> Self {
        Self {
            length: 0.0,
            width: 0.0,
            color: "white".to_string(),
        }
    }
}

impl Rectangle {
    pub fn new(length: f64, width: f64, color: impl Into<String>) -> Self {
        Self {
            length,
            width,
            color: color.into(),
        }
    }

    pub fn area(&self) -> f64 {
        self.length * self.width
    }

    /// Turns the rectangle into a square of the given side. The color is kept.
    pub fn make_square(&mut self, side: f64) {
        self.length = side;
        self.width = side;
    }
}
