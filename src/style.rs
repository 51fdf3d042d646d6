//! Display styling: the fixed named-color table and curve shapes used by the
//! feature-series formats.

use std::str::FromStr;

/// An RGB color.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Color {
    /// The red component.
    pub r: u8,

    /// The green component.
    pub g: u8,

    /// The blue component.
    pub b: u8,
}

impl Color {
    /// Creates a new [`Color`].
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }
}

/// The fixed table of recognized color names.
///
/// `Look` tokens are matched against these names case-insensitively.
pub const NAMED_COLORS: [(&str, Color); 31] = [
    ("WHITE", Color::new(255, 255, 255)),
    ("BLACK", Color::new(0, 0, 0)),
    ("LIGHTGRAY", Color::new(200, 200, 200)),
    ("DARKGRAY", Color::new(100, 100, 100)),
    ("RED", Color::new(255, 0, 0)),
    ("GREEN", Color::new(0, 255, 0)),
    ("BLUE", Color::new(0, 0, 255)),
    ("YELLOW", Color::new(255, 255, 0)),
    ("CYAN", Color::new(0, 255, 255)),
    ("MAGENTA", Color::new(255, 0, 255)),
    ("LIGHTRED", Color::new(255, 160, 160)),
    ("LIGHTGREEN", Color::new(160, 255, 160)),
    ("LIGHTBLUE", Color::new(160, 200, 255)),
    ("DARKRED", Color::new(175, 0, 0)),
    ("DARKGREEN", Color::new(0, 175, 0)),
    ("DARKBLUE", Color::new(0, 0, 175)),
    ("PALERED", Color::new(255, 218, 218)),
    ("PALEGREEN", Color::new(218, 255, 218)),
    ("PALEBLUE", Color::new(218, 234, 255)),
    ("PALEYELLOW", Color::new(255, 255, 200)),
    ("PALECYAN", Color::new(200, 255, 255)),
    ("PALEMAGENTA", Color::new(255, 200, 255)),
    ("BROWN", Color::new(160, 80, 0)),
    ("ORANGE", Color::new(255, 128, 0)),
    ("PALEORANGE", Color::new(255, 220, 110)),
    ("PURPLE", Color::new(192, 0, 255)),
    ("VIOLET", Color::new(200, 170, 255)),
    ("PALEVIOLET", Color::new(235, 215, 255)),
    ("GRAY", Color::new(150, 150, 150)),
    ("PALEGRAY", Color::new(235, 235, 235)),
    ("CERISE", Color::new(255, 0, 128)),
];

/// Looks up a color by name, case-insensitively.
///
/// # Examples
///
/// ```
/// use blixfile::style;
///
/// assert!(style::color_by_name("blue").is_some());
/// assert!(style::color_by_name("octarine").is_none());
/// ```
pub fn color_by_name(name: &str) -> Option<Color> {
    NAMED_COLORS
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
        .map(|(_, color)| *color)
}

/// The shape with which an XY-plot series is drawn.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Shape {
    /// Points are joined by interpolated line segments.
    Interpolate,

    /// Only filled spans are drawn.
    Partial,
}

impl FromStr for Shape {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("interpolate") {
            Ok(Shape::Interpolate)
        } else if s.eq_ignore_ascii_case("partial") {
            Ok(Shape::Partial)
        } else {
            Err(())
        }
    }
}

/// A parsed `Look` field: the styling tokens attached to a feature-series
/// record.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Look {
    /// The series color, if any token named one.
    pub color: Option<Color>,

    /// The series shape, if any token named one.
    pub shape: Option<Shape>,
}

impl Look {
    /// Parses a comma-separated `Look` field.
    ///
    /// Each token is matched case-insensitively against the named-color table
    /// and the shape set. Unrecognized tokens are returned to the caller for
    /// reporting; they are not fatal.
    ///
    /// # Examples
    ///
    /// ```
    /// use blixfile::style::Look;
    /// use blixfile::style::Shape;
    ///
    /// let (look, bad) = Look::parse("blue,interpolate");
    /// assert!(look.color.is_some());
    /// assert_eq!(look.shape, Some(Shape::Interpolate));
    /// assert!(bad.is_empty());
    /// ```
    pub fn parse(field: &str) -> (Look, Vec<String>) {
        let mut look = Look::default();
        let mut unrecognized = Vec::new();

        for token in field.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }

            if let Some(color) = color_by_name(token) {
                look.color = Some(color);
            } else if let Ok(shape) = token.parse::<Shape>() {
                look.shape = Some(shape);
            } else {
                unrecognized.push(token.to_string());
            }
        }

        (look, unrecognized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_lookup_is_case_insensitive() {
        assert_eq!(color_by_name("CERISE"), Some(Color::new(255, 0, 128)));
        assert_eq!(color_by_name("cerise"), Some(Color::new(255, 0, 128)));
        assert_eq!(color_by_name("Cerise"), Some(Color::new(255, 0, 128)));
        assert_eq!(color_by_name("chartreuse"), None);
    }

    #[test]
    fn table_has_thirty_one_entries() {
        assert_eq!(NAMED_COLORS.len(), 31);
    }

    #[test]
    fn look_parsing() {
        let (look, bad) = Look::parse("DARKGREEN,partial");
        assert_eq!(look.color, Some(Color::new(0, 175, 0)));
        assert_eq!(look.shape, Some(Shape::Partial));
        assert!(bad.is_empty());

        let (look, bad) = Look::parse("squiggle,red");
        assert_eq!(look.color, Some(Color::new(255, 0, 0)));
        assert_eq!(look.shape, None);
        assert_eq!(bad, vec!["squiggle".to_string()]);
    }
}
