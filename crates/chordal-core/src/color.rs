//! Color handling for Chordal diagrams
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, and the [`Palette`] used to assign colors to arches
//! that have no explicit color.

use std::{
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::DynamicColor;

/// Default arch palette (IBM design language, 60-grade hues).
const DEFAULT_PALETTE: [&str; 12] = [
    "#0f62fe", "#da1e28", "#24a148", "#8a3ffc", "#007d79", "#ee538b", "#ff832b", "#1192e8",
    "#b28600", "#9f1853", "#198038", "#6f6f6f",
];

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use chordal_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Creates a new color with the specified alpha (transparency) value.
    ///
    /// # Examples
    ///
    /// ```
    /// use chordal_core::color::Color;
    ///
    /// let red = Color::new("red").unwrap();
    /// let semi_transparent_red = red.with_alpha(0.5);
    /// assert_eq!(semi_transparent_red.alpha(), 0.5);
    /// ```
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Returns the alpha (transparency) component of this color, between 0.0 and 1.0.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}

/// An ordered list of colors handed out cyclically to arches.
///
/// # Examples
///
/// ```
/// use chordal_core::color::Palette;
///
/// let palette = Palette::default();
/// let first = palette.color_at(0);
/// assert_eq!(first, palette.color_at(palette.len()));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Creates a palette from CSS color strings.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty or any entry is not a valid color.
    pub fn from_strings<S: AsRef<str>>(colors: &[S]) -> Result<Self, String> {
        let colors = colors
            .iter()
            .map(|c| Color::new(c.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    /// Creates a palette from already parsed colors.
    ///
    /// # Errors
    ///
    /// Returns an error if `colors` is empty.
    pub fn new(colors: Vec<Color>) -> Result<Self, String> {
        if colors.is_empty() {
            return Err("palette must contain at least one color".to_string());
        }
        Ok(Self { colors })
    }

    /// Returns the color for the `index`-th arch, wrapping around.
    pub fn color_at(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }

    /// Returns the number of distinct colors.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; a palette cannot be constructed empty.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Iterates over the palette forever.
    pub fn cycle(&self) -> impl Iterator<Item = Color> + '_ {
        self.colors.iter().copied().cycle()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_strings(&DEFAULT_PALETTE).expect("default palette colors are valid")
    }
}
