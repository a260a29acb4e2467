//! Workspace styling: tag-based element styles.

use std::fmt;

use crate::error::ModelError;

/// A validated `#rrggbb` color string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Color(String);

impl Color {
    /// Parses a `#rrggbb` color string.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidColor`] for anything that is not a `#`
    /// followed by six hex digits.
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let digits = value.strip_prefix('#');
        match digits {
            Some(hex) if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) => {
                Ok(Color(value))
            }
            _ => Err(ModelError::InvalidColor(value)),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Element shapes understood by Structurizr renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Box,
    RoundedBox,
    Circle,
    Ellipse,
    Hexagon,
    Cylinder,
    Person,
    Robot,
    Folder,
    Pipe,
}

impl Shape {
    pub(crate) fn keyword(self) -> &'static str {
        match self {
            Shape::Box => "Box",
            Shape::RoundedBox => "RoundedBox",
            Shape::Circle => "Circle",
            Shape::Ellipse => "Ellipse",
            Shape::Hexagon => "Hexagon",
            Shape::Cylinder => "Cylinder",
            Shape::Person => "Person",
            Shape::Robot => "Robot",
            Shape::Folder => "Folder",
            Shape::Pipe => "Pipe",
        }
    }
}

/// Visual style applied to all elements carrying a tag.
///
/// # Examples
///
/// ```
/// use vantage_core::ElementStyle;
///
/// let style = ElementStyle::tag("external")
///     .background("#807f7e")?
///     .color("#ffffff")?;
/// # Ok::<(), vantage_core::ModelError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ElementStyle {
    pub(crate) tag: String,
    pub(crate) background: Option<Color>,
    pub(crate) color: Option<Color>,
    pub(crate) shape: Option<Shape>,
}

impl ElementStyle {
    /// Creates a style selecting elements tagged with `tag`.
    pub fn tag(tag: impl Into<String>) -> Self {
        ElementStyle {
            tag: tag.into(),
            background: None,
            color: None,
            shape: None,
        }
    }

    /// Sets the background color.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidColor`] for malformed color strings.
    pub fn background(mut self, color: impl Into<String>) -> Result<Self, ModelError> {
        self.background = Some(Color::new(color)?);
        Ok(self)
    }

    /// Sets the text color.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidColor`] for malformed color strings.
    pub fn color(mut self, color: impl Into<String>) -> Result<Self, ModelError> {
        self.color = Some(Color::new(color)?);
        Ok(self)
    }

    /// Sets the element shape.
    pub fn shape(mut self, shape: Shape) -> Self {
        self.shape = Some(shape);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_rrggbb() {
        assert!(Color::new("#807f7e").is_ok());
        assert!(Color::new("#FFFFFF").is_ok());
    }

    #[test]
    fn rejects_malformed_colors() {
        for bad in ["807f7e", "#807f7", "#807f7ea", "#80zf7e", "", "#"] {
            assert!(
                matches!(Color::new(bad), Err(ModelError::InvalidColor(_))),
                "expected rejection of {bad:?}"
            );
        }
    }
}
