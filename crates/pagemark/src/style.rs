//! Computed visibility style of an element.

/// The subset of computed style the content filter consults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComputedStyle {
    pub display: Option<String>,
    pub visibility: Option<String>,
    pub opacity: Option<f32>,
}

impl ComputedStyle {
    pub fn new(display: &str, visibility: &str, opacity: f32) -> Self {
        Self {
            display: Some(display.to_string()),
            visibility: Some(visibility.to_string()),
            opacity: Some(opacity),
        }
    }

    /// Parse the visibility-relevant declarations of an inline `style`
    /// attribute. Unknown or malformed declarations are ignored.
    pub fn from_inline(style: &str) -> Self {
        let mut result = Self::default();

        for declaration in style.split(';') {
            let Some((property, value)) = declaration.split_once(':') else {
                continue;
            };
            let value = value.to_ascii_lowercase();
            let value = value.trim().trim_end_matches("!important").trim().to_string();

            match property.trim().to_ascii_lowercase().as_str() {
                "display" => result.display = Some(value),
                "visibility" => result.visibility = Some(value),
                "opacity" => result.opacity = value.parse().ok(),
                _ => {}
            }
        }

        result
    }

    /// Not displayed, not visible, or fully transparent
    pub fn is_hidden(&self) -> bool {
        self.display.as_deref() == Some("none")
            || matches!(self.visibility.as_deref(), Some("hidden" | "collapse"))
            || self.opacity.is_some_and(|o| o <= 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_inline() {
        let style = ComputedStyle::from_inline("color: red; DISPLAY: None !important;opacity:0.5");
        assert_eq!(style.display.as_deref(), Some("none"));
        assert_eq!(style.opacity, Some(0.5));
        assert!(style.is_hidden());
    }

    #[test]
    fn test_visibility_and_opacity() {
        assert!(ComputedStyle::from_inline("visibility: hidden").is_hidden());
        assert!(ComputedStyle::from_inline("opacity: 0").is_hidden());
        assert!(!ComputedStyle::from_inline("opacity: 0.01").is_hidden());
        assert!(!ComputedStyle::new("block", "visible", 1.0).is_hidden());
        assert!(!ComputedStyle::from_inline("garbage").is_hidden());
    }
}
