use serde::{Deserialize, Serialize};

/// Indentation unit for one nesting level.
///
/// In TOML: `indent = { spaces = 2 }` or `indent = "tab"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Indent {
    /// Spaces with the specified width (e.g., 2 or 4).
    Spaces(u8),
    /// Tab character.
    Tab,
}

impl Indent {
    /// Two spaces, the customary Modelica indentation.
    pub const MODELICA: Self = Self::Spaces(2);

    /// The text written for one indent level.
    pub fn unit(&self) -> String {
        match self {
            Self::Spaces(n) => " ".repeat(usize::from(*n)),
            Self::Tab => "\t".to_string(),
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::MODELICA
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit() {
        assert_eq!(Indent::default().unit(), "  ");
        assert_eq!(Indent::Spaces(3).unit(), "   ");
        assert_eq!(Indent::Spaces(0).unit(), "");
        assert_eq!(Indent::Tab.unit(), "\t");
    }
}
