use serde::Serialize;

/// An import clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Import {
    /// `import A.B.C;` or `import A.B.*;`
    Qualified { path: String },
    /// `import A.B.{C, D};`
    Multi { path: String, names: Vec<String> },
    /// `import Alias = A.B;`
    Named { alias: String, path: String },
}

impl Import {
    pub fn path(&self) -> &str {
        match self {
            Import::Qualified { path } | Import::Multi { path, .. } | Import::Named { path, .. } => {
                path
            }
        }
    }
}

/// What follows the path of an import; picks the import form.
///
/// ```
/// use modelwright_model::ImportNames;
///
/// assert_eq!(ImportNames::from(()), ImportNames::None);
/// assert_eq!(ImportNames::from("C"), ImportNames::Alias("C".into()));
/// assert_eq!(
///     ImportNames::from(vec!["C", "CC"]),
///     ImportNames::List(vec!["C".into(), "CC".into()]),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImportNames {
    #[default]
    None,
    List(Vec<String>),
    Alias(String),
}

impl From<()> for ImportNames {
    fn from(_: ()) -> Self {
        ImportNames::None
    }
}

impl From<&str> for ImportNames {
    fn from(alias: &str) -> Self {
        ImportNames::Alias(alias.to_string())
    }
}

impl From<String> for ImportNames {
    fn from(alias: String) -> Self {
        ImportNames::Alias(alias)
    }
}

impl From<Vec<&str>> for ImportNames {
    fn from(names: Vec<&str>) -> Self {
        ImportNames::List(names.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for ImportNames {
    fn from(names: Vec<String>) -> Self {
        ImportNames::List(names)
    }
}

impl<const N: usize> From<[&str; N]> for ImportNames {
    fn from(names: [&str; N]) -> Self {
        ImportNames::List(names.into_iter().map(str::to_string).collect())
    }
}
