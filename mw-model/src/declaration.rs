//! Declarations: typed, named slots of a document.

use std::fmt;
use std::ops::Deref;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::flags::{DeclarationFlag, FlagSet};
use crate::placement::Placement;
use crate::section::Section;
use crate::value::{Annotation, Modification, Value};

macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $kw:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $(
                #[doc = concat!("`", $kw, "`")]
                $variant
            ),+
        }

        impl $name {
            /// The source keyword.
            pub fn keyword(self) -> &'static str {
                match self {
                    $(Self::$variant => $kw),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.keyword())
            }
        }
    };
}

keyword_enum! {
    /// Variability prefix of a declaration.
    Variability {
        Constant => "constant",
        Parameter => "parameter",
        Discrete => "discrete",
    }
}

keyword_enum! {
    /// Causality prefix of a declaration.
    Causality {
        Input => "input",
        Output => "output",
    }
}

keyword_enum! {
    /// Flow prefix of a connector variable.
    FlowKind {
        Flow => "flow",
        Stream => "stream",
    }
}

/// A typed, named slot: `parameter Real x(min=0) = 1 "doc";`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Declaration {
    type_name: String,
    ident: String,
    value: Option<Value>,
    modifications: Modification,
    variability: Option<Variability>,
    causality: Option<Causality>,
    flow_kind: Option<FlowKind>,
    flags: FlagSet<DeclarationFlag>,
    subscripts: Vec<String>,
    condition: Option<String>,
    description: Option<String>,
    annotation: Annotation,
}

impl Declaration {
    /// Create a bare declaration `type_name ident;`.
    pub fn new(type_name: impl Into<String>, ident: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ident: ident.into(),
            value: None,
            modifications: Modification::new(),
            variability: None,
            causality: None,
            flow_kind: None,
            flags: FlagSet::new(),
            subscripts: Vec::new(),
            condition: None,
            description: None,
            annotation: Annotation::new(),
        }
    }

    /// Create a declaration from builder options.
    ///
    /// Placement options are written into the `Placement` annotation. A map
    /// given as the value becomes the modification map, so `value` and
    /// `modifications` cannot both carry entries.
    pub fn from_options(
        type_name: impl Into<String>,
        ident: impl Into<String>,
        options: DeclarationOptions,
    ) -> Result<Self> {
        let DeclarationOptions {
            value,
            modifications,
            variability,
            causality,
            flow_kind,
            flags,
            subscripts,
            condition,
            description,
            annotation,
            placement,
            section: _,
        } = options;

        let (value, modifications) = match value {
            Some(Value::Map(map)) if !modifications.is_empty() => {
                let ident: String = ident.into();
                return Err(Error::invariant(format!(
                    "declaration '{ident}' has both a map value and modifications ({} entries)",
                    map.len()
                )));
            }
            Some(Value::Map(map)) => (None, map),
            value => (value, modifications),
        };

        let mut decl = Self {
            type_name: type_name.into(),
            ident: ident.into(),
            value,
            modifications,
            variability,
            causality,
            flow_kind,
            flags,
            subscripts,
            condition,
            description,
            annotation,
        };
        if let Some(placement) = placement {
            placement.apply(&decl.ident, &mut decl.annotation)?;
        }
        Ok(decl)
    }

    /// Set a modification entry, returning the previous value.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.modifications.set(field, value)
    }

    /// Get a modification entry.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.modifications.get(field)
    }

    /// Get a modification entry mutably.
    pub fn get_mut(&mut self, field: &str) -> Option<&mut Value> {
        self.modifications.get_mut(field)
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn ident(&self) -> &str {
        &self.ident
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn modifications(&self) -> &Modification {
        &self.modifications
    }

    pub fn variability(&self) -> Option<Variability> {
        self.variability
    }

    pub fn causality(&self) -> Option<Causality> {
        self.causality
    }

    pub fn flow_kind(&self) -> Option<FlowKind> {
        self.flow_kind
    }

    pub fn flags(&self) -> &FlagSet<DeclarationFlag> {
        &self.flags
    }

    pub fn subscripts(&self) -> &[String] {
        &self.subscripts
    }

    pub fn condition(&self) -> Option<&str> {
        self.condition.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn annotation(&self) -> &Annotation {
        &self.annotation
    }

    /// Presentation metadata lives in the annotation and stays editable.
    pub fn annotation_mut(&mut self) -> &mut Annotation {
        &mut self.annotation
    }

    /// Move the declaration to a new placement.
    pub fn set_placement(&mut self, placement: &Placement) -> Result<()> {
        placement.apply(&self.ident, &mut self.annotation)
    }
}

/// Edit access to a declaration that already belongs to a document.
///
/// Only the modification map, the annotation and the placement can change.
/// The identifier and the rest of the header are fixed once added.
#[derive(Debug)]
pub struct DeclarationMut<'a> {
    decl: &'a mut Declaration,
}

impl<'a> DeclarationMut<'a> {
    pub(crate) fn new(decl: &'a mut Declaration) -> Self {
        Self { decl }
    }

    /// Set a modification entry, returning the previous value.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.decl.set(field, value)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.decl.get(field)
    }

    pub fn get_mut(&mut self, field: &str) -> Option<&mut Value> {
        self.decl.get_mut(field)
    }

    pub fn annotation_mut(&mut self) -> &mut Annotation {
        self.decl.annotation_mut()
    }

    pub fn set_placement(&mut self, placement: &Placement) -> Result<()> {
        self.decl.set_placement(placement)
    }
}

impl Deref for DeclarationMut<'_> {
    type Target = Declaration;

    fn deref(&self) -> &Declaration {
        &*self.decl
    }
}

/// Options for [`Document::add_declaration`](crate::Document::add_declaration).
///
/// # Example
///
/// ```
/// use modelwright_model::{DeclarationOptions, Document};
///
/// let mut doc = Document::new("Pendulum");
/// doc.add_declaration("Real", "l", DeclarationOptions::new().value(1).parameter())
///     .unwrap();
/// assert!(doc.declaration("l").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DeclarationOptions {
    pub(crate) value: Option<Value>,
    pub(crate) modifications: Modification,
    pub(crate) variability: Option<Variability>,
    pub(crate) causality: Option<Causality>,
    pub(crate) flow_kind: Option<FlowKind>,
    pub(crate) flags: FlagSet<DeclarationFlag>,
    pub(crate) subscripts: Vec<String>,
    pub(crate) condition: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) annotation: Annotation,
    pub(crate) placement: Option<Placement>,
    pub(crate) section: Option<Section>,
}

impl DeclarationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Literal value: `x = value`.
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Replace the whole modification map.
    pub fn modifications(mut self, modifications: Modification) -> Self {
        self.modifications = modifications;
        self
    }

    /// Add one modification entry.
    pub fn modify(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.modifications.set(field, value);
        self
    }

    /// Shorthand for `variability(Variability::Parameter)`.
    pub fn parameter(self) -> Self {
        self.variability(Variability::Parameter)
    }

    /// Shorthand for `section(Section::Protected)`.
    pub fn protected(self) -> Self {
        self.section(Section::Protected)
    }

    /// Target section; defaults to public.
    pub fn section(mut self, section: Section) -> Self {
        self.section = Some(section);
        self
    }

    pub fn variability(mut self, variability: Variability) -> Self {
        self.variability = Some(variability);
        self
    }

    pub fn causality(mut self, causality: Causality) -> Self {
        self.causality = Some(causality);
        self
    }

    pub fn flow_kind(mut self, flow_kind: FlowKind) -> Self {
        self.flow_kind = Some(flow_kind);
        self
    }

    pub fn flag(mut self, flag: DeclarationFlag) -> Self {
        self.flags.insert(flag);
        self
    }

    /// Add flags from a keyword list such as `"inner outer"`.
    pub fn flags(mut self, keywords: &str) -> Result<Self> {
        for flag in FlagSet::<DeclarationFlag>::parse(keywords)?.iter() {
            self.flags.insert(flag);
        }
        Ok(self)
    }

    pub fn subscripts<I, S>(mut self, subscripts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subscripts = subscripts.into_iter().map(Into::into).collect();
        self
    }

    /// Conditional declaration: `... if condition`.
    pub fn condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn annotation(mut self, annotation: Annotation) -> Self {
        self.annotation = annotation;
        self
    }

    /// Diagram placement, stored in the `Placement` annotation.
    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = Some(placement);
        self
    }

    pub(crate) fn target_section(&self) -> Section {
        self.section.unwrap_or(Section::Public)
    }
}
