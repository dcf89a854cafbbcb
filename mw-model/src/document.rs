//! The document root and its builder operations.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, trace};

use crate::construct::{BodyKind, Construct};
use crate::declaration::{Declaration, DeclarationMut, DeclarationOptions, Variability};
use crate::equation::{Algorithm, Connect, Equation, EquationOptions, Expression, Extends};
use crate::error::{Error, Result};
use crate::flags::{DocumentFlag, FlagSet};
use crate::import::{Import, ImportNames};
use crate::section::Section;
use crate::text::{CommentStyle, Text};
use crate::value::{Annotation, Modification, Scalar, Value};

/// Anything that can be placed in a section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Declaration(Declaration),
    Equation(Equation),
    Connect(Connect),
    Algorithm(Algorithm),
    Import(Import),
    Extends(Extends),
    Text(Text),
    Construct(Construct),
}

impl Element {
    /// Short name of the element kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Element::Declaration(_) => "declaration",
            Element::Equation(_) => "equation",
            Element::Connect(_) => "connection",
            Element::Algorithm(_) => "algorithm",
            Element::Import(_) => "import",
            Element::Extends(_) => "extends clause",
            Element::Text(_) => "text",
            Element::Construct(_) => "construct",
        }
    }

    fn allowed_in(&self, section: Section) -> bool {
        match self {
            Element::Declaration(_) | Element::Import(_) | Element::Extends(_) => {
                section.is_declarative()
            }
            Element::Equation(_) | Element::Connect(_) => section.is_equation(),
            Element::Algorithm(_) => section.is_algorithm(),
            Element::Construct(c) => match c.body_kind() {
                BodyKind::Equation => section.is_equation(),
                BodyKind::Statement => section.is_algorithm(),
                BodyKind::Expression => false,
            },
            Element::Text(_) => true,
        }
    }
}

/// Typed access to the payload of one [`Element`] variant.
trait ElementKind: Into<Element> {
    fn project(element: &mut Element) -> Option<&mut Self>;
}

macro_rules! element_from {
    ($($variant:ident),+ $(,)?) => {
        $(
            impl From<$variant> for Element {
                fn from(e: $variant) -> Self {
                    Element::$variant(e)
                }
            }

            impl ElementKind for $variant {
                fn project(element: &mut Element) -> Option<&mut Self> {
                    match element {
                        Element::$variant(e) => Some(e),
                        _ => None,
                    }
                }
            }
        )+
    };
}

element_from!(
    Declaration,
    Equation,
    Connect,
    Algorithm,
    Import,
    Extends,
    Text,
    Construct,
);

/// `within;` or `within A.B;`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Within {
    pub name: Option<String>,
}

impl Within {
    /// An empty name gives the top-level `within;`.
    pub fn new(name: &str) -> Self {
        Self {
            name: (!name.is_empty()).then(|| name.to_string()),
        }
    }
}

/// The six sections of a document, in rendering order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Sections {
    pub public: Vec<Element>,
    pub protected: Vec<Element>,
    pub initial_equation: Vec<Element>,
    pub initial_algorithm: Vec<Element>,
    pub equation: Vec<Element>,
    pub algorithm: Vec<Element>,
}

impl Sections {
    pub fn get(&self, section: Section) -> &[Element] {
        match section {
            Section::Public => &self.public,
            Section::Protected => &self.protected,
            Section::InitialEquation => &self.initial_equation,
            Section::InitialAlgorithm => &self.initial_algorithm,
            Section::Equation => &self.equation,
            Section::Algorithm => &self.algorithm,
        }
    }

    fn get_mut(&mut self, section: Section) -> &mut Vec<Element> {
        match section {
            Section::Public => &mut self.public,
            Section::Protected => &mut self.protected,
            Section::InitialEquation => &mut self.initial_equation,
            Section::InitialAlgorithm => &mut self.initial_algorithm,
            Section::Equation => &mut self.equation,
            Section::Algorithm => &mut self.algorithm,
        }
    }
}

/// Common simulation settings stored in the `experiment` annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Experiment {
    pub start: f64,
    pub stop: f64,
    pub tolerance: Option<f64>,
    pub interval: Option<f64>,
    pub extra: Modification,
}

impl Default for Experiment {
    fn default() -> Self {
        Self {
            start: 0.0,
            stop: 1.0,
            tolerance: None,
            interval: None,
            extra: Modification::new(),
        }
    }
}

impl Experiment {
    pub fn new(start: f64, stop: f64) -> Self {
        Self {
            start,
            stop,
            ..Self::default()
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    pub fn with_interval(mut self, interval: f64) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Any other experiment entry, e.g. `__Dymola_Algorithm`.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.set(name, value);
        self
    }
}

/// Drawing area as `((left, down), (right, up))`.
pub type Extent = ((f64, f64), (f64, f64));

/// The default drawing area.
pub const DEFAULT_EXTENT: Extent = ((-100.0, -100.0), (100.0, 100.0));

/// Graphical layer of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layer {
    Diagram,
    Icon,
    #[default]
    Both,
}

impl Layer {
    fn names(self) -> &'static [&'static str] {
        match self {
            Layer::Diagram => &["Diagram"],
            Layer::Icon => &["Icon"],
            Layer::Both => &["Diagram", "Icon"],
        }
    }
}

/// One model unit: header, six sections and an annotation.
///
/// ```
/// use modelwright_model::{DeclarationOptions, Document, EquationOptions};
///
/// let mut doc = Document::new("Decay");
/// doc.add_parameter("Real", "k", DeclarationOptions::new().value(0.5)).unwrap();
/// doc.add_declaration("Real", "x", DeclarationOptions::new().modify("start", 1)).unwrap();
/// doc.add_equation("der(x)", "-k*x", EquationOptions::new());
///
/// assert_eq!(doc.declarations().count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    ident: String,
    description: Option<String>,
    within: Option<Within>,
    flags: FlagSet<DocumentFlag>,
    annotation: Annotation,
    sections: Sections,
    #[serde(skip)]
    registry: IndexMap<String, (Section, usize)>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new("Unnamed")
    }
}

impl Document {
    pub fn new(ident: impl Into<String>) -> Self {
        Self {
            ident: ident.into(),
            description: None,
            within: None,
            flags: FlagSet::new(),
            annotation: Annotation::new(),
            sections: Sections::default(),
            registry: IndexMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the enclosing package; `""` gives a top-level `within;`.
    pub fn with_within(mut self, name: &str) -> Self {
        self.within = Some(Within::new(name));
        self
    }

    pub fn with_flag(mut self, flag: DocumentFlag) -> Self {
        self.flags.insert(flag);
        self
    }

    /// Add flags from a keyword list such as `"partial final"`.
    pub fn with_flags(mut self, keywords: &str) -> Result<Self> {
        for flag in FlagSet::<DocumentFlag>::parse(keywords)?.iter() {
            self.flags.insert(flag);
        }
        Ok(self)
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotation = annotation;
        self
    }

    pub fn ident(&self) -> &str {
        &self.ident
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn within(&self) -> Option<&Within> {
        self.within.as_ref()
    }

    pub fn flags(&self) -> &FlagSet<DocumentFlag> {
        &self.flags
    }

    pub fn annotation(&self) -> &Annotation {
        &self.annotation
    }

    pub fn annotation_mut(&mut self) -> &mut Annotation {
        &mut self.annotation
    }

    /// The elements of one section, in insertion order.
    pub fn section(&self, section: Section) -> &[Element] {
        self.sections.get(section)
    }

    pub fn sections(&self) -> &Sections {
        &self.sections
    }

    pub(crate) fn section_mut(&mut self, section: Section) -> &mut [Element] {
        self.sections.get_mut(section)
    }

    /// Look up a declaration by identifier.
    pub fn declaration(&self, ident: &str) -> Option<&Declaration> {
        let (section, index) = *self.registry.get(ident)?;
        match self.sections.get(section).get(index) {
            Some(Element::Declaration(decl)) => Some(decl),
            _ => None,
        }
    }

    /// Look up a declaration by identifier for modification.
    ///
    /// The handle edits modifications, annotation and placement only.
    pub fn declaration_mut(&mut self, ident: &str) -> Option<DeclarationMut<'_>> {
        let (section, index) = *self.registry.get(ident)?;
        match self.sections.get_mut(section).get_mut(index) {
            Some(Element::Declaration(decl)) => Some(DeclarationMut::new(decl)),
            _ => None,
        }
    }

    /// All declarations in registration order.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.registry
            .keys()
            .filter_map(|ident| self.declaration(ident))
    }

    /// Create a declaration and add it to its target section (public by default).
    pub fn add_declaration(
        &mut self,
        type_name: impl Into<String>,
        ident: impl Into<String>,
        options: DeclarationOptions,
    ) -> Result<DeclarationMut<'_>> {
        let ident = ident.into();
        let section = options.target_section();
        if !section.is_declarative() {
            return Err(Error::invariant(format!(
                "declaration '{ident}' cannot be placed in the {section} section"
            )));
        }
        self.check_unique(&ident)?;

        let decl = Declaration::from_options(type_name, ident, options)?;
        debug!(ident = decl.ident(), %section, "declaration added");
        self.push_as(section, decl).map(DeclarationMut::new)
    }

    /// [`add_declaration`](Self::add_declaration) with `parameter` variability.
    pub fn add_parameter(
        &mut self,
        type_name: impl Into<String>,
        ident: impl Into<String>,
        options: DeclarationOptions,
    ) -> Result<DeclarationMut<'_>> {
        self.add_declaration(
            type_name,
            ident,
            options.variability(Variability::Parameter),
        )
    }

    /// Append `left = right` to the equation (or initial equation) section.
    pub fn add_equation(
        &mut self,
        left: impl Into<Expression>,
        right: impl Into<Expression>,
        options: EquationOptions,
    ) {
        let equation = Equation {
            left: left.into(),
            right: right.into(),
            description: options.description,
            annotation: options.annotation,
        };
        debug!(left = equation.left.as_str(), "equation added");
        self.push(Section::equation(options.initial), equation.into());
    }

    /// Append `left := right` to the algorithm (or initial algorithm) section.
    pub fn add_algorithm(
        &mut self,
        left: impl Into<Expression>,
        right: impl Into<Expression>,
        options: EquationOptions,
    ) {
        let algorithm = Algorithm {
            left: left.into(),
            right: right.into(),
            description: options.description,
            annotation: options.annotation,
        };
        debug!(left = algorithm.left.as_str(), "algorithm added");
        self.push(Section::algorithm(options.initial), algorithm.into());
    }

    /// Connect two ports.
    ///
    /// Takes either two full references (`["a.p", "b.n"]`) or owner and port
    /// pairs (`["a", "p", "b", "n"]`).
    pub fn add_connection(&mut self, refs: &[&str]) -> Result<&mut Connect> {
        let connect = match refs {
            [a, b] => Connect::new(*a, *b),
            [owner1, port1, owner2, port2] => {
                Connect::new(format!("{owner1}.{port1}"), format!("{owner2}.{port2}"))
            }
            _ => {
                return Err(Error::invalid_arity(
                    "add_connection",
                    "2 or 4 references",
                    refs.len(),
                ));
            }
        };
        debug!(a = %connect.a, b = %connect.b, "connection added");
        self.push_as(Section::Equation, connect)
    }

    /// Add an import to the public section.
    ///
    /// No names gives `import A.B;`, a list gives `import A.{B, C};` and a
    /// single name gives the alias form `import B = A.B;`.
    pub fn add_import(
        &mut self,
        path: impl Into<String>,
        names: impl Into<ImportNames>,
    ) -> Result<&Import> {
        let path = path.into();
        let import = match names.into() {
            ImportNames::None => Import::Qualified { path },
            ImportNames::List(names) if names.is_empty() => {
                return Err(Error::invalid_arity("add_import", "at least one name", 0));
            }
            ImportNames::List(names) => Import::Multi { path, names },
            ImportNames::Alias(alias) => Import::Named { alias, path },
        };
        debug!(path = import.path(), "import added");
        self.push_as(Section::Public, import).map(|import| &*import)
    }

    /// Add `extends name(modifications);` to the public section.
    pub fn add_extends(&mut self, name: impl Into<String>, modifications: Modification) {
        let extends = Extends::new(name).with_modifications(modifications);
        self.push(Section::Public, extends.into());
    }

    /// Add raw lines to a section.
    pub fn add_text<I, S>(&mut self, lines: I, indent: bool, section: Section)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(section, Text::new(lines, indent).into());
    }

    /// Add a comment block to a section.
    pub fn add_comment<I, S>(
        &mut self,
        lines: I,
        style: CommentStyle,
        indent: bool,
        section: Section,
    ) where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.push(section, Text::comment(lines, style, indent).into());
    }

    /// Add any element to a section.
    ///
    /// Fails if the element does not belong in the section, or if a
    /// declaration's identifier is already taken. The added element is
    /// returned read-only.
    pub fn add(&mut self, element: impl Into<Element>, section: Section) -> Result<&Element> {
        let element = element.into();
        if !element.allowed_in(section) {
            return Err(Error::invariant(format!(
                "{} cannot be placed in the {section} section",
                element.kind()
            )));
        }
        if let Element::Declaration(decl) = &element {
            self.check_unique(decl.ident())?;
        }
        Ok(&*self.push(section, element))
    }

    /// [`add`](Self::add) with the section given by name, e.g. `"initial equation"`.
    pub fn add_to(&mut self, element: impl Into<Element>, section: &str) -> Result<&Element> {
        let section = section.parse::<Section>()?;
        self.add(element, section)
    }

    /// Set the `experiment` annotation. Start and stop times are only written
    /// when they differ from 0 and 1.
    pub fn set_experiment(&mut self, experiment: Experiment) -> Result<()> {
        let entry = self.annotation.path_mut(&["experiment"])?;
        if experiment.start != 0.0 {
            entry.set("StartTime", Scalar::number(experiment.start));
        }
        if experiment.stop != 1.0 {
            entry.set("StopTime", Scalar::number(experiment.stop));
        }
        if let Some(tolerance) = experiment.tolerance {
            entry.set("Tolerance", tolerance);
        }
        if let Some(interval) = experiment.interval {
            entry.set("Interval", interval);
        }
        for (name, value) in &experiment.extra {
            entry.set(name.clone(), value.clone());
        }
        Ok(())
    }

    /// Set the coordinate system extent of one or both graphical layers.
    pub fn set_extent(&mut self, extent: Extent, layer: Layer) -> Result<()> {
        let ((left, down), (right, up)) = extent;
        let value = Value::list([
            Value::point(Scalar::number(left), Scalar::number(down)),
            Value::point(Scalar::number(right), Scalar::number(up)),
        ]);
        for name in layer.names() {
            self.annotation
                .path_mut(&[*name, "coordinateSystem"])?
                .set("extent", value.clone());
        }
        Ok(())
    }

    /// Create an empty annotation map at `path` and return it.
    ///
    /// An existing entry at the end of the path is cleared when `replace` is
    /// set and is an error otherwise.
    pub fn add_annotation(&mut self, path: &[&str], replace: bool) -> Result<&mut Annotation> {
        let Some((last, parents)) = path.split_last() else {
            return Ok(&mut self.annotation);
        };
        let parent = self.annotation.path_mut(parents)?;
        if parent.contains(last) && !replace {
            return Err(Error::invariant(format!(
                "annotation '{}' already exists",
                path.join(".")
            )));
        }
        parent.set(*last, Modification::new());
        parent.path_mut(&[*last])
    }

    fn check_unique(&self, ident: &str) -> Result<()> {
        if self.registry.contains_key(ident) {
            return Err(Error::duplicate_identifier(ident, &self.ident));
        }
        Ok(())
    }

    fn push_as<T: ElementKind>(&mut self, section: Section, value: T) -> Result<&mut T> {
        let element = self.push(section, value.into());
        let kind = element.kind();
        T::project(element)
            .ok_or_else(|| Error::invariant(format!("{kind} was stored as another element kind")))
    }

    fn push(&mut self, section: Section, element: Element) -> &mut Element {
        let elements = self.sections.get_mut(section);
        if let Element::Declaration(decl) = &element {
            self.registry
                .insert(decl.ident().to_string(), (section, elements.len()));
        }
        trace!(%section, kind = element.kind(), "element pushed");
        elements.push(element);
        let last = elements.len() - 1;
        &mut elements[last]
    }
}
