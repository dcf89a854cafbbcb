//! Recursive pretty printer over the document tree.
//!
//! The printer walks a tree depth first and writes into an [`Emitter`]. It
//! keeps a path of names (document, section, declaration, modification key)
//! so that a value it cannot express is reported with its location, e.g.
//! `Circuit/public/resistor/R`.

use modelwright_model::{
    Algorithm, Annotation, Assign, BodyKind, Clause, Connect, Construct, ConstructKind, Declaration,
    DeclarationFlag, Document, Element, Equation, Error, Extends, Flag, Import, Modification,
    Result, Scalar, Section, Text, Value, format_significant, quote,
};

use crate::{Emitter, RenderOptions};

/// Renderer state for one render call.
#[derive(Debug)]
pub struct Printer {
    out: Emitter,
    path: Vec<String>,
}

impl Printer {
    pub fn new(options: &RenderOptions) -> Self {
        Self {
            out: Emitter::new(options.indent, options.start_indent),
            path: Vec::new(),
        }
    }

    /// Consume the printer and return the text.
    pub fn finish(self) -> String {
        self.out.finish()
    }

    fn scoped<T>(
        &mut self,
        segment: impl Into<String>,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        self.path.push(segment.into());
        let result = f(self);
        self.path.pop();
        result
    }

    fn unsupported(&self, kind: impl Into<String>) -> Box<Error> {
        Error::unsupported_node(kind, self.path.join("/"))
    }

    // -- documents and elements ---------------------------------------------

    pub fn document(&mut self, doc: &Document) -> Result<()> {
        self.scoped(doc.ident(), |p| {
            if let Some(within) = doc.within() {
                match &within.name {
                    Some(name) => p.out.line(&format!("within {name};")),
                    None => p.out.line("within;"),
                }
            }

            p.out.write_indent();
            for flag in doc.flags().iter() {
                p.out.write(flag.keyword());
                p.out.write(" ");
            }
            p.out.write("model ");
            p.out.write(doc.ident());
            p.description(doc.description());
            p.out.newline();

            p.out.indent();
            for section in Section::ALL {
                let elements = doc.section(section);
                if section != Section::Public {
                    if elements.is_empty() {
                        continue;
                    }
                    p.out.dedent();
                    p.out.line(section.keyword());
                    p.out.indent();
                }
                p.scoped(section.keyword(), |p| p.elements(elements))?;
            }

            if !doc.annotation().is_empty() {
                p.scoped("annotation", |p| {
                    p.out.write("annotation ");
                    p.modification(doc.annotation())?;
                    p.out.write(";");
                    p.out.newline();
                    Ok(())
                })?;
            }
            p.out.dedent();

            p.out.line(&format!("end {};", doc.ident()));
            Ok(())
        })
    }

    fn elements(&mut self, elements: &[Element]) -> Result<()> {
        for (i, element) in elements.iter().enumerate() {
            let segment = match element {
                Element::Declaration(decl) => decl.ident().to_string(),
                other => format!("{}[{i}]", other.kind()),
            };
            self.scoped(segment, |p| p.element(element))?;
        }
        Ok(())
    }

    pub fn element(&mut self, element: &Element) -> Result<()> {
        match element {
            Element::Declaration(decl) => self.declaration(decl),
            Element::Equation(eq) => self.equation(eq),
            Element::Connect(connect) => self.connect(connect),
            Element::Algorithm(alg) => self.algorithm(alg),
            Element::Import(import) => {
                self.import(import);
                Ok(())
            }
            Element::Extends(extends) => self.extends(extends),
            Element::Text(text) => {
                self.text(text);
                Ok(())
            }
            Element::Construct(construct) => self.construct(construct),
        }
    }

    pub fn declaration(&mut self, decl: &Declaration) -> Result<()> {
        self.out.write_indent();
        for flag in decl.flags().iter_among(DeclarationFlag::RENDERED) {
            self.out.write(flag.keyword());
            self.out.write(" ");
        }
        let prefixes = [
            decl.flow_kind().map(|k| k.keyword()),
            decl.variability().map(|v| v.keyword()),
            decl.causality().map(|c| c.keyword()),
        ];
        for keyword in prefixes.into_iter().flatten() {
            self.out.write(keyword);
            self.out.write(" ");
        }

        self.out.write(decl.type_name());
        if !decl.subscripts().is_empty() {
            self.out.write(&format!("[{}]", decl.subscripts().join(",")));
        }
        self.out.write(" ");
        self.out.write(decl.ident());
        self.modification(decl.modifications())?;

        if let Some(value) = decl.value() {
            let literal = self.scoped("value", |p| p.literal(value))?;
            self.out.write(if decl.modifications().is_empty() {
                "="
            } else {
                " = "
            });
            self.out.write(&literal);
        }
        if let Some(condition) = decl.condition() {
            self.out.write(" if ");
            self.out.write(condition);
        }
        self.description(decl.description());
        self.annotation(decl.annotation())?;
        self.out.write(";");
        self.out.newline();
        Ok(())
    }

    pub fn equation(&mut self, eq: &Equation) -> Result<()> {
        self.out.write_indent();
        self.out
            .write(&format!("{} = {}", eq.left.as_str(), eq.right.as_str()));
        self.close_statement(eq.description.as_deref(), &eq.annotation)
    }

    pub fn algorithm(&mut self, alg: &Algorithm) -> Result<()> {
        self.out.write_indent();
        self.out
            .write(&format!("{} := {}", alg.left.as_str(), alg.right.as_str()));
        self.close_statement(alg.description.as_deref(), &alg.annotation)
    }

    pub fn connect(&mut self, connect: &Connect) -> Result<()> {
        self.out.write_indent();
        self.out
            .write(&format!("connect({}, {})", connect.a, connect.b));
        self.close_statement(connect.description.as_deref(), &connect.annotation)
    }

    fn close_statement(&mut self, description: Option<&str>, annotation: &Annotation) -> Result<()> {
        self.description(description);
        self.annotation(annotation)?;
        self.out.write(";");
        self.out.newline();
        Ok(())
    }

    pub fn import(&mut self, import: &Import) {
        let line = match import {
            Import::Qualified { path } => format!("import {path};"),
            Import::Multi { path, names } => format!("import {path}.{{{}}};", names.join(", ")),
            Import::Named { alias, path } => format!("import {alias} = {path};"),
        };
        self.out.line(&line);
    }

    pub fn extends(&mut self, extends: &Extends) -> Result<()> {
        self.out.write_indent();
        self.out.write("extends ");
        self.out.write(&extends.name);
        self.modification(&extends.modifications)?;
        self.out.write(";");
        self.out.newline();
        Ok(())
    }

    pub fn text(&mut self, text: &Text) {
        for line in &text.lines {
            if text.indent {
                self.out.write_indent();
            }
            self.out.write(line);
            self.out.newline();
        }
    }

    // -- constructs ---------------------------------------------------------

    pub fn construct(&mut self, construct: &Construct) -> Result<()> {
        if construct.body_kind() == BodyKind::Expression {
            let expression = construct.inline()?;
            self.out.line(expression.as_str());
            return Ok(());
        }

        let kind = construct.kind();
        self.out.write_indent();
        match kind {
            ConstructKind::For => {
                let indices: Vec<String> = construct
                    .indices()
                    .iter()
                    .map(|index| format!("{} in {}", index.ident, index.range.as_str()))
                    .collect();
                self.out.write(&format!("for {} loop", indices.join(", ")));
            }
            ConstructKind::While => {
                let test = self.test(construct)?;
                self.out.write(&format!("while {test} loop"));
            }
            ConstructKind::If | ConstructKind::When => {
                let test = self.test(construct)?;
                self.out.write(&format!("{kind} {test} then"));
            }
        }
        self.out.newline();
        self.clauses(construct.body())?;

        if let Some(keyword) = kind.branch_keyword() {
            for (i, branch) in construct.branches().iter().enumerate() {
                self.out
                    .line(&format!("{keyword} {} then", branch.test.as_str()));
                self.scoped(format!("{keyword}[{i}]"), |p| p.clauses(&branch.body))?;
            }
        }
        if let Some(orelse) = construct.orelse() {
            self.out.line("else");
            self.scoped("else", |p| p.clauses(orelse))?;
        }

        self.out.line(&format!("end {kind};"));
        Ok(())
    }

    fn test<'a>(&self, construct: &'a Construct) -> Result<&'a str> {
        construct
            .test()
            .map(|test| test.as_str())
            .ok_or_else(|| self.unsupported(format!("{} without a test", construct.kind())))
    }

    fn clauses(&mut self, clauses: &[Clause]) -> Result<()> {
        self.out.indent();
        for clause in clauses {
            self.clause(clause)?;
        }
        self.out.dedent();
        Ok(())
    }

    pub fn clause(&mut self, clause: &Clause) -> Result<()> {
        match clause {
            Clause::Equation(eq) => self.equation(eq),
            Clause::Connect(connect) => self.connect(connect),
            Clause::Algorithm(alg) => self.algorithm(alg),
            Clause::Statement(statement) => {
                self.out.line(&format!("{};", statement.as_str()));
                Ok(())
            }
            Clause::Expression(expression) => {
                self.out.line(expression.as_str());
                Ok(())
            }
            Clause::Construct(construct) => self.construct(construct),
        }
    }

    // -- modifications and values -------------------------------------------

    fn description(&mut self, description: Option<&str>) {
        if let Some(description) = description {
            self.out.write(" ");
            self.out.write(&quote(description));
        }
    }

    fn annotation(&mut self, annotation: &Annotation) -> Result<()> {
        if annotation.is_empty() {
            return Ok(());
        }
        self.scoped("annotation", |p| {
            p.out.write(" annotation ");
            p.modification(annotation)
        })
    }

    /// Write a modification map with arity dependent layout.
    ///
    /// Nothing for an empty map, `(a=1)` and `(a=1, b=2)` on one line, and
    /// one entry per line one level deeper for anything longer.
    pub fn modification(&mut self, modification: &Modification) -> Result<()> {
        let n = modification.len();
        match n {
            0 => {}
            1 | 2 => {
                self.out.write("(");
                for (i, (key, value)) in modification.iter().enumerate() {
                    if i > 0 {
                        self.out.write(", ");
                    }
                    self.entry(key, value)?;
                }
                self.out.write(")");
            }
            _ => {
                self.out.indent();
                self.out.write("(");
                self.out.newline();
                for (i, (key, value)) in modification.iter().enumerate() {
                    self.out.write_indent();
                    self.entry(key, value)?;
                    if i + 1 < n {
                        self.out.write(",");
                        self.out.newline();
                    }
                }
                self.out.dedent();
                self.out.write(")");
            }
        }
        Ok(())
    }

    fn entry(&mut self, key: &str, value: &Value) -> Result<()> {
        self.scoped(key, |p| match value {
            Value::Scalar(scalar) => {
                let scalar = p.scalar(scalar, None)?;
                p.out.write(&format!("{key}={scalar}"));
                Ok(())
            }
            Value::Tuple(items) => {
                let items = p.scalars(items, ", ")?;
                p.out.write(&format!("{key}={{{items}}}"));
                Ok(())
            }
            Value::Map(map) => {
                p.out.write(key);
                p.modification(map)
            }
            Value::Assign(assign) => p.assign(key, assign),
            Value::List(items) => {
                p.out.write(key);
                p.list(items)
            }
        })
    }

    fn assign(&mut self, key: &str, assign: &Assign) -> Result<()> {
        assign.validate()?;

        for flag in assign.flags().iter() {
            self.out.write(flag.keyword());
            self.out.write(" ");
        }
        if let Some(type_name) = assign.type_name() {
            self.out.write(type_name);
            self.out.write(" ");
        }
        self.out.write(key);
        self.modification(assign.modifications())?;

        if let Some(value) = assign.value() {
            let value = self.scalar(value, assign.precision())?;
            self.out.write(if assign.modifications().is_empty() {
                "="
            } else {
                " = "
            });
            self.out.write(&value);
        }
        self.description(assign.description());
        self.annotation(assign.annotation())
    }

    /// Lists as used by graphical annotations.
    fn list(&mut self, items: &[Value]) -> Result<()> {
        let Some(first) = items.first() else {
            self.out.write("={}");
            return Ok(());
        };

        match first {
            Value::Map(_) => {
                self.out.write("={");
                self.out.newline();
                self.out.indent();
                for (i, item) in items.iter().enumerate() {
                    let Value::Map(map) = item else {
                        return Err(self.unsupported(format!("list mixing map and {}", item.kind())));
                    };
                    let mut entries = map.iter();
                    let (Some((name, value)), None) = (entries.next(), entries.next()) else {
                        return Err(self.unsupported(format!(
                            "list element with {} entries",
                            map.len()
                        )));
                    };
                    self.out.write_indent();
                    self.scoped(format!("[{i}]"), |p| p.entry(name, value))?;
                    if i + 1 < items.len() {
                        self.out.write(",");
                        self.out.newline();
                    }
                }
                self.out.dedent();
                self.out.newline();
                self.out.write_indent();
                self.out.write("}");
            }
            Value::List(_) | Value::Tuple(_) => {
                let mut rows = Vec::with_capacity(items.len());
                for item in items {
                    let row = match item {
                        Value::List(values) => self.scalar_values(values)?,
                        Value::Tuple(scalars) => self.scalars(scalars, ",")?,
                        other => {
                            return Err(
                                self.unsupported(format!("list mixing lists and {}", other.kind()))
                            );
                        }
                    };
                    rows.push(format!("{{{row}}}"));
                }
                self.out.write(&format!("={{{}}}", rows.join(",")));
            }
            Value::Scalar(_) => {
                let row = self.scalar_values(items)?;
                self.out.write(&format!("={{{row}}}"));
            }
            other => return Err(self.unsupported(format!("list of {}", other.kind()))),
        }
        Ok(())
    }

    /// Join list members that must all be scalars.
    fn scalar_values(&self, values: &[Value]) -> Result<String> {
        let mut parts = Vec::with_capacity(values.len());
        for value in values {
            match value {
                Value::Scalar(scalar) => parts.push(self.scalar(scalar, None)?),
                other => {
                    return Err(self.unsupported(format!("{} inside a list row", other.kind())));
                }
            }
        }
        Ok(parts.join(","))
    }

    fn scalars(&self, scalars: &[Scalar], separator: &str) -> Result<String> {
        let parts = scalars
            .iter()
            .map(|scalar| self.scalar(scalar, None))
            .collect::<Result<Vec<_>>>()?;
        Ok(parts.join(separator))
    }

    fn scalar(&self, scalar: &Scalar, precision: Option<usize>) -> Result<String> {
        Ok(match scalar {
            Scalar::Bool(b) => b.to_string(),
            Scalar::Integer(i) => i.to_string(),
            Scalar::Real(r) if !r.is_finite() => {
                return Err(self.unsupported(format!("non-finite real {r}")));
            }
            Scalar::Real(r) => match precision {
                Some(digits) => format_significant(*r, digits),
                None => format!("{r:?}"),
            },
            Scalar::String(s) => s.clone(),
        })
    }

    /// The literal of a declaration binding: a scalar, a tuple, or the
    /// literal of an assignment.
    fn literal(&self, value: &Value) -> Result<String> {
        match value {
            Value::Scalar(scalar) => self.scalar(scalar, None),
            Value::Tuple(items) => Ok(format!("{{{}}}", self.scalars(items, ", ")?)),
            Value::Assign(assign) => match assign.value() {
                Some(scalar) => self.scalar(scalar, assign.precision()),
                None => Err(self.unsupported("assignment without a literal")),
            },
            other => Err(self.unsupported(format!("{} as declaration value", other.kind()))),
        }
    }
}
