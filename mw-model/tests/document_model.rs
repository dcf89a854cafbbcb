//! Building documents through the public API.

use modelwright_model::{
    ConstructBuilder, Declaration, DeclarationOptions, Document, DocumentFlag, Element, Equation,
    Error, EquationOptions, Flip, Modification, Placement, Section, Statement, Value,
    draw_connections, geometry::position_between,
};

fn lotka_volterra() -> Document {
    let mut doc = Document::new("LotkaVolterra").with_description("Predator and prey");
    for (ident, value) in [("alpha", 0.1), ("beta", 0.02), ("gamma", 0.4), ("delta", 0.02)] {
        doc.add_parameter("Real", ident, DeclarationOptions::new().value(value))
            .unwrap();
    }
    doc.add_declaration("Real", "x", DeclarationOptions::new().modify("start", 10))
        .unwrap();
    doc.add_declaration("Real", "y", DeclarationOptions::new().modify("start", 10))
        .unwrap();
    doc.add_equation("der(x)", "alpha*x - beta*x*y", EquationOptions::new());
    doc.add_equation("der(y)", "delta*x*y - gamma*y", EquationOptions::new());
    doc
}

#[test]
fn test_declarations_keep_call_order() {
    let doc = lotka_volterra();
    let idents: Vec<_> = doc.declarations().map(|d| d.ident()).collect();
    assert_eq!(idents, ["alpha", "beta", "gamma", "delta", "x", "y"]);
    assert_eq!(doc.section(Section::Equation).len(), 2);
}

#[test]
fn test_duplicate_leaves_document_unchanged() {
    let mut doc = lotka_volterra();
    let before = doc.clone();

    let err = doc
        .add_declaration("Integer", "x", DeclarationOptions::new().protected())
        .unwrap_err();
    assert!(matches!(*err, Error::DuplicateIdentifier { .. }));
    assert_eq!(doc, before);
}

#[test]
fn test_modification_access_after_creation() {
    let mut doc = lotka_volterra();
    let mut x = doc.declaration_mut("x").unwrap();
    x.set("fixed", true);
    x.set("start", 5);

    let x = doc.declaration("x").unwrap();
    let keys: Vec<_> = x.modifications().iter().map(|(k, _)| k).collect();
    assert_eq!(keys, ["start", "fixed"]);
    assert_eq!(x.get("start"), Some(&Value::from(5)));
}

#[test]
fn test_identifiers_stay_unique_after_edits() {
    let mut doc = Document::new("M");
    {
        let mut x = doc
            .add_declaration("Real", "x", DeclarationOptions::new())
            .unwrap();
        x.set("start", 1);
        x.set_placement(&Placement::at(10.0, 10.0)).unwrap();
        assert_eq!(x.ident(), "x");
    }
    let added = doc.add(Declaration::new("Real", "y"), Section::Protected).unwrap();
    assert_eq!(added.kind(), "declaration");

    for section in [Section::Public, Section::Protected] {
        for ident in ["x", "y"] {
            let err = doc
                .add_declaration("Real", ident, DeclarationOptions::new().section(section))
                .unwrap_err();
            assert!(matches!(*err, Error::DuplicateIdentifier { .. }));
            let err = doc.add(Declaration::new("Real", ident), section).unwrap_err();
            assert!(matches!(*err, Error::DuplicateIdentifier { .. }));
        }
    }

    let idents: Vec<_> = doc.declarations().map(|d| d.ident()).collect();
    assert_eq!(idents, ["x", "y"]);
    assert_eq!(doc.declaration("x").unwrap().ident(), "x");
    assert_eq!(doc.declaration("y").unwrap().ident(), "y");
    assert_eq!(doc.section(Section::Public).len(), 1);
    assert_eq!(doc.section(Section::Protected).len(), 1);
}

#[test]
fn test_map_value_is_taken_as_modifications() {
    let mut doc = Document::new("M");
    let x = doc
        .add_declaration(
            "X",
            "x",
            DeclarationOptions::new().value(Modification::new().with("y", 1)),
        )
        .unwrap();
    assert!(x.value().is_none());
    assert_eq!(x.get("y"), Some(&Value::from(1)));

    let err = doc
        .add_declaration(
            "X",
            "z",
            DeclarationOptions::new()
                .modify("y", 2)
                .value(Modification::new().with("y", 1)),
        )
        .unwrap_err();
    assert!(matches!(*err, Error::InvariantViolation { .. }));
    assert!(doc.declaration("z").is_none());
}

#[test]
fn test_connection_arity() {
    let mut doc = Document::default();
    let two = doc.add_connection(&["a.p", "b.n"]).unwrap();
    assert_eq!((two.a.as_str(), two.b.as_str()), ("a.p", "b.n"));

    let four = doc.add_connection(&["a", "p", "b", "n"]).unwrap();
    assert_eq!((four.a.as_str(), four.b.as_str()), ("a.p", "b.n"));

    let err = doc.add_connection(&["a", "b", "c"]).unwrap_err();
    assert!(matches!(*err, Error::InvalidArity { got: 3, .. }));
    assert_eq!(doc.section(Section::Equation).len(), 2);
}

#[test]
fn test_placed_circuit_gets_lines() {
    let mut doc = Document::new("Circuit");
    let source = (0.0, 40.0);
    let load = (0.0, -40.0);
    doc.add_declaration(
        "VoltageSource",
        "source",
        DeclarationOptions::new().placement(Placement::at(source.0, source.1)),
    )
    .unwrap();
    doc.add_declaration(
        "Resistor",
        "load",
        DeclarationOptions::new()
            .placement(Placement::at(load.0, load.1).with_flip(Flip::Vertical)),
    )
    .unwrap();
    doc.add_declaration("Ground", "ground", DeclarationOptions::new())
        .unwrap();
    doc.add_connection(&["source", "n", "load", "p"]).unwrap();
    doc.add_connection(&["load", "n", "ground", "p"]).unwrap();

    // only the first connection joins two placed declarations
    assert_eq!(draw_connections(&mut doc).unwrap(), 1);

    let between = position_between(source, load);
    assert_eq!(between.origin, (0.0, 0.0));
    assert_eq!(between.rotation, Some(270.0));
}

#[test]
fn test_constructs_go_to_matching_sections() {
    let mut doc = Document::default();
    let statements = ConstructBuilder::while_("i < 3")
        .repeat([Statement::new("i := i + 1")])
        .unwrap()
        .end()
        .unwrap();
    let err = doc.add(statements.clone(), Section::Equation).unwrap_err();
    assert!(matches!(*err, Error::InvariantViolation { .. }));
    doc.add(statements, Section::Algorithm).unwrap();

    let equations = ConstructBuilder::if_("c")
        .then([Equation::new("y", "1")])
        .unwrap()
        .orelse([Equation::new("y", "2")])
        .unwrap()
        .end()
        .unwrap();
    doc.add_to(equations, "initial equation").unwrap();
    assert!(matches!(
        doc.section(Section::InitialEquation),
        [Element::Construct(_)]
    ));

    let err = doc.add_to(Equation::new("a", "b"), "equations").unwrap_err();
    assert!(matches!(*err, Error::UnknownSection { .. }));
}

#[test]
fn test_document_flags_parse() {
    let doc = Document::new("P").with_flags("partial final").unwrap();
    assert!(doc.flags().contains(DocumentFlag::Partial));
    assert!(doc.flags().contains(DocumentFlag::Final));
    assert!(!doc.flags().contains(DocumentFlag::Encapsulated));

    let err = Document::new("P").with_flags("partial abstract").unwrap_err();
    assert!(matches!(*err, Error::UnknownFlag { ref flag, .. } if flag == "abstract"));
}

#[test]
fn test_serializes_to_json() {
    let doc = lotka_volterra();
    let json = serde_json::to_value(&doc).unwrap();

    assert_eq!(json["ident"], "LotkaVolterra");
    assert_eq!(json["description"], "Predator and prey");
    assert!(json["within"].is_null());
    assert!(json.get("registry").is_none());

    let public = json["sections"]["public"].as_array().unwrap();
    assert_eq!(public.len(), 6);
    assert_eq!(public[4]["declaration"]["ident"], "x");
    assert_eq!(public[4]["declaration"]["modifications"]["start"]["scalar"], 10);
    assert_eq!(public[0]["declaration"]["variability"], "parameter");

    let equations = json["sections"]["equation"].as_array().unwrap();
    assert_eq!(equations[0]["equation"]["left"], "der(x)");
}
