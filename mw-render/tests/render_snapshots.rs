//! Snapshot tests for rendered model source.
//!
//! Whole documents are compared with inline snapshots; outputs where leading
//! indentation or the final newline matter use `assert_eq!`.

use modelwright_model::units::{KV, MW};
use modelwright_model::{
    Algorithm, Annotation, Assign, AssignFlag, Causality, Clause, CommentStyle, ConstructBuilder,
    Declaration, DeclarationFlag, DeclarationOptions, Document, Equation, EquationOptions, Error,
    Experiment, Expression, FlowKind, ForIndex, Modification, Section, Statement, Value,
    Variability,
};
use modelwright_render::{Indent, RenderOptions, render};

fn render_default<N: modelwright_render::Render + ?Sized>(node: &N) -> String {
    render(node, &RenderOptions::default()).expect("render failed")
}

fn declaration(type_name: &str, ident: &str, options: DeclarationOptions) -> Declaration {
    Declaration::from_options(type_name, ident, options).expect("invalid declaration")
}

#[test]
fn test_default_model() {
    assert_eq!(
        render_default(&Document::default()),
        "model Unnamed\nend Unnamed;\n"
    );
}

#[test]
fn test_flagged_model() {
    let doc = Document::new("TestModel")
        .with_description("Test")
        .with_within("")
        .with_flags("replaceable partial final encapsulated")
        .unwrap()
        .with_annotation(Annotation::new().with("test", true));

    insta::assert_snapshot!(render_default(&doc), @r#"
    within;
    final encapsulated partial replaceable model TestModel "Test"
    annotation (test=true);
    end TestModel;
    "#);
}

#[test]
fn test_within_package() {
    let doc = Document::new("Inner").with_within("Outer.Package");
    assert_eq!(
        render_default(&doc),
        "within Outer.Package;\nmodel Inner\nend Inner;\n"
    );
}

#[test]
fn test_default_declaration() {
    let decl = Declaration::new("X", "x");
    assert_eq!(render_default(&decl), "X x;\n");
}

#[test]
fn test_full_declaration() {
    let decl = declaration(
        "Real",
        "x",
        DeclarationOptions::new()
            .value(Value::tuple([1, 2, 3, 4]))
            .modify("min", 0)
            .flag(DeclarationFlag::Replaceable)
            .flag(DeclarationFlag::Outer)
            .flag(DeclarationFlag::Inner)
            .flag(DeclarationFlag::Final)
            .variability(Variability::Parameter)
            .causality(Causality::Input)
            .flow_kind(FlowKind::Flow)
            .subscripts(["4"])
            .condition("true")
            .description("")
            .annotation(Annotation::new().with("test", true)),
    );

    assert_eq!(
        render_default(&decl),
        "final inner outer flow parameter input Real[4] x(min=0) = {1, 2, 3, 4} if true \"\" annotation (test=true);\n"
    );
}

#[test]
fn test_parameter_with_modification() {
    let mut doc = Document::new("M");
    let decl = doc
        .add_parameter("Real", "x", DeclarationOptions::new().modify("min", 0))
        .unwrap();
    assert_eq!(render_default(&*decl), "parameter Real x(min=0);\n");
}

#[test]
fn test_modification_arity_layout() {
    let one = declaration("X", "x", DeclarationOptions::new().value(1));
    assert_eq!(render_default(&one), "X x=1;\n");

    let map = Modification::new().with("y", 1);
    let single = declaration("X", "x", DeclarationOptions::new().modifications(map));
    assert_eq!(render_default(&single), "X x(y=1);\n");

    let map = Modification::new().with("y", 1).with("z", 2);
    let pair = declaration("X", "x", DeclarationOptions::new().modifications(map));
    assert_eq!(render_default(&pair), "X x(y=1, z=2);\n");

    let map = Modification::new().with("y", 1).with("z", 2).with("w", 3);
    let multi = declaration("X", "x", DeclarationOptions::new().modifications(map));
    insta::assert_snapshot!(render_default(&multi), @r"
    X x(
      y=1,
      z=2,
      w=3);
    ");
}

#[test]
fn test_multi_line_map_inside_document() {
    let mut doc = Document::new("M");
    doc.add_declaration(
        "X",
        "x",
        DeclarationOptions::new()
            .modify("y", 1)
            .modify("z", 2)
            .modify("w", 3)
            .value(4),
    )
    .unwrap();

    insta::assert_snapshot!(render_default(&doc), @r"
    model M
      X x(
        y=1,
        z=2,
        w=3) = 4;
    end M;
    ");
}

#[test]
fn test_imports() {
    let mut doc = Document::default();
    doc.add_import("A.B.C", ()).unwrap();
    doc.add_import("A.B.*", ()).unwrap();
    doc.add_import("A.B", "MyC").unwrap();
    doc.add_import("A.B", ["C", "CC"]).unwrap();

    insta::assert_snapshot!(render_default(&doc), @r"
    model Unnamed
      import A.B.C;
      import A.B.*;
      import MyC = A.B;
      import A.B.{C, CC};
    end Unnamed;
    ");
}

#[test]
fn test_assign_forms() {
    let resistance = Assign::new(100)
        .with_flag(AssignFlag::Final)
        .with_flag(AssignFlag::Each)
        .with_modification("displayUnit", Value::quoted("kOhm"))
        .with_description("Resistance");
    let medium = Assign::new("Modelica.Media.Air.SimpleAir")
        .with_flag(AssignFlag::Redeclare)
        .with_type("package");
    let decl = declaration(
        "Pipe",
        "pipe",
        DeclarationOptions::new()
            .modify("R", resistance)
            .modify("Medium", medium),
    );

    assert_eq!(
        render_default(&decl),
        "Pipe pipe(each final R(displayUnit=\"kOhm\") = 100 \"Resistance\", redeclare package Medium=Modelica.Media.Air.SimpleAir);\n"
    );
}

#[test]
fn test_assign_without_literal() {
    let nested = Assign::modification(Modification::new().with("R", 10))
        .with_flag(AssignFlag::Each)
        .with_annotation(Annotation::new().with("Evaluate", true));
    let decl = declaration("Grid", "g", DeclarationOptions::new().modify("lines", nested));

    assert_eq!(
        render_default(&decl),
        "Grid g(each lines(R=10) annotation (Evaluate=true));\n"
    );
}

#[test]
fn test_type_without_redeclare_fails() {
    let decl = declaration(
        "X",
        "x",
        DeclarationOptions::new().modify("y", Assign::new(1).with_type("Real")),
    );
    let err = render(&decl, &RenderOptions::default()).unwrap_err();
    assert!(matches!(*err, Error::InvariantViolation { .. }));
}

#[test]
fn test_unit_quantities_use_significant_digits() {
    let decl = declaration(
        "Line",
        "line",
        DeclarationOptions::new()
            .modify("V_nom", KV.quantity(1.0))
            .modify("V_low", KV.quantity(0.4)),
    );
    assert_eq!(
        render_default(&decl),
        "Line line(V_nom(displayUnit=\"kV\") = 1000, V_low(displayUnit=\"kV\") = 400);\n"
    );

    let plant = declaration(
        "Plant",
        "p",
        DeclarationOptions::new().modify("P", MW.quantity_with_precision(1.23456, 3)),
    );
    assert_eq!(
        render_default(&plant),
        "Plant p(P(displayUnit=\"MW\") = 1.23e+06);\n"
    );
}

#[test]
fn test_list_shapes() {
    let line = Annotation::new().with(
        "Line",
        Modification::new()
            .with(
                "points",
                Value::list([Value::point(0, 0), Value::point(10, -5)]),
            )
            .with("color", Value::list([0, 0, 255])),
    );
    let empty = Annotation::new().with(
        "Line",
        Modification::new().with("points", Value::list(Vec::<Value>::new())),
    );

    let wire = declaration("Wire", "w", DeclarationOptions::new().annotation(line));
    assert_eq!(
        render_default(&wire),
        "Wire w annotation (Line(points={{0,0},{10,-5}}, color={0,0,255}));\n"
    );

    let bare = declaration("Wire", "v", DeclarationOptions::new().annotation(empty));
    assert_eq!(render_default(&bare), "Wire v annotation (Line(points={}));\n");
}

#[test]
fn test_list_of_records() {
    let rectangle = Modification::new().with(
        "Rectangle",
        Modification::new().with(
            "extent",
            Value::list([Value::point(-100, -100), Value::point(100, 100)]),
        ),
    );
    let label = Modification::new().with(
        "Text",
        Modification::new().with("textString", Value::quoted("M")),
    );
    let icon = Annotation::new().with(
        "Icon",
        Modification::new().with("graphics", Value::list([rectangle, label])),
    );
    let doc = Document::new("M").with_annotation(icon);

    insta::assert_snapshot!(render_default(&doc), @r#"
    model M
    annotation (Icon(graphics={
        Rectangle(extent={{-100,-100},{100,100}}),
        Text(textString="M")
      }));
    end M;
    "#);
}

#[test]
fn test_unsupported_values_report_their_path() {
    let mut doc = Document::new("Doc");
    doc.add_declaration(
        "Real",
        "x",
        DeclarationOptions::new().modify("start", f64::NAN),
    )
    .unwrap();
    let err = render(&doc, &RenderOptions::default()).unwrap_err();
    let Error::UnsupportedNode { path, .. } = *err else {
        panic!("expected an unsupported node error");
    };
    assert_eq!(path, "Doc/public/x/start");

    let mut doc = Document::new("Doc");
    let mixed = Value::list([Value::from(1), Value::from(Modification::new().with("a", 1))]);
    doc.add_declaration(
        "Real",
        "y",
        DeclarationOptions::new().annotation(Annotation::new().with("bad", mixed)),
    )
    .unwrap();
    let err = render(&doc, &RenderOptions::default()).unwrap_err();
    let Error::UnsupportedNode { path, .. } = *err else {
        panic!("expected an unsupported node error");
    };
    assert_eq!(path, "Doc/public/y/annotation/bad");
}

#[test]
fn test_list_of_records_needs_single_entry_maps() {
    let two = Modification::new().with("A", 1).with("B", 2);
    let decl = declaration(
        "X",
        "x",
        DeclarationOptions::new().annotation(Annotation::new().with("graphics", Value::list([two]))),
    );
    let err = render(&decl, &RenderOptions::default()).unwrap_err();
    assert!(matches!(*err, Error::UnsupportedNode { .. }));
}

#[test]
fn test_sections_and_equations() {
    let mut doc = Document::new("LinearOde").with_description("dx/dt = a*x");
    doc.add_parameter("Real", "a", DeclarationOptions::new().value(-0.5))
        .unwrap();
    doc.add_declaration("Real", "x", DeclarationOptions::new().modify("start", 1))
        .unwrap();
    doc.add_declaration(
        "Real",
        "k",
        DeclarationOptions::new().protected().value(2),
    )
    .unwrap();
    doc.add_equation("x", "1", EquationOptions::new().initial());
    doc.add_equation("der(x)", "a*x", EquationOptions::new().description("decay"));
    doc.set_experiment(Experiment::new(0.0, 10.0)).unwrap();

    insta::assert_snapshot!(render_default(&doc), @r#"
    model LinearOde "dx/dt = a*x"
      parameter Real a=-0.5;
      Real x(start=1);
    protected
      Real k=2;
    initial equation
      x = 1;
    equation
      der(x) = a*x "decay";
    annotation (experiment(StopTime=10));
    end LinearOde;
    "#);
}

#[test]
fn test_algorithm_and_comments() {
    let mut doc = Document::new("Counter");
    doc.add_comment(
        ["Counts up", "once per step"],
        CommentStyle::Block,
        true,
        Section::Public,
    );
    doc.add_declaration("Integer", "n", DeclarationOptions::new().value(0))
        .unwrap();
    doc.add_algorithm("n", "pre(n) + 1", EquationOptions::new());
    doc.add_text(["// raw"], false, Section::Algorithm);

    insta::assert_snapshot!(render_default(&doc), @r"
    model Counter
      /* Counts up
       * once per step */
      Integer n=0;
    algorithm
      n := pre(n) + 1;
    // raw
    end Counter;
    ");
}

#[test]
fn test_if_and_for_equations() {
    let mut doc = Document::new("Switch");
    let branch = ConstructBuilder::if_("x > 0")
        .then([Equation::new("y", "1")])
        .unwrap()
        .elseif("x < 0")
        .unwrap()
        .then([Equation::new("y", "-1")])
        .unwrap()
        .orelse([Equation::new("y", "0")])
        .unwrap()
        .end()
        .unwrap();
    let fill = ConstructBuilder::for_([ForIndex::new("i", "1:n"), ForIndex::new("j", "1:m")])
        .repeat([Equation::new("z[i, j]", "i*j")])
        .unwrap()
        .end()
        .unwrap();
    doc.add(branch, Section::Equation).unwrap();
    doc.add(fill, Section::Equation).unwrap();

    insta::assert_snapshot!(render_default(&doc), @r"
    model Switch
    equation
      if x > 0 then
        y = 1;
      elseif x < 0 then
        y = -1;
      else
        y = 0;
      end if;
      for i in 1:n, j in 1:m loop
        z[i, j] = i*j;
      end for;
    end Switch;
    ");
}

#[test]
fn test_when_and_while_statements() {
    let mut doc = Document::new("Loop");
    let event = ConstructBuilder::when("sample(0, 1)")
        .then([Algorithm::new("y", "pre(y) + 1")])
        .unwrap()
        .elsewhen("initial()")
        .unwrap()
        .then([Algorithm::new("y", "0")])
        .unwrap()
        .end()
        .unwrap();
    let stop = ConstructBuilder::if_("i > 5")
        .then([Statement::new("break")])
        .unwrap()
        .end()
        .unwrap();
    let body: Vec<Clause> = vec![Algorithm::new("i", "i + 1").into(), stop.into()];
    let repeat = ConstructBuilder::while_("i < n")
        .repeat(body)
        .unwrap()
        .end()
        .unwrap();
    doc.add(event, Section::Algorithm).unwrap();
    doc.add(repeat, Section::InitialAlgorithm).unwrap();

    insta::assert_snapshot!(render_default(&doc), @r"
    model Loop
    initial algorithm
      while i < n loop
        i := i + 1;
        if i > 5 then
          break;
        end if;
      end while;
    algorithm
      when sample(0, 1) then
        y := pre(y) + 1;
      elsewhen initial() then
        y := 0;
      end when;
    end Loop;
    ");
}

#[test]
fn test_if_expression_renders_inline() {
    let sign = ConstructBuilder::if_("x > 0")
        .then([Expression::new("1")])
        .unwrap()
        .elseif("x < 0")
        .unwrap()
        .then([Expression::new("-1")])
        .unwrap()
        .orelse([Expression::new("0")])
        .unwrap()
        .end()
        .unwrap();

    assert_eq!(
        render_default(&sign),
        "if x > 0 then 1 elseif x < 0 then -1 else 0\n"
    );

    let eq = Equation::new("y", sign.inline().unwrap());
    assert_eq!(
        render_default(&eq),
        "y = if x > 0 then 1 elseif x < 0 then -1 else 0;\n"
    );
}

#[test]
fn test_extends_and_connections() {
    let mut doc = Document::new("Circuit");
    doc.add_extends(
        "Modelica.Icons.Example",
        Modification::new().with("showIcon", false),
    );
    doc.add_declaration("Resistor", "r1", DeclarationOptions::new())
        .unwrap();
    doc.add_declaration("Ground", "ground", DeclarationOptions::new())
        .unwrap();
    doc.add_connection(&["r1", "n", "ground", "p"]).unwrap();

    insta::assert_snapshot!(render_default(&doc), @r"
    model Circuit
      extends Modelica.Icons.Example(showIcon=false);
      Resistor r1;
      Ground ground;
    equation
      connect(r1.n, ground.p);
    end Circuit;
    ");
}

#[test]
fn test_tabs_and_start_indent() {
    let mut doc = Document::new("M").with_annotation(Annotation::new().with("a", 1));
    doc.add_declaration("Real", "x", DeclarationOptions::new())
        .unwrap();
    doc.add_equation("x", "0", EquationOptions::new());

    let options = RenderOptions::new().indent(Indent::Tab).start_indent(1);
    assert_eq!(
        render(&doc, &options).unwrap(),
        "\tmodel M\n\t\tReal x;\n\tequation\n\t\tx = 0;\nannotation (a=1);\n\tend M;\n"
    );

    let options = RenderOptions::new().indent(Indent::Spaces(4));
    assert_eq!(
        render(&doc, &options).unwrap(),
        "model M\n    Real x;\nequation\n    x = 0;\nannotation (a=1);\nend M;\n"
    );
}

#[test]
fn test_rendering_is_deterministic() {
    let mut doc = Document::new("Twice");
    doc.add_declaration(
        "Real",
        "x",
        DeclarationOptions::new()
            .modify("start", 1.5)
            .modify("fixed", true)
            .modify("nominal", 1e20),
    )
    .unwrap();

    let first = render_default(&doc);
    assert_eq!(first, render_default(&doc));
    assert!(first.contains("nominal=1e20"));
}
