use modelwright_model::{
    CommentStyle, DeclarationOptions, Document, EquationOptions, Result, Section,
};

pub fn build() -> Result<Document> {
    let mut doc = Document::new("NonlinearODE")
        .with_description("This model represents the non-linear damped pendulum");

    doc.add_import("Modelica.Units.SI", ())?;
    doc.add_parameter("SI.Acceleration", "g", DeclarationOptions::new().value(9.81))?;
    doc.add_parameter("SI.Length", "l", DeclarationOptions::new().value(1))?;
    doc.add_parameter(
        "Real",
        "d",
        DeclarationOptions::new()
            .value(1)
            .description("Friction coefficient"),
    )?;

    doc.add_declaration(
        "SI.Angle",
        "theta",
        DeclarationOptions::new()
            .modify("start", 1)
            .modify("fixed", true),
    )?;
    doc.add_declaration("SI.AngularVelocity", "d_theta", DeclarationOptions::new())?;

    doc.add_comment(
        ["The set of equations"],
        CommentStyle::Line,
        true,
        Section::InitialEquation,
    );
    doc.add_equation("der(theta)", "0", EquationOptions::new().initial());
    doc.add_equation(
        "der(d_theta) + d*d_theta + g/l * sin(theta)",
        "0",
        EquationOptions::new(),
    );
    doc.add_equation("der(theta)", "d_theta", EquationOptions::new());
    Ok(doc)
}
