use modelwright_model::{DeclarationOptions, Document, EquationOptions, Result};

pub fn build() -> Result<Document> {
    let mut doc = Document::new("LinearODE")
        .with_description("This is a linear ordinary differential equation");

    doc.add_parameter(
        "Real",
        "alpha",
        DeclarationOptions::new()
            .value(1)
            .modify("min", 0)
            .description("negative value results in blow up"),
    )?;
    doc.add_declaration(
        "Real",
        "x",
        DeclarationOptions::new()
            .modify("start", 1)
            .modify("fixed", true),
    )?;

    doc.add_equation(
        "der(x)",
        "-alpha*x",
        EquationOptions::new().description("linear ODE"),
    );
    Ok(doc)
}
