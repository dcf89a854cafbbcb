use modelwright_model::{DeclarationOptions, Document, EquationOptions, Experiment, Result, Value};

pub fn build() -> Result<Document> {
    let mut doc = Document::new("LorenzAttractor")
        .with_description("This model represents the chaotic Lorenz attractor");

    doc.add_parameter("Real", "rho", DeclarationOptions::new().value(28))?;
    doc.add_parameter("Real", "sigma", DeclarationOptions::new().value(10))?;
    doc.add_parameter(
        "Real",
        "beta",
        DeclarationOptions::new().value(Value::expr("8/3")),
    )?;

    for (ident, start) in [("x", "0"), ("y", "2"), ("z", "20")] {
        doc.add_declaration("Real", ident, DeclarationOptions::new())?;
        doc.add_equation(ident, start, EquationOptions::new().initial());
    }

    doc.add_equation("der(x)", "sigma*(y-x)", EquationOptions::new());
    doc.add_equation("der(y)", "x*(rho-z)-y", EquationOptions::new());
    doc.add_equation("der(z)", "x*y - beta*z", EquationOptions::new());

    doc.set_experiment(Experiment::new(0.0, 100.0).with_interval(0.01))?;
    Ok(doc)
}
