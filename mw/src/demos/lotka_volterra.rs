use modelwright_model::{
    Assign, AssignFlag, DeclarationOptions, Document, EquationOptions, Experiment, Result, Value,
};

pub fn build() -> Result<Document> {
    let mut doc = Document::new("LotkaVolterra")
        .with_description("This model represents the Lotka-Volterra population dynamics system");

    for (ident, value) in [("alpha", "2/3"), ("beta", "4/3"), ("gamma", "1"), ("delta", "1")] {
        doc.add_parameter(
            "Real",
            ident,
            DeclarationOptions::new().value(Value::expr(value)),
        )?;
    }

    doc.add_declaration(
        "Real",
        "value",
        DeclarationOptions::new()
            .modify("start", Assign::new(1).with_flag(AssignFlag::Each))
            .modify("fixed", true)
            .subscripts(["2"]),
    )?;
    doc.add_equation(
        "der(value)",
        "[alpha, -beta*value[1]; delta*value[2], -gamma] * value",
        EquationOptions::new(),
    );

    doc.set_experiment(Experiment::new(0.0, 2000.0).with_interval(0.1))?;
    Ok(doc)
}
