use modelwright_model::units::KV;
use modelwright_model::{
    CommentStyle, DeclarationOptions, Document, Flip, Placement, Result, Section,
};

const HEADER: [&str; 3] = [
    "// This file was automatically generated",
    "// by modelwright",
    "",
];

pub fn build() -> Result<Document> {
    let mut doc = Document::new("SimpleCircuit");
    doc.add_text(HEADER, false, Section::Public);

    doc.add_import("Modelica.Electrical.Analog.Basic", ["Ground", "Resistor"])?;
    doc.add_import("Modelica.Electrical.Analog.Sources.ConstantVoltage", ())?;

    doc.add_comment(
        ["The needed components"],
        CommentStyle::Block,
        true,
        Section::Public,
    );
    doc.add_declaration(
        "ConstantVoltage",
        "source",
        DeclarationOptions::new()
            .modify("V", KV.quantity(1.0))
            .placement(Placement::at(0.0, 0.0).with_flip(Flip::Horizontal)),
    )?;
    doc.add_declaration(
        "Ground",
        "ground",
        DeclarationOptions::new().placement(Placement::at(10.0, -70.0)),
    )?;
    doc.add_declaration(
        "Resistor",
        "resistor",
        DeclarationOptions::new()
            .modify("R", 10)
            .placement(Placement::at(0.0, -40.0)),
    )?;

    doc.add_connection(&["resistor", "p", "source", "n"])?;
    doc.add_connection(&["resistor", "n", "source", "p"])?;
    doc.add_connection(&["ground", "p", "resistor", "n"])?;
    Ok(doc)
}
