use modelwright_model::{
    DeclarationOptions, Document, Experiment, Modification, Placement, Result, Section, Value,
};

/// Number of rod elements between the two fixed temperatures.
const ELEMENTS: usize = 15;

const ROD_ELEMENT: &str = r#"model RodElement
  SI.Temperature T annotation (Dialog(showStartAttribute=true));
  parameter SI.HeatCapacity C = 1 "Heat capacity";
  parameter SI.ThermalConductance G = 1 "Thermal conductivity";
public
  Modelica.Thermal.HeatTransfer.Interfaces.HeatPort_a port_a annotation (Placement(transformation(extent={{-110,-10},{-90,10}})));
  Modelica.Thermal.HeatTransfer.Interfaces.HeatPort_b port_b annotation (Placement(transformation(extent={{90,-10},{110,10}})));
  Modelica.Thermal.HeatTransfer.Components.ThermalConductor thermalConductor(G=2*G) annotation (Placement(transformation(extent={{-60,-10},{-40,10}})));
  Modelica.Thermal.HeatTransfer.Components.ThermalConductor thermalConductor1(G=2*G) annotation (Placement(transformation(extent={{40,-10},{60,10}})));
  Modelica.Thermal.HeatTransfer.Components.HeatCapacitor heatCapacitor(C=C) annotation (Placement(transformation(extent={{-10,20},{10,40}})));
equation
  T = heatCapacitor.T;
  connect(thermalConductor.port_a, port_a) annotation (Line(points={{-60,0},{-100,0}}, color={191,0,0}));
  connect(thermalConductor.port_b, thermalConductor1.port_a) annotation (Line(points={{-40,0},{40,0}}, color={191,0,0}));
  connect(port_b, thermalConductor1.port_b) annotation (Line(points={{100,0},{60,0}}, color={191,0,0}));
  connect(thermalConductor.port_b, heatCapacitor.port) annotation (Line(points={{-40,0},{0,0},{0,20}}, color={191,0,0}));
  annotation (Icon(coordinateSystem(preserveAspectRatio=false)), Diagram(coordinateSystem(preserveAspectRatio=false)));
end RodElement;"#;

const INFO: &str = "<html>
<p>Simulation of a 1D rod that is kept at a fixed temperature at both sides. The initial temperature is zero. On simulation start the temperature of the left side is set to 150 °C.
</p>
<p>
The rod comprises of 15 elements which are adjacently connected. Each represent a small portion of the rod with its heat equation dynamics.
</p>
</html>";

pub fn build() -> Result<Document> {
    let mut doc = Document::new("HotRod");
    doc.add_import("Modelica.Thermal.HeatTransfer.Sources", ())?;
    doc.add_text(ROD_ELEMENT.lines(), true, Section::Public);

    for (ident, temperature, x) in [
        ("fixedTemperature1", "423.15", -100.0),
        ("fixedTemperature2", "273.15", 100.0),
    ] {
        doc.add_declaration(
            "Sources.FixedTemperature",
            ident,
            DeclarationOptions::new()
                .modify("T", Value::expr(temperature))
                .placement(Placement::at(x, 0.0)),
        )?;
    }

    let idents: Vec<String> = (0..ELEMENTS).map(|i| format!("dx{i:02}")).collect();
    for ident in &idents {
        let start = Modification::new()
            .with("start", Value::expr("273.15"))
            .with("fixed", true);
        doc.add_declaration(
            "RodElement",
            ident.as_str(),
            DeclarationOptions::new().modify("T", start),
        )?;
    }

    if let (Some(first), Some(last)) = (idents.first(), idents.last()) {
        doc.add_connection(&["fixedTemperature1", "port", first.as_str(), "port_a"])?;
        doc.add_connection(&[last.as_str(), "port_b", "fixedTemperature2", "port"])?;
    }
    for pair in idents.windows(2) {
        doc.add_connection(&[pair[0].as_str(), "port_b", pair[1].as_str(), "port_a"])?;
    }

    for (i, ident) in idents.iter().enumerate() {
        let x = 15.0 * i as f64 - 90.0;
        if let Some(mut decl) = doc.declaration_mut(ident) {
            decl.set_placement(&Placement::at(x, 20.0).with_size(5.0))?;
        }
    }

    doc.set_experiment(Experiment::new(0.0, 30.0))?;
    doc.add_annotation(&["Documentation"], false)?
        .set("info", Value::quoted(INFO));
    Ok(doc)
}
