//! Bundled demo models.

mod electrical_grid;
mod gas_grid;
mod hot_rod;
mod linear_ode;
mod lorenz;
mod lotka_volterra;
mod nonlinear_ode;
mod simple_circuit;

use clap::ValueEnum;
use modelwright_model::{Document, Result};

/// A demo model that ships with the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Demo {
    /// Exponential decay of a single state
    LinearOde,
    /// Damped pendulum
    NonlinearOde,
    /// Predator and prey populations
    LotkaVolterra,
    /// Chaotic Lorenz system
    Lorenz,
    /// Voltage source, resistor and ground
    SimpleCircuit,
    /// One-dimensional heat conduction in a rod
    HotRod,
    /// Low voltage feeder behind a distribution transformer
    ElectricalGrid,
    /// Gas pipes, junctions and consumers
    GasGrid,
}

impl Demo {
    /// Build the demo document.
    pub fn build(self) -> Result<Document> {
        match self {
            Demo::LinearOde => linear_ode::build(),
            Demo::NonlinearOde => nonlinear_ode::build(),
            Demo::LotkaVolterra => lotka_volterra::build(),
            Demo::Lorenz => lorenz::build(),
            Demo::SimpleCircuit => simple_circuit::build(),
            Demo::HotRod => hot_rod::build(),
            Demo::ElectricalGrid => electrical_grid::build(),
            Demo::GasGrid => gas_grid::build(),
        }
    }

    /// The name accepted on the command line.
    pub fn name(self) -> String {
        self.to_possible_value()
            .map(|v| v.get_name().to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use modelwright_model::{Element, Placement, Scalar, Section, Value, draw_connections};
    use modelwright_render::{RenderOptions, render};

    use super::*;

    fn connections(doc: &Document) -> usize {
        doc.section(Section::Equation)
            .iter()
            .filter(|e| matches!(e, Element::Connect(_)))
            .count()
    }

    fn origin(doc: &Document, ident: &str) -> Option<(Scalar, Scalar)> {
        Placement::origin_of(doc.declaration(ident)?.annotation())
    }

    fn at(x: f64, y: f64) -> Option<(Scalar, Scalar)> {
        Some((Scalar::number(x), Scalar::number(y)))
    }

    fn rendered(demo: Demo) -> String {
        let doc = demo.build().unwrap();
        render(&doc, &RenderOptions::default()).unwrap()
    }

    #[test]
    fn test_every_demo_renders() {
        for demo in Demo::value_variants() {
            let text = rendered(*demo);
            assert!(text.starts_with("model ") || text.starts_with("// "));
            assert!(text.ends_with(";\n"), "{} is not closed", demo.name());
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(Demo::LinearOde.name(), "linear-ode");
        assert_eq!(Demo::HotRod.name(), "hot-rod");
        assert_eq!(Demo::ElectricalGrid.name(), "electrical-grid");
    }

    #[test]
    fn test_linear_ode() {
        insta::assert_snapshot!(rendered(Demo::LinearOde), @r#"
        model LinearODE "This is a linear ordinary differential equation"
          parameter Real alpha(min=0) = 1 "negative value results in blow up";
          Real x(start=1, fixed=true);
        equation
          der(x) = -alpha*x "linear ODE";
        end LinearODE;
        "#);
    }

    #[test]
    fn test_nonlinear_ode() {
        insta::assert_snapshot!(rendered(Demo::NonlinearOde), @r#"
        model NonlinearODE "This model represents the non-linear damped pendulum"
          import Modelica.Units.SI;
          parameter SI.Acceleration g=9.81;
          parameter SI.Length l=1;
          parameter Real d=1 "Friction coefficient";
          SI.Angle theta(start=1, fixed=true);
          SI.AngularVelocity d_theta;
        initial equation
          // The set of equations
          der(theta) = 0;
        equation
          der(d_theta) + d*d_theta + g/l * sin(theta) = 0;
          der(theta) = d_theta;
        end NonlinearODE;
        "#);
    }

    #[test]
    fn test_lotka_volterra() {
        insta::assert_snapshot!(rendered(Demo::LotkaVolterra), @r#"
        model LotkaVolterra "This model represents the Lotka-Volterra population dynamics system"
          parameter Real alpha=2/3;
          parameter Real beta=4/3;
          parameter Real gamma=1;
          parameter Real delta=1;
          Real[2] value(each start=1, fixed=true);
        equation
          der(value) = [alpha, -beta*value[1]; delta*value[2], -gamma] * value;
        annotation (experiment(StopTime=2000, Interval=0.1));
        end LotkaVolterra;
        "#);
    }

    #[test]
    fn test_simple_circuit_connections() {
        let mut doc = Demo::SimpleCircuit.build().unwrap();
        assert_eq!(modelwright_model::draw_connections(&mut doc).unwrap(), 3);

        let text = render(&doc, &RenderOptions::default()).unwrap();
        assert!(text.contains("ConstantVoltage source(V(displayUnit=\"kV\") = 1000)"));
        assert!(text.contains(
            "connect(resistor.p, source.n) annotation (Line(points={{0,-40},{0,0}}, color={0,0,255}));"
        ));
    }

    #[test]
    fn test_hot_rod_chain() {
        let doc = Demo::HotRod.build().unwrap();
        assert_eq!(connections(&doc), 16);
        assert!(doc.declaration("dx14").is_some());
    }

    #[test]
    fn test_electrical_grid_layout() {
        let mut doc = Demo::ElectricalGrid.build().unwrap();
        assert_eq!(connections(&doc), 13);

        // bus geodata spans the whole diagram
        assert_eq!(origin(&doc, "bus_0"), at(-100.0, -100.0));
        assert_eq!(origin(&doc, "bus_2"), at(0.0, 0.0));
        assert_eq!(origin(&doc, "bus_4"), at(0.0, 100.0));
        assert_eq!(origin(&doc, "line_0"), at(-50.0, 0.0));
        assert_eq!(origin(&doc, "trafo_0"), at(-100.0, -50.0));
        assert_eq!(origin(&doc, "load_0"), None);

        let trafo = doc
            .declaration("trafo_0")
            .unwrap()
            .annotation()
            .get_path(&["Placement", "transformation"])
            .unwrap()
            .unwrap();
        assert_eq!(trafo.get("rotation"), Some(&Value::from(Scalar::number(90.0))));

        // lines and the transformer sit between placed buses
        assert_eq!(draw_connections(&mut doc).unwrap(), 8);
    }

    #[test]
    fn test_electrical_grid_quantities() {
        let text = rendered(Demo::ElectricalGrid);
        assert!(text.contains("inner TransiEnt.SimCenter simCenter"));
        assert!(text.contains("import Transformer = TransiEnt.Components.Electrical.PowerTransformation.TransformerPiModelComplex;"));
        assert!(text.contains("  /// Bus\n"));
        assert!(text.contains("v_n(displayUnit=\"kV\") = 400"));
        assert!(text.contains("v_gen(displayUnit=\"kV\") = 20000"));
        assert!(text.contains("P_el_set_const(displayUnit=\"MW\") = -10000"));
        assert!(text.contains("S_n(displayUnit=\"MVA\") = 400000"));
        assert!(text.contains("l(displayUnit=\"km\") = 100"));
        assert!(text.contains("connect(bus_1.epp, line_0.epp_p);"));
    }

    #[test]
    fn test_gas_grid_layout() {
        let mut doc = Demo::GasGrid.build().unwrap();
        assert_eq!(connections(&doc), 7);

        // odd rounding keeps junctions off the grid lines
        assert_eq!(origin(&doc, "junction_0"), at(-99.0, 1.0));
        assert_eq!(origin(&doc, "junction_1"), at(1.0, 1.0));
        assert_eq!(origin(&doc, "junction_2"), at(101.0, 101.0));
        assert_eq!(origin(&doc, "pipe_0"), at(-49.0, 1.0));
        assert_eq!(origin(&doc, "ext_grid_0"), at(-119.0, 1.0));

        assert_eq!(draw_connections(&mut doc).unwrap(), 7);
        let text = render(&doc, &RenderOptions::default()).unwrap();
        assert!(text.contains("import Pipe = TransiEnt.Components.Gas.VolumesValvesFittings.Pipes.PipeFlow_L4_Simple_isoth;"));
        assert!(text.contains("length(displayUnit=\"km\") = 10000"));
        assert!(text.contains(
            "connect(pipe_0.gasPortIn, junction_0.gasPort[1]) annotation (Line(points={{-49,1},{-99,1}}, color={0,0,255}));"
        ));
    }
}
