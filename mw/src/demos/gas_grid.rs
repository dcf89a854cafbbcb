use modelwright_model::geometry::{BoundingBox, Map2d, Rounding, position_between};
use modelwright_model::units::KM;
use modelwright_model::{DeclarationFlag, DeclarationOptions, Document, Placement, Result};

const DIAGRAM: BoundingBox = ((-100.0, -100.0), (100.0, 100.0));

/// Geodata of the junctions spans this box.
const GEO: BoundingBox = ((0.0, 0.0), (4.0, 2.0));

struct Junction {
    p_bar: f64,
    t_k: f64,
    geo: (f64, f64),
}

struct Pipe {
    from_junction: usize,
    to_junction: usize,
    length_km: f64,
    diameter_m: f64,
}

struct Sink {
    junction: usize,
    mdot_kg_per_s: f64,
}

/// Pressures and temperatures from a solved pipe flow.
const JUNCTIONS: [Junction; 3] = [
    Junction { p_bar: 1.05, t_k: 293.15, geo: (0.0, 1.0) },
    Junction { p_bar: 1.0342, t_k: 293.15, geo: (2.0, 1.0) },
    Junction { p_bar: 1.0297, t_k: 293.15, geo: (4.0, 2.0) },
];

const PIPES: [Pipe; 2] = [
    Pipe { from_junction: 0, to_junction: 1, length_km: 10.0, diameter_m: 0.05 },
    Pipe { from_junction: 1, to_junction: 2, length_km: 2.5, diameter_m: 0.05 },
];

const SINKS: [Sink; 2] = [
    Sink { junction: 1, mdot_kg_per_s: 0.01 },
    Sink { junction: 2, mdot_kg_per_s: 0.005 },
];

/// Gas port on a junction.
const JUNCTION_PORT: &str = "gasPort[1]";

fn junction_name(index: usize) -> String {
    format!("junction_{index}")
}

pub fn build() -> Result<Document> {
    let mut doc = Document::new("GasGrid");
    doc.add_import("TransiEnt.Components.Boundaries.Gas.BoundaryRealGas_pTx", "ExtGrid")?;
    doc.add_import(
        "TransiEnt.Components.Gas.VolumesValvesFittings.Pipes.PipeFlow_L4_Simple_isoth",
        "Pipe",
    )?;
    doc.add_import("TransiEnt.Consumer.Gas.GasConsumerPipe_mFlow", "Sink")?;
    doc.add_import(
        "TransiEnt.Components.Gas.VolumesValvesFittings.Fittings.RealGasJunction_L2_nPorts_isoth",
        "Junction",
    )?;

    for (type_name, ident) in [
        ("TransiEnt.SimCenter", "simCenter"),
        ("TransiEnt.ModelStatistics", "modelStatistics"),
    ] {
        doc.add_declaration(
            type_name,
            ident,
            DeclarationOptions::new().flag(DeclarationFlag::Inner),
        )?;
    }

    let map = Map2d::new(GEO, DIAGRAM, Some(Rounding::Odd))?;
    let positions: Vec<(f64, f64)> = JUNCTIONS.iter().map(|j| map.apply(j.geo)).collect();

    for (i, junction) in JUNCTIONS.iter().enumerate() {
        doc.add_declaration(
            "Junction",
            junction_name(i),
            DeclarationOptions::new()
                .modify("p_start", junction.p_bar)
                .modify("T_start", junction.t_k)
                .placement(Placement::at(positions[i].0, positions[i].1)),
        )?;
    }

    let feed = &JUNCTIONS[0];
    let (x, y) = positions[0];
    doc.add_declaration(
        "ExtGrid",
        "ext_grid_0",
        DeclarationOptions::new()
            .modify("p_const", feed.p_bar)
            .modify("T_const", feed.t_k)
            .placement(Placement::at(x - 20.0, y)),
    )?;
    let feed_ident = junction_name(0);
    doc.add_connection(&["ext_grid_0", "gasPort", feed_ident.as_str(), JUNCTION_PORT])?;

    for (i, pipe) in PIPES.iter().enumerate() {
        let ident = format!("pipe_{i}");
        doc.add_declaration(
            "Pipe",
            ident.as_str(),
            DeclarationOptions::new()
                .modify("length", KM.quantity(pipe.length_km))
                .modify("diameter_i", pipe.diameter_m)
                .modify("z_in", 0)
                .modify("z_out", 0)
                .modify("p_nom", 1)
                .placement(position_between(
                    positions[pipe.from_junction],
                    positions[pipe.to_junction],
                )),
        )?;
        let (from, to) = (
            junction_name(pipe.from_junction),
            junction_name(pipe.to_junction),
        );
        doc.add_connection(&[ident.as_str(), "gasPortIn", from.as_str(), JUNCTION_PORT])?;
        doc.add_connection(&[ident.as_str(), "gasPortOut", to.as_str(), JUNCTION_PORT])?;
    }

    for (i, sink) in SINKS.iter().enumerate() {
        let ident = format!("sink_{i}");
        let (x, y) = positions[sink.junction];
        doc.add_declaration(
            "Sink",
            ident.as_str(),
            DeclarationOptions::new()
                .modify("variable_m_flow", false)
                .modify("m_flow_const", sink.mdot_kg_per_s)
                .placement(Placement::at(x, y - 30.0)),
        )?;
        let junction = junction_name(sink.junction);
        doc.add_connection(&[ident.as_str(), "fluidPortIn", junction.as_str(), JUNCTION_PORT])?;
    }

    Ok(doc)
}
