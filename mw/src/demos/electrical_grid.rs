use modelwright_model::geometry::{BoundingBox, Map2d, Rounding, position_between};
use modelwright_model::units::{DEGREES, KA, KM, KV, KW, MVA, MVAR, MW};
use modelwright_model::{
    CommentStyle, DeclarationFlag, DeclarationOptions, Document, Placement, Result, Section,
    Value,
};

const DIAGRAM: BoundingBox = ((-100.0, -100.0), (100.0, 100.0));
const GRID_FREQUENCY: f64 = 50.0;

const NODE_MODEL: &str = r#"model Node "Single bus node"
  outer TransiEnt.SimCenter simCenter;

  final SI.PerUnit v_pu=v/v_n;
  final SI.Voltage v(displayUnit="kV") = epp.v;
  final SI.Angle delta(displayUnit="deg") = epp.delta;
  final SI.Frequency f=epp.f;

  parameter SI.Voltage v_n(displayUnit="kV") = simCenter.v_n "Nominal bus voltage";
  parameter SI.PerUnit v_pu_start=1 annotation (Dialog(group="Initialization"));
  parameter SI.Angle delta_start=0 annotation (Dialog(group="Initialization"));

  TransiEnt.Basics.Interfaces.Electrical.ComplexPowerPort epp(v(start=v_pu_start*v_n), delta(start=delta_start));
equation
  epp.P = 0;
  epp.Q = 0;
end Node;"#;

struct Bus {
    vn_kv: f64,
    vm_pu: f64,
    va_degree: f64,
    geo: (f64, f64),
}

/// A load or static generator at a bus.
struct Injection {
    bus: usize,
    p_mw: f64,
    q_mvar: f64,
}

struct Line {
    from_bus: usize,
    to_bus: usize,
    length_km: f64,
    r_ohm_per_km: f64,
    x_ohm_per_km: f64,
    c_nf_per_km: f64,
    max_i_ka: f64,
    parallel: i64,
}

struct Tap {
    lv_side: bool,
    pos: f64,
    neutral: f64,
    step_percent: f64,
}

struct Trafo {
    hv_bus: usize,
    lv_bus: usize,
    sn_mva: f64,
    vn_hv_kv: f64,
    vn_lv_kv: f64,
    vk_percent: f64,
    vkr_percent: f64,
    pfe_kw: f64,
    i0_percent: f64,
    tap: Option<Tap>,
}

/// A 20 kV feed and a small 0.4 kV feeder, solved at the listed operating point.
const BUSES: [Bus; 5] = [
    Bus { vn_kv: 20.0, vm_pu: 1.0, va_degree: 0.0, geo: (0.0, 0.0) },
    Bus { vn_kv: 0.4, vm_pu: 0.998, va_degree: -0.6, geo: (0.0, 1.0) },
    Bus { vn_kv: 0.4, vm_pu: 0.991, va_degree: -1.2, geo: (1.0, 1.0) },
    Bus { vn_kv: 0.4, vm_pu: 0.985, va_degree: -1.6, geo: (2.0, 1.0) },
    Bus { vn_kv: 0.4, vm_pu: 0.988, va_degree: -1.4, geo: (1.0, 2.0) },
];

const LOADS: [Injection; 3] = [
    Injection { bus: 2, p_mw: 0.008, q_mvar: 0.002 },
    Injection { bus: 3, p_mw: 0.012, q_mvar: 0.003 },
    Injection { bus: 4, p_mw: 0.006, q_mvar: 0.0015 },
];

const SGENS: [Injection; 1] = [Injection { bus: 3, p_mw: 0.01, q_mvar: 0.0 }];

const LINES: [Line; 3] = [
    Line {
        from_bus: 1,
        to_bus: 2,
        length_km: 0.1,
        r_ohm_per_km: 0.206,
        x_ohm_per_km: 0.08,
        c_nf_per_km: 210.0,
        max_i_ka: 0.27,
        parallel: 1,
    },
    Line {
        from_bus: 2,
        to_bus: 3,
        length_km: 0.12,
        r_ohm_per_km: 0.206,
        x_ohm_per_km: 0.08,
        c_nf_per_km: 210.0,
        max_i_ka: 0.27,
        parallel: 1,
    },
    Line {
        from_bus: 2,
        to_bus: 4,
        length_km: 0.08,
        r_ohm_per_km: 0.443,
        x_ohm_per_km: 0.069,
        c_nf_per_km: 260.0,
        max_i_ka: 0.142,
        parallel: 2,
    },
];

const TRAFOS: [Trafo; 1] = [Trafo {
    hv_bus: 0,
    lv_bus: 1,
    sn_mva: 0.4,
    vn_hv_kv: 20.0,
    vn_lv_kv: 0.4,
    vk_percent: 6.0,
    vkr_percent: 1.425,
    pfe_kw: 1.35,
    i0_percent: 0.3375,
    tap: Some(Tap {
        lv_side: true,
        pos: 1.0,
        neutral: 0.0,
        step_percent: 2.5,
    }),
}];

fn bus_name(index: usize) -> String {
    format!("bus_{index}")
}

fn section_comment(doc: &mut Document, title: &str) {
    doc.add_comment([title], CommentStyle::Doc, true, Section::Public);
}

pub fn build() -> Result<Document> {
    let mut doc = Document::new("ElectricalGrid").with_description("An electric grid");
    doc.add_import("Modelica.Units.SI", ())?;
    doc.add_import("Modelica.ComplexMath", ())?;
    doc.add_import(
        "TransiEnt.Components.Boundaries.Electrical.ComplexPower",
        vec!["SlackBoundary", "PQBoundary"],
    )?;
    doc.add_import("TransiEnt.Components.Electrical.Grid.PiModelComplex", ())?;
    doc.add_import(
        "TransiEnt.Components.Electrical.PowerTransformation.TransformerPiModelComplex",
        "Transformer",
    )?;

    for (type_name, ident, x) in [
        ("TransiEnt.SimCenter", "simCenter", -80.0),
        ("TransiEnt.ModelStatistics", "modelStatistics", -90.0),
    ] {
        doc.add_declaration(
            type_name,
            ident,
            DeclarationOptions::new()
                .flag(DeclarationFlag::Inner)
                .placement(Placement::at(x, 0.0)),
        )?;
    }

    doc.add_text(NODE_MODEL.lines(), true, Section::Public);

    let geo = geo_bounds(&BUSES);
    let map = Map2d::new(geo, DIAGRAM, Some(Rounding::Even))?;
    let positions: Vec<(f64, f64)> = BUSES.iter().map(|bus| map.apply(bus.geo)).collect();

    section_comment(&mut doc, "Bus");
    for (i, bus) in BUSES.iter().enumerate() {
        doc.add_declaration(
            "Node",
            bus_name(i),
            DeclarationOptions::new()
                .modify("v_n", KV.quantity(bus.vn_kv))
                .modify("v_pu_start", bus.vm_pu)
                .modify("delta_start", DEGREES.quantity(bus.va_degree))
                .placement(Placement::at(positions[i].0, positions[i].1)),
        )?;
    }

    section_comment(&mut doc, "Load");
    for (i, load) in LOADS.iter().enumerate() {
        add_pq_boundary(&mut doc, &format!("load_{i}"), load, 1.0)?;
    }

    section_comment(&mut doc, "Sgen");
    for (i, sgen) in SGENS.iter().enumerate() {
        add_pq_boundary(&mut doc, &format!("sgen_{i}"), sgen, -1.0)?;
    }

    section_comment(&mut doc, "Ext grid");
    let slack = &BUSES[0];
    doc.add_declaration(
        "SlackBoundary",
        "ext_grid_0",
        DeclarationOptions::new()
            .modify("v_gen", KV.quantity(slack.vm_pu * slack.vn_kv))
            .modify("delta_slackgen", DEGREES.quantity(slack.va_degree)),
    )?;
    doc.add_connection(&["ext_grid_0", "epp", bus_name(0).as_str(), "epp"])?;

    section_comment(&mut doc, "Line");
    for (i, line) in LINES.iter().enumerate() {
        let ident = format!("line_{i}");
        let susceptance =
            2.0 * std::f64::consts::PI * GRID_FREQUENCY * line.c_nf_per_km * 1e-9 / 1000.0;
        doc.add_declaration(
            "PiModelComplex",
            ident.as_str(),
            DeclarationOptions::new()
                .modify("l", KM.quantity(line.length_km))
                .modify("p", line.parallel)
                .modify("r_custom", line.r_ohm_per_km / 1000.0)
                .modify("x_custom", line.x_ohm_per_km / 1000.0)
                .modify("b_custom", susceptance)
                .modify("i_n", KA.quantity(line.max_i_ka))
                .placement(position_between(
                    positions[line.from_bus],
                    positions[line.to_bus],
                )),
        )?;
        let (from, to) = (bus_name(line.from_bus), bus_name(line.to_bus));
        doc.add_connection(&[from.as_str(), "epp", ident.as_str(), "epp_p"])?;
        doc.add_connection(&[to.as_str(), "epp", ident.as_str(), "epp_n"])?;
    }

    section_comment(&mut doc, "Trafo");
    for (i, trafo) in TRAFOS.iter().enumerate() {
        let ident = format!("trafo_{i}");
        let mut options = DeclarationOptions::new()
            .modify("S_n", MVA.quantity(trafo.sn_mva))
            .modify("vn_hv", KV.quantity(trafo.vn_hv_kv))
            .modify("vn_lv", KV.quantity(trafo.vn_lv_kv))
            .modify("vk", trafo.vk_percent / 100.0)
            .modify("vk_r", trafo.vkr_percent / 100.0)
            .modify("P_Fe", KW.quantity(trafo.pfe_kw))
            .modify("i_0", trafo.i0_percent / 100.0)
            .placement(position_between(
                positions[trafo.hv_bus],
                positions[trafo.lv_bus],
            ));
        if let Some(tap) = &trafo.tap {
            let mut ratio = (tap.pos - tap.neutral) * tap.step_percent / 100.0 + 1.0;
            if ratio.is_nan() {
                ratio = 1.0;
            }
            options = options.modify("isTapped", true);
            if tap.lv_side {
                options = options.modify("tapLV", true);
                ratio = 1.0 / ratio;
            }
            options = options.modify("ratio", Value::from(ratio));
        }
        doc.add_declaration("Transformer", ident.as_str(), options)?;
        let (hv, lv) = (bus_name(trafo.hv_bus), bus_name(trafo.lv_bus));
        doc.add_connection(&[ident.as_str(), "epp_1", hv.as_str(), "epp"])?;
        doc.add_connection(&[ident.as_str(), "epp_2", lv.as_str(), "epp"])?;
    }

    Ok(doc)
}

/// Loads draw power from the bus; static generators feed it with `sign = -1`.
fn add_pq_boundary(doc: &mut Document, ident: &str, injection: &Injection, sign: f64) -> Result<()> {
    let bus = &BUSES[injection.bus];
    doc.add_declaration(
        "PQBoundary",
        ident,
        DeclarationOptions::new()
            .modify("useInputConnectorP", false)
            .modify("P_el_set_const", MW.quantity(sign * injection.p_mw))
            .modify("useInputConnectorQ", false)
            .modify("Q_el_set_const", MVAR.quantity(sign * injection.q_mvar))
            .modify("useCosPhi", false)
            .modify("v_n", KV.quantity(bus.vn_kv)),
    )?;
    let bus_ident = bus_name(injection.bus);
    doc.add_connection(&[bus_ident.as_str(), "epp", ident, "epp"])?;
    Ok(())
}

fn geo_bounds(buses: &[Bus]) -> BoundingBox {
    let (mut left, mut down) = (f64::INFINITY, f64::INFINITY);
    let (mut right, mut up) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for bus in buses {
        let (x, y) = bus.geo;
        left = left.min(x);
        right = right.max(x);
        down = down.min(y);
        up = up.max(y);
    }
    ((left, down), (right, up))
}
