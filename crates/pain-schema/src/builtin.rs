//! Field tables shipped with the crate

const BASE: &str = include_str!("../schemas/base.yaml");
const V03: &str = include_str!("../schemas/pain.001.001.03.yaml");
const V04: &str = include_str!("../schemas/pain.001.001.04.yaml");
const V05: &str = include_str!("../schemas/pain.001.001.05.yaml");
const V06: &str = include_str!("../schemas/pain.001.001.06.yaml");
const V07: &str = include_str!("../schemas/pain.001.001.07.yaml");
const V08: &str = include_str!("../schemas/pain.001.001.08.yaml");
const V09: &str = include_str!("../schemas/pain.001.001.09.yaml");
const V10: &str = include_str!("../schemas/pain.001.001.10.yaml");

/// YAML source of a built-in table
pub(crate) fn source(name: &str) -> Option<&'static str> {
    match name {
        "base" => Some(BASE),
        "pain.001.001.03" => Some(V03),
        "pain.001.001.04" => Some(V04),
        "pain.001.001.05" => Some(V05),
        "pain.001.001.06" => Some(V06),
        "pain.001.001.07" => Some(V07),
        "pain.001.001.08" => Some(V08),
        "pain.001.001.09" => Some(V09),
        "pain.001.001.10" => Some(V10),
        _ => None,
    }
}
