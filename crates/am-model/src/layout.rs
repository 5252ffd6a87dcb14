//! Known lab report layouts.
//!
//! Each layout is plain configuration data: the column set a report must
//! carry, how raw columns rename into the canonical AM schema, which
//! columns are discarded, and which measured quantities change units on
//! the way through. Supporting a new lab format means adding a layout
//! here, not adding branches to the conversion code.

use serde::{Deserialize, Serialize};

/// Molecular weight of nitrogen, used by the mg/L N -> µmol/L N rules.
pub const NITROGEN_MOLAR_MASS: f64 = 14.006_720;

/// A quantity-specific unit conversion formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitRule {
    /// mg/L N -> µmol/L N.
    MilligramsNitrogenToMicromoles,
    /// dS/m -> S/m.
    DecisiemensToSiemensPerMetre,
}

impl UnitRule {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            UnitRule::MilligramsNitrogenToMicromoles => value * 1000.0 / NITROGEN_MOLAR_MASS,
            UnitRule::DecisiemensToSiemensPerMetre => value / 10.0,
        }
    }
}

/// One source column whose values convert into a canonical column.
///
/// After conversion the source column is dropped; only the canonical
/// column remains, and the layout's `column_map` carries the canonical
/// name through the rename step unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitConversion {
    pub source: String,
    pub canonical: String,
    pub rule: UnitRule,
}

/// A named lab report format and its path into the canonical AM schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSpec {
    /// Short layout name, e.g. "soil" or "water".
    pub name: String,
    /// Method provenance tag written into every `<col>_meth` cell.
    pub method_number: String,
    /// Filename suffix for converted outputs.
    pub output_suffix: String,
    /// Raw column names (trailing whitespace already trimmed) that must
    /// all be present for a table to match this layout.
    pub required_columns: Vec<String>,
    /// Raw columns discarded unconditionally (lab-internal identifiers
    /// with no AM equivalent).
    pub dropped_columns: Vec<String>,
    /// Unit conversions applied before the rename step.
    pub unit_conversions: Vec<UnitConversion>,
    /// Raw -> canonical column renames. Covers every raw column that can
    /// survive dropping and conversion, plus the canonical names the
    /// conversions introduce.
    pub column_map: Vec<(String, String)>,
    /// Canonical columns removed after mapping. These are deliberately
    /// excluded from the output and arrive via a separate submission
    /// sheet (soil `depth`).
    pub withheld_columns: Vec<String>,
    /// Canonical analysis columns in declared output order. Each gets a
    /// paired `<col>_meth` provenance column.
    pub analysis_columns: Vec<String>,
}

impl LayoutSpec {
    /// Required columns absent from `incoming`; empty means the table
    /// matches this layout.
    pub fn missing_columns<'a>(&'a self, incoming: &[&str]) -> Vec<&'a str> {
        self.required_columns
            .iter()
            .map(String::as_str)
            .filter(|required| !incoming.contains(required))
            .collect()
    }

    pub fn matches(&self, incoming: &[&str]) -> bool {
        self.missing_columns(incoming).is_empty()
    }

    /// Canonical name for a raw column, if the layout maps it.
    pub fn canonical_for(&self, raw: &str) -> Option<&str> {
        self.column_map
            .iter()
            .find(|(from, _)| from == raw)
            .map(|(_, to)| to.as_str())
    }

    /// Required columns not covered by dropping, conversion, renaming or
    /// the untitled-placeholder convention. Non-empty means the layout
    /// definition itself would lose data; pinned by tests.
    pub fn unaccounted_columns(&self) -> Vec<&str> {
        self.required_columns
            .iter()
            .map(String::as_str)
            .filter(|name| {
                !is_placeholder_column(name)
                    && !self.dropped_columns.iter().any(|dropped| dropped == name)
                    && !self
                        .unit_conversions
                        .iter()
                        .any(|conversion| conversion.source == *name)
                    && self.canonical_for(name).is_none()
            })
            .collect()
    }
}

/// Untitled spreadsheet columns surface as `Unnamed: <idx>` placeholders.
/// They carry no data in well-formed reports and are expected to vanish
/// in the empty-column drop.
pub fn is_placeholder_column(name: &str) -> bool {
    name.starts_with("Unnamed")
}

/// All known layouts in detection priority order.
///
/// The two layouts are mutually exclusive by construction (neither
/// required set contains the other), but the order is still explicit:
/// the first match wins, and soil outranks water.
pub fn known_layouts() -> Vec<LayoutSpec> {
    vec![soil_layout(), water_layout()]
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_string()).collect()
}

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(from, to)| ((*from).to_string(), (*to).to_string()))
        .collect()
}

fn water_layout() -> LayoutSpec {
    LayoutSpec {
        name: "water".to_string(),
        method_number: "2.1".to_string(),
        output_suffix: "_AM_WATER_format_UPDATE".to_string(),
        required_columns: strings(&[
            "Lab Number",
            "Unnamed: 1",
            "Name",
            "Unnamed: 3",
            "Code",
            "Customer",
            "Ammonium Nitrogen",
            "Nitrate Nitrogen",
            "Unnamed: 8",
            "Boron",
            "Sodium",
            "Magnesium",
            "Phosphorous",
            "Sulfur",
            "Chloride",
            "Potassium",
            "Calcium",
            "Manganese",
            "Iron",
            "Copper",
            "Zinc",
            "Bicarb",
            "Carbonate",
            "Conductivity",
            "pH",
        ]),
        dropped_columns: strings(&["Lab Number", "Code", "Customer"]),
        unit_conversions: vec![
            UnitConversion {
                source: "Ammonium Nitrogen".to_string(),
                canonical: "ammonium".to_string(),
                rule: UnitRule::MilligramsNitrogenToMicromoles,
            },
            UnitConversion {
                source: "Nitrate Nitrogen".to_string(),
                canonical: "nitrate_nitrite".to_string(),
                rule: UnitRule::MilligramsNitrogenToMicromoles,
            },
            UnitConversion {
                source: "Conductivity".to_string(),
                canonical: "conductivity_aqueous".to_string(),
                rule: UnitRule::DecisiemensToSiemensPerMetre,
            },
        ],
        column_map: pairs(&[
            ("Name", "sample_id"),
            ("ammonium", "ammonium"),
            ("nitrate_nitrite", "nitrate_nitrite"),
            ("conductivity_aqueous", "conductivity_aqueous"),
            ("Boron", "icp_te_boron"),
            ("Sodium", "sodium"),
            ("Magnesium", "magnesium"),
            ("Phosphorous", "icp_te_phosphorus"),
            ("Sulfur", "icp_te_sulfur"),
            ("Chloride", "chloride"),
            ("Potassium", "potassium"),
            ("Calcium", "icp_te_calcium"),
            ("Manganese", "icp_te_manganese"),
            ("Iron", "icp_te_iron"),
            ("Copper", "icp_te_copper"),
            ("Zinc", "icp_te_zinc"),
            ("Bicarb", "bicarbonate"),
            ("Carbonate", "carbonate"),
            ("pH", "ph"),
        ]),
        withheld_columns: Vec::new(),
        analysis_columns: strings(&[
            "ammonium",
            "bicarbonate",
            "carbonate",
            "chloride",
            "conductivity_aqueous",
            "icp_te_boron",
            "icp_te_calcium",
            "icp_te_copper",
            "icp_te_iron",
            "icp_te_manganese",
            "icp_te_phosphorus",
            "icp_te_sulfur",
            "icp_te_zinc",
            "magnesium",
            "nitrate_nitrite",
            "ph",
            "potassium",
            "sodium",
        ]),
    }
}

fn soil_layout() -> LayoutSpec {
    LayoutSpec {
        name: "soil".to_string(),
        method_number: "2.1".to_string(),
        output_suffix: "_AM_SOIL_format_UPDATE".to_string(),
        required_columns: strings(&[
            "Lab Number",
            "Unnamed: 1",
            "Name",
            "Unnamed: 3",
            "Code",
            "Customer",
            "Depth",
            "Colour",
            "Unnamed: 8",
            "Gravel",
            "Texture",
            "Ammonium Nitrogen",
            "Nitrate Nitrogen",
            "Phosphorus Colwell",
            "Potassium Colwell",
            "Sulfur",
            "Organic Carbon",
            "Conductivity",
            "pH Level (CaCl2)",
            "pH Level (H2O)",
            "DTPA Copper",
            "DTPA Iron",
            "DTPA Manganese",
            "DTPA Zinc",
            "Exc. Aluminium",
            "Exc. Calcium",
            "Exc. Magnesium",
            "Exc. Potassium",
            "Exc. Sodium",
            "Boron Hot CaCl2",
            "Total Nitrogen",
            "% Clay",
            "% Course Sand",
            "% Fine Sand",
            "% Sand",
            "% Silt",
        ]),
        dropped_columns: strings(&["Lab Number", "Code", "Customer"]),
        unit_conversions: Vec::new(),
        column_map: pairs(&[
            ("Name", "sample_id"),
            ("Depth", "depth"),
            ("Colour", "color"),
            ("Gravel", "gravel"),
            ("Texture", "texture"),
            ("Ammonium Nitrogen", "ammonium_nitrogen_wt"),
            ("Nitrate Nitrogen", "nitrate_nitrogen"),
            ("Phosphorus Colwell", "phosphorus_colwell"),
            ("Potassium Colwell", "potassium_colwell"),
            ("Sulfur", "sulphur"),
            ("Organic Carbon", "organic_carbon"),
            ("Conductivity", "conductivity"),
            ("pH Level (CaCl2)", "ph"),
            ("pH Level (H2O)", "ph_solid_h2o"),
            ("DTPA Copper", "dtpa_copper"),
            ("DTPA Iron", "dtpa_iron"),
            ("DTPA Manganese", "dtpa_manganese"),
            ("DTPA Zinc", "dtpa_zinc"),
            ("Exc. Aluminium", "exc_aluminium"),
            ("Exc. Calcium", "exc_calcium"),
            ("Exc. Magnesium", "exc_magnesium"),
            ("Exc. Potassium", "exc_potassium"),
            ("Exc. Sodium", "exc_sodium"),
            ("Boron Hot CaCl2", "boron_hot_cacl2"),
            ("Total Nitrogen", "total_nitrogen"),
            ("% Clay", "clay"),
            ("% Course Sand", "coarse_sand"),
            ("% Fine Sand", "fine_sand"),
            ("% Sand", "sand"),
            ("% Silt", "silt"),
        ]),
        // Depth must come in on the AM submission sheet instead.
        withheld_columns: strings(&["depth"]),
        analysis_columns: strings(&[
            "color",
            "gravel",
            "texture",
            "ammonium_nitrogen_wt",
            "nitrate_nitrogen",
            "phosphorus_colwell",
            "potassium_colwell",
            "sulphur",
            "organic_carbon",
            "conductivity",
            "ph",
            "ph_solid_h2o",
            "dtpa_copper",
            "dtpa_iron",
            "dtpa_manganese",
            "dtpa_zinc",
            "exc_aluminium",
            "exc_calcium",
            "exc_magnesium",
            "exc_potassium",
            "exc_sodium",
            "boron_hot_cacl2",
            "total_nitrogen",
            "clay",
            "coarse_sand",
            "fine_sand",
            "sand",
            "silt",
        ]),
    }
}
