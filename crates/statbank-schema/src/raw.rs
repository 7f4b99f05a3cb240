//! Serde mirror of the raw extraction description.
//!
//! Field names follow the statbank's JSON keys. Column numbers and decimal
//! counts arrive as strings but numbers are accepted too.

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Deserialize)]
pub struct RawSchema {
    #[serde(rename = "Uttaksbeskrivelse_lagd")]
    pub created: String,
    #[serde(rename = "TabellId", deserialize_with = "loose_string")]
    pub table_id: String,
    #[serde(rename = "Huvudtabell")]
    pub main_table: String,
    #[serde(rename = "DeltabellTitler", default)]
    pub subtable_titles: Vec<RawSubtableTitle>,
    #[serde(rename = "deltabller", default)]
    pub subtables: Vec<RawSubtable>,
    #[serde(rename = "kodelister", default)]
    pub codelists: Vec<RawCodelist>,
    #[serde(rename = "IRkodelister", default)]
    pub ir_codelists: Vec<RawCodelist>,
    #[serde(rename = "null_prikk_missing_kodeliste", default)]
    pub suppression_codes: Vec<RawSuppressionCode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSubtableTitle {
    #[serde(rename = "Filnavn")]
    pub file_name: String,
    #[serde(rename = "Filtext", default)]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSubtable {
    #[serde(rename = "deltabell")]
    pub name: String,
    #[serde(rename = "variabler", default)]
    pub variables: Vec<RawVariable>,
    #[serde(rename = "statistikkvariabler", default)]
    pub statistics: Vec<RawStatistic>,
    #[serde(rename = "null_prikk_missing", default)]
    pub suppression: Vec<RawSuppression>,
    #[serde(rename = "eksempel_linje", default)]
    pub example_line: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawVariable {
    #[serde(rename = "kolonnenummer", deserialize_with = "loose_string")]
    pub column_number: String,
    #[serde(rename = "Klassifikasjonsvariabel")]
    pub name: String,
    #[serde(rename = "Variabeltext", default)]
    pub text: String,
    #[serde(rename = "Kodeliste_id", default)]
    pub codelist_id: String,
    #[serde(rename = "Kodeliste_text", default)]
    pub codelist_text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawStatistic {
    #[serde(rename = "kolonnenummer", deserialize_with = "loose_string")]
    pub column_number: String,
    #[serde(rename = "Text")]
    pub text: String,
    #[serde(rename = "Enhet", default)]
    pub unit: String,
    #[serde(
        rename = "Antall_lagrede_desimaler",
        deserialize_with = "loose_string",
        default
    )]
    pub stored_decimals: String,
    #[serde(
        rename = "Antall_viste_desimaler",
        deserialize_with = "loose_string",
        default
    )]
    pub shown_decimals: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSuppression {
    #[serde(rename = "kolonnenummer", deserialize_with = "loose_string")]
    pub column_number: String,
    #[serde(rename = "gjelder_for_text", default)]
    pub applies_to_text: String,
    #[serde(rename = "gjelder_for__kolonner_nummer", deserialize_with = "loose_string")]
    pub applies_to: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCodelist {
    #[serde(rename = "kodeliste")]
    pub id: String,
    #[serde(rename = "SumIALtTotalKode", default)]
    pub total_code: Option<String>,
    #[serde(rename = "koder", default)]
    pub codes: Vec<RawCode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCode {
    #[serde(rename = "kode", deserialize_with = "loose_string")]
    pub code: String,
    #[serde(rename = "text", default)]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSuppressionCode {
    #[serde(rename = "Kode", deserialize_with = "loose_string")]
    pub code: String,
    #[serde(rename = "Vises_som", default)]
    pub shown_as: String,
    #[serde(rename = "Beskrivelse", default)]
    pub description: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Text(String),
    Integer(i64),
}

fn loose_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Loose::deserialize(deserializer)? {
        Loose::Text(s) => s,
        Loose::Integer(n) => n.to_string(),
    })
}
