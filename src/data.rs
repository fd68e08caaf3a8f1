use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Quality {
    Silver,
    Gold,
    Platinum,
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Quality::Silver => "SILVER",
            Quality::Gold => "GOLD",
            Quality::Platinum => "PLATINUM",
        };
        f.write_str(label)
    }
}

/// Product type as labelled in the catalog. Each type implies a season.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DuvetType {
    #[serde(rename = "Sommerdyne")]
    Sommerdyne,
    #[serde(rename = "Dyne")]
    Dyne,
    #[serde(rename = "Vinterdyne")]
    Vinterdyne,
    #[serde(rename = "4-årstider dyne")]
    FourSeasons,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for DuvetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DuvetType::Sommerdyne => "Sommerdyne",
            DuvetType::Dyne => "Dyne",
            DuvetType::Vinterdyne => "Vinterdyne",
            DuvetType::FourSeasons => "4-årstider dyne",
            DuvetType::Unknown => "Ukendt",
        };
        f.write_str(label)
    }
}

/// Insulation level of a variant, coolest first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Insulation {
    #[serde(rename = "Sval")]
    Sval,
    #[serde(rename = "Normal")]
    Normal,
    #[serde(rename = "Varm")]
    Varm,
    #[serde(rename = "Ekstra varm")]
    EkstraVarm,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for Insulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Insulation::Sval => "Sval",
            Insulation::Normal => "Normal",
            Insulation::Varm => "Varm",
            Insulation::EkstraVarm => "Ekstra varm",
            Insulation::Unknown => "Ukendt",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Variant {
    pub id: String,
    pub sku: String,
    pub length: u32,
    pub width: u32,
    pub price: u32,
    pub currency: String,
    #[serde(rename = "type")]
    pub duvet_type: DuvetType,
    pub insulation: Insulation,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub sku: String,
    pub slug: String,
    pub brand: String,
    pub name: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub allergy_friendly: bool,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub fillings: String,
    #[serde(default)]
    pub properties: Vec<String>,
    pub quality: Quality,
    pub rating: f64,
    pub variants: Vec<Variant>,
    #[serde(rename = "years_warranty", default)]
    pub years_warranty: u32,
}

impl Product {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand, self.name)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Season {
    Summer,
    Winter,
    AllSeason,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SleepTemperature {
    Cold,
    Normal,
    Warm,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Budget {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Size {
    Single,
    Double,
}

/// Sparse questionnaire answers. `None` on an axis means no preference.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_temperature: Option<SleepTemperature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<Season>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergies: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<Budget>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
}

/// One ranked catalog entry. Borrows from the catalog it was scored against.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendation<'a> {
    pub product: &'a Product,
    pub variant: &'a Variant,
    pub score: i32,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonRow {
    pub field: String,
    pub label: String,
    pub value1: String,
    pub value2: String,
    pub is_different: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonData {
    pub product1: String,
    pub variant1: String,
    pub product2: String,
    pub variant2: String,
    pub rows: Vec<ComparisonRow>,
    pub differences: Vec<String>,
    pub summary: String,
}
