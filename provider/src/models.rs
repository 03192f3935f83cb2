use serde::Deserialize;

pub const ENDPOINT: &str = "https://api.ucsb.edu/dining/menuitems/v1";
pub const API_KEY_HEADER: &str = "ucsb-api-key";

/// One food item as reported by the dining service for a given
/// commons, meal, and day. Identity is structural (name + station).
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Entree {
    pub name: String,
    pub station: String,
}
