use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};
use serde_json::Value;

pub type Labels    = BTreeMap<String, String>;
pub type LabelsMap = BTreeMap<String, Labels>;
pub type Vars      = BTreeMap<String, String>;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Object {
    pub labels:  Labels,
    pub vars:    Vars,
    pub files:   BTreeMap<String, File>,
    pub configs: BTreeMap<String, BaseConfig>,
    pub metrics: Vec<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct File {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub obj:  Value,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseConfig {
    pub disabled:     bool,
    pub labels:       Labels,
    pub vars:         Vars,
    pub qualities:    Vec<BaseQuality>,
    pub availability: Option<BaseAvailability>,
    pub metrics:      Vec<BaseMetric>,
}

// Empty window fields fall back to the builder options.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseQuality {
    pub disabled: bool,
    pub range:    String,
    pub every:    String,
    pub points:   u32,
    pub query:    String,
    pub weight:   Option<u32>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseAvailability {
    pub disabled: bool,
    pub queries:  Vec<BaseAvailabilityQuery>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseAvailabilityQuery {
    pub query:  String,
    pub labels: Labels,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseMetric {
    pub disabled:  bool,
    pub name:      String,
    pub query:     String,
    pub unique_by: Vec<String>,
    pub labels:    Labels,
}

impl BaseConfig {
    pub fn is_empty(&self) -> bool {
        let availability = self.availability.as_ref().map(|a| a.queries.is_empty()).unwrap_or(true);
        self.qualities.is_empty() && self.metrics.is_empty() && availability
    }
}
