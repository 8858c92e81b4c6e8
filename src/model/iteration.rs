use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A team iteration (sprint) from `work/teamsettings/iterations`.
#[derive(Debug, Clone, Deserialize)]
pub struct Iteration {
    #[allow(dead_code)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub attributes: IterationAttributes,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IterationAttributes {
    pub start_date: Option<DateTime<Utc>>,
    pub finish_date: Option<DateTime<Utc>>,
    /// `past`, `current` or `future`.
    pub time_frame: Option<String>,
}
