use serde::Deserialize;

/// A work item snapshot as returned by the backend. Only the fields the CLI
/// renders are modeled; everything else in the `fields` map is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorkItem {
    pub id: i64,
    #[serde(default)]
    pub fields: WorkItemFields,
    #[allow(dead_code)]
    #[serde(default)]
    pub url: Option<String>,
}

/// The backend leaves out fields that have never been set, so everything
/// here defaults to an empty string.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WorkItemFields {
    #[serde(rename = "System.Title", default)]
    pub title: String,
    #[serde(rename = "System.State", default)]
    pub state: String,
    #[allow(dead_code)]
    #[serde(rename = "System.Description", default)]
    pub description: String,
}

/// One row of a WIQL result: an id plus the item's REST url, no field data.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkItemReference {
    pub id: i64,
    #[allow(dead_code)]
    #[serde(default)]
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_backend_field_names() {
        let json = r#"{
            "id": 42,
            "rev": 3,
            "fields": {
                "System.Title": "Fix login",
                "System.State": "Active",
                "System.Description": "<div>SSO is broken</div>",
                "System.AreaPath": "Proj"
            },
            "url": "https://dev.azure.com/org/proj/_apis/wit/workItems/42"
        }"#;
        let item: WorkItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, 42);
        assert_eq!(item.fields.title, "Fix login");
        assert_eq!(item.fields.state, "Active");
        assert_eq!(item.fields.description, "<div>SSO is broken</div>");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let item: WorkItem =
            serde_json::from_str(r#"{"id": 7, "fields": {"System.Title": "Only a title"}}"#)
                .unwrap();
        assert_eq!(item.fields.state, "");
        assert_eq!(item.fields.description, "");
        assert_eq!(item.url, None);
    }
}
