use serde::{Deserialize, Serialize};

/// One page of the upstream observations listing.
///
/// `per_page` is the size the server actually applied, which may be smaller
/// than the size requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationPage {
    pub total_results: u64,
    pub page: u32,
    pub per_page: u32,
    #[serde(default)]
    pub results: Vec<Observation>,
}

/// An observation record, reduced to the fields scoring reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub id: u64,
    pub user: User,
    /// `"lat,lng"` as reported upstream. Absent on obscured records.
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub taxon: Option<Taxon>,
}

impl Observation {
    /// The observer's handle in the lowercase form rosters use.
    pub fn handle(&self) -> String {
        self.user.login.to_ascii_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub login: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Taxon {
    /// Comma-separated ids of the observed taxon and its ancestors.
    #[serde(default)]
    pub min_species_ancestry: Option<String>,
}

impl Taxon {
    /// Whether `taxon_id` appears anywhere in the ancestry chain.
    pub fn ancestry_contains(&self, taxon_id: &str) -> Option<bool> {
        self.min_species_ancestry
            .as_deref()
            .map(|chain| chain.split(',').any(|id| id.trim() == taxon_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_is_lowercased() {
        let observation = Observation {
            id: 42,
            user: User {
                login: "BirdNerd".to_string(),
            },
            location: None,
            taxon: None,
        };

        assert_eq!(observation.handle(), "birdnerd");
    }

    #[test]
    fn ancestry_matches_whole_ids_only() {
        let taxon = Taxon {
            min_species_ancestry: Some("47851,47852,47853".to_string()),
        };

        assert_eq!(taxon.ancestry_contains("47852"), Some(true));
        assert_eq!(taxon.ancestry_contains("4785"), Some(false));

        let bare = Taxon {
            min_species_ancestry: None,
        };
        assert_eq!(bare.ancestry_contains("47852"), None);
    }

    #[test]
    fn page_decodes_without_results_field() {
        let json = r#"{"total_results": 0, "page": 1, "per_page": 200}"#;
        let page: ObservationPage = serde_json::from_str(json).unwrap();

        assert_eq!(page.total_results, 0);
        assert!(page.results.is_empty());
    }

    #[test]
    fn observation_decodes_upstream_shape() {
        let json = r#"{
            "id": 987654,
            "user": {"login": "moss_hunter"},
            "location": "-33.95,18.42",
            "taxon": {"min_species_ancestry": "48460,1,2"}
        }"#;
        let observation: Observation = serde_json::from_str(json).unwrap();

        assert_eq!(observation.id, 987654);
        assert_eq!(observation.location.as_deref(), Some("-33.95,18.42"));
        assert_eq!(
            observation.taxon.and_then(|t| t.ancestry_contains("48460")),
            Some(true)
        );
    }
}
