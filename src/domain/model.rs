use serde::{Deserialize, Deserializer, Serialize};

/// Ranks are positive; a `0` from the API means unranked.
fn positive_rank<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.filter(|rank| *rank > 0))
}

/// One row of `GET /schools`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Institution {
    pub institution_id: String,
    pub name: String,
    #[serde(default)]
    pub city_state_zip: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default, deserialize_with = "positive_rank")]
    pub rank_2025: Option<u32>,
    #[serde(default)]
    pub rank_type: Option<String>,
    #[serde(default)]
    pub total_applicants: Option<i64>,
    #[serde(default)]
    pub total_admitted: Option<i64>,
    #[serde(default)]
    pub applicants_international: Option<i64>,
    #[serde(default)]
    pub admitted_international: Option<i64>,
}

/// One academic year of admission counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdmissionRecord {
    pub academic_year: String,
    #[serde(default)]
    pub total_applicants: Option<i64>,
    #[serde(default)]
    pub total_admitted: Option<i64>,
    #[serde(default)]
    pub total_enrolled: Option<i64>,
    #[serde(default)]
    pub applicants_international: Option<i64>,
    #[serde(default)]
    pub admitted_international: Option<i64>,
    #[serde(default)]
    pub enrolled_international: Option<i64>,
}

/// Payload of `GET /schools/{id}`. `admission_data` is most-recent-first as
/// delivered by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstitutionDetail {
    pub institution_id: String,
    pub name: String,
    #[serde(default)]
    pub city_state_zip: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub admission_data: Vec<AdmissionRecord>,
}

/// Query parameters for `GET /schools`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    pub letter: Option<char>,
    pub limit: Option<usize>,
}

impl ListQuery {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(q) = &self.q {
            pairs.push(("q", q.clone()));
        }
        if let Some(letter) = self.letter {
            pairs.push(("letter", letter.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_institution_missing_fields_are_none() {
        let json = serde_json::json!({
            "institution_id": "166027",
            "name": "Harvard University",
            "city_state_zip": "Cambridge, MA 02138",
            "rank_2025": 3,
            "total_applicants": 54008,
            "total_admitted": null
        });
        let school: Institution = serde_json::from_value(json).unwrap();
        assert_eq!(school.rank_2025, Some(3));
        assert_eq!(school.total_applicants, Some(54008));
        assert_eq!(school.total_admitted, None);
        assert_eq!(school.applicants_international, None);
        assert_eq!(school.rank_type, None);
    }

    #[test]
    fn test_zero_rank_is_unranked() {
        let json = serde_json::json!({
            "institution_id": "2",
            "name": "Unranked College",
            "rank_2025": 0
        });
        let school: Institution = serde_json::from_value(json).unwrap();
        assert_eq!(school.rank_2025, None);

        let ranked: Institution = serde_json::from_value(serde_json::json!({
            "institution_id": "3",
            "name": "Ranked College",
            "rank_2025": 12
        }))
        .unwrap();
        assert_eq!(ranked.rank_2025, Some(12));
    }

    #[test]
    fn test_detail_without_admission_data() {
        let json = serde_json::json!({"institution_id": "1", "name": "Solo College"});
        let detail: InstitutionDetail = serde_json::from_value(json).unwrap();
        assert!(detail.admission_data.is_empty());
    }

    #[test]
    fn test_query_pairs_skip_unset_fields() {
        let query = ListQuery {
            q: None,
            letter: Some('A'),
            limit: Some(1000),
        };
        assert_eq!(
            query.to_pairs(),
            vec![("letter", "A".to_string()), ("limit", "1000".to_string())]
        );
        assert!(ListQuery::default().to_pairs().is_empty());
    }
}
