use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Listing as served from `/api/hackathons`.
///
/// Leaf fields carry whatever JSON the upstream sent. A field the upstream
/// omitted is omitted here too; an explicit `null` stays `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hackathon {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_state: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_left_to_submission: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_period_dates: Option<Value>,
    pub themes: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prize_amount: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registrations_count: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winners_announced: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_gallery_url: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_a_submission_url: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite_only: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eligibility_requirement_invite_only_description: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub managed_by_devpost_badge: Option<Value>,
}

/// Envelope returned by the hackathon listing API
#[derive(Debug, Deserialize)]
pub struct HackathonListing {
    pub hackathons: Vec<RawHackathon>,
}

/// Only `displayed_location` and `themes` are structural; everything else passes through.
#[derive(Debug, Deserialize)]
pub struct RawHackathon {
    pub displayed_location: DisplayedLocation,
    pub themes: Vec<Theme>,
    #[serde(default, deserialize_with = "present")]
    pub id: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub open_state: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub thumbnail_url: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub url: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub time_left_to_submission: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub submission_period_dates: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub prize_amount: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub registrations_count: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub featured: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub organization_name: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub winners_announced: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub submission_gallery_url: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub start_a_submission_url: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub invite_only: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub eligibility_requirement_invite_only_description: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub managed_by_devpost_badge: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct DisplayedLocation {
    #[serde(default, deserialize_with = "present")]
    pub location: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct Theme {
    #[serde(default)]
    pub name: Value,
}

/// Keeps an explicit `null` as `Some(Value::Null)`; only a missing key is `None`
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl From<RawHackathon> for Hackathon {
    fn from(raw: RawHackathon) -> Self {
        Self {
            id: raw.id,
            title: raw.title,
            location: raw.displayed_location.location,
            open_state: raw.open_state,
            thumbnail_url: raw.thumbnail_url,
            url: raw.url,
            time_left_to_submission: raw.time_left_to_submission,
            submission_period_dates: raw.submission_period_dates,
            themes: raw.themes.into_iter().map(|theme| theme.name).collect(),
            prize_amount: raw.prize_amount,
            registrations_count: raw.registrations_count,
            featured: raw.featured,
            organization_name: raw.organization_name,
            winners_announced: raw.winners_announced,
            submission_gallery_url: raw.submission_gallery_url,
            start_a_submission_url: raw.start_a_submission_url,
            invite_only: raw.invite_only,
            eligibility_requirement_invite_only_description: raw.eligibility_requirement_invite_only_description,
            managed_by_devpost_badge: raw.managed_by_devpost_badge,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn project(listing: Value) -> Vec<Value> {
        let listing: HackathonListing = serde_json::from_value(listing).unwrap();
        listing
            .hackathons
            .into_iter()
            .map(|raw| serde_json::to_value(Hackathon::from(raw)).unwrap())
            .collect()
    }

    #[test]
    fn test_projection_flattens_location_and_themes() {
        let projected = project(json!({
            "hackathons": [{
                "id": 42,
                "title": "Build Week",
                "displayed_location": { "icon": "globe", "location": "Online" },
                "open_state": "open",
                "themes": [{ "id": 1, "name": "AI" }, { "id": 2, "name": "Web" }],
                "prize_amount": "$<span data-currency-value>10,000</span>",
                "registrations_count": 1200,
                "featured": true,
                "analytics_identifier": "ignored"
            }]
        }));

        assert_eq!(
            projected[0],
            json!({
                "id": 42,
                "title": "Build Week",
                "location": "Online",
                "open_state": "open",
                "themes": ["AI", "Web"],
                "prize_amount": "$<span data-currency-value>10,000</span>",
                "registrations_count": 1200,
                "featured": true
            })
        );
    }

    #[test]
    fn test_leaf_fields_pass_through_any_json_type() {
        let projected = project(json!({
            "hackathons": [{
                "id": "h-1",
                "title": null,
                "displayed_location": { "location": null },
                "themes": [{ "name": "AI" }, { "id": 7 }],
                "prize_amount": 0,
                "registrations_count": "1,200",
                "invite_only": "no"
            }]
        }));

        assert_eq!(projected[0]["id"], "h-1");
        assert_eq!(projected[0]["title"], Value::Null);
        assert!(projected[0].as_object().unwrap().contains_key("title"));
        assert!(projected[0].as_object().unwrap().contains_key("location"));
        assert_eq!(projected[0]["themes"], json!(["AI", null]));
        assert_eq!(projected[0]["prize_amount"], 0);
        assert_eq!(projected[0]["registrations_count"], "1,200");
        assert_eq!(projected[0]["invite_only"], "no");
        assert!(!projected[0].as_object().unwrap().contains_key("featured"));
    }

    #[test]
    fn test_missing_themes_is_a_shape_error() {
        let result = serde_json::from_value::<HackathonListing>(json!({
            "hackathons": [{
                "id": 1,
                "title": "No themes",
                "displayed_location": { "location": "Online" }
            }]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_or_null_displayed_location_is_a_shape_error() {
        let missing = serde_json::from_value::<HackathonListing>(json!({
            "hackathons": [{ "id": 1, "themes": [] }]
        }));
        assert!(missing.is_err());

        let null = serde_json::from_value::<HackathonListing>(json!({
            "hackathons": [{ "id": 1, "displayed_location": null, "themes": [] }]
        }));
        assert!(null.is_err());
    }
}
