use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Profile of an authenticated user. Never hard-deleted by the app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub preferences: Map<String, Value>,
}

impl UserProfile {
    pub fn new(user_id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            email: email.into(),
            photo_url: None,
            preferences: Map::new(),
        }
    }

    /// Apply a partial update in place.
    ///
    /// Preferences are merged key by key; a `null` value removes the key.
    pub fn apply(&mut self, update: &ProfileUpdate) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(photo_url) = &update.photo_url {
            self.photo_url = Some(photo_url.clone());
        }
        if let Some(preferences) = &update.preferences {
            for (key, value) in preferences {
                if value.is_null() {
                    self.preferences.remove(key);
                } else {
                    self.preferences.insert(key.clone(), value.clone());
                }
            }
        }
    }
}

/// Partial-field profile update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Map<String, Value>>,
}

impl ProfileUpdate {
    pub fn photo(url: impl Into<String>) -> Self {
        Self {
            photo_url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.photo_url.is_none() && self.preferences.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_apply_merges_preferences() {
        let mut profile = UserProfile::new("u1", "Ada", "ada@example.com");
        profile.preferences.insert("notifications".into(), json!(true));
        profile.preferences.insert("theme".into(), json!("dark"));

        let update: ProfileUpdate = serde_json::from_value(json!({
            "name": "Ada L.",
            "preferences": { "theme": null, "units": "metric" }
        }))
        .unwrap();
        profile.apply(&update);

        assert_eq!(profile.name, "Ada L.");
        assert_eq!(profile.email, "ada@example.com");
        assert_eq!(profile.preferences.get("notifications"), Some(&json!(true)));
        assert_eq!(profile.preferences.get("units"), Some(&json!("metric")));
        assert!(!profile.preferences.contains_key("theme"));
    }

    #[test]
    fn test_empty_update() {
        assert!(ProfileUpdate::default().is_empty());
        assert!(!ProfileUpdate::photo("https://cdn/p.jpg").is_empty());
    }
}
