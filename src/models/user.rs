use serde::{Deserialize, Serialize};

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_COUNTRY: &str = "us";
pub const DEFAULT_CATEGORY: &str = "general";

/// User as returned to clients. Never carries the password hash.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub preferences: Preferences,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Preferences {
    pub language: String,
    pub country: String,
    pub category: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
        }
    }
}

/// Record kept in the user store.
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct StoredUser {
    pub username: String,
    pub password_hash: String,
    #[serde(default)]
    pub preferences: Preferences,
}

impl StoredUser {
    pub fn to_user(&self) -> User {
        User {
            username: self.username.clone(),
            preferences: self.preferences.clone(),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Body of a preferences update. Omitted fields reset to their defaults.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct PreferencesUpdate {
    pub language: Option<String>,
    pub country: Option<String>,
    pub category: Option<String>,
}

impl From<PreferencesUpdate> for Preferences {
    fn from(update: PreferencesUpdate) -> Self {
        let pick = |value: Option<String>, default: &str| {
            value
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        Preferences {
            language: pick(update.language, DEFAULT_LANGUAGE),
            country: pick(update.country, DEFAULT_COUNTRY),
            category: pick(update.category, DEFAULT_CATEGORY),
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}
