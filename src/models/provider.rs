use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct GuardianEnvelope {
    pub response: GuardianResponse,
}

#[derive(Deserialize, Debug)]
pub struct GuardianResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub results: Vec<GuardianItem>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GuardianItem {
    pub web_title: Option<String>,
    pub web_url: Option<String>,
    pub web_publication_date: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct MediaStackResponse {
    #[serde(default)]
    pub data: Vec<MediaStackItem>,
    #[serde(default)]
    pub error: Option<MediaStackApiError>,
}

#[derive(Deserialize, Debug)]
pub struct MediaStackApiError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct MediaStackItem {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub published_at: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
}
