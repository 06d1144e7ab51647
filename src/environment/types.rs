use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

/// Collaborator-provided endpoints and timings. The upload base is where the
/// service serves image files; photo and profile image references on the wire
/// are paths relative to it.
#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct Config {
    /// Base URL of the REST API. Must end with a slash.
    pub api_base: Url,
    /// Base URL for uploaded image files. Must end with a slash.
    pub upload_base: Url,
    /// How long a success or error banner stays up before the store clears
    /// it again.
    pub message_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: Url::parse("http://localhost:5000/api/").unwrap(),
            upload_base: Url::parse("http://localhost:5000/uploads/").unwrap(),
            message_delay: Duration::from_secs(2),
        }
    }
}

impl Config {
    pub fn photo_image_url(&self, image: &str) -> String {
        self.resolve("photos", image)
    }

    pub fn user_image_url(&self, image: &str) -> String {
        self.resolve("users", image)
    }

    fn resolve(&self, kind: &str, image: &str) -> String {
        self.upload_base
            .join(&format!("{kind}/{image}"))
            .map(|url| url.to_string())
            .unwrap_or_else(|_| image.to_string())
    }
}
