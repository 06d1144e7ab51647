use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::multipart;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use super::types::Config;

// Wire entities

#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub image: String,
    pub user_id: String,
    pub user_name: String,
    #[serde(default)]
    pub likes: Vec<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Immutable once appended; lives inside its owning [`Photo`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "comment")]
    pub text: String,
    pub user_name: String,
    #[serde(default)]
    pub user_image: Option<String>,
    pub user_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct DeletePayload {
    pub id: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct UpdatePayload {
    pub photo: Photo,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LikePayload {
    pub photo_id: String,
    pub user_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct CommentPayload {
    pub comment: Comment,
    pub message: String,
}

/// An image file picked by the user, ready for multipart upload.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub data: Vec<u8>,
    pub mime: Option<String>,
}

/// Partial profile update; absent fields are left untouched by the server.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub image: Option<ImageUpload>,
}

/// Decided once at this boundary: either the server reported an
/// application-level problem through its `errors` array, or the request
/// failed below the application (network, status, undecodable body). Call
/// sites never re-inspect raw JSON.
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ApiError {
    #[error("{0}")]
    Domain(String),
    #[error("API error: {0}")]
    Transport(String),
}

// Raw REST surface

#[async_trait]
pub trait PhotoService: Send + Sync {
    async fn publish(&self, title: String, image: ImageUpload) -> Result<Photo, ApiError>;
    async fn user_photos(&self, user_id: String) -> Result<Vec<Photo>, ApiError>;
    async fn delete(&self, id: String) -> Result<DeletePayload, ApiError>;
    async fn update_title(&self, id: String, title: String) -> Result<UpdatePayload, ApiError>;
    async fn photo(&self, id: String) -> Result<Photo, ApiError>;
    async fn like(&self, id: String) -> Result<LikePayload, ApiError>;
    async fn comment(&self, id: String, text: String) -> Result<CommentPayload, ApiError>;
    async fn photos(&self) -> Result<Vec<Photo>, ApiError>;
    async fn search(&self, query: String) -> Result<Vec<Photo>, ApiError>;
    async fn user(&self, id: String) -> Result<User, ApiError>;
    async fn update_profile(&self, update: ProfileUpdate) -> Result<User, ApiError>;
}

pub struct HttpPhotoService {
    base: Url,
    token: Option<String>,
    client: reqwest::Client,
}

impl HttpPhotoService {
    pub fn new(base: Url, token: Option<String>) -> Self {
        Self {
            base,
            token,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|e| ApiError::Transport(format!("invalid endpoint {path}: {e}")))
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, call: &'static str) -> Result<T, ApiError> {
        let response = self
            .authorized(self.client.get(self.endpoint(path)?))
            .send()
            .await
            .transport_error(call)?;
        decode(response).await
    }

    fn image_part(image: ImageUpload) -> Result<multipart::Part, ApiError> {
        let mut part = multipart::Part::bytes(image.data).file_name(image.file_name);
        if let Some(mime) = image.mime.as_deref() {
            part = part
                .mime_str(mime)
                .map_err(|e| ApiError::Transport(format!("invalid mime type: {e}")))?;
        }
        Ok(part)
    }
}

#[async_trait]
impl PhotoService for HttpPhotoService {
    async fn publish(&self, title: String, image: ImageUpload) -> Result<Photo, ApiError> {
        let form = multipart::Form::new()
            .text("title", title)
            .part("image", Self::image_part(image)?);
        let response = self
            .authorized(self.client.post(self.endpoint("photos")?))
            .multipart(form)
            .send()
            .await
            .transport_error("publish")?;
        decode(response).await
    }

    async fn user_photos(&self, user_id: String) -> Result<Vec<Photo>, ApiError> {
        self.get(&format!("photos/user/{user_id}"), "user_photos")
            .await
    }

    async fn delete(&self, id: String) -> Result<DeletePayload, ApiError> {
        let response = self
            .authorized(self.client.delete(self.endpoint(&format!("photos/{id}"))?))
            .send()
            .await
            .transport_error("delete")?;
        decode(response).await
    }

    async fn update_title(&self, id: String, title: String) -> Result<UpdatePayload, ApiError> {
        let response = self
            .authorized(self.client.put(self.endpoint(&format!("photos/{id}"))?))
            .json(&serde_json::json!({ "title": title }))
            .send()
            .await
            .transport_error("update_title")?;
        decode(response).await
    }

    async fn photo(&self, id: String) -> Result<Photo, ApiError> {
        self.get(&format!("photos/{id}"), "photo").await
    }

    async fn like(&self, id: String) -> Result<LikePayload, ApiError> {
        let response = self
            .authorized(
                self.client
                    .put(self.endpoint(&format!("photos/like/{id}"))?),
            )
            .send()
            .await
            .transport_error("like")?;
        decode(response).await
    }

    async fn comment(&self, id: String, text: String) -> Result<CommentPayload, ApiError> {
        let response = self
            .authorized(
                self.client
                    .put(self.endpoint(&format!("photos/comment/{id}"))?),
            )
            .json(&serde_json::json!({ "comment": text }))
            .send()
            .await
            .transport_error("comment")?;
        decode(response).await
    }

    async fn photos(&self) -> Result<Vec<Photo>, ApiError> {
        self.get("photos", "photos").await
    }

    async fn search(&self, query: String) -> Result<Vec<Photo>, ApiError> {
        self.get(
            &format!("photos/search?q={}", urlencoding::encode(&query)),
            "search",
        )
        .await
    }

    async fn user(&self, id: String) -> Result<User, ApiError> {
        self.get(&format!("users/{id}"), "user").await
    }

    async fn update_profile(&self, update: ProfileUpdate) -> Result<User, ApiError> {
        let mut form = multipart::Form::new();
        if let Some(name) = update.name {
            form = form.text("name", name);
        }
        if let Some(bio) = update.bio {
            form = form.text("bio", bio);
        }
        if let Some(image) = update.image {
            form = form.part("profileImage", Self::image_part(image)?);
        }
        let response = self
            .authorized(self.client.put(self.endpoint("users")?))
            .multipart(form)
            .send()
            .await
            .transport_error("update_profile")?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let body: serde_json::Value = response
        .json()
        .await
        .map_err(|e| ApiError::Transport(format!("invalid response body: {e}")))?;
    decode_body(status, body)
}

fn decode_body<T: DeserializeOwned>(
    status: reqwest::StatusCode,
    body: serde_json::Value,
) -> Result<T, ApiError> {
    if let Some(message) = domain_error(&body) {
        return Err(ApiError::Domain(message));
    }
    if !status.is_success() {
        return Err(ApiError::Transport(format!("unexpected status {status}")));
    }
    serde_json::from_value(body).map_err(|e| ApiError::Transport(format!("unexpected payload: {e}")))
}

/// The service reports validation problems as `{"errors": [...]}` with any
/// status; the first entry is the one surfaced to the user.
fn domain_error(body: &serde_json::Value) -> Option<String> {
    let first = body.get("errors")?.as_array()?.first()?;
    Some(
        first
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| first.to_string()),
    )
}

/// Authenticated client facade handed to the reducers. Cheap to clone; the
/// token is fixed at construction, the ambient auth collaborator rebuilds
/// the model when it changes.
#[derive(Clone)]
pub struct Model {
    pub has_token: bool,
    client: Arc<dyn PhotoService + Send + Sync>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model").finish()
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(&Config::default(), None)
    }
}

impl Model {
    pub fn new(config: &Config, token: Option<String>) -> Self {
        let has_token = token.is_some();
        let client = HttpPhotoService::new(config.api_base.clone(), token);
        Self {
            has_token,
            client: Arc::new(client),
        }
    }

    /// Swap in another service implementation, e.g. an in-memory one.
    pub fn with_service(client: Arc<dyn PhotoService + Send + Sync>) -> Self {
        Self {
            has_token: true,
            client,
        }
    }

    pub async fn publish_photo(
        &self,
        title: String,
        image: ImageUpload,
    ) -> Result<Photo, ApiError> {
        log::trace!("Publish photo");
        self.client.publish(title, image).await
    }

    pub async fn user_photos(&self, user_id: String) -> Result<Vec<Photo>, ApiError> {
        log::trace!("User photos");
        self.client.user_photos(user_id).await
    }

    pub async fn delete_photo(&self, id: String) -> Result<DeletePayload, ApiError> {
        log::trace!("Delete photo");
        self.client.delete(id).await
    }

    pub async fn update_photo(&self, id: String, title: String) -> Result<UpdatePayload, ApiError> {
        log::trace!("Update photo");
        self.client.update_title(id, title).await
    }

    pub async fn single_photo(&self, id: String) -> Result<Photo, ApiError> {
        log::trace!("Single photo");
        self.client.photo(id).await
    }

    pub async fn like(&self, id: String) -> Result<LikePayload, ApiError> {
        log::trace!("Like");
        self.client.like(id).await
    }

    pub async fn comment(&self, id: String, text: String) -> Result<CommentPayload, ApiError> {
        log::trace!("Comment");
        self.client.comment(id, text).await
    }

    pub async fn photos(&self) -> Result<Vec<Photo>, ApiError> {
        log::trace!("All photos");
        self.client.photos().await
    }

    pub async fn search_photos(&self, query: String) -> Result<Vec<Photo>, ApiError> {
        log::trace!("Search photos");
        self.client.search(query).await
    }

    pub async fn user_details(&self, id: String) -> Result<User, ApiError> {
        log::trace!("User details");
        self.client.user(id).await
    }

    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<User, ApiError> {
        log::trace!("Update profile");
        self.client.update_profile(update).await
    }
}

trait ResultExt {
    type Output;
    fn transport_error(self, call: &'static str) -> Result<Self::Output, ApiError>;
}

impl<T> ResultExt for Result<T, reqwest::Error> {
    type Output = T;
    fn transport_error(self, call: &'static str) -> Result<T, ApiError> {
        self.map_err(|e| {
            let error = ApiError::Transport(format!("{call}: {e}"));
            log::error!("{error}");
            error
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use serde_json::json;

    #[test]
    fn domain_error_surfaces_first_entry() {
        let body = json!({ "errors": ["Title required", "Something else"] });
        assert_eq!(domain_error(&body), Some("Title required".to_string()));
    }

    #[test]
    fn empty_or_missing_errors_is_not_a_domain_error() {
        assert_eq!(domain_error(&json!({ "errors": [] })), None);
        assert_eq!(domain_error(&json!({ "_id": "a1" })), None);
    }

    #[test]
    fn decode_prefers_domain_error_over_status() {
        let result: Result<Photo, ApiError> = decode_body(
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({ "errors": ["Title required"] }),
        );
        assert_eq!(result, Err(ApiError::Domain("Title required".to_string())));
    }

    #[test]
    fn decode_normalizes_bad_status_to_transport() {
        let result: Result<Photo, ApiError> =
            decode_body(StatusCode::INTERNAL_SERVER_ERROR, json!({}));
        assert!(matches!(result, Err(ApiError::Transport(_))));
    }

    #[test]
    fn photo_decodes_from_wire_shape() {
        let photo: Photo = decode_body(
            StatusCode::OK,
            json!({
                "_id": "64f0c2",
                "title": "Sunset",
                "image": "sunset.jpg",
                "userId": "u1",
                "userName": "Ana",
                "likes": ["u2"],
                "comments": [
                    { "comment": "Linda!", "userName": "Bia", "userImage": "bia.png", "userId": "u2" }
                ]
            }),
        )
        .unwrap();
        assert_eq!(photo.id, "64f0c2");
        assert_eq!(photo.user_name, "Ana");
        assert_eq!(photo.likes, vec!["u2"]);
        assert_eq!(photo.comments[0].text, "Linda!");
    }

    #[test]
    fn like_payload_decodes_from_wire_shape() {
        let payload: LikePayload = decode_body(
            StatusCode::OK,
            json!({ "photoId": "p1", "userId": "u2", "message": "A foto foi curtida." }),
        )
        .unwrap();
        assert_eq!(payload.photo_id, "p1");
        assert_eq!(payload.user_id, "u2");
    }
}
