use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::environment::model::{Comment, Photo, User};
use crate::environment::types::Config;

#[derive(
    Default, Clone, Debug, Serialize, Deserialize, Eq, PartialEq, Hash, PartialOrd, Ord,
)]
pub struct PhotoId(pub String);

#[derive(
    Default, Clone, Debug, Serialize, Deserialize, Eq, PartialEq, Hash, PartialOrd, Ord,
)]
pub struct UserId(pub String);

/// Display-ready photo. Image references arrive as upload-relative paths;
/// `image_url` is the resolved absolute URL the view can render directly.
#[derive(Default, Clone, Debug, Serialize, Deserialize)]
pub struct PhotoViewModel {
    pub id: PhotoId,
    pub title: String,
    pub image: String,
    pub image_url: String,
    pub user_id: UserId,
    pub user_name: String,
    pub likes: Vec<UserId>,
    pub comments: Vec<CommentViewModel>,
    pub created: Option<DateTime<Utc>>,
}

impl PartialEq for PhotoViewModel {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PhotoViewModel {}

impl PhotoViewModel {
    pub fn new(photo: &Photo, config: &Config) -> Self {
        Self {
            id: PhotoId(photo.id.clone()),
            title: photo.title.clone(),
            image: photo.image.clone(),
            image_url: config.photo_image_url(&photo.image),
            user_id: UserId(photo.user_id.clone()),
            user_name: photo.user_name.clone(),
            likes: photo.likes.iter().cloned().map(UserId).collect(),
            comments: photo
                .comments
                .iter()
                .map(|comment| CommentViewModel::new(comment, config))
                .collect(),
            created: photo.created_at,
        }
    }

    pub fn like_count(&self) -> usize {
        self.likes.len()
    }
}

#[derive(Default, Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct CommentViewModel {
    pub user_id: UserId,
    pub user_name: String,
    pub user_image_url: Option<String>,
    pub text: String,
}

impl CommentViewModel {
    pub fn new(comment: &Comment, config: &Config) -> Self {
        Self {
            user_id: UserId(comment.user_id.clone()),
            user_name: comment.user_name.clone(),
            user_image_url: comment
                .user_image
                .as_deref()
                .map(|image| config.user_image_url(image)),
            text: comment.text.clone(),
        }
    }
}

#[derive(Default, Clone, Debug, Serialize, Deserialize)]
pub struct UserViewModel {
    pub id: UserId,
    pub name: String,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    pub profile_image_url: Option<String>,
    pub joined: Option<DateTime<Utc>>,
}

impl PartialEq for UserViewModel {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for UserViewModel {}

impl UserViewModel {
    pub fn new(user: &User, config: &Config) -> Self {
        Self {
            id: UserId(user.id.clone()),
            name: user.name.clone(),
            email: user.email.clone(),
            bio: user.bio.clone(),
            profile_image: user.profile_image.clone(),
            profile_image_url: user
                .profile_image
                .as_deref()
                .map(|image| config.user_image_url(image)),
            joined: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photo_view_model_resolves_image_and_comments() {
        let config = Config::default();
        let photo = Photo {
            id: "p1".into(),
            title: "Sunset".into(),
            image: "sunset.jpg".into(),
            user_id: "u1".into(),
            user_name: "Ana".into(),
            likes: vec!["u2".into(), "u3".into()],
            comments: vec![Comment {
                text: "Linda!".into(),
                user_name: "Bia".into(),
                user_image: Some("bia.png".into()),
                user_id: "u2".into(),
            }],
            created_at: None,
        };
        let model = PhotoViewModel::new(&photo, &config);
        assert_eq!(model.image_url, "http://localhost:5000/uploads/photos/sunset.jpg");
        assert_eq!(model.like_count(), 2);
        assert_eq!(
            model.comments[0].user_image_url.as_deref(),
            Some("http://localhost:5000/uploads/users/bia.png")
        );
    }
}
