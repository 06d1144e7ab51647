pub mod photos;
pub mod users;
