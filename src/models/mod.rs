pub mod comments;
pub mod likes;
pub mod posts;
pub mod response;
pub mod users;
