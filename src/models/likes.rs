use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct LikeCountDto {
    pub count: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LikeStatusDto {
    pub liked: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LikeToggleDto {
    pub liked: bool,
    pub count: i64,
}
