//! 图像 DTO

use serde::Serialize;

use crate::models::Image;

/// 图像响应（路径与大小不对外暴露）
#[derive(Debug, Serialize, PartialEq)]
pub struct ImageResponse {
    pub id: String,
    pub name: String,
    pub scan: String,
}

impl From<Image> for ImageResponse {
    fn from(image: Image) -> Self {
        Self {
            id: image.id,
            name: image.name,
            scan: image.scan,
        }
    }
}
