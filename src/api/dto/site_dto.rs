//! 站点 DTO

use serde::{Deserialize, Serialize};

use crate::models::Site;

#[derive(Debug, Deserialize)]
pub struct SiteRequest {
    pub name: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct SiteResponse {
    pub id: String,
    pub name: String,
}

impl From<Site> for SiteResponse {
    fn from(site: Site) -> Self {
        Self {
            id: site.id,
            name: site.name,
        }
    }
}
