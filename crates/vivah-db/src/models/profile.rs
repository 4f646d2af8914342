//! Profile database models (read-only views of the profile service's table)

use sqlx::FromRow;

/// Full profile row
#[derive(Debug, Clone, FromRow)]
pub struct ProfileModel {
    pub user_id: String,
    pub name: String,
    pub age: Option<i32>,
    pub photos: Vec<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub profession: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Display subset selected for notifications and match lists
#[derive(Debug, Clone, FromRow)]
pub struct DisplayInfoModel {
    pub user_id: String,
    pub name: String,
    pub photo_url: Option<String>,
    pub age: Option<i32>,
    pub location: Option<String>,
    pub profession: Option<String>,
}
