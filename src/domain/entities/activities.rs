use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::activities;

/// Catalog row for one suggestion, shared by every page of the same type.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = activities)]
pub struct ActivityEntity {
    pub id: Uuid,
    pub page_type: String,
    pub title: String,
    pub prompt: String,
    pub category: String,
    pub emoji: String,
    pub duration: i32,
}
