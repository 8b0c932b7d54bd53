use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::pages;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = pages)]
pub struct PageEntity {
    pub id: Uuid,
    pub slug: String,
    pub page_type: String,
    pub name1: String,
    pub name2: Option<String>,
    pub occasion: Option<String>,
    pub message: String,
    pub start_date: NaiveDate,
    pub photo_urls: Vec<String>,
    pub plan: String,
    pub status: String,
    pub billing_id: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload. Status starts at `pending_payment`; id and timestamps come
/// from the database defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = pages)]
pub struct InsertPageEntity {
    pub slug: String,
    pub page_type: String,
    pub name1: String,
    pub name2: Option<String>,
    pub occasion: Option<String>,
    pub message: String,
    pub start_date: NaiveDate,
    pub photo_urls: Vec<String>,
    pub plan: String,
    pub status: String,
}
