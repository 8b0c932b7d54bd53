use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::pages::PageEntity;
use crate::domain::value_objects::activities::ActivityModel;
use crate::domain::value_objects::enums::page_types::PageType;
use crate::domain::value_objects::plans;

pub const NAME_MAX_LEN: usize = 50;
pub const OCCASION_MAX_LEN: usize = 100;
pub const MESSAGE_MAX_LEN: usize = 300;

/// Creation draft as posted by the form. Photo upload happens elsewhere;
/// only the resulting URLs arrive here.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePageModel {
    #[serde(rename = "type")]
    pub page_type: PageType,
    pub name1: String,
    #[serde(default)]
    pub name2: Option<String>,
    #[serde(default)]
    pub occasion: Option<String>,
    pub message: String,
    pub start_date: NaiveDate,
    pub plan: String,
    #[serde(default)]
    pub photo_urls: Vec<String>,
}

/// One failed form field. `field` carries the wire name so the client can
/// attach the message to the offending input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

impl CreatePageModel {
    pub fn validate(&self, today: NaiveDate) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if self.name1.trim().is_empty() {
            errors.push(FieldError::new("name1", "Nome obrigatório"));
        } else if self.name1.chars().count() > NAME_MAX_LEN {
            errors.push(FieldError::new("name1", "Máximo 50 caracteres"));
        }

        let name2 = self.name2.as_deref().unwrap_or("");
        if self.page_type.requires_second_name() && name2.trim().is_empty() {
            errors.push(FieldError::new("name2", "Nome obrigatório"));
        } else if name2.chars().count() > NAME_MAX_LEN {
            errors.push(FieldError::new("name2", "Máximo 50 caracteres"));
        }

        if let Some(occasion) = &self.occasion {
            if occasion.chars().count() > OCCASION_MAX_LEN {
                errors.push(FieldError::new("occasion", "Máximo 100 caracteres"));
            }
        }

        if self.message.trim().is_empty() {
            errors.push(FieldError::new("message", "Mensagem obrigatória"));
        } else if self.message.chars().count() > MESSAGE_MAX_LEN {
            errors.push(FieldError::new("message", "Máximo 300 caracteres"));
        }

        if self.start_date > today {
            errors.push(FieldError::new("startDate", "Data não pode estar no futuro"));
        }

        let max_photos = plans::limits_for(&self.plan).max_photos as usize;
        if self.photo_urls.len() > max_photos {
            errors.push(FieldError::new(
                "photoUrls",
                "Quantidade de fotos acima do limite do plano",
            ));
        }

        errors
    }
}

/// Public page representation served to viewers, with the type-filtered
/// activity pool bundled in.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDto {
    pub id: Uuid,
    pub slug: String,
    #[serde(rename = "type")]
    pub page_type: String,
    pub name1: String,
    pub name2: Option<String>,
    pub occasion: Option<String>,
    pub message: String,
    pub start_date: NaiveDate,
    pub photo_urls: Vec<String>,
    pub plan: String,
    pub status: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub activities: Vec<ActivityModel>,
}

impl From<PageEntity> for PageDto {
    fn from(value: PageEntity) -> Self {
        Self {
            id: value.id,
            slug: value.slug,
            page_type: value.page_type,
            name1: value.name1,
            name2: value.name2,
            occasion: value.occasion,
            message: value.message,
            start_date: value.start_date,
            photo_urls: value.photo_urls,
            plan: value.plan,
            status: value.status,
            is_active: value.is_active,
            created_at: value.created_at,
            activities: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> CreatePageModel {
        CreatePageModel {
            page_type: PageType::Couple,
            name1: "Ana".to_string(),
            name2: Some("João".to_string()),
            occasion: Some("Namoro".to_string()),
            message: "Te amo!".to_string(),
            start_date: NaiveDate::from_ymd_opt(2022, 6, 15).unwrap(),
            plan: "9_90".to_string(),
            photo_urls: vec!["https://cdn.example.com/foto.jpg".to_string()],
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    #[test]
    fn valid_draft_passes() {
        assert!(draft().validate(today()).is_empty());
    }

    #[test]
    fn missing_first_name_is_field_scoped() {
        let mut model = draft();
        model.name1 = "   ".to_string();

        let errors = model.validate(today());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "name1");
        assert_eq!(errors[0].message, "Nome obrigatório");
    }

    #[test]
    fn second_name_required_except_for_pets() {
        let mut model = draft();
        model.name2 = None;
        assert!(model.validate(today()).iter().any(|e| e.field == "name2"));

        model.page_type = PageType::Pet;
        assert!(model.validate(today()).is_empty());
    }

    #[test]
    fn future_start_date_rejected() {
        let mut model = draft();
        model.start_date = today().succ_opt().unwrap();

        let errors = model.validate(today());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "startDate");
    }

    #[test]
    fn start_date_today_accepted() {
        let mut model = draft();
        model.start_date = today();
        assert!(model.validate(today()).is_empty());
    }

    #[test]
    fn message_and_occasion_bounds() {
        let mut model = draft();
        model.message = "x".repeat(MESSAGE_MAX_LEN + 1);
        model.occasion = Some("y".repeat(OCCASION_MAX_LEN + 1));

        let errors = model.validate(today());
        assert!(errors.iter().any(|e| e.field == "message"));
        assert!(errors.iter().any(|e| e.field == "occasion"));

        model.message = "x".repeat(MESSAGE_MAX_LEN);
        model.occasion = Some("y".repeat(OCCASION_MAX_LEN));
        assert!(model.validate(today()).is_empty());
    }

    #[test]
    fn photo_count_gated_by_plan() {
        let mut model = draft();
        model.photo_urls = vec![
            "https://cdn.example.com/1.jpg".to_string(),
            "https://cdn.example.com/2.jpg".to_string(),
        ];

        // 9_90 allows a single photo.
        assert!(model.validate(today()).iter().any(|e| e.field == "photoUrls"));

        model.plan = "29_90".to_string();
        assert!(model.validate(today()).is_empty());

        // Unknown plans validate against the fallback tier.
        model.plan = "mystery".to_string();
        assert!(model.validate(today()).iter().any(|e| e.field == "photoUrls"));
    }

    #[test]
    fn multiple_failures_reported_together() {
        let model = CreatePageModel {
            page_type: PageType::Couple,
            name1: String::new(),
            name2: None,
            occasion: None,
            message: String::new(),
            start_date: today().succ_opt().unwrap(),
            plan: "9_90".to_string(),
            photo_urls: Vec::new(),
        };

        let errors = model.validate(today());
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["name1", "name2", "message", "startDate"]);
    }
}
