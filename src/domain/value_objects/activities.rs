use serde::Serialize;

use crate::domain::entities::activities::ActivityEntity;
use crate::domain::value_objects::enums::page_types::PageType;

/// One suggestion card shown on a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityModel {
    pub id: String,
    pub title: String,
    pub prompt: String,
    pub category: String,
    pub emoji: String,
    pub duration: i32,
}

impl From<ActivityEntity> for ActivityModel {
    fn from(value: ActivityEntity) -> Self {
        Self {
            id: value.id.to_string(),
            title: value.title,
            prompt: value.prompt,
            category: value.category,
            emoji: value.emoji,
            duration: value.duration,
        }
    }
}

/// Built-in pool backing an empty `activities` table, so the selector is
/// never handed an empty pool.
pub fn default_pool(page_type: PageType) -> Vec<ActivityModel> {
    match page_type {
        PageType::Couple => vec![
            activity(
                "couple-1",
                "Carta do coração",
                "Escrevam, cada um, três coisas que admiram no outro e leiam em voz alta.",
                "conversa",
                "💬",
                15,
            ),
            activity(
                "couple-2",
                "Dança na sala",
                "Escolham uma música especial para vocês e dancem juntos na sala.",
                "diversão",
                "🎉",
                10,
            ),
            activity(
                "couple-3",
                "Café da manhã surpresa",
                "Prepare o café da manhã favorito do outro e sirva na cama.",
                "surpresa",
                "🎁",
                30,
            ),
        ],
        PageType::Friends => vec![
            activity(
                "friends-1",
                "Maratona de memórias",
                "Separem fotos antigas e contem a história por trás de cada uma.",
                "conversa",
                "💬",
                20,
            ),
            activity(
                "friends-2",
                "Desafio da playlist",
                "Cada um monta uma playlist com músicas que lembram o outro e escutam juntos.",
                "diversão",
                "🎉",
                25,
            ),
            activity(
                "friends-3",
                "Rolê surpresa",
                "Um escolhe um lugar novo na cidade e leva o outro sem contar o destino.",
                "encontro",
                "🌹",
                60,
            ),
        ],
        PageType::Pet => vec![
            activity(
                "pet-1",
                "Passeio novo",
                "Leve seu pet para explorar um parque ou rua que ele ainda não conhece.",
                "passeio",
                "🌳",
                30,
            ),
            activity(
                "pet-2",
                "Sessão de carinho",
                "Dez minutos de carinho sem celular por perto, só você e ele.",
                "carinho",
                "💕",
                10,
            ),
            activity(
                "pet-3",
                "Petisco caseiro",
                "Prepare um petisco caseiro seguro para o seu pet e registre a reação.",
                "surpresa",
                "🎁",
                20,
            ),
        ],
    }
}

fn activity(
    id: &str,
    title: &str,
    prompt: &str,
    category: &str,
    emoji: &str,
    duration: i32,
) -> ActivityModel {
    ActivityModel {
        id: id.to_string(),
        title: title.to_string(),
        prompt: prompt.to_string(),
        category: category.to_string(),
        emoji: emoji.to_string(),
        duration,
    }
}
