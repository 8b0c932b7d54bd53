use serde::Serialize;

/// Weekly prompts alternate between a question to talk over and a challenge
/// to do together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RitualKind {
    Pergunta,
    Desafio,
}

/// One weekly ritual card. The pool rotates by week of year; only plans with
/// the weekly-ritual flag ever see these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RitualModel {
    pub kind: RitualKind,
    pub title: &'static str,
    pub content: &'static str,
}

pub const WEEKLY_RITUALS: [RitualModel; 6] = [
    RitualModel {
        kind: RitualKind::Pergunta,
        title: "Pergunta da semana",
        content: "Qual foi o momento desta semana em que você se sentiu mais próximo de mim?",
    },
    RitualModel {
        kind: RitualKind::Desafio,
        title: "Desafio da semana",
        content: "Preparem uma refeição juntos, do mercado à mesa, sem pressa.",
    },
    RitualModel {
        kind: RitualKind::Pergunta,
        title: "Pergunta da semana",
        content: "Se pudéssemos repetir um dia da nossa história, qual você escolheria?",
    },
    RitualModel {
        kind: RitualKind::Desafio,
        title: "Desafio da semana",
        content: "Troquem bilhetes escritos à mão e escondam um para o outro encontrar.",
    },
    RitualModel {
        kind: RitualKind::Pergunta,
        title: "Pergunta da semana",
        content: "O que você quer que a gente aprenda ou construa juntos este ano?",
    },
    RitualModel {
        kind: RitualKind::Desafio,
        title: "Desafio da semana",
        content: "Uma noite sem telas: escolham um jogo ou conversa para ocupar o lugar.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_mixes_questions_and_challenges() {
        assert!(WEEKLY_RITUALS.iter().any(|r| r.kind == RitualKind::Pergunta));
        assert!(WEEKLY_RITUALS.iter().any(|r| r.kind == RitualKind::Desafio));
        assert!(WEEKLY_RITUALS.iter().all(|r| !r.content.is_empty()));
    }
}
