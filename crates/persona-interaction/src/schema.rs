//! Response schema sent with every generation request.
//!
//! Uses the Gemini `Schema` dialect (upper-case type names). Field names and
//! types mirror [`persona_core::GeneratedPersona`].

use serde_json::{Value, json};

/// Top-level properties, all required.
pub const REQUIRED_FIELDS: [&str; 10] = [
    "name",
    "jobTitle",
    "profileSummary",
    "demographics",
    "goals",
    "painPoints",
    "quote",
    "solutionMapping",
    "preferredChannels",
    "commonObjections",
];

pub const DEMOGRAPHIC_FIELDS: [&str; 4] = ["ageRange", "location", "education", "industry"];

fn string(description: &str) -> Value {
    json!({ "type": "STRING", "description": description })
}

fn string_list(description: &str) -> Value {
    json!({
        "type": "ARRAY",
        "items": { "type": "STRING" },
        "description": description,
    })
}

/// The persona response schema.
pub fn persona_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "name": string("Um nome fictício adequado à senioridade e à região."),
            "jobTitle": string("O cargo exato e realista."),
            "profileSummary": string(
                "Resumo narrativo sobre comportamento e estilo de trabalho (máximo 40 palavras)."
            ),
            "demographics": {
                "type": "OBJECT",
                "properties": {
                    "ageRange": string("Faixa etária provável a partir do cargo."),
                    "location": string("Localização típica para esta indústria."),
                    "education": string("Formação acadêmica provável."),
                    "industry": string("Setor de atuação."),
                },
                "required": DEMOGRAPHIC_FIELDS,
            },
            "goals": string_list(
                "3 a 5 objetivos estratégicos, misturando KPIs de negócio e aspirações de carreira."
            ),
            "painPoints": string_list("3 a 5 dores agudas que impedem o sucesso."),
            "quote": string("Uma citação em primeira pessoa que resume a mentalidade ou a dor principal."),
            "solutionMapping": string("Argumento de venda que conecta a dor à solução (pitch)."),
            "preferredChannels": string_list(
                "Canais específicos onde a persona consome conteúdo técnico ou profissional."
            ),
            "commonObjections": string_list("Dúvidas, medos ou barreiras racionais para a compra."),
        },
        "required": REQUIRED_FIELDS,
    })
}
