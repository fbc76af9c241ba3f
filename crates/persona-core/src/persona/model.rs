//! Generated persona domain model.

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// Demographic block of a generated persona.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Demographics {
    pub age_range: String,
    pub location: String,
    pub education: String,
    pub industry: String,
}

/// The persona map returned by the generation service.
///
/// Every field is required: decoding never fills defaults, so a payload that
/// omits anything is rejected as a whole. Unknown extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPersona {
    /// Fictional name fitting the seniority and region
    pub name: String,
    pub job_title: String,
    /// Narrative summary of behaviour and working style
    pub profile_summary: String,
    pub demographics: Demographics,
    /// Business KPIs mixed with career aspirations
    pub goals: Vec<String>,
    pub pain_points: Vec<String>,
    /// First-person quote capturing the main frustration or desire
    pub quote: String,
    /// Sales argument bridging the pain to the offered solution
    pub solution_mapping: String,
    pub preferred_channels: Vec<String>,
    pub common_objections: Vec<String>,
}

impl GeneratedPersona {
    /// Strict decode of a service payload.
    ///
    /// # Errors
    ///
    /// - `GenerationError::EmptyResponse` when the payload is blank
    /// - `GenerationError::MalformedResponse` when it is not a complete persona
    pub fn from_json(payload: &str) -> Result<Self, GenerationError> {
        if payload.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        serde_json::from_str(payload).map_err(|err| GenerationError::malformed(err.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn sample_persona() -> GeneratedPersona {
        GeneratedPersona {
            name: "Mariana Costa".to_string(),
            job_title: "Gerente de Marketing".to_string(),
            profile_summary: "Orientada a dados, pressionada por metas trimestrais.".to_string(),
            demographics: Demographics {
                age_range: "32-40".to_string(),
                location: "São Paulo, SP".to_string(),
                education: "MBA em Marketing".to_string(),
                industry: "SaaS B2B".to_string(),
            },
            goals: vec![
                "Aumentar leads qualificados em 30%".to_string(),
                "Reduzir CAC".to_string(),
                "Ser promovida a Diretora".to_string(),
                "Provar ROI das campanhas".to_string(),
            ],
            pain_points: vec![
                "Ferramentas desconectadas".to_string(),
                "Relatórios manuais".to_string(),
                "Equipe enxuta".to_string(),
            ],
            quote: "Eu preciso provar que marketing gera receita, não só cliques.".to_string(),
            solution_mapping: "O CRM centraliza o funil e automatiza relatórios.".to_string(),
            preferred_channels: vec!["LinkedIn".to_string(), "Podcasts".to_string()],
            common_objections: vec!["A migração vai parar minha operação?".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_camel_case_payload() {
        let json = serde_json::to_string(&fixtures::sample_persona()).unwrap();
        assert!(json.contains("\"jobTitle\""));
        assert!(json.contains("\"ageRange\""));

        let decoded = GeneratedPersona::from_json(&json).unwrap();
        assert_eq!(decoded.goals.len(), 4);
    }

    #[test]
    fn test_blank_payload_is_empty_response() {
        assert_eq!(
            GeneratedPersona::from_json("  \n"),
            Err(GenerationError::EmptyResponse)
        );
    }

    #[test]
    fn test_missing_nested_field_is_malformed() {
        let mut value = serde_json::to_value(fixtures::sample_persona()).unwrap();
        value["demographics"]
            .as_object_mut()
            .unwrap()
            .remove("education");

        let err = GeneratedPersona::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse(_)));
    }

    #[test]
    fn test_wrong_type_is_malformed_not_defaulted() {
        let mut value = serde_json::to_value(fixtures::sample_persona()).unwrap();
        value["goals"] = serde_json::json!("just one goal");

        let err = GeneratedPersona::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse(_)));
    }

    #[test]
    fn test_extra_fields_are_tolerated() {
        let mut value = serde_json::to_value(fixtures::sample_persona()).unwrap();
        value["confidence"] = serde_json::json!(0.9);

        assert!(GeneratedPersona::from_json(&value.to_string()).is_ok());
    }

    #[test]
    fn test_not_json_is_malformed() {
        let err = GeneratedPersona::from_json("Desculpe, não consegui.").unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse(_)));
    }
}
