//! Text fields of the questionnaire.

use strum::{EnumIter, IntoEnumIterator};

use super::options::{COMPANY_SIZE_OPTIONS, KNOWLEDGE_LEVEL_OPTIONS, SelectOption};
use crate::error::PersonaError;

/// Every free-text (or select) field of [`FormData`](super::FormData).
///
/// Content channels are not a text field; they are toggled through
/// [`ContentChannel`](super::ContentChannel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum FormField {
    Role,
    Industry,
    CompanySize,
    KnowledgeLevel,
    BusinessGoal,
    CareerGoal,
    BiggestChallenge,
    DailyFrustrations,
    InfluencersOrTopics,
    ProductDescription,
    MainObjections,
    SuccessMetrics,
}

impl FormField {
    /// The camelCase key used in answers files and in the prompt context.
    pub fn key(self) -> &'static str {
        match self {
            FormField::Role => "role",
            FormField::Industry => "industry",
            FormField::CompanySize => "companySize",
            FormField::KnowledgeLevel => "knowledgeLevel",
            FormField::BusinessGoal => "businessGoal",
            FormField::CareerGoal => "careerGoal",
            FormField::BiggestChallenge => "biggestChallenge",
            FormField::DailyFrustrations => "dailyFrustrations",
            FormField::InfluencersOrTopics => "influencersOrTopics",
            FormField::ProductDescription => "productDescription",
            FormField::MainObjections => "mainObjections",
            FormField::SuccessMetrics => "successMetrics",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Role => "Cargo / Função",
            FormField::Industry => "Indústria / Setor",
            FormField::CompanySize => "Tamanho da Empresa",
            FormField::KnowledgeLevel => "Nível de Conhecimento",
            FormField::BusinessGoal => "Meta de Negócio / KPI da Empresa",
            FormField::CareerGoal => "Objetivo Pessoal / Sonho de Carreira",
            FormField::BiggestChallenge => "Maior Desafio / Obstáculo Atual",
            FormField::DailyFrustrations => "Frustrações do Dia a Dia (Rotina)",
            FormField::InfluencersOrTopics => "Interesses e Influenciadores",
            FormField::ProductDescription => "Qual produto/serviço você oferece?",
            FormField::MainObjections => "Principais Objeções de Compra",
            FormField::SuccessMetrics => "Como ele mede Sucesso / ROI?",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::Role => "Ex: Gerente de Marketing, CTO, Analista Financeiro",
            FormField::Industry => "Ex: SaaS, Varejo, Saúde, Agronegócio",
            FormField::CompanySize => "Selecione...",
            FormField::KnowledgeLevel => "Selecione o nível...",
            FormField::BusinessGoal => {
                "Ex: Aumentar o faturamento em 20%; Reduzir custos em 15%; Lançar o produto X."
            }
            FormField::CareerGoal => {
                "Ex: Ser promovido a Diretor; Ser visto como inovador; Sair do escritório às 18h."
            }
            FormField::BiggestChallenge => {
                "Ex: Orçamento limitado; Equipe desqualificada; Ferramentas que não conversam."
            }
            FormField::DailyFrustrations => {
                "Ex: Perder 2 horas por dia em planilhas; Reuniões improdutivas; Chefe cobrando a mesma coisa..."
            }
            FormField::InfluencersOrTopics => {
                "Ex: Marketing de Conteúdo, Inteligência Artificial, Neil Patel, Seth Godin"
            }
            FormField::ProductDescription => {
                "Descreva o que você vende. Ex: Um software de CRM focado em pequenas empresas que automatiza o follow-up de vendas."
            }
            FormField::MainObjections => "Ex: Preço muito alto, medo de migração de dados difícil",
            FormField::SuccessMetrics => {
                "Ex: Redução de custos operacionais em 15%, Economia de 10h semanais"
            }
        }
    }

    /// Fields that must be non-blank before generation.
    pub fn is_required(self) -> bool {
        matches!(self, FormField::Role | FormField::ProductDescription)
    }

    /// The select list for fields that offer one.
    pub fn options(self) -> Option<&'static [SelectOption]> {
        match self {
            FormField::CompanySize => Some(COMPANY_SIZE_OPTIONS),
            FormField::KnowledgeLevel => Some(KNOWLEDGE_LEVEL_OPTIONS),
            _ => None,
        }
    }

    /// Looks a field up by its camelCase key.
    pub fn from_key(key: &str) -> Result<Self, PersonaError> {
        Self::iter()
            .find(|field| field.key() == key)
            .ok_or_else(|| PersonaError::unknown_option("field", key))
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_role_and_product_are_required() {
        let required: Vec<FormField> = FormField::iter().filter(|f| f.is_required()).collect();
        assert_eq!(
            required,
            vec![FormField::Role, FormField::ProductDescription]
        );
    }

    #[test]
    fn test_from_key_round_trips_every_field() {
        for field in FormField::iter() {
            assert_eq!(FormField::from_key(field.key()).unwrap(), field);
        }
        assert!(FormField::from_key("contentChannels").is_err());
    }

    #[test]
    fn test_select_fields_expose_options() {
        assert!(FormField::CompanySize.options().is_some());
        assert!(FormField::KnowledgeLevel.options().is_some());
        assert!(FormField::Role.options().is_none());
    }
}
