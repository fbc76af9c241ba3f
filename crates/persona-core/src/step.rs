//! The fixed, ordered wizard steps.

use serde::{Deserialize, Serialize};

use crate::form::FormField;

/// One screen of the four-screen questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Demographics & company (power and authority)
    Demographics,
    /// Company goals vs personal goals
    Goals,
    /// Content consumption and influence
    Content,
    /// Decision process and objections
    Decision,
}

impl Step {
    /// All steps in wizard order.
    pub const ALL: [Step; 4] = [Step::Demographics, Step::Goals, Step::Content, Step::Decision];

    /// Number of steps.
    pub const COUNT: usize = Self::ALL.len();

    /// Returns the step at `index`, if any.
    pub fn at(index: usize) -> Option<Step> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        match self {
            Step::Demographics => 0,
            Step::Goals => 1,
            Step::Content => 2,
            Step::Decision => 3,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Step::Demographics => "demographics",
            Step::Goals => "goals",
            Step::Content => "content",
            Step::Decision => "decision",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Step::Demographics => "Demografia",
            Step::Goals => "Metas",
            Step::Content => "Consumo",
            Step::Decision => "Decisão",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Step::Demographics => "Perfil e Empresa",
            Step::Goals => "Negócio vs Pessoal",
            Step::Content => "Canais e Interesses",
            Step::Decision => "Objeções e Sucesso",
        }
    }

    /// Heading shown above the step's questions.
    pub fn title(self) -> &'static str {
        match self {
            Step::Demographics => "Demografia & Profissional",
            Step::Goals => "Metas da Empresa vs. Metas Pessoais",
            Step::Content => "Consumo de Conteúdo",
            Step::Decision => "Processo de Decisão",
        }
    }

    /// Text fields asked on this step, in display order.
    pub fn fields(self) -> &'static [FormField] {
        match self {
            Step::Demographics => &[
                FormField::Role,
                FormField::Industry,
                FormField::CompanySize,
                FormField::KnowledgeLevel,
            ],
            Step::Goals => &[
                FormField::BusinessGoal,
                FormField::CareerGoal,
                FormField::BiggestChallenge,
                FormField::DailyFrustrations,
            ],
            Step::Content => &[FormField::InfluencersOrTopics],
            Step::Decision => &[
                FormField::ProductDescription,
                FormField::MainObjections,
                FormField::SuccessMetrics,
            ],
        }
    }

    /// Whether this step also asks for content channels.
    pub fn has_channels(self) -> bool {
        self == Step::Content
    }

    pub fn is_first(self) -> bool {
        self.index() == 0
    }

    pub fn is_last(self) -> bool {
        self.index() == Self::COUNT - 1
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
