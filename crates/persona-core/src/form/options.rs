//! Fixed option lists offered by the questionnaire.

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

use crate::error::PersonaError;

/// Question shown above the channel checklist.
pub const CHANNELS_LABEL: &str = "Onde ele busca informações?";

/// A content/media platform the target customer consumes.
///
/// Variant order is the display order of the option list, and `Ord` follows
/// it, so a `BTreeSet<ContentChannel>` always iterates in display order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    IntoStaticStr,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(try_from = "String", into = "&'static str")]
pub enum ContentChannel {
    #[strum(serialize = "LinkedIn")]
    LinkedIn,
    #[strum(serialize = "Instagram")]
    Instagram,
    #[strum(serialize = "Blogs Especializados")]
    SpecializedBlogs,
    #[strum(serialize = "YouTube")]
    YouTube,
    #[strum(serialize = "Podcasts")]
    Podcasts,
    #[strum(serialize = "Newsletters")]
    Newsletters,
    #[strum(serialize = "Eventos/Conferências")]
    EventsConferences,
    #[strum(serialize = "Twitter/X")]
    TwitterX,
    #[strum(serialize = "Google Search")]
    GoogleSearch,
    #[strum(serialize = "Grupos de WhatsApp/Slack")]
    MessagingGroups,
}

impl ContentChannel {
    /// Display label, which is also the serialized form.
    pub fn label(self) -> &'static str {
        self.into()
    }

    /// All channels in display order.
    pub fn all() -> Vec<ContentChannel> {
        Self::iter().collect()
    }

    /// Parses a label, ignoring surrounding whitespace and letter case.
    pub fn parse_label(value: &str) -> Result<Self, PersonaError> {
        let wanted = value.trim();
        Self::iter()
            .find(|channel| channel.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PersonaError::unknown_option("channel", value))
    }
}

impl std::fmt::Display for ContentChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<String> for ContentChannel {
    type Error = PersonaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_label(&value)
    }
}

/// One entry of a select list: what the user sees and what gets stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    pub label: &'static str,
    pub value: &'static str,
}

impl SelectOption {
    const fn new(label: &'static str, value: &'static str) -> Self {
        Self { label, value }
    }
}

/// Company size choices. The stored value carries the buying-process hint
/// that the model uses to infer budget and authority.
pub const COMPANY_SIZE_OPTIONS: &[SelectOption] = &[
    SelectOption::new("1-10 (Micro)", "1-10 (Micro) - Baixa burocracia"),
    SelectOption::new("11-50 (Pequena)", "11-50 (Pequena) - Decisão ágil"),
    SelectOption::new("51-200 (Média)", "51-200 (Média) - Múltiplos decisores"),
    SelectOption::new("201-1000 (Grande)", "201-1000 (Grande) - Processo complexo"),
    SelectOption::new("1000+ (Corporativo)", "1000+ (Corporativo) - Alta burocracia"),
];

/// Knowledge level choices, mapped to funnel stage.
pub const KNOWLEDGE_LEVEL_OPTIONS: &[SelectOption] = &[
    SelectOption::new(
        "Iniciante (Topo de Funil)",
        "Iniciante - Precisa de educação (Topo de Funil)",
    ),
    SelectOption::new(
        "Intermediário (Meio de Funil)",
        "Intermediário - Compara soluções (Meio de Funil)",
    ),
    SelectOption::new(
        "Avançado (Fundo de Funil)",
        "Avançado - Foca em specs/técnica (Fundo de Funil)",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels_in_display_order() {
        let labels: Vec<&str> = ContentChannel::all().iter().map(|c| c.label()).collect();
        assert_eq!(labels.len(), 10);
        assert_eq!(labels[0], "LinkedIn");
        assert_eq!(labels[2], "Blogs Especializados");
        assert_eq!(labels[9], "Grupos de WhatsApp/Slack");
        assert!(ContentChannel::LinkedIn < ContentChannel::YouTube);
    }

    #[test]
    fn test_parse_label_is_lenient_on_case_and_spaces() {
        assert_eq!(
            ContentChannel::parse_label("  youtube ").unwrap(),
            ContentChannel::YouTube
        );
        assert_eq!(
            ContentChannel::parse_label("Eventos/Conferências").unwrap(),
            ContentChannel::EventsConferences
        );
    }

    #[test]
    fn test_unknown_channel_is_rejected() {
        let err = ContentChannel::parse_label("TikTok").unwrap_err();
        assert!(matches!(err, PersonaError::UnknownOption { kind: "channel", .. }));
    }

    #[test]
    fn test_channel_serializes_as_label() {
        let json = serde_json::to_string(&ContentChannel::TwitterX).unwrap();
        assert_eq!(json, "\"Twitter/X\"");
        let back: ContentChannel = serde_json::from_str("\"Podcasts\"").unwrap();
        assert_eq!(back, ContentChannel::Podcasts);
    }

    #[test]
    fn test_select_options_store_descriptive_values() {
        assert_eq!(COMPANY_SIZE_OPTIONS.len(), 5);
        assert_eq!(KNOWLEDGE_LEVEL_OPTIONS.len(), 3);
        assert!(COMPANY_SIZE_OPTIONS[2].value.starts_with(COMPANY_SIZE_OPTIONS[2].label));
    }
}
