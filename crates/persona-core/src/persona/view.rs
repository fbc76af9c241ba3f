//! Read-only layout of a generated persona.
//!
//! The same view feeds the terminal presenter, the print fallback and the
//! PDF exporter, so all three show identical content in identical order.

use std::fmt::Write as _;

use serde::Serialize;

use super::model::GeneratedPersona;
use crate::export::avatar_url;

/// Identity block at the top of the persona map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonaHeader {
    pub avatar_url: String,
    pub name: String,
    pub job_title: String,
    pub location: String,
    pub industry: String,
    pub education: String,
    pub age_range: String,
    pub quote: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum SectionBody {
    Paragraph(String),
    Bullets(Vec<String>),
    Tags(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewSection {
    pub title: &'static str,
    pub body: SectionBody,
}

/// The renderable result region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonaView {
    pub heading: &'static str,
    pub header: PersonaHeader,
    pub sections: Vec<ViewSection>,
}

pub const BIO_SECTION: &str = "Bio & Perfil";
pub const GOALS_SECTION: &str = "Objetivos Principais";
pub const PAIN_POINTS_SECTION: &str = "Dores & Frustrações";
pub const OBJECTIONS_SECTION: &str = "Objeções Comuns";
pub const SOLUTION_SECTION: &str = "Como Nossa Solução Ajuda";
pub const CHANNELS_SECTION: &str = "Canais de Consumo";

impl PersonaView {
    pub fn new(persona: &GeneratedPersona) -> Self {
        let header = PersonaHeader {
            avatar_url: avatar_url(&persona.name),
            name: persona.name.clone(),
            job_title: persona.job_title.clone(),
            location: persona.demographics.location.clone(),
            industry: persona.demographics.industry.clone(),
            education: persona.demographics.education.clone(),
            age_range: persona.demographics.age_range.clone(),
            quote: persona.quote.clone(),
        };

        let sections = vec![
            ViewSection {
                title: BIO_SECTION,
                body: SectionBody::Paragraph(persona.profile_summary.clone()),
            },
            ViewSection {
                title: GOALS_SECTION,
                body: SectionBody::Bullets(persona.goals.clone()),
            },
            ViewSection {
                title: PAIN_POINTS_SECTION,
                body: SectionBody::Bullets(persona.pain_points.clone()),
            },
            ViewSection {
                title: OBJECTIONS_SECTION,
                body: SectionBody::Bullets(persona.common_objections.clone()),
            },
            ViewSection {
                title: SOLUTION_SECTION,
                body: SectionBody::Paragraph(persona.solution_mapping.clone()),
            },
            ViewSection {
                title: CHANNELS_SECTION,
                body: SectionBody::Tags(persona.preferred_channels.clone()),
            },
        ];

        Self {
            heading: "Mapa de Persona Gerado",
            header,
            sections,
        }
    }

    pub fn section(&self, title: &str) -> Option<&ViewSection> {
        self.sections.iter().find(|section| section.title == title)
    }

    /// Uncoloured rendering of the whole view, used for printing.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        let h = &self.header;
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{}", self.heading);
        let _ = writeln!(out, "{}", "=".repeat(self.heading.chars().count()));
        let _ = writeln!(out);
        let _ = writeln!(out, "{} - {}", h.name, h.job_title);
        let _ = writeln!(
            out,
            "{} | {} | {} | {}",
            h.location, h.industry, h.education, h.age_range
        );
        let _ = writeln!(out, "Avatar: {}", h.avatar_url);
        let _ = writeln!(out);
        let _ = writeln!(out, "\"{}\"", h.quote);

        for section in &self.sections {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", section.title);
            let _ = writeln!(out, "{}", "-".repeat(section.title.chars().count()));
            match &section.body {
                SectionBody::Paragraph(text) => {
                    let _ = writeln!(out, "{text}");
                }
                SectionBody::Bullets(items) => {
                    for item in items {
                        let _ = writeln!(out, "- {item}");
                    }
                }
                SectionBody::Tags(items) => {
                    let _ = writeln!(out, "{}", items.join(" · "));
                }
            }
        }
        out
    }
}
