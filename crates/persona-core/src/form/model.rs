//! Questionnaire answers accumulated across the wizard steps.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::field::FormField;
use super::options::ContentChannel;

/// The answers of one wizard session.
///
/// Starts fully empty ([`FormData::default`]); every field may stay empty
/// except [`FormField::Role`] and [`FormField::ProductDescription`], which
/// are checked before generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormData {
    // Demographics & company
    pub role: String,
    pub industry: String,
    pub company_size: String,
    pub knowledge_level: String,

    // Goals & challenges
    pub business_goal: String,
    pub career_goal: String,
    pub biggest_challenge: String,
    pub daily_frustrations: String,

    // Content consumption
    pub content_channels: BTreeSet<ContentChannel>,
    pub influencers_or_topics: String,

    // Decision process
    pub main_objections: String,
    pub success_metrics: String,
    pub product_description: String,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Role => &self.role,
            FormField::Industry => &self.industry,
            FormField::CompanySize => &self.company_size,
            FormField::KnowledgeLevel => &self.knowledge_level,
            FormField::BusinessGoal => &self.business_goal,
            FormField::CareerGoal => &self.career_goal,
            FormField::BiggestChallenge => &self.biggest_challenge,
            FormField::DailyFrustrations => &self.daily_frustrations,
            FormField::InfluencersOrTopics => &self.influencers_or_topics,
            FormField::ProductDescription => &self.product_description,
            FormField::MainObjections => &self.main_objections,
            FormField::SuccessMetrics => &self.success_metrics,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Role => &mut self.role,
            FormField::Industry => &mut self.industry,
            FormField::CompanySize => &mut self.company_size,
            FormField::KnowledgeLevel => &mut self.knowledge_level,
            FormField::BusinessGoal => &mut self.business_goal,
            FormField::CareerGoal => &mut self.career_goal,
            FormField::BiggestChallenge => &mut self.biggest_challenge,
            FormField::DailyFrustrations => &mut self.daily_frustrations,
            FormField::InfluencersOrTopics => &mut self.influencers_or_topics,
            FormField::ProductDescription => &mut self.product_description,
            FormField::MainObjections => &mut self.main_objections,
            FormField::SuccessMetrics => &mut self.success_metrics,
        };
        *slot = value.into();
    }

    /// Overwrites every field present in `patch`; absent fields are untouched.
    pub fn merge(&mut self, patch: FormPatch) {
        let FormPatch {
            role,
            industry,
            company_size,
            knowledge_level,
            business_goal,
            career_goal,
            biggest_challenge,
            daily_frustrations,
            content_channels,
            influencers_or_topics,
            main_objections,
            success_metrics,
            product_description,
        } = patch;

        let text_updates = [
            (FormField::Role, role),
            (FormField::Industry, industry),
            (FormField::CompanySize, company_size),
            (FormField::KnowledgeLevel, knowledge_level),
            (FormField::BusinessGoal, business_goal),
            (FormField::CareerGoal, career_goal),
            (FormField::BiggestChallenge, biggest_challenge),
            (FormField::DailyFrustrations, daily_frustrations),
            (FormField::InfluencersOrTopics, influencers_or_topics),
            (FormField::MainObjections, main_objections),
            (FormField::SuccessMetrics, success_metrics),
            (FormField::ProductDescription, product_description),
        ];
        for (field, value) in text_updates {
            if let Some(value) = value {
                self.set(field, value);
            }
        }

        if let Some(channels) = content_channels {
            self.content_channels = channels;
        }
    }

    /// Adds the channel if absent, removes it if present.
    pub fn toggle_channel(&mut self, channel: ContentChannel) {
        if !self.content_channels.remove(&channel) {
            self.content_channels.insert(channel);
        }
    }

    pub fn has_channel(&self, channel: ContentChannel) -> bool {
        self.content_channels.contains(&channel)
    }

    /// Selected channel labels joined with `", "`, in display order.
    pub fn joined_channels(&self) -> String {
        self.content_channels
            .iter()
            .map(|channel| channel.label())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Required fields that are empty after trimming.
    pub fn missing_required(&self) -> Vec<FormField> {
        [FormField::Role, FormField::ProductDescription]
            .into_iter()
            .filter(|field| self.get(*field).trim().is_empty())
            .collect()
    }
}

/// A partial update of [`FormData`]. `None` means "leave as is".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormPatch {
    pub role: Option<String>,
    pub industry: Option<String>,
    pub company_size: Option<String>,
    pub knowledge_level: Option<String>,
    pub business_goal: Option<String>,
    pub career_goal: Option<String>,
    pub biggest_challenge: Option<String>,
    pub daily_frustrations: Option<String>,
    pub content_channels: Option<BTreeSet<ContentChannel>>,
    pub influencers_or_topics: Option<String>,
    pub main_objections: Option<String>,
    pub success_metrics: Option<String>,
    pub product_description: Option<String>,
}

impl FormPatch {
    /// A patch that sets a single text field.
    pub fn field(field: FormField, value: impl Into<String>) -> Self {
        let mut patch = Self::default();
        let value = Some(value.into());
        match field {
            FormField::Role => patch.role = value,
            FormField::Industry => patch.industry = value,
            FormField::CompanySize => patch.company_size = value,
            FormField::KnowledgeLevel => patch.knowledge_level = value,
            FormField::BusinessGoal => patch.business_goal = value,
            FormField::CareerGoal => patch.career_goal = value,
            FormField::BiggestChallenge => patch.biggest_challenge = value,
            FormField::DailyFrustrations => patch.daily_frustrations = value,
            FormField::InfluencersOrTopics => patch.influencers_or_topics = value,
            FormField::ProductDescription => patch.product_description = value,
            FormField::MainObjections => patch.main_objections = value,
            FormField::SuccessMetrics => patch.success_metrics = value,
        }
        patch
    }

    pub fn with(mut self, field: FormField, value: impl Into<String>) -> Self {
        let single = Self::field(field, value);
        self.absorb(single);
        self
    }

    pub fn with_channels(mut self, channels: impl IntoIterator<Item = ContentChannel>) -> Self {
        self.content_channels = Some(channels.into_iter().collect());
        self
    }

    fn absorb(&mut self, other: FormPatch) {
        macro_rules! take {
            ($($name:ident),*) => {
                $(if other.$name.is_some() { self.$name = other.$name; })*
            };
        }
        take!(
            role,
            industry,
            company_size,
            knowledge_level,
            business_goal,
            career_goal,
            biggest_challenge,
            daily_frustrations,
            content_channels,
            influencers_or_topics,
            main_objections,
            success_metrics,
            product_description
        );
    }
}

impl From<FormData> for FormPatch {
    fn from(data: FormData) -> Self {
        Self {
            role: Some(data.role),
            industry: Some(data.industry),
            company_size: Some(data.company_size),
            knowledge_level: Some(data.knowledge_level),
            business_goal: Some(data.business_goal),
            career_goal: Some(data.career_goal),
            biggest_challenge: Some(data.biggest_challenge),
            daily_frustrations: Some(data.daily_frustrations),
            content_channels: Some(data.content_channels),
            influencers_or_topics: Some(data.influencers_or_topics),
            main_objections: Some(data.main_objections),
            success_metrics: Some(data.success_metrics),
            product_description: Some(data.product_description),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_empty() {
        let data = FormData::new();
        assert!(data.role.is_empty());
        assert!(data.content_channels.is_empty());
        assert_eq!(data.missing_required().len(), 2);
    }

    #[test]
    fn test_merge_only_touches_present_fields() {
        let mut data = FormData::new();
        data.industry = "SaaS".to_string();

        data.merge(FormPatch::field(FormField::Role, "CTO"));

        assert_eq!(data.role, "CTO");
        assert_eq!(data.industry, "SaaS");
    }

    #[test]
    fn test_merge_replaces_channel_set() {
        let mut data = FormData::new();
        data.toggle_channel(ContentChannel::Podcasts);

        data.merge(FormPatch::default().with_channels([ContentChannel::LinkedIn]));

        assert!(data.has_channel(ContentChannel::LinkedIn));
        assert!(!data.has_channel(ContentChannel::Podcasts));
    }

    #[test]
    fn test_toggle_twice_is_noop_for_every_channel() {
        let mut data = FormData::new();
        data.toggle_channel(ContentChannel::YouTube);
        for channel in ContentChannel::all() {
            let before = data.content_channels.clone();
            data.toggle_channel(channel);
            data.toggle_channel(channel);
            assert_eq!(data.content_channels, before, "channel {channel}");
        }
    }

    #[test]
    fn test_joined_channels_follow_display_order() {
        let mut data = FormData::new();
        data.toggle_channel(ContentChannel::YouTube);
        data.toggle_channel(ContentChannel::LinkedIn);
        assert_eq!(data.joined_channels(), "LinkedIn, YouTube");
    }

    #[test]
    fn test_whitespace_only_required_field_is_missing() {
        let mut data = FormData::new();
        data.set(FormField::Role, "   ");
        data.set(FormField::ProductDescription, "CRM");
        assert_eq!(data.missing_required(), vec![FormField::Role]);
    }

    #[test]
    fn test_deserialize_camel_case_answers_with_defaults() {
        let data: FormData = serde_json::from_str(
            r#"{"role":"CTO","productDescription":"CRM","contentChannels":["YouTube","LinkedIn"]}"#,
        )
        .unwrap();
        assert_eq!(data.role, "CTO");
        assert_eq!(data.product_description, "CRM");
        assert!(data.business_goal.is_empty());
        assert_eq!(data.content_channels.len(), 2);
    }

    #[test]
    fn test_patch_builder_accumulates_fields() {
        let patch = FormPatch::field(FormField::Role, "CTO").with(FormField::Industry, "Saúde");
        assert_eq!(patch.role.as_deref(), Some("CTO"));
        assert_eq!(patch.industry.as_deref(), Some("Saúde"));
        assert!(patch.product_description.is_none());
    }
}
