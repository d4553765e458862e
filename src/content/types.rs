//! Typed CMS documents
//!
//! Every field is optional: editors may leave anything blank and pages fall
//! back to fixed copy.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HomePageContent {
    pub hero_heading: Option<String>,
    pub hero_heading_accent: Option<String>,
    pub hero_subheading: Option<String>,
    pub hero_cta: Option<String>,
    pub section_title: Option<String>,
    pub cta_heading: Option<String>,
    pub cta_heading_accent: Option<String>,
    pub cta_subheading: Option<String>,
    pub cta_button_text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AboutPageContent {
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub story_title: Option<String>,
    pub story_content: Option<Vec<PortableTextBlock>>,
    pub values_title: Option<String>,
    pub values: Option<Vec<ValueItem>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ValueItem {
    pub title: String,
    pub description: String,
}

/// A rich-text block; only the text of its spans is rendered
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PortableTextBlock {
    pub style: Option<String>,
    pub children: Vec<PortableTextSpan>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PortableTextSpan {
    pub text: String,
}

impl PortableTextBlock {
    pub fn plain_text(&self) -> String {
        self.children.iter().map(|s| s.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServicesPageContent {
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub cta_heading: Option<String>,
    pub cta_subtitle: Option<String>,
    pub cta_button_text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GalleryPageContent {
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub empty_state_text: Option<String>,
    pub cta_heading: Option<String>,
    pub cta_subtitle: Option<String>,
    pub cta_button_text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactPageContent {
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub success_heading: Option<String>,
    pub success_message: Option<String>,
    pub alternative_contact_text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteSettings {
    pub company_name: Option<String>,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub instagram_url: Option<String>,
    pub instagram_handle: Option<String>,
    pub facebook_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub seo_title_template: Option<String>,
    pub seo_default_description: Option<String>,
    pub footer_tagline: Option<String>,
}

/// A `service` document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Service {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub icon: Option<String>,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub features: Option<Vec<String>>,
    pub display_order: Option<i32>,
}
