//! GROQ queries
//!
//! Singleton page documents are selected by `$type`, so one query shape
//! serves every page.

pub const HOME_PAGE: &str = "homePage";
pub const ABOUT_PAGE: &str = "aboutPage";
pub const SERVICES_PAGE: &str = "servicesPage";
pub const GALLERY_PAGE: &str = "galleryPage";
pub const CONTACT_PAGE: &str = "contactPage";
pub const SITE_SETTINGS: &str = "siteSettings";
pub const SERVICE: &str = "service";

pub const HOME_PAGE_FIELDS: &str = "heroHeading, heroHeadingAccent, heroSubheading, heroCta, \
     sectionTitle, ctaHeading, ctaHeadingAccent, ctaSubheading, ctaButtonText";

pub const ABOUT_PAGE_FIELDS: &str =
    "heroTitle, heroSubtitle, storyTitle, storyContent, valuesTitle, values";

pub const SERVICES_PAGE_FIELDS: &str =
    "heroTitle, heroSubtitle, ctaHeading, ctaSubtitle, ctaButtonText";

pub const GALLERY_PAGE_FIELDS: &str =
    "heroTitle, heroSubtitle, emptyStateText, ctaHeading, ctaSubtitle, ctaButtonText";

pub const CONTACT_PAGE_FIELDS: &str =
    "heroTitle, heroSubtitle, successHeading, successMessage, alternativeContactText";

pub const SITE_SETTINGS_FIELDS: &str = "companyName, tagline, description, location, \
     instagramUrl, instagramHandle, facebookUrl, linkedinUrl, \
     seoTitleTemplate, seoDefaultDescription, footerTagline";

pub const SERVICES: &str = r#"*[_type == $type] | order(displayOrder asc) {
    _id, title, icon, shortDescription, longDescription, features, displayOrder
}"#;

/// First document of `$type`, projected to `fields`
pub fn singleton(fields: &str) -> String {
    format!("*[_type == $type][0] {{ {} }}", fields)
}
