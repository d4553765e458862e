//! Public pages: home, about, services, gallery, contact

use super::{banner, or, INSTAGRAM_HANDLE, INSTAGRAM_URL};
use crate::content::{
    AboutPageContent, ContactPageContent, GalleryPageContent, HomePageContent, Service,
    ServicesPageContent,
};
use crate::form::{ContactForm, FormStatus};
use crate::models::{distinct_event_types, EventType, GalleryImage, GalleryVideo, HearAboutUs};
use maud::{html, Markup};

pub const TURNSTILE_SCRIPT: &str = "https://challenges.cloudflare.com/turnstile/v0/api.js";

struct DefaultService {
    title: &'static str,
    summary: &'static str,
    description: &'static str,
    features: [&'static str; 4],
}

const DEFAULT_SERVICES: [DefaultService; 6] = [
    DefaultService {
        title: "Weddings",
        summary: "From intimate ceremonies to grand celebrations, we make your special day unforgettable.",
        description: "Your love story deserves a celebration as unique as you are. From venue selection to the last dance, we handle every detail so you can focus on what matters - each other.",
        features: ["Venue coordination", "Vendor management", "Day-of coordination", "Decor & styling"],
    },
    DefaultService {
        title: "Proposals",
        summary: "Create the perfect moment to pop the question with our thoughtful planning.",
        description: "Ready to ask the big question? We'll help you create a moment that's perfectly you - intimate, grand, or anything in between.",
        features: ["Location scouting", "Setup & styling", "Photography coordination", "Surprise logistics"],
    },
    DefaultService {
        title: "Baby Showers",
        summary: "Celebrate new beginnings with warmth and joy.",
        description: "Celebrate the arrival of your little one surrounded by love. We create warm, joyful gatherings that honor this special time.",
        features: ["Theme design", "Games & activities", "Catering coordination", "Decor & setup"],
    },
    DefaultService {
        title: "Birthdays",
        summary: "Milestone moments deserve milestone celebrations.",
        description: "From first birthdays to milestone celebrations, we create parties that reflect the guest of honor and bring everyone together.",
        features: ["Theme planning", "Entertainment booking", "Cake & catering", "Venue decoration"],
    },
    DefaultService {
        title: "Corporate Events",
        summary: "Professional events with a personal touch.",
        description: "Professional events with a personal touch. We bring the same care and attention to your business gatherings.",
        features: ["Conference planning", "Team celebrations", "Client appreciation events", "Holiday parties"],
    },
    DefaultService {
        title: "Hosting & Entertainment",
        summary: "We bring energy and life to every gathering.",
        description: "Need someone to bring energy to your event? We provide hosting and entertainment services that keep your guests engaged.",
        features: ["Event hosting", "Activity coordination", "Guest management", "Entertainment booking"],
    },
];

const DEFAULT_STORY: [&str; 3] = [
    "Beyond Blithe was born from a simple belief: every celebration deserves the care and attention of a family gathering.",
    "Based in Toronto, we've had the privilege of being part of countless special moments - from intimate proposals to grand wedding celebrations, from joyful baby showers to milestone birthdays.",
    "What sets us apart? We don't just plan events. We become invested in your story. When you work with us, you're not hiring a vendor - you're gaining a dedicated partner who treats your celebration like their own.",
];

const DEFAULT_VALUES: [(&str, &str); 3] = [
    ("Personal Touch", "Every family is unique. Every event should reflect that."),
    ("Attention to Detail", "The little things make the big moments unforgettable."),
    ("Stress-Free Experience", "You enjoy the moment. We handle everything else."),
];

fn hero(title: &str, subtitle: &str) -> Markup {
    html! {
        section.hero {
            h1 { (title) }
            p { (subtitle) }
        }
    }
}

fn call_to_action(heading: &str, subtitle: &str, button: &str) -> Markup {
    html! {
        section.cta {
            div.container {
                h2 { (heading) }
                p { (subtitle) }
                a.button href="/contact" { (button) }
            }
        }
    }
}

fn video_player(video: &GalleryVideo) -> Markup {
    html! {
        figure {
            video src=(video.video_url) poster=[video.thumbnail_url.as_deref()] controls preload="metadata" {}
            @if let Some(title) = &video.title {
                figcaption { (title) }
            }
        }
    }
}

pub fn home(
    content: Option<&HomePageContent>,
    services: &[Service],
    featured: Option<&GalleryVideo>,
) -> Markup {
    let c = content.cloned().unwrap_or_default();

    // A custom heading without an accent line shows no accent at all
    let (heading, accent) = match c.hero_heading.as_deref().filter(|h| !h.trim().is_empty()) {
        Some(heading) => (heading.to_string(), c.hero_heading_accent.clone()),
        None => (
            "Your Moments,".to_string(),
            Some(or(&c.hero_heading_accent, "Our Family").to_string()),
        ),
    };

    html! {
        section.hero {
            h1 {
                (heading)
                @if let Some(accent) = &accent {
                    span.accent { (accent) }
                }
            }
            p {
                (or(&c.hero_subheading,
                    "We don't just plan events. We become part of your celebration, treating every detail with the care we'd give our own family."))
            }
            a.button href="/contact" { (or(&c.hero_cta, "Let's Create Together")) }
        }

        @if let Some(video) = featured {
            section.featured {
                div.container.gallery { (video_player(video)) }
            }
        }

        section {
            div.container {
                h2 { (or(&c.section_title, "What We Do")) }
                div.grid {
                    @if services.is_empty() {
                        @for service in &DEFAULT_SERVICES {
                            div.card {
                                h3 { (service.title) }
                                p { (service.summary) }
                            }
                        }
                    } @else {
                        @for service in services {
                            div.card {
                                h3 { (service.title) }
                                @if let Some(summary) = &service.short_description {
                                    p { (summary) }
                                }
                            }
                        }
                    }
                }
            }
        }

        section.cta {
            div.container {
                h2 {
                    (or(&c.cta_heading, "Ready to Create Something Beautiful?"))
                    @if let Some(accent) = c.cta_heading_accent.as_deref().filter(|a| !a.trim().is_empty()) {
                        " " span.accent { (accent) }
                    }
                }
                p { (or(&c.cta_subheading, "Tell us about your vision. We'll make it happen.")) }
                a.button href="/contact" { (or(&c.cta_button_text, "Get in Touch")) }
            }
        }
    }
}

pub fn about(content: Option<&AboutPageContent>) -> Markup {
    let c = content.cloned().unwrap_or_default();
    let story: Vec<String> = c
        .story_content
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|block| block.plain_text())
        .filter(|text| !text.trim().is_empty())
        .collect();
    let values = c.values.clone().unwrap_or_default();

    html! {
        (hero(
            or(&c.hero_title, "About Beyond Blithe"),
            or(&c.hero_subtitle, "More than event planners. We're your partners in celebration."),
        ))

        section {
            div.container {
                h2 { (or(&c.story_title, "Our Story")) }
                @if story.is_empty() {
                    @for paragraph in DEFAULT_STORY {
                        p { (paragraph) }
                    }
                } @else {
                    @for paragraph in &story {
                        p { (paragraph) }
                    }
                }
            }
        }

        section {
            div.container {
                h2 { (or(&c.values_title, "What We Believe In")) }
                div.grid {
                    @if values.is_empty() {
                        @for (title, description) in DEFAULT_VALUES {
                            div.card { h3 { (title) } p { (description) } }
                        }
                    } @else {
                        @for value in &values {
                            div.card { h3 { (value.title) } p { (value.description) } }
                        }
                    }
                }
            }
        }
    }
}

pub fn services(content: Option<&ServicesPageContent>, services: &[Service]) -> Markup {
    let c = content.cloned().unwrap_or_default();

    html! {
        (hero(
            or(&c.hero_title, "Our Services"),
            or(&c.hero_subtitle, "Every celebration, handled with care."),
        ))

        section {
            div.container {
                @if services.is_empty() {
                    @for service in &DEFAULT_SERVICES {
                        article.card {
                            h2 { (service.title) }
                            p { (service.description) }
                            ul {
                                @for feature in service.features {
                                    li { (feature) }
                                }
                            }
                        }
                    }
                } @else {
                    @for service in services {
                        article.card id=(service.id) {
                            h2 { (service.title) }
                            @if let Some(text) = service.long_description.as_ref().or(service.short_description.as_ref()) {
                                p { (text) }
                            }
                            @if let Some(features) = &service.features {
                                ul {
                                    @for feature in features {
                                        li { (feature) }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        (call_to_action(
            or(&c.cta_heading, "Have Something Else in Mind?"),
            or(&c.cta_subtitle, "We love unique celebrations. Tell us your vision."),
            or(&c.cta_button_text, "Let's Talk"),
        ))
    }
}

pub fn gallery(
    content: Option<&GalleryPageContent>,
    images: &[GalleryImage],
    videos: &[GalleryVideo],
) -> Markup {
    let c = content.cloned().unwrap_or_default();
    let labels = distinct_event_types(images);

    html! {
        (hero(
            or(&c.hero_title, "Our Work"),
            or(&c.hero_subtitle, "Moments we've had the honor of creating."),
        ))

        section {
            div.container {
                @if images.is_empty() {
                    div.empty {
                        p { (or(&c.empty_state_text, "Gallery coming soon. We're adding our best work.")) }
                        p {
                            "In the meantime, check out our "
                            a href=(INSTAGRAM_URL) target="_blank" rel="noopener noreferrer" {
                                "Instagram " (INSTAGRAM_HANDLE)
                            }
                        }
                    }
                } @else {
                    ul.labels {
                        @for label in &labels {
                            li { (label) }
                        }
                    }
                    div.grid.gallery {
                        @for image in images {
                            figure {
                                img src=(image.image_url)
                                    alt=(image.caption.as_deref().unwrap_or(&image.event_type))
                                    loading="lazy";
                                figcaption {
                                    span { (image.event_type) }
                                    @if let Some(caption) = &image.caption {
                                        p { (caption) }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        @if !videos.is_empty() {
            section {
                div.container {
                    h2 { "Event Highlights" }
                    div.grid.gallery {
                        @for video in videos {
                            (video_player(video))
                        }
                    }
                }
            }
        }

        (call_to_action(
            or(&c.cta_heading, "Want Your Event Featured Here?"),
            or(&c.cta_subtitle, "Let's create something beautiful together."),
            or(&c.cta_button_text, "Get in Touch"),
        ))
    }
}

fn select(name: &str, placeholder: &str, options: &[&str], selected: &str) -> Markup {
    html! {
        select id=(name) name=(name) required {
            option value="" { (placeholder) }
            @for choice in options {
                option value=(choice) selected[*choice == selected] { (choice) }
            }
        }
    }
}

fn contact_form(form: &ContactForm, site_key: &str) -> Markup {
    let f = &form.fields;
    let event_types: Vec<&str> = EventType::ALL.iter().map(|t| t.as_str()).collect();
    let sources: Vec<&str> = HearAboutUs::ALL.iter().map(|s| s.as_str()).collect();

    html! {
        form.stacked method="post" action="/contact" {
            @if let Some(message) = form.error_message() {
                (banner("error", message))
            }

            label for="name" { "Your Name *" }
            input type="text" id="name" name="name" required value=(f.name);

            label for="email" { "Email Address *" }
            input type="email" id="email" name="email" required value=(f.email);

            label for="phone" { "Phone Number" }
            input type="tel" id="phone" name="phone" value=(f.phone);

            label for="eventType" { "Type of Event *" }
            (select("eventType", "Select an event type", &event_types, &f.event_type))

            label for="eventTypeOther" { "If other, please describe your event type" }
            input type="text" id="eventTypeOther" name="eventTypeOther" value=(f.event_type_other)
                placeholder="e.g., Anniversary party, Engagement ceremony...";

            label for="eventDate" { "Tentative Event Date" }
            input type="date" id="eventDate" name="eventDate" value=(f.event_date);

            label for="guestCount" { "Estimated Guest Count" }
            input type="number" min="0" id="guestCount" name="guestCount" value=(f.guest_count);

            label for="hearAboutUs" { "How did you hear about us? *" }
            (select("hearAboutUs", "Select an option", &sources, &f.hear_about_us))

            label for="hearAboutUsOther" { "If other, please tell us how you found us" }
            input type="text" id="hearAboutUsOther" name="hearAboutUsOther" value=(f.hear_about_us_other)
                placeholder="e.g., Facebook, saw your work at a friend's event...";

            label for="message" { "Tell us about your vision *" }
            textarea id="message" name="message" rows="5" required
                placeholder="What are you dreaming of? Share as much or as little as you'd like..." {
                (f.message)
            }

            div.cf-turnstile data-sitekey=(site_key) data-theme="light" {}
            script src=(TURNSTILE_SCRIPT) async defer {}

            p { button.button type="submit" { "Send Inquiry" } }
        }
    }
}

pub fn contact(content: Option<&ContactPageContent>, form: &ContactForm, site_key: &str) -> Markup {
    let c = content.cloned().unwrap_or_default();

    html! {
        (hero(
            or(&c.hero_title, "Let's Create Together"),
            or(&c.hero_subtitle, "Tell us about your vision. We'll make it happen."),
        ))

        section {
            div.container {
                @if *form.status() == FormStatus::Success {
                    div.success {
                        h2 { (or(&c.success_heading, "Thank You!")) }
                        p {
                            (or(&c.success_message,
                                "We've received your inquiry and will be in touch within 24-48 hours."))
                        }
                        a href="/contact" { "Submit another inquiry" }
                    }
                } @else {
                    (contact_form(form, site_key))
                }
            }
        }

        section {
            div.container {
                p { (or(&c.alternative_contact_text, "Prefer to reach out directly?")) }
                a href=(INSTAGRAM_URL) target="_blank" rel="noopener noreferrer" {
                    "Message us on Instagram " (INSTAGRAM_HANDLE)
                }
            }
        }
    }
}
