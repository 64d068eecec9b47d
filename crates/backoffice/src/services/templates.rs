//! Askama templates for outbound email bodies.

use askama::Template;

/// Placeholder substituted per recipient by the dispatcher, after the
/// template has rendered. Feeds the unsubscribe link.
pub const UNSUBSCRIBE_TOKEN: &str = "{{email_encoded}}";

/// Branded campaign wrapper: greeting, rich content, closing, optional hero
/// image and call-to-action.
#[derive(Template)]
#[template(path = "email/campaign.html")]
pub struct CampaignEmail<'a> {
    pub greeting: &'a str,
    /// Already-rendered HTML from the campaign editor; injected unescaped.
    pub content_html: &'a str,
    pub closing: &'a str,
    pub featured_image: Option<&'a str>,
    pub cta_link: Option<&'a str>,
    pub cta_text: &'a str,
    pub base_url: &'a str,
    /// Always [`UNSUBSCRIBE_TOKEN`]; a field so the template stays plain.
    pub unsubscribe_token: &'a str,
}

/// Artwork status-change notification sent to the customer.
#[derive(Template)]
#[template(path = "email/artwork_status.html")]
pub struct ArtworkStatusEmail<'a> {
    pub customer_name: &'a str,
    pub artwork_name: &'a str,
    pub artwork_code: Option<&'a str>,
    pub status_label: String,
    pub feedback: Option<&'a str>,
    pub review_url: String,
}

/// Human label for a snake_case status ("proof_ready" -> "Proof Ready").
#[must_use]
pub fn humanize_status(status: &str) -> String {
    status
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + chars.as_str()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize_status() {
        assert_eq!(humanize_status("proof_ready"), "Proof Ready");
        assert_eq!(humanize_status("pending_review"), "Pending Review");
        assert_eq!(humanize_status("approved"), "Approved");
    }

    #[test]
    fn test_campaign_email_renders_content_unescaped() {
        let email = CampaignEmail {
            greeting: "Hi {{name}}",
            content_html: "<h2>New pouch line</h2>",
            closing: "Best,\nPackdesk",
            featured_image: None,
            cta_link: Some("https://packdesk.io/pouches"),
            cta_text: "See the range",
            base_url: "https://packdesk.io",
            unsubscribe_token: UNSUBSCRIBE_TOKEN,
        };
        let html = email.render().unwrap();
        assert!(html.contains("<h2>New pouch line</h2>"));
        assert!(html.contains("Hi {{name}}"));
        assert!(html.contains("https://packdesk.io/pouches"));
        // No hero image block when none is set (the CSS class stays in the
        // style sheet; only the element is conditional)
        assert!(!html.contains("class=\"hero-image\""));
    }

    #[test]
    fn test_campaign_email_renders_hero_image() {
        let email = CampaignEmail {
            greeting: "Hi",
            content_html: "<p>x</p>",
            closing: "Bye",
            featured_image: Some("https://cdn.packdesk.io/hero.jpg"),
            cta_link: None,
            cta_text: "Learn More",
            base_url: "https://packdesk.io",
            unsubscribe_token: UNSUBSCRIBE_TOKEN,
        };
        let html = email.render().unwrap();
        assert!(html.contains("https://cdn.packdesk.io/hero.jpg"));
    }

    #[test]
    fn test_artwork_status_email_renders() {
        let email = ArtworkStatusEmail {
            customer_name: "Amy",
            artwork_name: "front-panel.pdf",
            artwork_code: Some("ACM01-PKG01-V002"),
            status_label: humanize_status("proof_ready"),
            feedback: Some("Please check the bleed."),
            review_url: "https://packdesk.io/artwork/abc".to_string(),
        };
        let html = email.render().unwrap();
        assert!(html.contains("Amy"));
        assert!(html.contains("Proof Ready"));
        assert!(html.contains("ACM01-PKG01-V002"));
        assert!(html.contains("Please check the bleed."));
    }
}
