use crate::catalog::{FeaturedTrack, Track};

/// A prefilled outbound e-mail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundMessage {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl OutboundMessage {
    /// Encode as a `mailto:` URL with a percent-encoded subject and body.
    pub fn mailto_url(&self) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            self.recipient,
            urlencoding::encode(&self.subject),
            urlencoding::encode(&self.body)
        )
    }
}

/// Free-text fields captured by the contact form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Builds purchase and contact messages from fixed templates.
#[derive(Clone, Debug)]
pub struct Composer {
    recipient: String,
    featured_recipient: String,
}

impl Composer {
    pub fn new(recipient: impl Into<String>, featured_recipient: Option<String>) -> Self {
        let recipient = recipient.into();
        Self {
            featured_recipient: featured_recipient.unwrap_or_else(|| recipient.clone()),
            recipient,
        }
    }

    /// Purchase inquiry for a catalog track.
    pub fn purchase(&self, track: &Track) -> OutboundMessage {
        OutboundMessage {
            recipient: self.recipient.clone(),
            subject: format!("Purchase inquiry — {} ({})", track.title, track.id),
            body: format!(
                "Hi,\n\nI want to purchase the beat:\n\nTitle: {}\nID: {}\nPrice: {}\n\n\
                 Please send purchase details and license options.\n\nThanks!",
                track.title, track.id, track.price
            ),
        }
    }

    /// Purchase inquiry for the featured beat.
    pub fn featured_purchase(&self, featured: &FeaturedTrack) -> OutboundMessage {
        let t = &featured.track;
        OutboundMessage {
            recipient: self.featured_recipient.clone(),
            subject: format!("Purchase inquiry — {}", t.title),
            body: format!(
                "Hi, I'm interested in buying the beat \"{}\" ({}).\n\nPrice: {}",
                t.title, featured.genre_label, t.price
            ),
        }
    }

    /// General inquiry from the contact form. A blank name becomes `Buyer`.
    pub fn contact(&self, form: &ContactForm) -> OutboundMessage {
        let name = if form.name.trim().is_empty() {
            "Buyer"
        } else {
            form.name.as_str()
        };
        OutboundMessage {
            recipient: self.recipient.clone(),
            subject: format!("Beat purchase / inquiry from {name}"),
            body: format!("From: {} ({})\n\n{}", name, form.email, form.message),
        }
    }
}
