// src/notify/mod.rs
//! Digest rendering and the outbound message seam.

pub mod discord;

use anyhow::Result;
use serde::Serialize;

use crate::jobs::types::{Listing, Priority};

const GOLD: u32 = 0xffd700;
const BLURPLE: u32 = 0x5865f2;
const GRAY: u32 = 0x99aab5;

const DESCRIPTION_MAX_CHARS: usize = 500;

/// Where rendered digest messages go. Implemented by
/// [`discord::DiscordPoster`]; tests substitute recording sinks.
#[async_trait::async_trait]
pub trait DigestSink: Send + Sync {
    async fn send(&self, message: &MessagePayload) -> Result<()>;
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MessagePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
}

impl MessagePayload {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            embeds: Vec::new(),
        }
    }

    pub fn embed(embed: Embed) -> Self {
        Self {
            content: None,
            embeds: vec![embed],
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Embed {
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub color: u32,
    pub timestamp: String,
    pub fields: Vec<EmbedField>,
    pub footer: EmbedFooter,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmbedFooter {
    pub text: String,
}

/// Render one listing as a Discord embed: company/location/salary fields,
/// truncated description, priority color, source or priority footer.
pub fn job_embed(listing: &Listing) -> Embed {
    let mut fields = vec![
        EmbedField {
            name: "🏢 Company".to_string(),
            value: listing.company.clone(),
            inline: true,
        },
        EmbedField {
            name: "📍 Location".to_string(),
            value: listing.location.clone(),
            inline: true,
        },
    ];
    if let Some(salary) = &listing.salary {
        fields.push(EmbedField {
            name: "💰 Salary".to_string(),
            value: salary.clone(),
            inline: true,
        });
    }

    let description = {
        let truncated = truncate_description(&listing.description, DESCRIPTION_MAX_CHARS);
        if truncated.is_empty() {
            None
        } else {
            Some(truncated)
        }
    };

    let footer = if listing.priority == Priority::High {
        EmbedFooter {
            text: "⭐ Priority Company/Studio".to_string(),
        }
    } else {
        EmbedFooter {
            text: format!("Source: {}", listing.source.as_str()),
        }
    };

    Embed {
        title: listing.title.clone(),
        url: listing.url.clone(),
        description,
        color: color_for(listing.priority),
        timestamp: listing.posted.to_rfc3339(),
        fields,
        footer,
    }
}

/// Summary line sent before the individual postings.
pub fn summary_message(job_count: usize, priority_count: usize) -> String {
    let emoji = if priority_count > 0 { "⭐" } else { "💼" };
    let plural = if job_count == 1 { "" } else { "s" };
    let priority_text = if priority_count > 0 {
        format!(" ({priority_count} from priority companies!)")
    } else {
        String::new()
    };
    format!("{emoji} **Found {job_count} new job{plural}{priority_text}**\n\n")
}

fn color_for(priority: Priority) -> u32 {
    match priority {
        Priority::High => GOLD,
        Priority::Medium => BLURPLE,
        Priority::Low => GRAY,
    }
}

/// Cut the description to `max` chars, preferring the last sentence boundary
/// when one lands in the final 30% of the allowance; otherwise hard cut with
/// an ellipsis.
pub(crate) fn truncate_description(description: &str, max: usize) -> String {
    let chars: Vec<char> = description.chars().collect();
    if chars.len() <= max {
        return description.to_string();
    }

    let window = &chars[..max];
    let last_sentence_end = window
        .iter()
        .rposition(|c| matches!(c, '.' | '!' | '?'))
        .unwrap_or(0);

    if last_sentence_end > 0 && last_sentence_end as f64 > max as f64 * 0.7 {
        return window[..=last_sentence_end].iter().collect();
    }

    let mut out: String = window[..max.saturating_sub(3)].iter().collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::types::Source;
    use chrono::Utc;

    fn listing(priority: Priority, salary: Option<&str>) -> Listing {
        Listing {
            id: "job-1".to_string(),
            title: "Senior Game Designer".to_string(),
            company: "Epic Games".to_string(),
            location: "Remote".to_string(),
            description: "Join our team.".to_string(),
            url: "https://example.test/job/1".to_string(),
            salary: salary.map(str::to_string),
            posted: Utc::now(),
            priority,
            source: Source::Adzuna,
        }
    }

    #[test]
    fn short_description_is_untouched() {
        assert_eq!(truncate_description("Short one.", 500), "Short one.");
    }

    #[test]
    fn truncation_prefers_sentence_boundary() {
        // Sentence end lands in the final 30% of the allowance.
        let text = format!("{} End of story. {}", "a".repeat(380), "b".repeat(300));
        let out = truncate_description(&text, 500);
        assert!(out.ends_with("End of story."));
        assert!(out.chars().count() <= 500);
    }

    #[test]
    fn truncation_hard_cuts_without_boundary() {
        let text = "x".repeat(600);
        let out = truncate_description(&text, 500);
        assert_eq!(out.chars().count(), 500);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn embed_fields_and_footer() {
        let high = job_embed(&listing(Priority::High, Some("$100,000+")));
        assert_eq!(high.color, GOLD);
        assert_eq!(high.footer.text, "⭐ Priority Company/Studio");
        assert_eq!(high.fields.len(), 3);

        let medium = job_embed(&listing(Priority::Medium, None));
        assert_eq!(medium.color, BLURPLE);
        assert_eq!(medium.footer.text, "Source: adzuna");
        assert_eq!(medium.fields.len(), 2);
    }

    #[test]
    fn summary_wording() {
        assert_eq!(summary_message(1, 0), "💼 **Found 1 new job**\n\n");
        assert_eq!(
            summary_message(4, 2),
            "⭐ **Found 4 new jobs (2 from priority companies!)**\n\n"
        );
    }

    #[test]
    fn summary_ends_with_blank_line() {
        // The blank line separates the summary from the first embed.
        assert!(summary_message(3, 0).ends_with("\n\n"));
    }
}
