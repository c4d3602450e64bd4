//! Projection of the store into display cards.
//!
//! The renderer owns no listing state. Each card carries its own action
//! triggers with the record id bound in, so the front end only has to hand the
//! chosen [`Action`] back to an [`crate::form::ActionHandler`].

mod format;

pub use format::{escape_html, format_amount};

use crate::models::{PropertyRecord, RecordId};
use std::fmt;

pub const EMPTY_MESSAGE: &str =
    "No properties added yet. Start by adding your first property above!";

/// A user action bound to one rendered record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Edit(RecordId),
    Delete(RecordId),
}

impl Action {
    pub fn id(&self) -> RecordId {
        match self {
            Self::Edit(id) | Self::Delete(id) => *id,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Edit(_) => "edit",
            Self::Delete(_) => "delete",
        }
    }
}

/// A labelled trigger on a card
#[derive(Debug, Clone, PartialEq)]
pub struct ActionTrigger {
    pub label: &'static str,
    pub action: Action,
}

/// Display fragment for one record
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: RecordId,
    pub name: String,
    pub location: String,
    pub property_type: String,
    pub rent: String,
    pub status: String,
    /// Omitted entirely when the record has no notes
    pub notes: Option<String>,
    pub date_added: String,
    pub actions: [ActionTrigger; 2],
}

/// The two UI states, decided only by how many records there are
#[derive(Debug, Clone, PartialEq)]
pub enum ListingView {
    Empty { message: &'static str },
    Cards(Vec<Card>),
}

impl ListingView {
    pub fn cards(&self) -> &[Card] {
        match self {
            Self::Empty { .. } => &[],
            Self::Cards(cards) => cards,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty { .. })
    }

    /// HTML fragment for the results area; all record text is escaped
    pub fn to_html(&self) -> String {
        match self {
            Self::Empty { message } => {
                format!("<p id=\"no-properties\">{}</p>\n", escape_html(message))
            }
            Self::Cards(cards) => cards.iter().map(card_html).collect(),
        }
    }
}

fn card_html(card: &Card) -> String {
    let mut html = String::new();
    html.push_str(&format!("<div class=\"property-card\" data-id=\"{}\">\n", card.id));
    html.push_str(&format!("  <h3>{}</h3>\n", escape_html(&card.name)));
    html.push_str(&format!(
        "  <p><strong>Location:</strong> {}</p>\n",
        escape_html(&card.location)
    ));
    html.push_str("  <div class=\"property-meta\">\n");
    html.push_str(&format!(
        "    <span><strong>Type:</strong> {}</span>\n",
        escape_html(&card.property_type)
    ));
    html.push_str(&format!(
        "    <span><strong>Rent:</strong> {}</span>\n",
        escape_html(&card.rent)
    ));
    html.push_str(&format!(
        "    <span><strong>Status:</strong> {}</span>\n",
        escape_html(&card.status)
    ));
    html.push_str("  </div>\n");
    if let Some(notes) = &card.notes {
        html.push_str(&format!(
            "  <p class=\"property-notes\"><strong>Notes:</strong> {}</p>\n",
            escape_html(notes)
        ));
    }
    html.push_str(&format!(
        "  <p><strong>Date Added:</strong> {}</p>\n",
        escape_html(&card.date_added)
    ));
    html.push_str("  <div class=\"property-actions\">\n");
    for trigger in &card.actions {
        html.push_str(&format!(
            concat!(
                "    <button class=\"btn-{name}\" data-action=\"{name}\" ",
                "data-id=\"{id}\">{label}</button>\n"
            ),
            name = trigger.action.name(),
            id = trigger.action.id(),
            label = trigger.label,
        ));
    }
    html.push_str("  </div>\n</div>\n");
    html
}

impl fmt::Display for ListingView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { message } => writeln!(f, "{}", message),
            Self::Cards(cards) => {
                for (i, card) in cards.iter().enumerate() {
                    writeln!(f, "{}. {}", i + 1, card.name)?;
                    writeln!(f, "   Location: {}", card.location)?;
                    writeln!(
                        f,
                        "   Type: {} | Rent: {} | Status: {}",
                        card.property_type, card.rent, card.status
                    )?;
                    if let Some(notes) = &card.notes {
                        writeln!(f, "   Notes: {}", notes)?;
                    }
                    writeln!(f, "   Date Added: {}", card.date_added)?;
                    let triggers: Vec<String> = card
                        .actions
                        .iter()
                        .map(|t| format!("[{} {}]", t.action.name(), t.action.id()))
                        .collect();
                    writeln!(f, "   {}", triggers.join(" "))?;
                    writeln!(f)?;
                }
                Ok(())
            }
        }
    }
}

/// Builds [`ListingView`]s; holds only display settings
#[derive(Debug, Clone)]
pub struct Renderer {
    currency: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new("KSh")
    }
}

impl Renderer {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }

    pub fn render_all(&self, records: &[PropertyRecord]) -> ListingView {
        if records.is_empty() {
            return ListingView::Empty {
                message: EMPTY_MESSAGE,
            };
        }
        ListingView::Cards(records.iter().map(|r| self.card(r)).collect())
    }

    fn card(&self, record: &PropertyRecord) -> Card {
        Card {
            id: record.id,
            name: record.name.clone(),
            location: record.location.clone(),
            property_type: record.property_type.to_string(),
            rent: format!("{} {}", self.currency, format_amount(record.rent)),
            status: record.status.to_string(),
            notes: (!record.notes.is_empty()).then(|| record.notes.clone()),
            date_added: record.date_added.clone(),
            actions: [
                ActionTrigger {
                    label: "Edit",
                    action: Action::Edit(record.id),
                },
                ActionTrigger {
                    label: "Delete",
                    action: Action::Delete(record.id),
                },
            ],
        }
    }
}
