use serde::{Deserialize, Serialize};

/// Fixed reply shown in place of the assistant when the chat endpoint fails.
pub const ASSISTANT_FALLBACK_REPLY: &str = "Error connecting to AI assistant.";

/// Opening bubble of the assistant panel, shown before any conversation turn.
/// Presentation only; it is not part of the conversation log.
pub const ASSISTANT_GREETING: &str = "Bonjour! Je peux vous aider à passer une commande. \
Exemple: \"Commander 50 claviers pour Client Alpha\"";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    Critical,
    Low,
    Healthy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockItem {
    pub label: String,
    pub quantity: u32,
    pub threshold: u32,
}

impl StockItem {
    pub fn new(label: impl Into<String>, quantity: u32, threshold: u32) -> Self {
        Self {
            label: label.into(),
            quantity,
            threshold,
        }
    }

    /// At or below half the threshold is critical, below it is low.
    pub fn status(&self) -> StockStatus {
        if self.quantity.saturating_mul(2) <= self.threshold {
            StockStatus::Critical
        } else if self.quantity < self.threshold {
            StockStatus::Low
        } else {
            StockStatus::Healthy
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_status_derives_from_quantity_and_threshold() {
        assert_eq!(StockItem::new("Laptops", 5, 10).status(), StockStatus::Critical);
        assert_eq!(StockItem::new("Printer Ink", 15, 20).status(), StockStatus::Low);
        assert_eq!(StockItem::new("Paper A4", 200, 50).status(), StockStatus::Healthy);
    }

    #[test]
    fn stock_status_boundary_sits_exactly_on_threshold() {
        assert_eq!(StockItem::new("Cables", 20, 20).status(), StockStatus::Healthy);
        assert_eq!(StockItem::new("Cables", 10, 20).status(), StockStatus::Critical);
    }
}
