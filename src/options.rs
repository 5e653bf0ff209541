//! Translation request options: tone, context, and preserve-terms.
//!
//! The engine accepts one free-form hint instruction per call. The options
//! bundle composes that instruction in a fixed order: tone prefix, then the
//! user's context, then the preserve-terms notice. An empty composition
//! means no hint payload is sent at all.

use anyhow::bail;
use std::fmt;
use std::str::FromStr;

/// Tone preset applied to a translation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Default,
    Formal,
    Casual,
    Technical,
    Creative,
}

impl Tone {
    /// Instruction prefix baked into the hint payload. Empty for `Default`.
    pub fn instruction(&self) -> &'static str {
        match self {
            Tone::Default => "",
            Tone::Formal => {
                "Translate in a formal, professional tone suitable for business communication. "
            }
            Tone::Casual => {
                "Translate in a casual, friendly tone suitable for everyday conversation. "
            }
            Tone::Technical => {
                "Translate in a precise, technical tone suitable for documentation. Preserve technical terms. "
            }
            Tone::Creative => {
                "Translate in an expressive, creative tone that captures the artistic intent. "
            }
        }
    }

    /// Every recognized tone, in display order.
    pub fn all() -> [Tone; 5] {
        [
            Tone::Default,
            Tone::Formal,
            Tone::Casual,
            Tone::Technical,
            Tone::Creative,
        ]
    }

    /// The tone's identifier, as used in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Default => "default",
            Tone::Formal => "formal",
            Tone::Casual => "casual",
            Tone::Technical => "technical",
            Tone::Creative => "creative",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" | "" => Ok(Tone::Default),
            "formal" => Ok(Tone::Formal),
            "casual" => Ok(Tone::Casual),
            "technical" => Ok(Tone::Technical),
            "creative" => Ok(Tone::Creative),
            other => bail!("Unrecognized tone: '{}'", other),
        }
    }
}

/// Options attached to every translate call in a batch.
#[derive(Debug, Clone, Default)]
pub struct TranslationOptions {
    pub tone: Tone,

    /// Free-form register/domain description (e.g., "technical documentation
    /// for developers") merged into the instruction.
    pub context: String,

    /// Literal strings the engine should keep untranslated or handle
    /// specially, in the order the user added them.
    pub preserve_terms: Vec<String>,
}

impl TranslationOptions {
    /// Compose the single hint instruction sent to the engine.
    ///
    /// Returns `None` when tone, context, and preserve-terms are all empty.
    pub fn hint_instruction(&self) -> Option<String> {
        let tone = self.tone.instruction();

        let context = if self.context.trim().is_empty() {
            String::new()
        } else {
            format!("Context: {}. ", self.context.trim())
        };

        let terms = if self.preserve_terms.is_empty() {
            String::new()
        } else {
            format!(
                "Important: Preserve these terms as-is or translate appropriately: {}. ",
                self.preserve_terms.join(", ")
            )
        };

        let full = format!("{tone}{context}{terms}");
        let full = full.trim();
        if full.is_empty() {
            None
        } else {
            Some(full.to_string())
        }
    }
}
