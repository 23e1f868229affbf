//! Control-file encoder.
//!
//! Renders a [`Tape5Config`] into the byte-exact fixed-width control text
//! the remote simulator reads as its primary input. Encoding is a pure
//! function of the configuration: it either fails before producing any
//! output or returns the complete document plus any precision warnings
//! collected along the way.

mod cards;

use crate::domain::{ModtranResult, Tape5Config};
use crate::format::PrecisionWarning;

/// A fully rendered control document. The text is final; warnings record
/// where real values lost decimal digits to their slots.
#[derive(Debug, Clone, PartialEq)]
pub struct Tape5Document {
    text: String,
    warnings: Vec<PrecisionWarning>,
}

impl Tape5Document {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn warnings(&self) -> &[PrecisionWarning] {
        &self.warnings
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Encodes the configuration into control-file text, one line per card.
pub fn encode(config: &Tape5Config) -> ModtranResult<Tape5Document> {
    // The simulator rejects paths ending below the surface; raise the
    // target silently instead of failing.
    let h2 = if config.h2 < config.gndalt {
        config.gndalt
    } else {
        config.h2
    };
    let mut warnings = Vec::new();
    let mut text = String::new();
    for card in cards::assemble(config, h2)? {
        let mut line = String::new();
        for field in &card.fields {
            line.push_str(&field.render(&mut warnings)?);
        }
        tracing::debug!(card = card.name, width = line.len(), "rendered card");
        text.push_str(&line);
        text.push('\n');
    }
    Ok(Tape5Document { text, warnings })
}
