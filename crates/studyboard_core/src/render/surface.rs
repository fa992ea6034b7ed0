//! Display surface contract.
//!
//! # Responsibility
//! - Decouple renderers and the statistics aggregator from any concrete
//!   output target.

/// Target region whose content is fully replaced on every render.
pub trait Surface {
    fn replace_content(&mut self, content: &str);
}

/// Plain text buffer surface, used by the terminal frontend and tests.
#[derive(Debug, Default, Clone)]
pub struct TextSurface {
    content: String,
}

impl TextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl Surface for TextSurface {
    fn replace_content(&mut self, content: &str) {
        self.content.clear();
        self.content.push_str(content);
    }
}
