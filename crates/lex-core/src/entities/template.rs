use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One section of a clause template.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TemplateBlock {
    pub name: String,
    pub required: bool,
}

/// Ordered list of clause sections making up a standard agreement.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Template {
    pub name: String,
    pub blocks: Vec<TemplateBlock>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Template {
    #[must_use]
    pub fn standard_nda() -> Self {
        let block = |name: &str, required| TemplateBlock {
            name: name.into(),
            required,
        };
        Self {
            name: "Standard NDA".into(),
            blocks: vec![
                block("Header & Parties", true),
                block("Term & Termination", true),
                block("Confidentiality", false),
                block("Payment Terms", true),
                block("Indemnification", false),
                block("Signatures", true),
            ],
        }
    }

    /// Swap the block at `index` with its neighbour in `direction`.
    ///
    /// Moving the first block up, the last block down, or an out-of-range
    /// index is a no-op. Returns whether anything moved.
    pub fn move_block(&mut self, index: usize, direction: Direction) -> bool {
        let target = match direction {
            Direction::Up => index.checked_sub(1),
            Direction::Down => index.checked_add(1),
        };
        match target {
            Some(target) if index < self.blocks.len() && target < self.blocks.len() => {
                self.blocks.swap(index, target);
                true
            }
            _ => false,
        }
    }
}
