use serde::{Deserialize, Serialize};

/// A concrete catalog item granted outright.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemGrant {
    pub item: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl ItemGrant {
    pub fn new(item: impl Into<String>, quantity: u32) -> Self {
        Self {
            item: item.into(),
            quantity,
        }
    }
}

/// An item category the player picks concrete items from.
///
/// Eligibility filtering (which items count as "martial weapons") belongs
/// to the catalog; only the category label travels here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSelection {
    pub category: String,
    /// Picks required; falls back to the owning choice's `count`
    #[serde(default)]
    pub count: Option<u8>,
}

/// What selecting an option grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum OptionKind {
    /// Fixed items, nothing further to pick
    Fixed { items: Vec<ItemGrant> },
    /// Player must pick concrete items from a category
    Pick(ItemSelection),
}

/// One alternative within a [`Choice`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub id: String,
    pub description: String,
    pub kind: OptionKind,
}

impl ChoiceOption {
    pub fn fixed(id: impl Into<String>, description: impl Into<String>, items: Vec<ItemGrant>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            kind: OptionKind::Fixed { items },
        }
    }

    pub fn pick(
        id: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        count: Option<u8>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            kind: OptionKind::Pick(ItemSelection {
                category: category.into(),
                count,
            }),
        }
    }

    pub fn requires_item_selection(&self) -> bool {
        matches!(self.kind, OptionKind::Pick(_))
    }
}

/// A "pick one of these" decision point within a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_count")]
    pub count: u8,
    pub options: Vec<ChoiceOption>,
}

fn default_count() -> u8 {
    1
}

impl Choice {
    pub fn new(id: impl Into<String>, count: u8, options: Vec<ChoiceOption>) -> Self {
        Self {
            id: id.into(),
            description: None,
            count,
            options,
        }
    }

    pub fn option(&self, option_id: &str) -> Option<&ChoiceOption> {
        self.options.iter().find(|o| o.id == option_id)
    }

    /// Item picks `option` needs before this choice counts as resolved.
    /// Zero for fixed options, at least one otherwise.
    pub fn required_picks(&self, option: &ChoiceOption) -> usize {
        match &option.kind {
            OptionKind::Fixed { .. } => 0,
            OptionKind::Pick(selection) => usize::from(selection.count.unwrap_or(self.count).max(1)),
        }
    }
}
