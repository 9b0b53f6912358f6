use serde::{Deserialize, Serialize};

/// One concrete item pick and the slot it fills. Index 0 is the primary slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickedItem {
    #[serde(default)]
    pub index: u8,
    pub item: String,
}

impl PickedItem {
    pub fn new(index: u8, item: impl Into<String>) -> Self {
        Self {
            index,
            item: item.into(),
        }
    }
}

/// The option chosen for one choice and the items picked under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceSelection {
    pub choice_id: String,
    pub option_id: String,
    #[serde(default)]
    pub items: Vec<PickedItem>,
}

impl ChoiceSelection {
    /// Picked item ids in pick order, without their slots.
    pub fn item_ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|p| p.item.as_str())
    }
}

/// Flattened selection state handed to the persistence service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionPayload {
    pub selections: Vec<ChoiceSelection>,
}

impl SelectionPayload {
    pub fn selection_for(&self, choice_id: &str) -> Option<&ChoiceSelection> {
        self.selections.iter().find(|s| s.choice_id == choice_id)
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}
