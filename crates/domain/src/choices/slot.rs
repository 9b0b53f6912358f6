use std::fmt;

/// Where an item pick is stored: the primary slot of an option, or an
/// auxiliary indexed slot for options that need several picks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotKey {
    pub choice_id: String,
    pub option_id: String,
    /// `None` is the primary slot
    pub index: Option<u8>,
}

impl SlotKey {
    pub fn primary(choice_id: impl Into<String>, option_id: impl Into<String>) -> Self {
        Self {
            choice_id: choice_id.into(),
            option_id: option_id.into(),
            index: None,
        }
    }

    /// Index 0 is the primary slot.
    pub fn indexed(choice_id: impl Into<String>, option_id: impl Into<String>, index: u8) -> Self {
        Self {
            choice_id: choice_id.into(),
            option_id: option_id.into(),
            index: (index > 0).then_some(index),
        }
    }

    pub fn belongs_to(&self, choice_id: &str, option_id: &str) -> bool {
        self.choice_id == choice_id && self.option_id == option_id
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(i) => write!(f, "{}-{}-{}", self.choice_id, self.option_id, i),
            None => write!(f, "{}-{}", self.choice_id, self.option_id),
        }
    }
}
