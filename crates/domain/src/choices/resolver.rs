use std::collections::{HashMap, HashSet};

use super::model::{Choice, ChoiceOption, ItemGrant, OptionKind};
use super::payload::{ChoiceSelection, PickedItem, SelectionPayload};
use super::slot::SlotKey;
use crate::error::DomainError;

/// Selection state for one step's set of choices.
///
/// Holds at most one selected option per choice plus the concrete item
/// picks recorded under option slots. Item picks only ever exist under the
/// currently selected option of their choice: changing the option drops
/// every pick made under the old one.
#[derive(Debug, Clone)]
pub struct ChoiceResolver {
    choices: Vec<Choice>,
    option_by_choice: HashMap<String, String>,
    /// Insertion-ordered; overwriting a slot keeps its original position
    item_by_slot: Vec<(SlotKey, String)>,
}

/// Result of seeding a resolver from a saved payload.
#[derive(Debug, Clone)]
pub struct SeededResolver {
    pub resolver: ChoiceResolver,
    /// Saved selections or item picks that no longer match the catalog
    pub dropped: usize,
}

impl ChoiceResolver {
    /// Create an empty resolver. Fails on duplicate choice ids or duplicate
    /// option ids within a choice.
    pub fn new(choices: Vec<Choice>) -> Result<Self, DomainError> {
        let mut seen = HashSet::new();
        for choice in &choices {
            if !seen.insert(choice.id.as_str()) {
                return Err(DomainError::constraint(format!(
                    "duplicate choice id: {}",
                    choice.id
                )));
            }
            let mut options = HashSet::new();
            for option in &choice.options {
                if !options.insert(option.id.as_str()) {
                    return Err(DomainError::constraint(format!(
                        "duplicate option id {} in choice {}",
                        option.id, choice.id
                    )));
                }
            }
        }
        Ok(Self {
            choices,
            option_by_choice: HashMap::new(),
            item_by_slot: Vec::new(),
        })
    }

    /// Create a resolver and replay a previously saved payload onto it.
    ///
    /// Selections referring to choices, options or slots that no longer exist
    /// are skipped and counted in [`SeededResolver::dropped`].
    pub fn from_saved(
        choices: Vec<Choice>,
        payload: &SelectionPayload,
    ) -> Result<SeededResolver, DomainError> {
        let mut resolver = Self::new(choices)?;
        let mut dropped = 0;
        for saved in &payload.selections {
            if resolver
                .select_option(&saved.choice_id, &saved.option_id)
                .is_err()
            {
                dropped += 1 + saved.items.len();
                continue;
            }
            for picked in &saved.items {
                if resolver
                    .select_item(
                        &saved.choice_id,
                        &saved.option_id,
                        &picked.item,
                        Some(picked.index),
                    )
                    .is_err()
                {
                    dropped += 1;
                }
            }
        }
        Ok(SeededResolver { resolver, dropped })
    }

    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    fn lookup(&self, choice_id: &str, option_id: &str) -> Result<(&Choice, &ChoiceOption), DomainError> {
        let choice = self
            .choices
            .iter()
            .find(|c| c.id == choice_id)
            .ok_or_else(|| DomainError::not_found("Choice", choice_id))?;
        let option = choice
            .option(option_id)
            .ok_or_else(|| DomainError::not_found("ChoiceOption", format!("{choice_id}/{option_id}")))?;
        Ok((choice, option))
    }

    /// Select `option_id` for `choice_id`, replacing any previous selection.
    ///
    /// Every item pick recorded under a different option of the same choice
    /// is removed.
    pub fn select_option(&mut self, choice_id: &str, option_id: &str) -> Result<(), DomainError> {
        self.lookup(choice_id, option_id)?;
        self.option_by_choice
            .insert(choice_id.to_string(), option_id.to_string());
        self.item_by_slot
            .retain(|(key, _)| key.choice_id != choice_id || key.option_id == option_id);
        Ok(())
    }

    /// The option currently selected for a choice.
    pub fn selected_option(&self, choice_id: &str) -> Option<&str> {
        self.option_by_choice.get(choice_id).map(String::as_str)
    }

    /// Record a concrete item pick for an option slot.
    ///
    /// `index` of `None` (or `Some(0)`) fills the primary slot; higher indices
    /// fill auxiliary slots for options needing several picks. Picking under
    /// an option that is not selected selects it first.
    pub fn select_item(
        &mut self,
        choice_id: &str,
        option_id: &str,
        item_id: &str,
        index: Option<u8>,
    ) -> Result<(), DomainError> {
        let (choice, option) = self.lookup(choice_id, option_id)?;
        let required = choice.required_picks(option);
        if required == 0 {
            return Err(DomainError::validation(format!(
                "option {option_id} of choice {choice_id} grants fixed items"
            )));
        }
        let index = index.unwrap_or(0);
        if usize::from(index) >= required {
            return Err(DomainError::validation(format!(
                "slot {index} out of range for {choice_id}/{option_id} ({required} picks)"
            )));
        }

        if self.selected_option(choice_id) != Some(option_id) {
            self.select_option(choice_id, option_id)?;
        }

        let key = SlotKey::indexed(choice_id, option_id, index);
        match self.item_by_slot.iter_mut().find(|(k, _)| *k == key) {
            Some((_, item)) => *item = item_id.to_string(),
            None => self.item_by_slot.push((key, item_id.to_string())),
        }
        Ok(())
    }

    /// Remove a single item pick. Returns the removed item, if any.
    pub fn clear_item(&mut self, choice_id: &str, option_id: &str, index: Option<u8>) -> Option<String> {
        let key = SlotKey::indexed(choice_id, option_id, index.unwrap_or(0));
        let pos = self.item_by_slot.iter().position(|(k, _)| *k == key)?;
        Some(self.item_by_slot.remove(pos).1)
    }

    /// All item picks for an option, primary and auxiliary, in the order they
    /// were first made. Empty for options that were never selected.
    pub fn gather_item_selections(&self, choice_id: &str, option_id: &str) -> Vec<&str> {
        self.item_by_slot
            .iter()
            .filter(|(key, _)| key.belongs_to(choice_id, option_id))
            .map(|(_, item)| item.as_str())
            .collect()
    }

    fn is_resolved(&self, choice: &Choice) -> bool {
        let Some(option) = self
            .selected_option(&choice.id)
            .and_then(|id| choice.option(id))
        else {
            return false;
        };
        self.gather_item_selections(&choice.id, &option.id).len() >= choice.required_picks(option)
    }

    /// Whether the given choice has a selected option with all its picks.
    pub fn is_choice_resolved(&self, choice_id: &str) -> bool {
        self.choices
            .iter()
            .find(|c| c.id == choice_id)
            .is_some_and(|c| self.is_resolved(c))
    }

    /// True iff every choice has a selected option and every selected option
    /// that needs item picks has all of them.
    pub fn all_choices_resolved(&self) -> bool {
        self.choices.iter().all(|c| self.is_resolved(c))
    }

    /// Ids of the choices still unresolved, in declaration order.
    pub fn unresolved_choices(&self) -> Vec<&str> {
        self.choices
            .iter()
            .filter(|c| !self.is_resolved(c))
            .map(|c| c.id.as_str())
            .collect()
    }

    /// Fixed grants plus picked items of every selected option.
    pub fn granted_items(&self) -> Vec<ItemGrant> {
        let mut granted = Vec::new();
        for choice in &self.choices {
            let Some(option) = self
                .selected_option(&choice.id)
                .and_then(|id| choice.option(id))
            else {
                continue;
            };
            match &option.kind {
                OptionKind::Fixed { items } => granted.extend(items.iter().cloned()),
                OptionKind::Pick(_) => granted.extend(
                    self.gather_item_selections(&choice.id, &option.id)
                        .into_iter()
                        .map(|item| ItemGrant::new(item, 1)),
                ),
            }
        }
        granted
    }

    /// Flatten the selection state for persistence, in choice declaration order.
    pub fn to_persistable_payload(&self) -> SelectionPayload {
        let selections = self
            .choices
            .iter()
            .filter_map(|choice| {
                let option_id = self.selected_option(&choice.id)?;
                Some(ChoiceSelection {
                    choice_id: choice.id.clone(),
                    option_id: option_id.to_string(),
                    items: self
                        .item_by_slot
                        .iter()
                        .filter(|(key, _)| key.belongs_to(&choice.id, option_id))
                        .map(|(key, item)| PickedItem::new(key.index.unwrap_or(0), item.clone()))
                        .collect(),
                })
            })
            .collect();
        SelectionPayload { selections }
    }
}
