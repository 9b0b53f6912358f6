//! Equipment and feature choice resolution.
//!
//! A step presents a list of [`Choice`]s; the [`ChoiceResolver`] tracks which
//! option is selected for each and which concrete items were picked for
//! options that name a category rather than an item.

mod feature_filter;
mod model;
mod payload;
mod resolver;
mod slot;

pub use feature_filter::{is_selectable_feature, FeatureEntry};
pub use model::{Choice, ChoiceOption, ItemGrant, ItemSelection, OptionKind};
pub use payload::{ChoiceSelection, PickedItem, SelectionPayload};
pub use resolver::{ChoiceResolver, SeededResolver};
pub use slot::SlotKey;
