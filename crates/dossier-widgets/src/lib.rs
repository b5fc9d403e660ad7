//! Widgets for the Dossier asset panel.

pub mod button;
pub mod code_locations;
pub mod dedent;
pub mod description;
pub mod description_section;
pub mod empty_state;
pub mod markdown;
pub mod text;
pub mod truncated_list;

pub use button::{Button, ButtonClicked};
pub use code_locations::{CodeLocationsFiltered, CodeLocationsHeader, SEARCH_THRESHOLD};
pub use dedent::remove_leading_spaces;
pub use description::{
    ContentSelected, Description, DescriptionToggled, DisclosureState, TOGGLE_TEST_ID,
};
pub use description_section::DescriptionSection;
pub use empty_state::{EmptyState, LinkActivated};
pub use markdown::{Block, Document, Inline, LaidOutLine, TextLayout};
pub use text::Text;
pub use truncated_list::{TruncatedList, TruncatedListChanged, DISPLAYED_BY_DEFAULT};
