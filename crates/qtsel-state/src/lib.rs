//! Selection state for the Qt installer selector.
//!
//! Generic single- and multi-choice selectors with a loading lifecycle, and
//! [`CompositeState`], the immutable state machine that strings them together
//! from host down to modules, archives and tools.

pub mod composite;
pub mod load_state;
pub mod message;
pub mod output_format;
pub mod select_many;
pub mod selection;
pub mod ticket;
pub mod tool;
pub mod versions;

pub use composite::{CompositeState, ToolMap};
pub use load_state::LoadState;
pub use message::{Message, update};
pub use output_format::ActionVersion;
pub use select_many::{ElementMap, SelectMany, SelectableElement};
pub use selection::{NO_SELECTION, SelectOne, Selection};
pub use ticket::{LoadTarget, LoadTicket};
pub use tool::ToolData;
pub use versions::VersionSelector;
