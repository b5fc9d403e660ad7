#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
//! Testing harness for Dossier widgets.
//!
//! ```ignore
//! use dossier_test::Harness;
//! use dossier_widgets::Description;
//!
//! let harness = Harness::new(Description::new("short")).viewport(400.0, 300.0);
//! harness.assert_not_exists("[data-testid='description-toggle']");
//! ```

mod harness;
mod selector;

pub use harness::Harness;
pub use selector::{Selector, SelectorError, SelectorParser};
