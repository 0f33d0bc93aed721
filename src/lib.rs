//! Golden-file snapshot testing for rendered text.
//!
//! A check takes a name and some rendered text. In update mode the text is
//! written as the baseline `<dir>/<name>.golden`; otherwise it is compared
//! against that baseline and any difference is reported as a line-level
//! diff.
//!
//! ```ignore
//! #[test]
//! fn menu_renders() {
//!     let view = render_menu();
//!     snapward::assert_golden!("menu", &view);
//! }
//! ```
//!
//! Run with `UPDATE_SNAPSHOTS=1` to create or regenerate baselines. By
//! default they live in `testdata/snapshots/` next to the calling source
//! file.

pub mod baseline;
pub mod diffing;
pub mod engine;
pub mod location;
pub mod normalize;
pub mod report;
pub mod settings;
pub mod util;
pub mod view;

pub use diffing::{DiffLine, diff_lines, unified_diff};
pub use engine::{
    Golden, GoldenError, Mode, Outcome, UPDATE_ENV, process_mode, set_update_snapshots,
    update_snapshots,
};
pub use location::{CallSite, CallerRelative, DirResolver};
pub use normalize::{Normalization, strip_ansi};
pub use report::{PanicReporter, Reporter, SoftReporter};
