//! Editor application state for hap.
//!
//! [`DocumentState`] is the single owner of the open document: the ordered
//! section list, the current-section index, the optional document title, and
//! the dirty flag. The export pipeline never sees this mutable structure —
//! it receives an immutable [`snapshot`](DocumentState::snapshot) taken at
//! call time.
//!
//! Dirty-state signaling is an explicit observer registration rather than
//! ambient shared flags: interested parties (a window-close confirmation,
//! a title bar) subscribe with [`on_dirty_change`](DocumentState::on_dirty_change)
//! and are informed of every transition in registration order.
//!
//! Project persistence lives here too: a project file is a JSON array of
//! `{title, content}` records; a single markdown file opens as one section
//! titled by its file name.

mod state;

pub use state::{DocumentState, ProjectError};
