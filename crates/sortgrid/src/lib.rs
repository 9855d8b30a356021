//! # sortgrid — drag-to-reorder grid engine
//!
//! A fixed-column, row-major grid that lets a user long-press an item, drag
//! it across neighboring cells, and watch the grid live-reorder itself,
//! committing a final order on release. This crate is the reconciliation
//! engine only: it maps stable item keys to order indices and pixel
//! positions, and animates the transitions. Drawing cell content and
//! platform event plumbing stay with the host.
//!
//! ## Feeding the engine
//!
//! ```rust
//! use sortgrid::*;
//!
//! let mut grid = SortGrid::new(GridConfig::new(2).unwrap());
//! grid.set_callbacks(GridCallbacks::new().on_drag_release(|keys| {
//!     log::info!("committed order: {keys:?}");
//! }));
//!
//! grid.set_layout(Size { width: 200.0, height: 400.0 });
//! grid.set_items(&[
//!     ItemSpec::new("a"),
//!     ItemSpec::new("b"),
//!     ItemSpec::new("c"),
//! ]);
//! ```
//!
//! The host then forwards gesture lifecycle events — either directly
//! (`press` / `drag_activate` / `drag_move` / `drag_release`) or through
//! [`GridGestureAdapter`] for a raw pointer stream — calls
//! [`SortGrid::tick`] once per frame, and draws from
//! [`SortGrid::render_snapshot`].
//!
//! ## Order and identity
//!
//! The external item list is the source of truth for which items exist and,
//! outside a drag, for their order. A drag session's live reordering is a
//! transient local override: it becomes durable only when the host feeds the
//! `on_drag_release` order back in through `set_items`. Items can opt out of
//! being grabbed (`no_drag`) or of being displaced by others
//! (`no_resort` — they sit in the order sequence as fixed obstacles that
//! shifts jump over).

pub mod animation;
pub mod drag;
pub mod geometry;
pub mod gestures;
pub mod grid;
pub mod reconcile;
pub mod registry;
pub mod scheduler;

pub use animation::{AnimatedValue, AnimationSpec, Clock, Easing, Interpolate, SystemClock, TestClock, set_clock};
pub use drag::Phase;
pub use geometry::{GridLayout, Rect, Size, Vec2};
pub use gestures::{GridGestureAdapter, PointerPhase, PointerSample};
pub use grid::{GridCallbacks, GridConfig, GridError, RenderItem, SortGrid};
pub use registry::{ItemSlot, ItemSpec, OrderEntry, OrderRegistry};
pub use scheduler::{MotionSink, TweenScheduler};
