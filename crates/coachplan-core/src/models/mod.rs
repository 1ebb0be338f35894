//! Data models for coaching plans, plan items and templates.
//!
//! These are plain values exchanged with the plan store. Markdown rendering
//! for them lives in [`crate::display`].
//!
//! # Examples
//!
//! ```rust
//! use coachplan_core::models::{Category, Frequency, PlanItemContent};
//!
//! let content = PlanItemContent::new("Morning walk", Category::Fitness, Frequency::Daily)
//!     .with_duration_minutes(30);
//! assert!(content.validate().is_ok());
//!
//! let blank = PlanItemContent::new("   ", Category::Habits, Frequency::Weekly);
//! assert!(blank.validate().is_err());
//! ```

pub mod item;
pub mod kinds;
pub mod plan;
pub mod template;


pub use item::{ItemId, PlanItem, PlanItemContent};
pub use kinds::{Category, Frequency};
pub use plan::Plan;
pub use template::{SavedTemplate, Template};
