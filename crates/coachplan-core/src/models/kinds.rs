//! Enumerations classifying plan items.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of plan item categories.
///
/// Declaration order is display order: visible items are grouped by
/// category in this order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Nutrition,
    Fitness,
    Recovery,
    Mindfulness,
    Habits,
    Measurements,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 6] = [
        Category::Nutrition,
        Category::Fitness,
        Category::Recovery,
        Category::Mindfulness,
        Category::Habits,
        Category::Measurements,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Nutrition => "nutrition",
            Category::Fitness => "fitness",
            Category::Recovery => "recovery",
            Category::Mindfulness => "mindfulness",
            Category::Habits => "habits",
            Category::Measurements => "measurements",
        }
    }

    /// Human-readable heading used when rendering grouped items.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Nutrition => "Nutrition",
            Category::Fitness => "Fitness",
            Category::Recovery => "Recovery",
            Category::Mindfulness => "Mindfulness",
            Category::Habits => "Habits",
            Category::Measurements => "Measurements",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nutrition" => Ok(Category::Nutrition),
            "fitness" => Ok(Category::Fitness),
            "recovery" => Ok(Category::Recovery),
            "mindfulness" => Ok(Category::Mindfulness),
            "habits" => Ok(Category::Habits),
            "measurements" => Ok(Category::Measurements),
            _ => Err(format!("Invalid category: {s}")),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How often a plan item recurs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Every day of the week
    Daily,

    /// Once a week
    Weekly,

    /// Monday through Friday
    Weekdays,
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "weekdays" => Ok(Frequency::Weekdays),
            _ => Err(format!("Invalid frequency: {s}")),
        }
    }
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Weekdays => "weekdays",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Weekdays => "Weekdays",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
