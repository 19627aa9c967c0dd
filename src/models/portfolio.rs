use std::fmt;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The three service categories the public site knows about.
///
/// Stored in the database as the canonical display text so rows stay
/// readable by the consumer app, which matches on these exact names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    PrintingPress,
    Seo,
    PackagesSolutions,
}

impl Category {
    /// Canonical display text, as persisted and as shown on the site.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::PrintingPress => "Printing Press",
            Category::Seo => "SEO",
            Category::PackagesSolutions => "Packages Solutions",
        }
    }

    /// Map free-text input to a canonical category.
    ///
    /// Keyword heuristics, case-insensitive: {print, press} → Printing
    /// Press, {seo, search} → SEO, {package, solution} → Packages
    /// Solutions. Anything unrecognized falls back to Printing Press —
    /// kept for compatibility with the consumer app, logged so it does
    /// not pass silently. Canonical text normalizes to itself.
    pub fn normalize(raw: &str) -> Category {
        let lower = raw.to_lowercase();
        if lower.contains("print") || lower.contains("press") {
            Category::PrintingPress
        } else if lower.contains("seo") || lower.contains("search") {
            Category::Seo
        } else if lower.contains("package") || lower.contains("solution") {
            Category::PackagesSolutions
        } else {
            tracing::warn!(
                category = raw,
                "unrecognized portfolio category, defaulting to Printing Press"
            );
            Category::PrintingPress
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SeaORM entity for the `portfolio_items` table.
///
/// `category` is a plain TEXT column rather than an active enum: the
/// replace-on-write path must be able to load and purge rows whose casing
/// drifted (written by older tooling), which an enum decode would reject.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "portfolio_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub category: String,
    pub image_filename: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePortfolioItem {
    pub title: String,
    pub description: String,
    pub category: String,
    pub image_filename: String,
}

/// Update payload. `image_filename` absent means "keep the current image".
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePortfolioItem {
    pub title: String,
    pub description: String,
    pub category: String,
    pub image_filename: Option<String>,
}
