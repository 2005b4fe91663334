//! Insight update categories per scope.
//!
//! Every generated insight carries exactly one category tag from the
//! closed set for its scope. The insight client rejects model responses
//! whose category falls outside the scope's set, so feed rows never
//! contain free-form tags.

/// Categories allowed on a team-scope staff update.
pub const TEAM_CATEGORIES: &[&str] = &["Team Performance", "Player Wellness", "Injury Risk"];

/// Categories allowed on a club-scope update.
pub const CLUB_CATEGORIES: &[&str] = &["Club Trends", "Team Comparison", "Resource Suggestion"];

/// Categories allowed on a player-scope update.
pub const PLAYER_CATEGORIES: &[&str] = &["Sleep", "Nutrition", "Motivation", "Stress", "Wellness"];

/// The scope an insight was generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightScope {
    Team,
    Club,
    Player,
}

impl InsightScope {
    /// The closed category set for this scope.
    pub fn categories(self) -> &'static [&'static str] {
        match self {
            Self::Team => TEAM_CATEGORIES,
            Self::Club => CLUB_CATEGORIES,
            Self::Player => PLAYER_CATEGORIES,
        }
    }

    /// Canonicalize a model-returned category against this scope's set.
    ///
    /// Matching is case-insensitive; the canonical label is returned so
    /// the database only ever sees one spelling.
    pub fn canonical_category(self, value: &str) -> Option<&'static str> {
        let wanted = value.trim();
        self.categories()
            .iter()
            .find(|c| c.eq_ignore_ascii_case(wanted))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_category_is_accepted() {
        assert_eq!(
            InsightScope::Team.canonical_category("Injury Risk"),
            Some("Injury Risk")
        );
    }

    #[test]
    fn matching_is_case_insensitive_and_trims() {
        assert_eq!(
            InsightScope::Player.canonical_category("  sleep "),
            Some("Sleep")
        );
        assert_eq!(
            InsightScope::Club.canonical_category("club trends"),
            Some("Club Trends")
        );
    }

    #[test]
    fn category_from_another_scope_is_rejected() {
        assert_eq!(InsightScope::Team.canonical_category("Sleep"), None);
        assert_eq!(InsightScope::Player.canonical_category("Club Trends"), None);
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert_eq!(InsightScope::Team.canonical_category("Vibes"), None);
    }
}
