//! Team wellness aggregation: per-field averages, injury counts, and
//! common-topic extraction over the day's player check-ins.
//!
//! All functions here are pure so the nightly job and its tests share the
//! exact same arithmetic. Averages are computed per field over only the
//! players who actually rated that field; a player skipping "sleep" does
//! not drag the team's sleep average down.

use std::collections::HashMap;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Tokens must be strictly longer than this many characters to count as a
/// topic candidate. Filters out "a", "the", "and" and most filler words
/// without a stop-word list.
pub const MIN_TOPIC_TOKEN_LEN: usize = 3;

/// Number of top topics reported per team.
pub const TOP_TOPIC_COUNT: usize = 3;

// ---------------------------------------------------------------------------
// Input / output types
// ---------------------------------------------------------------------------

/// One player's check-in for the day, as collected by the nightly job.
///
/// Every rating is optional: the chat flow lets players answer only the
/// questions they want to. Ratings are on a 1-5 scale.
#[derive(Debug, Clone, Default)]
pub struct PlayerScores {
    pub name: String,
    pub mood: Option<i16>,
    pub stress: Option<i16>,
    pub sleep: Option<i16>,
    pub motivation: Option<i16>,
    pub energy: Option<i16>,
    pub free_text: Option<String>,
    pub injured: bool,
}

/// Aggregated wellness picture for one team on one day.
///
/// An average is `None` when no player rated that field. `common_topics`
/// is ordered by descending frequency, ties broken by first encounter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamAverages {
    pub average_mood: Option<f64>,
    pub average_stress: Option<f64>,
    pub average_sleep: Option<f64>,
    pub average_motivation: Option<f64>,
    pub average_energy: Option<f64>,
    pub injury_count: i32,
    pub common_topics: Vec<String>,
}

impl TeamAverages {
    /// The zeroed summary returned for a team with no check-ins.
    pub fn empty() -> Self {
        Self {
            average_mood: None,
            average_stress: None,
            average_sleep: None,
            average_motivation: None,
            average_energy: None,
            injury_count: 0,
            common_topics: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Aggregate a team's check-ins into [`TeamAverages`].
///
/// Each field is averaged independently over the players who set it
/// (nulls are excluded from both the sum and the denominator). Averages
/// are rounded to one decimal. Zero players yields [`TeamAverages::empty`].
pub fn summarize(players: &[PlayerScores]) -> TeamAverages {
    if players.is_empty() {
        return TeamAverages::empty();
    }

    let texts: Vec<&str> = players
        .iter()
        .filter_map(|p| p.free_text.as_deref())
        .collect();

    TeamAverages {
        average_mood: field_average(players, |p| p.mood),
        average_stress: field_average(players, |p| p.stress),
        average_sleep: field_average(players, |p| p.sleep),
        average_motivation: field_average(players, |p| p.motivation),
        average_energy: field_average(players, |p| p.energy),
        injury_count: players.iter().filter(|p| p.injured).count() as i32,
        common_topics: common_topics(&texts),
    }
}

/// Average one rating field over the players that set it, rounded to one
/// decimal. Returns `None` when no player set the field.
fn field_average(
    players: &[PlayerScores],
    field: impl Fn(&PlayerScores) -> Option<i16>,
) -> Option<f64> {
    let values: Vec<i16> = players.iter().filter_map(&field).collect();
    if values.is_empty() {
        return None;
    }
    let sum: i64 = values.iter().map(|v| *v as i64).sum();
    Some(round1(sum as f64 / values.len() as f64))
}

/// Round to one decimal place.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// Topic extraction
// ---------------------------------------------------------------------------

/// Extract the most frequent topics from the day's free-text answers.
///
/// Texts are tokenized on whitespace; tokens longer than
/// [`MIN_TOPIC_TOKEN_LEN`] characters are counted case-insensitively.
/// The top [`TOP_TOPIC_COUNT`] tokens are returned in descending
/// frequency order, ties broken by first encounter order.
pub fn common_topics(texts: &[&str]) -> Vec<String> {
    // token -> (count, index of first encounter)
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    let mut next_index = 0usize;

    for text in texts {
        for token in text.split_whitespace() {
            if token.chars().count() <= MIN_TOPIC_TOKEN_LEN {
                continue;
            }
            let token = token.to_lowercase();
            let entry = counts.entry(token).or_insert_with(|| {
                let idx = next_index;
                next_index += 1;
                (0, idx)
            });
            entry.0 += 1;
        }
    }

    let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));
    ranked
        .into_iter()
        .take(TOP_TOPIC_COUNT)
        .map(|(token, _)| token)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
