//! Prompt construction for the generation service.
//!
//! All prompts instruct the model to answer with bare JSON; the parser
//! still tolerates fenced output (`parse::strip_code_fences`).

use teampulse_core::aggregate::{PlayerScores, TeamAverages};
use teampulse_core::update::InsightScope;

/// Per-team context the club-scope prompt is built from.
#[derive(Debug, Clone)]
pub struct TeamSnapshot {
    pub team_name: String,
    pub averages: TeamAverages,
}

/// System prompt for insight generation in a given scope.
pub fn system_prompt(scope: InsightScope) -> String {
    let audience = match scope {
        InsightScope::Team => "the coaching staff of a youth sports team",
        InsightScope::Club => "the person responsible for a youth sports club",
        InsightScope::Player => "a young athlete, in an encouraging tone",
    };
    format!(
        "You are a wellness assistant for a youth sports platform. \
         You write short, actionable insights for {audience}. \
         Respond with only a JSON object with the keys \"title\", \"content\" \
         and \"category\". The category must be exactly one of: {}.",
        scope.categories().join(", ")
    )
}

/// System prompt for screening check-in messages.
pub const SCREENING_SYSTEM: &str =
    "You screen messages written by young athletes in a wellness check-in. \
     Decide whether the message signals a situation an adult should look at. \
     Answer with exactly one word: distress, injury, overtraining, or none.";

/// User prompt for the screening call.
pub fn screening_user(message: &str) -> String {
    format!("The athlete wrote:\n\"{message}\"")
}

/// User prompt for a team-scope insight.
pub fn team_user_prompt(team_name: &str, averages: &TeamAverages, player_count: usize) -> String {
    format!(
        "Today's wellness picture for team \"{team_name}\" \
         ({player_count} players reporting):\n{}\n\
         Write an insight for the coaching staff.",
        averages_block(averages)
    )
}

/// User prompt for a club-scope insight across several team summaries.
pub fn club_user_prompt(club_name: &str, teams: &[TeamSnapshot]) -> String {
    let mut lines = String::new();
    for team in teams {
        lines.push_str(&format!(
            "Team \"{}\":\n{}",
            team.team_name,
            averages_block(&team.averages)
        ));
    }
    format!(
        "Weekly wellness summaries for the teams of club \"{club_name}\":\n{lines}\
         Write an insight for the club's responsible person."
    )
}

/// User prompt for a player-scope insight comparing the player to the team.
pub fn player_user_prompt(
    player_name: &str,
    scores: &PlayerScores,
    team_averages: &TeamAverages,
) -> String {
    format!(
        "Today's check-in from player \"{player_name}\":\n\
         - mood: {} (team average {})\n\
         - stress: {} (team average {})\n\
         - sleep: {} (team average {})\n\
         - motivation: {} (team average {})\n\
         - energy: {} (team average {})\n\
         - injured: {}\n\
         Write a short personal insight for the player.",
        fmt_rating(scores.mood),
        fmt_average(team_averages.average_mood),
        fmt_rating(scores.stress),
        fmt_average(team_averages.average_stress),
        fmt_rating(scores.sleep),
        fmt_average(team_averages.average_sleep),
        fmt_rating(scores.motivation),
        fmt_average(team_averages.average_motivation),
        fmt_rating(scores.energy),
        fmt_average(team_averages.average_energy),
        if scores.injured { "yes" } else { "no" },
    )
}

/// Render the shared average lines used by team and club prompts.
fn averages_block(averages: &TeamAverages) -> String {
    let topics = if averages.common_topics.is_empty() {
        "none".to_string()
    } else {
        averages.common_topics.join(", ")
    };
    format!(
        "- average mood: {}\n\
         - average stress: {}\n\
         - average sleep: {}\n\
         - average motivation: {}\n\
         - average energy: {}\n\
         - injuries reported: {}\n\
         - common topics: {}\n",
        fmt_average(averages.average_mood),
        fmt_average(averages.average_stress),
        fmt_average(averages.average_sleep),
        fmt_average(averages.average_motivation),
        fmt_average(averages.average_energy),
        averages.injury_count,
        topics,
    )
}

/// Format a 1-decimal average, or `n/a` when nobody rated the field.
fn fmt_average(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.1}"),
        None => "n/a".to_string(),
    }
}

/// Format a single 1-5 rating, or `n/a` when the player skipped it.
fn fmt_rating(value: Option<i16>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_averages() -> TeamAverages {
        TeamAverages {
            average_mood: Some(3.5),
            average_stress: None,
            average_sleep: Some(4.0),
            average_motivation: Some(2.7),
            average_energy: None,
            injury_count: 1,
            common_topics: vec!["school".to_string(), "tired".to_string()],
        }
    }

    #[test]
    fn system_prompt_lists_scope_categories() {
        let prompt = system_prompt(InsightScope::Team);
        assert!(prompt.contains("Team Performance"));
        assert!(prompt.contains("Injury Risk"));
        assert!(!prompt.contains("Sleep,"));
    }

    #[test]
    fn team_prompt_formats_averages_and_gaps() {
        let prompt = team_user_prompt("U15 Girls", &sample_averages(), 7);
        assert!(prompt.contains("U15 Girls"));
        assert!(prompt.contains("7 players"));
        assert!(prompt.contains("average mood: 3.5"));
        assert!(prompt.contains("average stress: n/a"));
        assert!(prompt.contains("school, tired"));
    }

    #[test]
    fn club_prompt_includes_every_team() {
        let teams = vec![
            TeamSnapshot {
                team_name: "U15".to_string(),
                averages: sample_averages(),
            },
            TeamSnapshot {
                team_name: "U17".to_string(),
                averages: TeamAverages::empty(),
            },
        ];
        let prompt = club_user_prompt("FK Hope", &teams);
        assert!(prompt.contains("FK Hope"));
        assert!(prompt.contains("Team \"U15\""));
        assert!(prompt.contains("Team \"U17\""));
        assert!(prompt.contains("common topics: none"));
    }

    #[test]
    fn player_prompt_compares_against_team() {
        let scores = PlayerScores {
            name: "Jo".to_string(),
            mood: Some(2),
            ..Default::default()
        };
        let prompt = player_user_prompt("Jo", &scores, &sample_averages());
        assert!(prompt.contains("mood: 2 (team average 3.5)"));
        assert!(prompt.contains("sleep: n/a (team average 4.0)"));
        assert!(prompt.contains("injured: no"));
    }
}
