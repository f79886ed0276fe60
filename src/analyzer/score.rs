use crate::models::{ScoreRating, TagStats};

/// Weighted 0-100 score: a good tag counts fully, a warning counts half and
/// an error counts nothing. Rounds half away from zero; no tags scores 0.
pub fn calculate_score(stats: &TagStats) -> u8 {
    let total = stats.total();
    if total == 0 {
        return 0;
    }

    let earned = (stats.implemented * 100 + stats.warnings * 50) as f64;
    let score = earned / (total * 100) as f64 * 100.0;
    score.round().clamp(0.0, 100.0) as u8
}

impl ScoreRating {
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => ScoreRating::Excellent,
            80..=89 => ScoreRating::VeryGood,
            70..=79 => ScoreRating::Good,
            60..=69 => ScoreRating::Fair,
            50..=59 => ScoreRating::NeedsWork,
            _ => ScoreRating::Poor,
        }
    }
}
