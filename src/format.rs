//! Small presentation helpers for the post-game stats line.

use crate::leaderboard::SubmitStats;

/// English ordinal suffix: 1 -> "1st", 2 -> "2nd", 11 -> "11th", 21 -> "21st".
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        // 11th/12th/13th override the 1/2/3 endings.
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Round a reported percentile and clamp it into 0..=100; the backend is
/// trusted only so far.
pub fn clamp_percentile(p: f64) -> u32 {
    if !p.is_finite() {
        return 0;
    }
    p.round().clamp(0.0, 100.0) as u32
}

/// Player-facing line after a successful submit: rank + percentile when the
/// backend reports them, a generic confirmation otherwise.
pub fn stats_message(stats: &SubmitStats) -> String {
    match (stats.rank, stats.percentile) {
        (Some(rank), Some(pct)) => format!(
            "Your score is the {} highest score. That's the {}% percentile.",
            ordinal(rank),
            clamp_percentile(pct)
        ),
        _ => "Your score has been saved to the leaderboard.".to_string(),
    }
}
