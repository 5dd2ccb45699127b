use super::progress_store::UserData;

/// Display-ready aggregate metrics. A pure projection of the store; holds no
/// state of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsSummary {
    pub total_played: u32,
    pub total_solved: u32,
    pub win_percentage: u32,
    pub current_streak: u32,
    pub max_streak: u32,
    pub total_score: u32,
    pub total_time: u64,
}

pub fn summarize(data: &UserData) -> StatsSummary {
    let total_played = data.games.len() as u32;
    let win_percentage = if total_played > 0 {
        ((data.stats.total_solved as f64 / total_played as f64) * 100.0).round() as u32
    } else {
        0
    };
    StatsSummary {
        total_played,
        total_solved: data.stats.total_solved,
        win_percentage,
        current_streak: data.stats.current_streak,
        max_streak: data.stats.max_streak,
        total_score: data.stats.total_score,
        total_time: data.stats.total_time,
    }
}
