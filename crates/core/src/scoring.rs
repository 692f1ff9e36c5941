//! Scoring module - handheld Type-A rules
//!
//! - Line clears pay `LINE_SCORES[lines] * level`.
//! - A clear that lands within `COMBO_WINDOW_MS` of the previous one extends
//!   the combo and pays `combo * COMBO_BASE * level` on top.
//! - Level is `lines / 10 + 1`, capped at `MAX_LEVEL`.

use crate::types::{
    COMBO_BASE, COMBO_WINDOW_MS, LEVEL_FRAMES, LINES_PER_LEVEL, LINE_SCORES, MAX_LEVEL,
    SOFT_DROP_FRAMES,
};

/// Outcome of scoring one simultaneous clear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Table points for the rows
    pub line_clear_score: u32,
    /// Combo points added on top
    pub combo_bonus: u32,
    pub total: u32,
    /// Combo counter after this clear
    pub combo: u32,
}

/// Base points for clearing `lines` rows at once at `level`.
///
/// More than four rows (only possible on a hand-built board) pays the
/// four-row rate.
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    LINE_SCORES[lines.min(4)].saturating_mul(level)
}

/// Advance the combo counter for a clear happening at `now_ms`.
///
/// `last_clear_ms` is the session-clock time of the previous clear, `None`
/// if there has been none. Returns `(combo, bonus)`.
pub fn calculate_combo(combo: u32, last_clear_ms: Option<u64>, now_ms: u64, level: u32) -> (u32, u32) {
    match last_clear_ms {
        Some(last) if now_ms.saturating_sub(last) < COMBO_WINDOW_MS => {
            let combo = combo + 1;
            (combo, combo.saturating_mul(COMBO_BASE).saturating_mul(level))
        }
        _ => (0, 0),
    }
}

/// Score a clear of `lines` rows.
pub fn calculate_score(
    lines: usize,
    level: u32,
    combo: u32,
    last_clear_ms: Option<u64>,
    now_ms: u64,
) -> ScoreResult {
    let line_clear_score = calculate_line_score(lines, level);
    let (combo, combo_bonus) = calculate_combo(combo, last_clear_ms, now_ms, level);
    ScoreResult {
        line_clear_score,
        combo_bonus,
        total: line_clear_score.saturating_add(combo_bonus),
        combo,
    }
}

/// Level for a running total of cleared lines
pub fn calculate_level(total_lines: u32) -> u32 {
    (total_lines / LINES_PER_LEVEL + 1).min(MAX_LEVEL)
}

/// Frames between automatic drops at `level`, or the fixed soft-drop
/// interval when the modifier is held.
pub fn drop_interval_frames(level: u32, soft_drop: bool) -> u32 {
    if soft_drop {
        return SOFT_DROP_FRAMES;
    }
    let idx = (level as usize).min(LEVEL_FRAMES.len() - 1);
    LEVEL_FRAMES[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scores_scale_with_level() {
        assert_eq!(calculate_line_score(0, 3), 0);
        assert_eq!(calculate_line_score(1, 1), 40);
        assert_eq!(calculate_line_score(2, 1), 100);
        assert_eq!(calculate_line_score(3, 1), 300);
        assert_eq!(calculate_line_score(4, 1), 1200);
        assert_eq!(calculate_line_score(1, 7), 280);
        assert_eq!(calculate_line_score(4, 20), 24000);
    }

    #[test]
    fn test_combo_inside_window() {
        assert_eq!(calculate_combo(0, Some(1000), 1999, 1), (1, 50));
        assert_eq!(calculate_combo(1, Some(1000), 1500, 3), (2, 300));
    }

    #[test]
    fn test_combo_resets_at_window_edge() {
        assert_eq!(calculate_combo(4, Some(1000), 2000, 1), (0, 0));
        assert_eq!(calculate_combo(4, Some(0), 60_000, 1), (0, 0));
    }

    #[test]
    fn test_first_clear_never_combos() {
        assert_eq!(calculate_combo(0, None, 0, 1), (0, 0));
    }

    #[test]
    fn test_full_score() {
        let r = calculate_score(2, 2, 0, Some(500), 900);
        assert_eq!(r.line_clear_score, 200);
        assert_eq!(r.combo, 1);
        assert_eq!(r.combo_bonus, 100);
        assert_eq!(r.total, 300);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(calculate_level(0), 1);
        assert_eq!(calculate_level(9), 1);
        assert_eq!(calculate_level(10), 2);
        assert_eq!(calculate_level(189), 19);
        assert_eq!(calculate_level(190), 20);
        assert_eq!(calculate_level(5000), 20);
    }

    #[test]
    fn test_drop_intervals() {
        assert_eq!(drop_interval_frames(0, false), 53);
        assert_eq!(drop_interval_frames(1, false), 49);
        assert_eq!(drop_interval_frames(20, false), 3);
        assert_eq!(drop_interval_frames(99, false), 3);
        assert_eq!(drop_interval_frames(1, true), 2);
    }
}
