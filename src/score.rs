//! Scoring table and high score tracking

/// Points awarded for a single clear event (not per line)
pub fn line_clear_points(lines: u32) -> u64 {
    match lines {
        1 => 100,
        2 => 300,
        3 => 500,
        4 => 800,
        _ => 0,
    }
}

/// Display name for a clear of `lines` rows
pub fn clear_name(lines: u32) -> Option<&'static str> {
    match lines {
        1 => Some("Single"),
        2 => Some("Double"),
        3 => Some("Triple"),
        4 => Some("Tetris"),
        _ => None,
    }
}

/// Score tracking
#[derive(Debug, Clone, Default)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Best score seen, including previous sessions
    pub high_score: u64,
    /// Total lines cleared
    pub lines: u32,
}

impl Score {
    pub fn new(high_score: u64) -> Self {
        Self {
            points: 0,
            high_score,
            lines: 0,
        }
    }

    /// Add points for a clear of `lines` rows and return the points awarded
    pub fn add_clear(&mut self, lines: u32) -> u64 {
        let points = line_clear_points(lines);
        self.points += points;
        self.lines += lines;
        points
    }

    /// Raise the high score to the current score if it was beaten.
    /// Returns true when the high score changed.
    pub fn update_high_score(&mut self) -> bool {
        if self.points > self.high_score {
            self.high_score = self.points;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoring_table() {
        assert_eq!(line_clear_points(0), 0);
        assert_eq!(line_clear_points(1), 100);
        assert_eq!(line_clear_points(2), 300);
        assert_eq!(line_clear_points(3), 500);
        assert_eq!(line_clear_points(4), 800);
        assert_eq!(line_clear_points(5), 0);
    }

    #[test]
    fn test_single_clear() {
        let mut score = Score::new(0);
        assert_eq!(score.add_clear(1), 100);
        assert_eq!(score.points, 100);
        assert_eq!(score.lines, 1);
    }

    #[test]
    fn test_clears_accumulate() {
        let mut score = Score::new(0);
        score.add_clear(4);
        score.add_clear(2);
        assert_eq!(score.points, 1100);
        assert_eq!(score.lines, 6);
    }

    #[test]
    fn test_high_score_only_rises() {
        let mut score = Score::new(500);
        score.add_clear(3);
        assert!(!score.update_high_score());
        assert_eq!(score.high_score, 500);
        score.add_clear(1);
        assert!(score.update_high_score());
        assert_eq!(score.high_score, 600);
    }

    #[test]
    fn test_clear_names() {
        assert_eq!(clear_name(4), Some("Tetris"));
        assert_eq!(clear_name(0), None);
    }
}
