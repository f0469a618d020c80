use crate::feasibility::{DerivedFeatures, MatchState};

/// Compact situation readout shown above the gauge.
pub fn match_summary(state: &MatchState, feat: &DerivedFeatures) -> String {
    format!(
        "Target: {} | Score: {}/{} in {} overs\nRuns Left: {} | Balls Left: {}\nCRR: {:.2} | RRR: {:.2}",
        state.target,
        state.score,
        state.wickets,
        format_overs(state.overs),
        feat.runs_left,
        feat.balls_left,
        feat.crr,
        feat.rrr,
    )
}

/// One-line commentary picked by comparing the ask to the scoring rate.
pub fn commentary(state: &MatchState, feat: &DerivedFeatures) -> String {
    if feat.rrr > feat.crr {
        format!(
            "Pressure on {}! They need {} in {} balls.",
            state.batting_team, feat.runs_left, feat.balls_left
        )
    } else {
        format!(
            "{} are cruising! Run chase looks comfortable.",
            state.batting_team
        )
    }
}

/// Gauge value: win probability as a whole percentage in [0, 100].
pub fn win_percent(win_prob: f64) -> u16 {
    (win_prob * 100.0).round().clamp(0.0, 100.0) as u16
}

/// Cricket notation: 75 balls bowled prints as "12.3".
pub fn format_overs(overs: f64) -> String {
    let balls = (overs * 6.0).round() as i64;
    format!("{}.{}", balls / 6, balls % 6)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feasibility::evaluate;
    use crate::options::MatchStage;

    fn state() -> MatchState {
        MatchState {
            batting_team: "Rajasthan Royals".to_string(),
            bowling_team: "Delhi Capitals".to_string(),
            city: "Jaipur".to_string(),
            target: 180,
            score: 100,
            overs: 10.0,
            wickets: 2,
            match_stage: MatchStage::MiddleOvers,
            home_advantage: false,
        }
    }

    #[test]
    fn summary_lists_rates_to_two_decimals() {
        let s = state();
        let feat = evaluate(&s).unwrap();
        let text = match_summary(&s, &feat);
        assert!(text.contains("Target: 180"));
        assert!(text.contains("Score: 100/2 in 10.0 overs"));
        assert!(text.contains("CRR: 10.00 | RRR: 8.00"));
    }

    #[test]
    fn commentary_flips_on_required_rate() {
        let mut s = state();
        let feat = evaluate(&s).unwrap();
        // crr 10.0 vs rrr 8.0: comfortable.
        assert!(commentary(&s, &feat).contains("cruising"));

        s.score = 60;
        let feat = evaluate(&s).unwrap();
        // crr 6.0 vs rrr 12.0: pressure, with the exact ask spelled out.
        let line = commentary(&s, &feat);
        assert!(line.contains("Pressure on Rajasthan Royals"));
        assert!(line.contains("120 in 60 balls"));
    }

    #[test]
    fn win_percent_rounds_and_clamps() {
        assert_eq!(win_percent(0.666), 67);
        assert_eq!(win_percent(0.0), 0);
        assert_eq!(win_percent(1.0), 100);
        assert_eq!(win_percent(1.2), 100);
    }

    #[test]
    fn overs_print_in_cricket_notation() {
        assert_eq!(format_overs(0.0), "0.0");
        assert_eq!(format_overs(12.5), "12.3");
        assert_eq!(format_overs(75.0 / 6.0), "12.3");
        assert_eq!(format_overs(20.0), "20.0");
    }
}
