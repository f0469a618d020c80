use thiserror::Error;

use crate::options::MatchStage;

pub const BALLS_PER_INNINGS: i32 = 120;
pub const MAX_WICKETS: i32 = 10;

/// Raw second-innings match situation as collected from the form.
///
/// Built fresh per submission; nothing here outlives the evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchState {
    pub batting_team: String,
    pub bowling_team: String,
    pub city: String,
    pub target: u32,
    pub score: u32,
    /// Overs completed, 0.0 to 20.0 in steps of one legal delivery (1/6).
    pub overs: f64,
    /// Signed so an out-of-range count can reach the range check instead of
    /// being silently clamped at the boundary.
    pub wickets: i32,
    pub match_stage: MatchStage,
    pub home_advantage: bool,
}

/// Feasibility-checked feature vector ready for the classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedFeatures {
    pub runs_left: i64,
    pub balls_left: i32,
    pub wickets_left: i32,
    /// Current run rate; 0 when no over has been bowled yet.
    pub crr: f64,
    /// Required run rate; 0 when no balls remain.
    pub rrr: f64,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("batting team and bowling team cannot be the same")]
    IdenticalTeams,
    #[error("score already exceeds target")]
    ScoreExceedsTarget,
    #[error("invalid wicket count")]
    InvalidWickets,
    #[error("overs exceed maximum of 20")]
    OversExceedMaximum,
    #[error("impossible scenario: cannot score {runs_left} runs in {balls_left} balls")]
    ChaseOutOfReach { runs_left: i64, balls_left: i32 },
    #[error("impossible scenario: cannot lose {wickets_left} wickets in remaining balls")]
    WicketsOutOfReach { wickets_left: i32 },
}

impl EvalError {
    /// Identical teams is a static form mistake rather than an impossible
    /// match situation; callers render the two differently.
    pub fn is_configuration(&self) -> bool {
        matches!(self, EvalError::IdenticalTeams)
    }
}

/// Non-blocking input condition. The submission may still proceed.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum InputWarning {
    #[error("no overs bowled yet; run rates default to 0")]
    ZeroOvers,
}

/// Derive the feature vector for a match situation, rejecting anything
/// physically impossible.
///
/// Checks run in a fixed order and the first failure wins: identical teams,
/// score past the target, wicket count out of range, overs past 20, a chase
/// the remaining balls cannot contain, and finally more wickets to lose than
/// remain standing.
pub fn evaluate(state: &MatchState) -> Result<DerivedFeatures, EvalError> {
    if state.batting_team == state.bowling_team {
        return Err(EvalError::IdenticalTeams);
    }

    let balls_left = BALLS_PER_INNINGS - (state.overs * 6.0).floor() as i32;
    let runs_left = i64::from(state.target) - i64::from(state.score);
    let wickets_left = MAX_WICKETS - state.wickets;

    if runs_left < 0 {
        return Err(EvalError::ScoreExceedsTarget);
    }
    if state.wickets < 0 || state.wickets > MAX_WICKETS {
        return Err(EvalError::InvalidWickets);
    }
    if balls_left < 0 {
        return Err(EvalError::OversExceedMaximum);
    }

    let max_possible_runs = i64::from(balls_left) * 6;
    if runs_left > max_possible_runs {
        return Err(EvalError::ChaseOutOfReach {
            runs_left,
            balls_left,
        });
    }

    // Cannot fire once the wicket range check has passed; kept as an
    // explicit guard alongside the runs check.
    let max_possible_wickets = wickets_left;
    if wickets_left > max_possible_wickets {
        return Err(EvalError::WicketsOutOfReach { wickets_left });
    }

    let crr = if state.overs > 0.0 {
        f64::from(state.score) / state.overs
    } else {
        0.0
    };
    let rrr = if balls_left > 0 {
        runs_left as f64 * 6.0 / f64::from(balls_left)
    } else {
        0.0
    };

    Ok(DerivedFeatures {
        runs_left,
        balls_left,
        wickets_left,
        crr,
        rrr,
    })
}

/// Soft conditions worth surfacing without blocking the prediction.
pub fn warning(state: &MatchState) -> Option<InputWarning> {
    if state.overs == 0.0 {
        Some(InputWarning::ZeroOvers)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_state() -> MatchState {
        MatchState {
            batting_team: "Chennai Super Kings".to_string(),
            bowling_team: "Mumbai Indians".to_string(),
            city: "Chennai".to_string(),
            target: 180,
            score: 100,
            overs: 10.0,
            wickets: 2,
            match_stage: MatchStage::MiddleOvers,
            home_advantage: true,
        }
    }

    #[test]
    fn mid_chase_derivation() {
        let feat = evaluate(&base_state()).unwrap();
        assert_eq!(feat.runs_left, 80);
        assert_eq!(feat.balls_left, 60);
        assert_eq!(feat.wickets_left, 8);
        assert!((feat.crr - 10.0).abs() < 1e-9);
        assert!((feat.rrr - 8.0).abs() < 1e-9);
    }

    #[test]
    fn derived_sums_reconcile_with_inputs() {
        for (target, score, overs, wickets) in [
            (120u32, 30u32, 4.5, 1),
            (200, 199, 19.5, 9),
            (150, 0, 0.0, 0),
            (1, 1, 10.0, 10),
        ] {
            let mut state = base_state();
            state.target = target;
            state.score = score;
            state.overs = overs;
            state.wickets = wickets;
            let feat = evaluate(&state).unwrap();
            assert_eq!(feat.runs_left + i64::from(score), i64::from(target));
            assert_eq!(feat.wickets_left + wickets, MAX_WICKETS);
            assert_eq!(feat.balls_left, 120 - (overs * 6.0).floor() as i32);
            assert!((0..=120).contains(&feat.balls_left));
            assert!((0..=10).contains(&feat.wickets_left));
        }
    }

    #[test]
    fn score_past_target_is_rejected() {
        let mut state = base_state();
        state.target = 50;
        state.score = 60;
        state.overs = 5.0;
        state.wickets = 0;
        assert_eq!(evaluate(&state), Err(EvalError::ScoreExceedsTarget));
    }

    #[test]
    fn overs_past_twenty_are_rejected() {
        let mut state = base_state();
        state.overs = 21.0;
        assert_eq!(evaluate(&state), Err(EvalError::OversExceedMaximum));
    }

    #[test]
    fn wicket_count_out_of_range_is_rejected() {
        let mut state = base_state();
        state.wickets = 11;
        assert_eq!(evaluate(&state), Err(EvalError::InvalidWickets));
        state.wickets = -1;
        assert_eq!(evaluate(&state), Err(EvalError::InvalidWickets));
    }

    #[test]
    fn identical_teams_rejected_before_numeric_checks() {
        let mut state = base_state();
        state.bowling_team = state.batting_team.clone();
        // Numbers are nonsense on purpose; the team check must win.
        state.target = 50;
        state.score = 60;
        state.overs = 21.0;
        let err = evaluate(&state).unwrap_err();
        assert_eq!(err, EvalError::IdenticalTeams);
        assert!(err.is_configuration());
    }

    #[test]
    fn chase_beyond_remaining_balls_is_rejected() {
        let mut state = base_state();
        state.target = 10;
        state.score = 0;
        state.overs = 19.9;
        state.wickets = 0;
        assert_eq!(
            evaluate(&state),
            Err(EvalError::ChaseOutOfReach {
                runs_left: 10,
                balls_left: 1,
            })
        );
    }

    #[test]
    fn error_precedence_score_check_beats_overs_check() {
        let mut state = base_state();
        state.target = 50;
        state.score = 60;
        state.overs = 21.0;
        assert_eq!(evaluate(&state), Err(EvalError::ScoreExceedsTarget));
    }

    #[test]
    fn zero_overs_warns_but_still_evaluates() {
        let mut state = base_state();
        state.overs = 0.0;
        state.score = 0;
        state.wickets = 0;
        assert_eq!(warning(&state), Some(InputWarning::ZeroOvers));
        let feat = evaluate(&state).unwrap();
        assert_eq!(feat.crr, 0.0);
        assert!(feat.rrr > 0.0);
    }

    #[test]
    fn finished_innings_has_zero_rrr() {
        let mut state = base_state();
        state.target = 150;
        state.score = 150;
        state.overs = 20.0;
        state.wickets = 6;
        let feat = evaluate(&state).unwrap();
        assert_eq!(feat.balls_left, 0);
        assert_eq!(feat.rrr, 0.0);
    }
}
