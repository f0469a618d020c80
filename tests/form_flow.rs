use t20_terminal::feasibility::EvalError;
use t20_terminal::model::WinModel;
use t20_terminal::options::SORTED_TEAMS;
use t20_terminal::state::{AppState, Screen};

fn set_numeric(state: &mut AppState, field_idx: usize, value: &str) {
    state.focus = field_idx;
    for c in value.chars() {
        state.input_digit(c.to_digit(10).unwrap());
    }
}

#[test]
fn submitting_a_feasible_chase_reaches_the_verdict_screen() {
    let mut state = AppState::new();
    let model = WinModel::builtin();

    set_numeric(&mut state, 5, "180"); // target
    set_numeric(&mut state, 6, "100"); // score
    set_numeric(&mut state, 7, "60"); // balls bowled = 10 overs
    set_numeric(&mut state, 8, "2"); // wickets

    assert!(state.can_submit());
    state.submit(&model);

    assert_eq!(state.screen, Screen::Verdict);
    let verdict = state.verdict.expect("submission should produce a verdict");
    assert_eq!(verdict.features.runs_left, 80);
    assert_eq!(verdict.features.balls_left, 60);
    assert!(verdict.summary.contains("Target: 180"));
    assert!((verdict.win_prob + verdict.loss_prob - 1.0).abs() < 1e-12);
    assert!(state
        .logs
        .iter()
        .any(|line| line.contains("win probability")));
}

#[test]
fn infeasible_form_stays_on_the_form_with_a_console_warning() {
    let mut state = AppState::new();
    let model = WinModel::builtin();

    set_numeric(&mut state, 5, "50"); // target
    set_numeric(&mut state, 6, "60"); // score past the target

    assert!(!state.can_submit());
    state.submit(&model);

    assert_eq!(state.screen, Screen::Form);
    assert!(state.verdict.is_none());
    assert_eq!(state.eval, Err(EvalError::ScoreExceedsTarget));
    assert!(state
        .logs
        .iter()
        .any(|line| line.contains("score already exceeds target")));
}

#[test]
fn matching_teams_flag_a_configuration_error() {
    let mut state = AppState::new();

    // Walk the bowling select until it matches the batting side.
    state.focus = 1;
    while state.form.bowling_idx != state.form.batting_idx {
        state.adjust(1);
    }

    assert_eq!(state.eval, Err(EvalError::IdenticalTeams));
    assert!(state.eval.as_ref().unwrap_err().is_configuration());
    assert_eq!(
        SORTED_TEAMS[state.form.bowling_idx],
        SORTED_TEAMS[state.form.batting_idx]
    );
}

#[test]
fn zero_over_submission_is_permitted_and_noted() {
    let mut state = AppState::new();
    let model = WinModel::builtin();

    set_numeric(&mut state, 5, "160"); // target, nothing bowled yet

    assert!(state.can_submit());
    state.submit(&model);

    assert_eq!(state.screen, Screen::Verdict);
    assert!(state
        .logs
        .iter()
        .any(|line| line.contains("no overs bowled yet")));
}
