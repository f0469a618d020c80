use std::collections::VecDeque;

use crate::feasibility::{self, DerivedFeatures, EvalError, InputWarning, MatchState};
use crate::model::{FeatureRecord, WinModel};
use crate::options::{MatchStage, SORTED_CITIES, SORTED_TEAMS};
use crate::report;

const LOG_CAPACITY: usize = 50;
const MAX_RUNS_INPUT: u32 = 999;
const MAX_BALLS_INPUT: u32 = 126;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Form,
    Verdict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    BattingTeam,
    BowlingTeam,
    City,
    MatchStage,
    HomeAdvantage,
    Target,
    Score,
    Overs,
    Wickets,
}

impl FormField {
    pub const ALL: [FormField; 9] = [
        FormField::BattingTeam,
        FormField::BowlingTeam,
        FormField::City,
        FormField::MatchStage,
        FormField::HomeAdvantage,
        FormField::Target,
        FormField::Score,
        FormField::Overs,
        FormField::Wickets,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::BattingTeam => "Batting team",
            FormField::BowlingTeam => "Bowling team",
            FormField::City => "Host city",
            FormField::MatchStage => "Match stage",
            FormField::HomeAdvantage => "Home advantage",
            FormField::Target => "Target",
            FormField::Score => "Score",
            FormField::Overs => "Overs completed",
            FormField::Wickets => "Wickets out",
        }
    }
}

/// Form contents. Select fields are indices into the sorted option lists;
/// overs are kept as balls bowled so stepping can only move in legal 1/6
/// increments. Digit entry can still push balls past 120, which the
/// evaluator then rejects as over the 20-over maximum.
#[derive(Debug, Clone)]
pub struct FormState {
    pub batting_idx: usize,
    pub bowling_idx: usize,
    pub city_idx: usize,
    pub stage: MatchStage,
    pub home_advantage: bool,
    pub target: u32,
    pub score: u32,
    pub balls_bowled: u32,
    pub wickets: i32,
}

impl FormState {
    fn new() -> Self {
        Self {
            batting_idx: 0,
            bowling_idx: 1,
            city_idx: 0,
            stage: MatchStage::Powerplay,
            home_advantage: false,
            target: 0,
            score: 0,
            balls_bowled: 0,
            wickets: 0,
        }
    }

    pub fn overs(&self) -> f64 {
        f64::from(self.balls_bowled) / 6.0
    }

    /// Typed request struct handed to the evaluator at the submission
    /// boundary.
    pub fn to_match_state(&self) -> MatchState {
        MatchState {
            batting_team: SORTED_TEAMS[self.batting_idx].to_string(),
            bowling_team: SORTED_TEAMS[self.bowling_idx].to_string(),
            city: SORTED_CITIES[self.city_idx].to_string(),
            target: self.target,
            score: self.score,
            overs: self.overs(),
            wickets: self.wickets,
            match_stage: self.stage,
            home_advantage: self.home_advantage,
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the verdict screen needs, frozen at submission time.
#[derive(Debug, Clone)]
pub struct Verdict {
    pub batting_team: String,
    pub bowling_team: String,
    pub features: DerivedFeatures,
    pub win_prob: f64,
    pub loss_prob: f64,
    pub summary: String,
    pub commentary: String,
}

pub struct AppState {
    pub screen: Screen,
    pub form: FormState,
    pub focus: usize,
    /// Live evaluation of the current form contents, refreshed on every
    /// edit so the UI flags impossible scenarios as they are typed.
    pub eval: Result<DerivedFeatures, EvalError>,
    pub warning: Option<InputWarning>,
    pub verdict: Option<Verdict>,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl AppState {
    pub fn new() -> Self {
        let form = FormState::new();
        let request = form.to_match_state();
        let eval = feasibility::evaluate(&request);
        let warning = feasibility::warning(&request);
        Self {
            screen: Screen::Form,
            form,
            focus: 0,
            eval,
            warning,
            verdict: None,
            logs: VecDeque::new(),
            help_overlay: false,
        }
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        if self.logs.len() >= LOG_CAPACITY {
            self.logs.pop_front();
        }
        self.logs.push_back(line.into());
    }

    pub fn focused_field(&self) -> FormField {
        FormField::ALL[self.focus]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % FormField::ALL.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + FormField::ALL.len() - 1) % FormField::ALL.len();
    }

    /// Left/right on the focused field: selects cycle, numerics step.
    pub fn adjust(&mut self, delta: i64) {
        let field = self.focused_field();
        let form = &mut self.form;
        match field {
            FormField::BattingTeam => {
                form.batting_idx = cycle(form.batting_idx, SORTED_TEAMS.len(), delta);
            }
            FormField::BowlingTeam => {
                form.bowling_idx = cycle(form.bowling_idx, SORTED_TEAMS.len(), delta);
            }
            FormField::City => {
                form.city_idx = cycle(form.city_idx, SORTED_CITIES.len(), delta);
            }
            FormField::MatchStage => {
                form.stage = if delta >= 0 {
                    form.stage.next()
                } else {
                    form.stage.prev()
                };
            }
            FormField::HomeAdvantage => form.home_advantage = !form.home_advantage,
            FormField::Target => form.target = step_u32(form.target, delta, MAX_RUNS_INPUT),
            FormField::Score => form.score = step_u32(form.score, delta, MAX_RUNS_INPUT),
            FormField::Overs => {
                form.balls_bowled = step_u32(form.balls_bowled, delta, MAX_BALLS_INPUT);
            }
            FormField::Wickets => {
                form.wickets = (i64::from(form.wickets) + delta).clamp(0, 10) as i32;
            }
        }
        self.revalidate();
    }

    /// Digit entry appends to the focused numeric field.
    pub fn input_digit(&mut self, digit: u32) {
        let field = self.focused_field();
        let form = &mut self.form;
        match field {
            FormField::Target => form.target = append_digit(form.target, digit, MAX_RUNS_INPUT),
            FormField::Score => form.score = append_digit(form.score, digit, MAX_RUNS_INPUT),
            FormField::Overs => {
                form.balls_bowled = append_digit(form.balls_bowled, digit, MAX_BALLS_INPUT);
            }
            FormField::Wickets => {
                let next = append_digit(form.wickets.max(0) as u32, digit, 10);
                form.wickets = next as i32;
            }
            _ => return,
        }
        self.revalidate();
    }

    pub fn backspace(&mut self) {
        let field = self.focused_field();
        let form = &mut self.form;
        match field {
            FormField::Target => form.target /= 10,
            FormField::Score => form.score /= 10,
            FormField::Overs => form.balls_bowled /= 10,
            FormField::Wickets => form.wickets /= 10,
            _ => return,
        }
        self.revalidate();
    }

    pub fn revalidate(&mut self) {
        let request = self.form.to_match_state();
        self.eval = feasibility::evaluate(&request);
        self.warning = feasibility::warning(&request);
    }

    pub fn can_submit(&self) -> bool {
        self.eval.is_ok()
    }

    /// Run the chase through the classifier and move to the verdict screen.
    /// Rejections stay on the form with the reason in the console.
    pub fn submit(&mut self, model: &WinModel) {
        let request = self.form.to_match_state();
        let feat = match feasibility::evaluate(&request) {
            Ok(feat) => feat,
            Err(err) => {
                self.push_log(format!("[WARN] {err}"));
                self.eval = Err(err);
                return;
            }
        };
        if let Some(warn) = feasibility::warning(&request) {
            self.push_log(format!("[INFO] {warn}"));
        }

        let record = FeatureRecord::new(&request, &feat);
        let (loss_prob, win_prob) = model.predict_proba(&record);

        self.verdict = Some(Verdict {
            batting_team: request.batting_team.clone(),
            bowling_team: request.bowling_team.clone(),
            features: feat,
            win_prob,
            loss_prob,
            summary: report::match_summary(&request, &feat),
            commentary: report::commentary(&request, &feat),
        });
        self.screen = Screen::Verdict;
        self.push_log(format!(
            "[INFO] {} win probability {}%",
            request.batting_team,
            report::win_percent(win_prob)
        ));
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

fn cycle(idx: usize, len: usize, delta: i64) -> usize {
    let len = len as i64;
    (idx as i64 + delta).rem_euclid(len) as usize
}

fn step_u32(value: u32, delta: i64, max: u32) -> u32 {
    (i64::from(value) + delta).clamp(0, i64::from(max)) as u32
}

fn append_digit(value: u32, digit: u32, max: u32) -> u32 {
    let next = value.saturating_mul(10).saturating_add(digit.min(9));
    next.min(max)
}
