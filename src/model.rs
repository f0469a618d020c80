use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::feasibility::{DerivedFeatures, MatchState, BALLS_PER_INNINGS};

/// Env var pointing at an external model artifact. When unset the built-in
/// coefficient set is used.
pub const MODEL_PATH_ENV: &str = "T20_MODEL_PATH";

const PAR_TARGET: f64 = 160.0;
const PAR_WICKETS_IN_HAND: f64 = 5.0;

// Keep predictions off the hard 0/1 endpoints unless the chase is decided.
const P_FLOOR: f64 = 0.02;
const P_CEIL: f64 = 0.98;

/// One row of classifier input, assembled from the validated match situation.
#[derive(Debug, Clone)]
pub struct FeatureRecord<'a> {
    pub batting_team: &'a str,
    pub bowling_team: &'a str,
    pub city: &'a str,
    pub runs_left: i64,
    pub balls_left: i32,
    pub wickets_left: i32,
    pub target: u32,
    pub crr: f64,
    pub rrr: f64,
    pub match_stage: &'a str,
    pub home_advantage: bool,
}

impl<'a> FeatureRecord<'a> {
    pub fn new(state: &'a MatchState, feat: &DerivedFeatures) -> Self {
        Self {
            batting_team: &state.batting_team,
            bowling_team: &state.bowling_team,
            city: &state.city,
            runs_left: feat.runs_left,
            balls_left: feat.balls_left,
            wickets_left: feat.wickets_left,
            target: state.target,
            crr: feat.crr,
            rrr: feat.rrr,
            match_stage: state.match_stage.label(),
            home_advantage: state.home_advantage,
        }
    }
}

/// Pre-trained chase classifier: logistic regression on the logit scale.
///
/// Loaded once at startup and shared read-only for the life of the process.
/// Categories absent from the coefficient tables contribute nothing, so an
/// artifact trained on a subset of teams or cities still loads and runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WinModel {
    pub intercept: f64,
    /// Per-team strength offsets; added for the chasing side, subtracted
    /// for the defending side.
    pub team_strength: HashMap<String, f64>,
    /// Host-city lean toward the chasing side.
    pub city_bias: HashMap<String, f64>,
    /// Stage offsets keyed by the stage display label.
    pub stage_bias: HashMap<String, f64>,
    /// Weight on crr - rrr (scoring ahead of or behind the ask).
    pub w_rate_gap: f64,
    /// Weight on wickets in hand above par.
    pub w_wickets: f64,
    /// Weight on the fraction of the innings still to be bowled.
    pub w_balls: f64,
    /// Weight on target size above par (big chases are harder).
    pub w_target: f64,
    pub home_advantage_bonus: f64,
}

impl WinModel {
    /// Coefficients shipped with the binary.
    pub fn builtin() -> Self {
        let team_strength = [
            ("Chennai Super Kings", 0.10),
            ("Mumbai Indians", 0.12),
            ("Royal Challengers Bangalore", 0.02),
            ("Kolkata Knight Riders", 0.04),
            ("Sunrisers Hyderabad", 0.00),
            ("Kings XI Punjab", -0.04),
            ("Rajasthan Royals", -0.02),
            ("Delhi Capitals", 0.03),
        ]
        .into_iter()
        .map(|(team, w)| (team.to_string(), w))
        .collect();

        let stage_bias = [
            ("Powerplay (1-6)", -0.05),
            ("Middle Overs (7-15)", 0.00),
            ("Death Overs (16-20)", 0.05),
        ]
        .into_iter()
        .map(|(stage, w)| (stage.to_string(), w))
        .collect();

        Self {
            intercept: 0.0,
            team_strength,
            city_bias: HashMap::new(),
            stage_bias,
            w_rate_gap: 0.35,
            w_wickets: 0.22,
            w_balls: 0.15,
            w_target: -0.40,
            home_advantage_bonus: 0.12,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read model artifact {}", path.display()))?;
        let model = serde_json::from_str::<WinModel>(&raw)
            .with_context(|| format!("parse model artifact {}", path.display()))?;
        Ok(model)
    }

    /// Load from `T20_MODEL_PATH` when set, otherwise use the built-in
    /// coefficients. Returns the model with a description of its source.
    pub fn from_env() -> Result<(Self, String)> {
        match std::env::var(MODEL_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => {
                let model = Self::load(Path::new(&path))?;
                Ok((model, format!("artifact {path}")))
            }
            _ => Ok((Self::builtin(), "built-in coefficients".to_string())),
        }
    }

    /// Probability pair (loss, win) for the chasing side; always sums to 1.
    pub fn predict_proba(&self, rec: &FeatureRecord<'_>) -> (f64, f64) {
        // Decided chases need no model.
        if rec.runs_left == 0 {
            return (0.0, 1.0);
        }
        if rec.balls_left == 0 || rec.wickets_left == 0 {
            return (1.0, 0.0);
        }

        let z = self.intercept
            + lookup(&self.team_strength, rec.batting_team)
            - lookup(&self.team_strength, rec.bowling_team)
            + lookup(&self.city_bias, rec.city)
            + lookup(&self.stage_bias, rec.match_stage)
            + self.w_rate_gap * (rec.crr - rec.rrr)
            + self.w_wickets * (f64::from(rec.wickets_left) - PAR_WICKETS_IN_HAND)
            + self.w_balls * (f64::from(rec.balls_left) / f64::from(BALLS_PER_INNINGS))
            + self.w_target * ((f64::from(rec.target) - PAR_TARGET) / PAR_TARGET)
            + if rec.home_advantage {
                self.home_advantage_bonus
            } else {
                0.0
            };

        let win = logistic(z).clamp(P_FLOOR, P_CEIL);
        (1.0 - win, win)
    }
}

fn lookup(table: &HashMap<String, f64>, key: &str) -> f64 {
    table.get(key).copied().unwrap_or(0.0)
}

fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
