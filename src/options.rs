use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Franchises the classifier was trained on. Fixed set; the form never
/// accepts free-text team names.
pub const TEAMS: [&str; 8] = [
    "Sunrisers Hyderabad",
    "Mumbai Indians",
    "Royal Challengers Bangalore",
    "Kolkata Knight Riders",
    "Kings XI Punjab",
    "Chennai Super Kings",
    "Rajasthan Royals",
    "Delhi Capitals",
];

/// Host cities seen in the training data.
pub const CITIES: [&str; 29] = [
    "Hyderabad",
    "Bangalore",
    "Mumbai",
    "Indore",
    "Kolkata",
    "Delhi",
    "Chandigarh",
    "Jaipur",
    "Chennai",
    "Cape Town",
    "Port Elizabeth",
    "Durban",
    "Centurion",
    "East London",
    "Johannesburg",
    "Kimberley",
    "Bloemfontein",
    "Ahmedabad",
    "Cuttack",
    "Nagpur",
    "Dharamsala",
    "Visakhapatnam",
    "Pune",
    "Raipur",
    "Ranchi",
    "Abu Dhabi",
    "Sharjah",
    "Mohali",
    "Bengaluru",
];

pub static SORTED_TEAMS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    let mut teams = TEAMS.to_vec();
    teams.sort_unstable();
    teams
});

pub static SORTED_CITIES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    let mut cities = CITIES.to_vec();
    cities.sort_unstable();
    cities
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStage {
    Powerplay,
    MiddleOvers,
    DeathOvers,
}

impl MatchStage {
    pub const ALL: [MatchStage; 3] = [
        MatchStage::Powerplay,
        MatchStage::MiddleOvers,
        MatchStage::DeathOvers,
    ];

    /// Display label, identical to the category the model was trained with.
    pub fn label(self) -> &'static str {
        match self {
            MatchStage::Powerplay => "Powerplay (1-6)",
            MatchStage::MiddleOvers => "Middle Overs (7-15)",
            MatchStage::DeathOvers => "Death Overs (16-20)",
        }
    }

    pub fn next(self) -> Self {
        match self {
            MatchStage::Powerplay => MatchStage::MiddleOvers,
            MatchStage::MiddleOvers => MatchStage::DeathOvers,
            MatchStage::DeathOvers => MatchStage::Powerplay,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            MatchStage::Powerplay => MatchStage::DeathOvers,
            MatchStage::MiddleOvers => MatchStage::Powerplay,
            MatchStage::DeathOvers => MatchStage::MiddleOvers,
        }
    }
}

pub fn home_adv_label(home_advantage: bool) -> &'static str {
    if home_advantage { "Yes" } else { "No" }
}
