use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

//trade direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Buy,
    Short,
}

impl Direction {
    //a trade wins when the next close moves the way we bet
    //an unchanged close is a loss for both directions
    pub fn outcome(&self, entry: f64, exit: f64) -> Outcome {
        let won = match self {
            Direction::Buy => exit > entry,
            Direction::Short => exit < entry,
        };
        if won {
            Outcome::Win
        } else {
            Outcome::Loss
        }
    }

    //signed move in percent, positive when favourable
    //zero when there is no entry price to measure against
    pub fn move_pct(&self, entry: f64, exit: f64) -> f64 {
        if entry == 0.0 {
            return 0.0;
        }
        let raw = (exit - entry) / entry * 100.0;
        match self {
            Direction::Buy => raw,
            Direction::Short => -raw,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Buy => f.write_str("BUY"),
            Direction::Short => f.write_str("SHORT"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    //equity increment
    pub fn delta(&self) -> i64 {
        match self {
            Outcome::Win => 1,
            Outcome::Loss => -1,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win => f.write_str("WIN"),
            Outcome::Loss => f.write_str("LOSS"),
        }
    }
}

//one simulated entry at close[i], exited at close[i + 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub entry_date: NaiveDate,
    pub instrument: String,
    pub direction: Direction,
    pub entry_price: f64,
    pub exit_price: f64,
    pub outcome: Outcome,
}

impl Trade {
    pub fn new(
        entry_date: NaiveDate,
        instrument: String,
        direction: Direction,
        entry_price: f64,
        exit_price: f64,
    ) -> Self {
        Trade {
            entry_date,
            instrument,
            direction,
            entry_price,
            exit_price,
            outcome: direction.outcome(entry_price, exit_price),
        }
    }

    pub fn is_win(&self) -> bool {
        self.outcome == Outcome::Win
    }

    pub fn move_pct(&self) -> f64 {
        self.direction.move_pct(self.entry_price, self.exit_price)
    }
}
