use chrono::NaiveDate;
use thiserror::Error;

//caller-side contract violations
//routine data gaps never surface here, they are skipped bar by bar
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Bars out of order at index {index}: {previous} is followed by {current}")]
    Unordered {
        index: usize,
        previous: NaiveDate,
        current: NaiveDate,
    },
    #[error("Duplicate bar date {date} at index {index}")]
    DuplicateDate { index: usize, date: NaiveDate },
    #[error("Window size must be positive (got {name} = 0)")]
    ZeroWindow { name: &'static str },
}

//checks that dates strictly increase
pub fn validate_order(dates: impl IntoIterator<Item = NaiveDate>) -> Result<(), EngineError> {
    let mut previous: Option<NaiveDate> = None;

    for (index, current) in dates.into_iter().enumerate() {
        if let Some(previous) = previous {
            if current == previous {
                return Err(EngineError::DuplicateDate {
                    index,
                    date: current,
                });
            }
            if current < previous {
                return Err(EngineError::Unordered {
                    index,
                    previous,
                    current,
                });
            }
        }
        previous = Some(current);
    }

    Ok(())
}
