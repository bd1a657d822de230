use chrono::{DateTime, Local, NaiveDate, Utc};

/// Represents an entity responsible for providing dates across application. This can allow it to
/// be used for testing
pub trait Clock: Sync + Send + 'static {
    fn time(&self) -> DateTime<Utc>;

    /// Calendar day in the user's timezone. Weeks are anchored on this.
    fn today(&self) -> NaiveDate {
        self.time().with_timezone(&Local).date_naive()
    }
}

pub struct DefaultClock;

impl Clock for DefaultClock {
    fn time(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same moment.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub time: DateTime<Utc>,
    pub today: NaiveDate,
}

#[cfg(test)]
impl Clock for FixedClock {
    fn time(&self) -> DateTime<Utc> {
        self.time
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}
