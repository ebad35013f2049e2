//! Commit log entry stored with every component version

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitLog {
    pub message: String,
    pub date: DateTime<Utc>,
}

impl CommitLog {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            date: Utc::now(),
        }
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }
}
