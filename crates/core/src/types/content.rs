//! Announcement, house rule and FAQ entities.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::id::{AnnouncementId, FaqId, RuleId};

/// A kost-wide announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: AnnouncementId,
    pub title: String,
    pub body: String,
    /// The date from which the announcement applies.
    pub effective_date: NaiveDate,
}

impl Announcement {
    /// Whether the announcement is in effect on the given day.
    #[must_use]
    pub fn is_active(&self, today: NaiveDate) -> bool {
        self.effective_date <= today
    }
}

/// A house rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub id: RuleId,
    pub title: String,
    pub description: String,
}

/// A frequently asked question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub id: FaqId,
    pub question: String,
    pub answer: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn announcement_active_from_its_effective_date() {
        let announcement = Announcement {
            id: AnnouncementId::new(1),
            title: "Pemadaman air".to_owned(),
            body: "Perbaikan pompa hari Sabtu".to_owned(),
            effective_date: date(2026, 8, 1),
        };
        assert!(!announcement.is_active(date(2026, 7, 31)));
        assert!(announcement.is_active(date(2026, 8, 1)));
        assert!(announcement.is_active(date(2026, 8, 15)));
    }
}
