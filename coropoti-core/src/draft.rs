//! Client-side validation of event create/edit payloads.
//!
//! Everything here runs before any network call; the server re-validates,
//! but these checks keep obviously-bad submissions (inverted times, weekend
//! dates) from ever leaving the client.

use crate::datetime::{date_range_ymd, is_weekend, normalize_time, parse_hms, parse_ymd};
use crate::error::{CoropotiError, CoropotiResult};
use crate::event::EventType;

/// An event being created or edited, pre-submission.
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub title: String,
    pub event_type: EventType,
    pub date: String,
    /// Only meaningful on create; edits move a single day.
    pub end_date: Option<String>,
    pub start_time: String,
    pub end_time: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub attendee_ids: Vec<i64>,
}

impl EventDraft {
    /// Validate a creation draft: end date and the whole inclusive date
    /// range must be weekday dates, times must be ordered.
    pub fn validate_create(&self) -> CoropotiResult<()> {
        self.validate_common()?;

        let end_date = self
            .end_date
            .as_deref()
            .ok_or_else(|| CoropotiError::Validation("End date is required.".into()))?;
        let start = parse_ymd(&self.date)?;
        let end = parse_ymd(end_date)?;
        if end < start {
            return Err(CoropotiError::Validation(
                "End date must be the same as or after start date.".into(),
            ));
        }
        if date_range_ymd(&self.date, end_date)
            .iter()
            .any(|d| is_weekend(d))
        {
            return Err(CoropotiError::Validation(
                "Weekends are locked. Please use weekdays only in the selected date range.".into(),
            ));
        }
        Ok(())
    }

    /// Validate an edit draft. Moving onto a weekend is rejected, but an
    /// event already stored on its original date may keep it.
    pub fn validate_edit(&self, original_date: &str) -> CoropotiResult<()> {
        self.validate_common()?;
        if is_weekend(&self.date) && self.date != original_date {
            return Err(CoropotiError::Validation(
                "Weekends are locked. Please select a weekday.".into(),
            ));
        }
        Ok(())
    }

    fn validate_common(&self) -> CoropotiResult<()> {
        if self.title.trim().is_empty() {
            return Err(CoropotiError::Validation("Title is required.".into()));
        }
        if self.date.trim().is_empty() {
            return Err(CoropotiError::Validation("Date is required.".into()));
        }
        parse_ymd(&self.date)?;
        if self.start_time.trim().is_empty() || self.end_time.trim().is_empty() {
            return Err(CoropotiError::Validation(
                "Start and end time are required.".into(),
            ));
        }
        let start = parse_hms(&self.start_time)?;
        let end = parse_hms(&self.end_time)?;
        if end <= start {
            return Err(CoropotiError::Validation(
                "End time must be after start time.".into(),
            ));
        }
        Ok(())
    }

    /// Wire-ready times (`HH:MM:SS`).
    pub fn start_time_wire(&self) -> String {
        normalize_time(&self.start_time)
    }

    pub fn end_time_wire(&self) -> String {
        normalize_time(&self.end_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> EventDraft {
        EventDraft {
            title: "Budget hearing".into(),
            event_type: EventType::Meeting,
            date: "2025-06-09".into(),
            end_date: Some("2025-06-09".into()),
            start_time: "09:00".into(),
            end_time: "10:00".into(),
            location: None,
            description: None,
            color: None,
            attendee_ids: Vec::new(),
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert!(draft().validate_create().is_ok());
    }

    #[test]
    fn end_before_start_time_rejected() {
        let mut d = draft();
        d.start_time = "09:00".into();
        d.end_time = "08:00".into();
        let err = d.validate_create().unwrap_err();
        assert!(err.to_string().contains("End time must be after start time"));
    }

    #[test]
    fn equal_times_rejected() {
        let mut d = draft();
        d.end_time = "09:00".into();
        assert!(d.validate_create().is_err());
    }

    #[test]
    fn missing_title_rejected() {
        let mut d = draft();
        d.title = "  ".into();
        assert!(d.validate_create().is_err());
    }

    #[test]
    fn weekend_anywhere_in_create_range_rejected() {
        // 2025-06-13 is a Friday; 2025-06-16 a Monday. The range crosses
        // a weekend, so creation must fail.
        let mut d = draft();
        d.date = "2025-06-13".into();
        d.end_date = Some("2025-06-16".into());
        let err = d.validate_create().unwrap_err();
        assert!(err.to_string().contains("Weekends are locked"));
    }

    #[test]
    fn inverted_date_range_rejected() {
        let mut d = draft();
        d.date = "2025-06-11".into();
        d.end_date = Some("2025-06-09".into());
        assert!(d.validate_create().is_err());
    }

    #[test]
    fn edit_move_to_weekend_rejected() {
        let mut d = draft();
        d.date = "2025-06-14".into();
        assert!(d.validate_edit("2025-06-09").is_err());
    }

    #[test]
    fn edit_keeping_original_weekend_date_allowed() {
        // Legacy rows may already sit on a weekend; keeping the date is fine.
        let mut d = draft();
        d.date = "2025-06-14".into();
        assert!(d.validate_edit("2025-06-14").is_ok());
    }

    #[test]
    fn wire_times_are_normalized() {
        let d = draft();
        assert_eq!(d.start_time_wire(), "09:00:00");
        assert_eq!(d.end_time_wire(), "10:00:00");
    }
}
