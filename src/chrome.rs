use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::view_state::ViewState;

/// Header text derived from the view state and the moment of rendering.
#[derive(Debug, Clone)]
pub struct ChromeDisplay<'a> {
    current_page_number: usize,
    total_page_count: usize,
    sender_name: &'a str,
    now: NaiveDateTime,
}

impl<'a> ChromeDisplay<'a> {
    pub fn new(state: &ViewState, sender_name: &'a str, now: NaiveDateTime) -> Self {
        Self {
            current_page_number: state.current_page_number,
            total_page_count: state.total_page_count,
            sender_name,
            now,
        }
    }

    pub fn page_counter(&self) -> String {
        format!(
            "PDF {} of {}",
            self.current_page_number, self.total_page_count
        )
    }

    pub fn sender_name(&self) -> &'a str {
        self.sender_name
    }

    pub fn date_label(&self) -> String {
        format!(
            "{}/{}/{}",
            self.now.day(),
            self.now.month(),
            self.now.year()
        )
    }

    pub fn meridiem(&self) -> &'static str {
        if self.now.hour() >= 12 { "PM" } else { "AM" }
    }

    pub fn sent_at_label(&self) -> String {
        let (_, hour12) = self.now.hour12();
        format!(
            " {} at {}:{:02} {}",
            self.date_label(),
            hour12,
            self.now.minute(),
            self.meridiem()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 7)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .unwrap()
    }

    #[test]
    fn page_counter_follows_state() {
        let state = ViewState {
            current_page_number: 4,
            total_page_count: 10,
            ..ViewState::default()
        };
        let chrome = ChromeDisplay::new(&state, "Sender", at(9, 0));
        assert_eq!(chrome.page_counter(), "PDF 4 of 10");
        assert_eq!(chrome.sender_name(), "Sender");
    }

    #[test]
    fn date_is_unpadded_day_month_year() {
        let chrome = ChromeDisplay::new(&ViewState::default(), "", at(9, 0));
        assert_eq!(chrome.date_label(), "7/3/2026");
    }

    #[test]
    fn meridiem_switches_at_noon() {
        let state = ViewState::default();
        assert_eq!(ChromeDisplay::new(&state, "", at(0, 0)).meridiem(), "AM");
        assert_eq!(ChromeDisplay::new(&state, "", at(11, 59)).meridiem(), "AM");
        assert_eq!(ChromeDisplay::new(&state, "", at(12, 0)).meridiem(), "PM");
        assert_eq!(ChromeDisplay::new(&state, "", at(23, 5)).meridiem(), "PM");
    }

    #[test]
    fn sent_at_uses_twelve_hour_clock() {
        let state = ViewState::default();
        assert_eq!(
            ChromeDisplay::new(&state, "", at(15, 7)).sent_at_label(),
            " 7/3/2026 at 3:07 PM"
        );
        assert_eq!(
            ChromeDisplay::new(&state, "", at(0, 30)).sent_at_label(),
            " 7/3/2026 at 12:30 AM"
        );
    }
}
