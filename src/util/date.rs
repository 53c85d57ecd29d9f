// Date strings in the pt-BR format used by note stamps and file names

use chrono::{NaiveDate, NaiveDateTime};

/// Prefix for saved note files
pub const NOTE_FILE_PREFIX: &str = "evolucao";

/// Date and time as shown in notes, e.g. "05/03/2025 14:07"
pub fn date_time_br(now: &NaiveDateTime) -> String {
    now.format("%d/%m/%Y %H:%M").to_string()
}

/// Text inserted by the date button
pub fn date_stamp(now: &NaiveDateTime) -> String {
    format!("{} - ", date_time_br(now))
}

/// File name for a saved note, e.g. "evolucao_2025-03-05.txt"
pub fn note_file_name(date: NaiveDate) -> String {
    format!("{}_{}.txt", NOTE_FILE_PREFIX, date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 5)
            .unwrap()
            .and_hms_opt(14, 7, 59)
            .unwrap()
    }

    #[test]
    fn test_date_time_br() {
        assert_eq!(date_time_br(&sample()), "05/03/2025 14:07");
    }

    #[test]
    fn test_date_stamp_has_trailing_separator() {
        assert_eq!(date_stamp(&sample()), "05/03/2025 14:07 - ");
    }

    #[test]
    fn test_note_file_name() {
        assert_eq!(note_file_name(sample().date()), "evolucao_2025-03-05.txt");
    }
}
