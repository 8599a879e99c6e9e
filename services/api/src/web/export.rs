//! services/api/src/web/export.rs
//!
//! CSV export of the admin's currently filtered enquiry list.
//!
//! Every value is wrapped in double quotes. Embedded double quotes are NOT
//! escaped - the export has always behaved this way and downstream sheets
//! consume it as-is, so the behavior is preserved rather than silently
//! changed (see DESIGN.md).

use academy_core::domain::Enquiry;

const HEADER: &str = "\"Name\",\"Phone\",\"Email\",\"Age\",\"Course\",\"Experience\",\"Status\",\"Date\"";

/// Renders one CSV document: a header row plus one row per enquiry.
pub fn enquiries_csv(enquiries: &[Enquiry]) -> String {
    let mut lines = Vec::with_capacity(enquiries.len() + 1);
    lines.push(HEADER.to_string());
    for enquiry in enquiries {
        lines.push(format!(
            "\"{}\",\"{}\",\"{}\",\"{}\",\"{}\",\"{}\",\"{}\",\"{}\"",
            enquiry.name,
            enquiry.phone,
            enquiry.email,
            enquiry.age,
            enquiry.course,
            enquiry.experience_level,
            enquiry.status.as_str(),
            enquiry.timestamp.format("%d/%m/%Y"),
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use academy_core::domain::EnquiryStatus;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn enquiry(name: &str) -> Enquiry {
        Enquiry {
            id: Uuid::new_v4(),
            name: name.to_string(),
            phone: "9030200263".to_string(),
            email: "someone@example.in".to_string(),
            age: "15".to_string(),
            gender: "female".to_string(),
            location: "Hyderabad".to_string(),
            course: "Bharatanatyam".to_string(),
            experience_level: "beginner".to_string(),
            batch_preference: vec![],
            message: "hello".to_string(),
            heard_from: "friend".to_string(),
            enquiry_for: "self".to_string(),
            status: EnquiryStatus::New,
            notes: None,
            timestamp: Utc.with_ymd_and_hms(2026, 3, 14, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn header_plus_one_row_per_enquiry() {
        let list = vec![
            enquiry("Meera, Hyderabad"),
            enquiry("Srinivas"),
            enquiry("Ananya"),
        ];

        let csv = enquiries_csv(&list);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("\"Name\""));
    }

    #[test]
    fn every_value_is_quote_wrapped_so_commas_stay_inside_fields() {
        let csv = enquiries_csv(&[enquiry("Meera, Hyderabad")]);
        let row = csv.lines().nth(1).unwrap();
        assert!(row.starts_with("\"Meera, Hyderabad\","));
        // Quote-wrapping means splitting on `","` yields exactly 8 columns.
        assert_eq!(row.matches("\",\"").count(), 7);
    }

    #[test]
    fn dates_are_rendered_day_month_year() {
        let csv = enquiries_csv(&[enquiry("Meera")]);
        assert!(csv.ends_with("\"14/03/2026\""));
    }

    #[test]
    fn embedded_double_quotes_are_left_unescaped() {
        // Long-standing behavior, kept on purpose.
        let csv = enquiries_csv(&[enquiry("Meera \"Mee\" R")]);
        assert!(csv.contains("\"Meera \"Mee\" R\""));
    }
}
