//! Message bodies for the new-booking notification.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use luxedrive_core::traits::{MailMessage, TextMessage};
use luxedrive_entity::booking::Booking;

pub const IN_APP_TITLE: &str = "New Booking Received";

const CELL: &str = "padding: 10px; border-bottom: 1px solid #ddd;";

fn stamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Escape text for interpolation into HTML.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    out
}

/// Body of the in-app notification.
pub fn in_app_message(booking: &Booking) -> String {
    format!(
        "New booking #{} from {}. Vehicle: {}, Dates: {} to {}. Total: ${}",
        booking.booking_reference,
        booking.driver_name,
        booking.vehicle_id,
        stamp(booking.pickup_date),
        stamp(booking.return_date),
        booking.total_price,
    )
}

/// Subject line of the admin email.
pub fn email_subject(booking: &Booking) -> String {
    format!("🚗 New Booking #{} - LuxeDrive", booking.booking_reference)
}

/// HTML body of the admin email.
pub fn email_body(booking: &Booking, admin_link: &str) -> String {
    let rows = [
        ("Booking Reference", booking.booking_reference.clone()),
        ("Customer", booking.driver_name.clone()),
        ("Email", booking.driver_email.clone()),
        ("Phone", booking.driver_phone.clone()),
        ("Vehicle ID", booking.vehicle_id.to_string()),
        ("Pickup Date", stamp(booking.pickup_date)),
        ("Return Date", stamp(booking.return_date)),
        ("Total Price", format!("${}", booking.total_price)),
        ("Payment Status", booking.payment_status.to_string()),
    ];

    let mut html = String::from(
        "<html>\n<body style=\"font-family: Arial, sans-serif; padding: 20px;\">\n\
         <h2 style=\"color: #333;\">New Booking Received!</h2>\n\
         <table style=\"border-collapse: collapse; width: 100%; max-width: 600px;\">\n",
    );
    for (label, value) in rows {
        // Writing to a String cannot fail.
        let _ = writeln!(
            html,
            "<tr><td style=\"{CELL}\"><strong>{label}:</strong></td><td style=\"{CELL}\">{}</td></tr>",
            escape_html(&value)
        );
    }
    let _ = write!(
        html,
        "</table>\n<p style=\"margin-top: 20px;\">\n\
         <a href=\"{}\" style=\"background-color: #007bff; color: white; padding: 10px 20px; \
         text-decoration: none; border-radius: 5px;\">View Booking in Admin Dashboard</a>\n\
         </p>\n</body>\n</html>\n",
        escape_html(admin_link)
    );
    html
}

/// Admin email for a new booking.
pub fn booking_email(booking: &Booking, to: &str, admin_link: &str) -> MailMessage {
    MailMessage {
        to: to.to_string(),
        subject: email_subject(booking),
        html_body: email_body(booking, admin_link),
    }
}

/// Short text message for a new booking.
pub fn booking_text(booking: &Booking, to: &str) -> TextMessage {
    TextMessage {
        to: to.to_string(),
        body: format!(
            "LuxeDrive: new booking #{} from {}. {} to {}. Total: ${}",
            booking.booking_reference,
            booking.driver_name,
            stamp(booking.pickup_date),
            stamp(booking.return_date),
            booking.total_price,
        ),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;
    use luxedrive_entity::booking::{BookingStatus, PaymentStatus};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    pub(crate) fn sample_booking(reference: &str) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            pickup_date: Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
            return_date: Utc.with_ymd_and_hms(2025, 3, 4, 9, 0, 0).unwrap(),
            pickup_location: "Beverly Hills".to_string(),
            return_location: "LAX".to_string(),
            driver_name: "Jane Doe".to_string(),
            driver_email: "jane@example.com".to_string(),
            driver_phone: "+15550100".to_string(),
            license_number: "D1234567".to_string(),
            enhancements: serde_json::json!([]),
            base_price: Decimal::new(300000, 2),
            enhancements_price: Decimal::new(0, 2),
            total_price: Decimal::new(300000, 2),
            payment_status: PaymentStatus::Pending,
            payment_method: "Manual at Pickup".to_string(),
            status: BookingStatus::Pending,
            booking_reference: reference.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_in_app_message_format() {
        let booking = sample_booking("LX-ABC123");
        let msg = in_app_message(&booking);
        assert!(msg.starts_with("New booking #LX-ABC123 from Jane Doe. Vehicle: "));
        assert!(msg.contains("Dates: 2025-03-01 09:00 UTC to 2025-03-04 09:00 UTC"));
        assert!(msg.ends_with("Total: $3000.00"));
    }

    #[test]
    fn test_email_contains_every_row_and_link() {
        let booking = sample_booking("LX-ABC123");
        let mail = booking_email(&booking, "admin@luxedrive.com", "http://app/#/admin/bookings");
        assert_eq!(mail.subject, "🚗 New Booking #LX-ABC123 - LuxeDrive");
        for label in [
            "Booking Reference",
            "Customer",
            "Email",
            "Phone",
            "Vehicle ID",
            "Pickup Date",
            "Return Date",
            "Total Price",
            "Payment Status",
        ] {
            assert!(mail.html_body.contains(&format!("<strong>{label}:</strong>")));
        }
        assert!(mail.html_body.contains("href=\"http://app/#/admin/bookings\""));
        assert!(mail.html_body.contains("$3000.00"));
        assert!(mail.html_body.contains("PENDING"));
    }

    #[test]
    fn test_customer_fields_are_escaped() {
        let mut booking = sample_booking("LX-ABC123");
        booking.driver_name = "<script>alert('x')</script>".to_string();
        let body = email_body(&booking, "http://app");
        assert!(!body.contains("<script>"));
        assert!(body.contains("&lt;script&gt;alert(&#x27;x&#x27;)&lt;/script&gt;"));
    }
}
