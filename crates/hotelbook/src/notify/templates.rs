use chrono::{DateTime, NaiveDate, Utc};

use super::payload::{BookingPayload, ContactPayload};

/// Subject and HTML body ready to hand to a [`Mailer`](super::Mailer).
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
}

pub fn contact_admin_email(contact: &ContactPayload, year: i32) -> RenderedEmail {
    let name = escape_html(&contact.name);
    let email = escape_html(&contact.email);
    let subject = escape_html(&contact.subject);
    let message = escape_html(&contact.message);
    let reply_subject = format!("Re: {}", contact.subject);
    let reply_subject = urlencoding::encode(&reply_subject);

    let body = format!(
        r#"<tr><td style="background:#5a67d8;padding:28px;text-align:center;">
  <h1 style="color:#ffffff;margin:0;font-size:26px;">New Contact Message</h1>
</td></tr>
<tr><td style="padding:32px 28px;">
  <table width="100%" cellpadding="8" cellspacing="0" style="background:#f7f8fa;border-radius:8px;">
    <tr><td style="color:#666;width:100px;"><strong>From:</strong></td><td>{name}</td></tr>
    <tr><td style="color:#666;"><strong>Email:</strong></td><td><a href="mailto:{email}">{email}</a></td></tr>
    <tr><td style="color:#666;"><strong>Subject:</strong></td><td>{subject}</td></tr>
  </table>
  <div style="margin-top:24px;padding:18px;border:1px solid #e5e7eb;border-radius:8px;">
    <h3 style="margin:0 0 12px 0;color:#5a67d8;font-size:16px;">Message</h3>
    <p style="margin:0;color:#444;line-height:1.6;white-space:pre-wrap;">{message}</p>
  </div>
  <p style="margin-top:28px;text-align:center;">
    <a href="mailto:{email}?subject={reply_subject}" style="display:inline-block;padding:12px 28px;background:#5a67d8;color:#ffffff;text-decoration:none;border-radius:24px;">Reply to {name}</a>
  </p>
</td></tr>"#
    );

    RenderedEmail {
        subject: format!("[HotelBook Contact] {}", contact.subject),
        html: layout(
            &body,
            &format!(
                "This email was sent from the HotelBook contact form<br>{}",
                copyright(year)
            ),
        ),
    }
}

pub fn booking_admin_email(booking: &BookingPayload, year: i32) -> RenderedEmail {
    let hotel = escape_html(&booking.hotel_name);
    let room = escape_html(&booking.room_type);
    let guest = escape_html(&booking.user_name);
    let email = escape_html(&booking.user_email);
    let contact_subject = format!("Your booking at {} - Confirmation", booking.hotel_name);
    let contact_subject = urlencoding::encode(&contact_subject);

    let body = format!(
        r#"<tr><td style="background:#17a589;padding:28px;text-align:center;">
  <h1 style="color:#ffffff;margin:0;font-size:26px;">New Booking Received!</h1>
</td></tr>
{reference}
<tr><td style="padding:28px;">
  <div style="background:#5a67d8;padding:20px;border-radius:12px;margin-bottom:24px;">
    <h2 style="color:#ffffff;margin:0;font-size:22px;">{hotel}</h2>
    <p style="color:#e0e4ff;margin:8px 0 0 0;">{room}</p>
  </div>
  <h3 style="margin:0 0 12px 0;font-size:16px;">Guest Information</h3>
  <table width="100%" cellpadding="8" cellspacing="0" style="background:#f7f8fa;border-radius:8px;margin-bottom:20px;">
    <tr><td style="color:#666;width:120px;">Name:</td><td>{guest}</td></tr>
    <tr><td style="color:#666;">Email:</td><td><a href="mailto:{email}">{email}</a></td></tr>
    <tr><td style="color:#666;">Guests:</td><td>{guests} person(s)</td></tr>
  </table>
  {stay}
  {total}
  <p style="margin-top:28px;text-align:center;">
    <a href="mailto:{email}?subject={contact_subject}" style="display:inline-block;padding:12px 28px;background:#17a589;color:#ffffff;text-decoration:none;border-radius:24px;">Contact Guest</a>
  </p>
</td></tr>"#,
        reference = reference_banner("Booking Reference", &booking.booking_id),
        guests = booking.guests,
        stay = stay_table(booking),
        total = total_banner(booking.total_price),
    );

    RenderedEmail {
        subject: format!("[HotelBook] New Booking - {}", booking.hotel_name),
        html: layout(
            &body,
            &format!(
                "This is an automated notification from HotelBook<br>{}",
                copyright(year)
            ),
        ),
    }
}

/// Guest-facing confirmation. `help_email` is printed in the footer as the support address.
pub fn guest_confirmation_email(
    booking: &BookingPayload,
    help_email: &str,
    year: i32,
) -> RenderedEmail {
    let hotel = escape_html(&booking.hotel_name);
    let room = escape_html(&booking.room_type);
    let guest = escape_html(&booking.user_name);
    let help = escape_html(help_email);

    let body = format!(
        r#"<tr><td style="background:#5a67d8;padding:36px;text-align:center;">
  <h1 style="color:#ffffff;margin:0;font-size:26px;">Booking Confirmed!</h1>
  <p style="color:#e0e4ff;margin:8px 0 0 0;">Thank you for choosing HotelBook</p>
</td></tr>
{reference}
<tr><td style="padding:28px;">
  <p style="font-size:16px;line-height:1.6;">Dear <strong>{guest}</strong>,<br><br>
  Your reservation has been successfully confirmed. Here are your booking details:</p>
  <div style="background:#5a67d8;padding:22px;border-radius:12px;margin:24px 0;">
    <h2 style="color:#ffffff;margin:0 0 8px 0;font-size:22px;">{hotel}</h2>
    <p style="color:#e0e4ff;margin:0;">{room}</p>
  </div>
  {stay}
  <table width="100%" cellpadding="10" cellspacing="0" style="background:#f7f8fa;border-radius:8px;">
    <tr><td style="color:#666;">Number of Guests</td><td style="text-align:right;">{guests}</td></tr>
    <tr><td style="color:#666;">Room Type</td><td style="text-align:right;">{room}</td></tr>
    <tr><td style="font-weight:bold;font-size:18px;">Total</td><td style="text-align:right;font-weight:bold;font-size:22px;color:#2e9d4f;">{total}</td></tr>
  </table>
  <div style="margin-top:24px;padding:18px;background:#fff8e1;border-left:4px solid #f0b400;">
    <h4 style="margin:0 0 8px 0;color:#c77700;">Important Information</h4>
    <ul style="margin:0;padding-left:20px;color:#666;line-height:1.8;">
      <li>Check-in time: 3:00 PM</li>
      <li>Check-out time: 11:00 AM</li>
      <li>Please bring a valid ID for check-in</li>
      <li>Free cancellation up to 24 hours before check-in</li>
    </ul>
  </div>
</td></tr>"#,
        reference = reference_banner("Your Booking Reference", &booking.booking_id),
        stay = stay_table(booking),
        guests = booking.guests,
        total = format_money(booking.total_price),
    );

    RenderedEmail {
        subject: format!("Your booking at {} is confirmed!", booking.hotel_name),
        html: layout(
            &body,
            &format!(
                r#"Need help? Contact us at <a href="mailto:{help}">{help}</a><br>{}"#,
                copyright(year)
            ),
        ),
    }
}

/// First eight characters of the booking id, upper-cased.
pub fn booking_reference(booking_id: &str) -> String {
    booking_id.chars().take(8).collect::<String>().to_uppercase()
}

/// Renders a stay date as `Friday, March 14, 2025`. Unparseable input is returned unchanged.
pub fn format_stay_date(raw: &str) -> String {
    let raw = raw.trim();
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|timestamp| timestamp.with_timezone(&Utc).date_naive())
    });
    match date {
        Some(date) => date.format("%A, %B %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

pub fn format_money(amount: f64) -> String {
    format!("${amount:.2}")
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn reference_banner(label: &str, booking_id: &str) -> String {
    format!(
        r#"<tr><td style="padding:22px;text-align:center;background:#eef2ff;">
  <span style="color:#5a67d8;font-size:14px;">{label}</span>
  <div style="font-size:22px;font-weight:bold;font-family:monospace;letter-spacing:2px;margin-top:6px;">{reference}</div>
</td></tr>"#,
        reference = escape_html(&booking_reference(booking_id)),
    )
}

fn stay_table(booking: &BookingPayload) -> String {
    format!(
        r#"<table width="100%" cellpadding="8" cellspacing="0" style="background:#fff3e0;border-radius:8px;margin-bottom:20px;">
    <tr><td style="color:#666;width:120px;">Check-in:</td><td style="font-weight:500;">{check_in}</td></tr>
    <tr><td style="color:#666;">Check-out:</td><td style="font-weight:500;">{check_out}</td></tr>
  </table>"#,
        check_in = escape_html(&format_stay_date(&booking.check_in)),
        check_out = escape_html(&format_stay_date(&booking.check_out)),
    )
}

fn total_banner(total: f64) -> String {
    format!(
        r#"<div style="background:#2e9d4f;padding:24px;border-radius:8px;text-align:center;">
    <span style="color:#e8f5e9;font-size:14px;">Total Price</span>
    <div style="color:#ffffff;font-size:34px;font-weight:bold;margin-top:4px;">{}</div>
  </div>"#,
        format_money(total)
    )
}

fn copyright(year: i32) -> String {
    format!("&copy; {year} HotelBook. All rights reserved.")
}

fn layout(rows: &str, footer: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
</head>
<body style="margin:0;padding:0;font-family:'Segoe UI',Tahoma,Geneva,Verdana,sans-serif;background:#f4f4f4;">
<table width="100%" cellpadding="0" cellspacing="0" style="max-width:600px;margin:0 auto;background:#ffffff;">
{rows}
<tr><td style="padding:20px 28px;background:#f7f8fa;text-align:center;border-top:1px solid #e5e7eb;">
  <p style="margin:0;color:#999;font-size:12px;">{footer}</p>
</td></tr>
</table>
</body>
</html>"#
    )
}
