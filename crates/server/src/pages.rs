//! HTML pages served by the frontend and standalone deployments.
//!
//! Rendered with `format!`; every interpolated value goes through [`escape_html`].

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};
use common::types::Submission;

/// Values shown on the home page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeContext {
    pub day_of_week: String,
    pub current_time: String,
}

impl HomeContext {
    /// Server local time, read at the moment of the call.
    pub fn now() -> Self {
        Self::at(&Local::now())
    }

    pub fn at<Tz>(t: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self {
            day_of_week: t.format("%A").to_string(),
            current_time: t.format("%H:%M:%S").to_string(),
        }
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Form page. `view_href` is where the "View entries" link points.
pub fn home_page(ctx: &HomeContext, view_href: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Guestbook</title>
</head>
<body>
  <h1>Guestbook</h1>
  <p>Today is <span id="day_of_week">{day}</span>, and the current time is <span id="current_time">{time}</span>.</p>
  <form action="/submit" method="post">
    <label for="name">Name</label>
    <input type="text" id="name" name="name">
    <label for="email">Email</label>
    <input type="text" id="email" name="email">
    <button type="submit">Submit</button>
  </form>
  <p><a href="{href}">View entries</a></p>
</body>
</html>
"#,
        day = escape_html(&ctx.day_of_week),
        time = escape_html(&ctx.current_time),
        href = escape_html(view_href),
    )
}

/// List page for the standalone deployment.
pub fn view_page(entries: &[Submission]) -> String {
    let body = if entries.is_empty() {
        "  <p>No entries yet.</p>\n".to_string()
    } else {
        let rows: String = entries
            .iter()
            .map(|s| {
                format!(
                    "      <tr><td>{}</td><td>{}</td></tr>\n",
                    escape_html(&s.name),
                    escape_html(&s.email)
                )
            })
            .collect();
        format!(
            "  <table>\n    <thead><tr><th>Name</th><th>Email</th></tr></thead>\n    <tbody>\n{rows}    </tbody>\n  </table>\n"
        )
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Guestbook entries</title>
</head>
<body>
  <h1>Entries</h1>
{body}  <p><a href="/">Back</a></p>
</body>
</html>
"#
    )
}
