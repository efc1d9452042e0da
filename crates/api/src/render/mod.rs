//! Server-rendered HTML pages

pub mod dashboard;
pub mod login;

use duedash_domain::{AssignmentPriority, AssignmentStatus};

pub use dashboard::render_dashboard;
pub use login::render_login;

/// Escape text for an HTML text node or a double-quoted attribute.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub const fn status_badge_class(status: AssignmentStatus) -> &'static str {
    match status {
        AssignmentStatus::Completed => "bg-green-100 text-green-800",
        AssignmentStatus::Overdue => "bg-red-100 text-red-800",
        AssignmentStatus::Pending => "bg-yellow-100 text-yellow-800",
    }
}

pub const fn priority_badge_class(priority: AssignmentPriority) -> &'static str {
    match priority {
        AssignmentPriority::High => "bg-red-100 text-red-800",
        AssignmentPriority::Medium => "bg-orange-100 text-orange-800",
        AssignmentPriority::Low => "bg-blue-100 text-blue-800",
    }
}

fn page_shell(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape_html(title),
    )
}
