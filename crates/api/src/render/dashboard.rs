use chrono::{DateTime, NaiveDate};
use duedash_core::assignments::TablePage;
use duedash_domain::{AssignmentRecord, SortDirection, SortKey};

use super::{escape_html, page_shell, priority_badge_class, status_badge_class};

/// Columns a header click can sort by, in display order.
const SORTABLE_COLUMNS: [(SortKey, &str); 3] =
    [(SortKey::Title, "Assignment"), (SortKey::Subject, "Subject"), (SortKey::DueDate, "Due Date")];

/// Render the assignments table page.
pub fn render_dashboard(page: &TablePage<'_>, email: Option<&str>) -> String {
    let mut body = String::with_capacity(4096);

    body.push_str("<main class=\"dashboard\">\n<header>\n<h1>Upcoming Assignments</h1>\n");
    if let Some(email) = email {
        body.push_str(&format!("<span class=\"account\">{}</span>\n", escape_html(email)));
    }
    body.push_str(
        "<a href=\"/dashboard/refresh\">Refresh</a>\n<a href=\"/api/auth/signout\">Sign out</a>\n</header>\n",
    );

    body.push_str(&format!(
        "<form method=\"get\" action=\"/dashboard/search\">\n\
         <input type=\"search\" name=\"q\" placeholder=\"Search assignments...\" value=\"{}\">\n\
         </form>\n",
        escape_html(page.search_term)
    ));

    body.push_str("<table>\n<thead>\n<tr>\n");
    for (key, label) in SORTABLE_COLUMNS {
        body.push_str(&format!(
            "<th><a href=\"/dashboard/sort/{}\">{label}{}</a></th>\n",
            key.as_str(),
            sort_marker(page, key)
        ));
    }
    body.push_str("<th>Status</th>\n<th>Priority</th>\n</tr>\n</thead>\n<tbody>\n");

    if page.rows.is_empty() {
        body.push_str("<tr><td colspan=\"5\" class=\"empty\">No assignments found</td></tr>\n");
    }
    for record in &page.rows {
        body.push_str(&render_row(record));
    }
    body.push_str("</tbody>\n</table>\n");

    body.push_str(&render_pagination(page));
    body.push_str("</main>");

    page_shell("Upcoming Assignments", &body)
}

fn sort_marker(page: &TablePage<'_>, key: SortKey) -> &'static str {
    if page.sort_key != key {
        return "";
    }
    match page.sort_direction {
        SortDirection::Asc => " \u{25b2}",
        SortDirection::Desc => " \u{25bc}",
    }
}

fn render_row(record: &AssignmentRecord) -> String {
    let description = record
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .map(|d| format!("<div class=\"description\">{}</div>", escape_html(d)))
        .unwrap_or_default();

    format!(
        "<tr>\n<td><div class=\"title\">{title}</div>{description}</td>\n\
         <td>{subject}</td>\n<td>{due}</td>\n\
         <td><span class=\"badge {status_class}\">{status}</span></td>\n\
         <td><span class=\"badge {priority_class}\">{priority}</span></td>\n</tr>\n",
        title = escape_html(record.title.as_deref().unwrap_or("")),
        subject = escape_html(&record.subject),
        due = escape_html(&display_due(&record.due_date.date_time)),
        status_class = status_badge_class(record.status),
        status = record.status,
        priority_class = priority_badge_class(record.priority),
        priority = record.priority,
    )
}

fn render_pagination(page: &TablePage<'_>) -> String {
    format!(
        "<nav class=\"pagination\">\n\
         <p>Showing {} to {} of {} results</p>\n\
         {}<span>Page {} of {}</span>\n{}</nav>\n",
        page.first_item,
        page.last_item,
        page.total_items,
        nav_link("/dashboard/page/prev", "Previous", page.has_previous),
        page.page,
        page.total_pages,
        nav_link("/dashboard/page/next", "Next", page.has_next),
    )
}

fn nav_link(href: &str, label: &str, enabled: bool) -> String {
    if enabled {
        format!("<a href=\"{href}\">{label}</a>\n")
    } else {
        format!("<span class=\"disabled\" aria-disabled=\"true\">{label}</span>\n")
    }
}

/// Upstream timestamps shown in their own offset; all-day dates and
/// unparseable values are shown as received.
fn display_due(raw: &str) -> String {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return at.format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}
