//! Dashboard Renderer — HTML tables over candidate listings.

use crate::models::candidate::CandidateListing;

const NOT_UPLOADED: &str = "Not Uploaded";

pub fn render_master(rows: &[CandidateListing]) -> String {
    render_table(
        "MASTER DASHBOARD (All Vendors)",
        &["ID", "Name", "Email", "Company", "Vendor", "Experience", "CV"],
        rows,
        |row| {
            vec![
                row.id.to_string(),
                escape_html(&row.name),
                escape_html(&row.email),
                escape_html(&row.company),
                escape_html(row.vendor_name.as_deref().unwrap_or("-")),
                escape_html(&row.experience),
                cv_cell(row),
            ]
        },
    )
}

pub fn render_vendor(vendor_name: Option<&str>, rows: &[CandidateListing]) -> String {
    let title = match vendor_name {
        Some(name) => format!("Vendor Dashboard: {}", escape_html(name)),
        None => "Vendor Dashboard".to_string(),
    };
    render_table(
        &title,
        &["ID", "Name", "Email", "Company", "Experience", "CV"],
        rows,
        |row| {
            vec![
                row.id.to_string(),
                escape_html(&row.name),
                escape_html(&row.email),
                escape_html(&row.company),
                escape_html(&row.experience),
                cv_cell(row),
            ]
        },
    )
}

/// Single-tenant admin view, with an inline delete action per row.
pub fn render_admin(rows: &[CandidateListing]) -> String {
    render_table(
        "Admin Dashboard",
        &["ID", "Name", "Email", "Experience", "Submitted", "CV", "Action"],
        rows,
        |row| {
            vec![
                row.id.to_string(),
                escape_html(&row.name),
                escape_html(&row.email),
                escape_html(&row.experience),
                row.created_at.format("%Y-%m-%d %H:%M").to_string(),
                cv_cell(row),
                format!(
                    "<a href='/delete/{}' onclick=\"return confirm('Delete candidate {}?')\">Delete</a>",
                    row.id, row.id
                ),
            ]
        },
    )
}

fn cv_cell(row: &CandidateListing) -> String {
    if row.has_cv() {
        format!("<a href='/download/{}'>Download</a>", row.id)
    } else {
        NOT_UPLOADED.to_string()
    }
}

/// `cells` must return already-escaped HTML fragments.
fn render_table<F>(title: &str, headers: &[&str], rows: &[CandidateListing], cells: F) -> String
where
    F: Fn(&CandidateListing) -> Vec<String>,
{
    let mut html = String::from(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Dashboard</title></head>\n<body style=\"font-family:Arial\">\n",
    );
    html.push_str(&format!("<h2>{title}</h2>\n"));
    html.push_str(&format!("<p>{} candidate(s)</p>\n", rows.len()));
    html.push_str("<table border='1' cellpadding='10'>\n<tr>");
    for header in headers {
        html.push_str(&format!("<th>{header}</th>"));
    }
    html.push_str("</tr>\n");

    for row in rows {
        html.push_str(&format!("<tr data-candidate-id=\"{}\">", row.id));
        for cell in cells(row) {
            html.push_str(&format!("<td>{cell}</td>"));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</table>\n</body>\n</html>\n");
    html
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn listing(id: i64, name: &str, vendor: Option<&str>, cv: Option<&str>) -> CandidateListing {
        CandidateListing {
            id,
            name: name.to_string(),
            email: format!("{}@x.com", id),
            experience: "3".to_string(),
            company: "Acme".to_string(),
            vendor_name: vendor.map(str::to_string),
            cv_path: cv.map(str::to_string),
            created_at: Utc::now(),
        }
    }

    fn row_count(html: &str) -> usize {
        html.matches("<tr data-candidate-id=").count()
    }

    #[test]
    fn test_master_lists_every_row_with_vendor_names() {
        let rows = vec![
            listing(1, "Jane", Some("XX"), Some("uploads/a_cv.pdf")),
            listing(2, "Raj", Some("YY"), None),
            listing(3, "Solo", None, None),
        ];
        let html = render_master(&rows);
        assert_eq!(row_count(&html), 3);
        assert!(html.contains("<td>XX</td>"));
        assert!(html.contains("<td>YY</td>"));
        assert!(html.contains("<td>-</td>"));
        assert!(html.contains("<th>Vendor</th>"));
    }

    #[test]
    fn test_download_link_only_when_cv_present() {
        let rows = vec![
            listing(1, "Jane", Some("XX"), Some("uploads/a_cv.pdf")),
            listing(2, "Raj", Some("XX"), None),
        ];
        let html = render_vendor(Some("XX"), &rows);
        assert!(html.contains("<a href='/download/1'>Download</a>"));
        assert!(!html.contains("/download/2"));
        assert_eq!(html.matches(NOT_UPLOADED).count(), 1);
        assert!(html.contains("Vendor Dashboard: XX"));
        assert!(!html.contains("<th>Vendor</th>"));
    }

    #[test]
    fn test_admin_view_offers_delete_per_row() {
        let rows = vec![listing(4, "Jane", None, None), listing(9, "Raj", None, None)];
        let html = render_admin(&rows);
        assert_eq!(row_count(&html), 2);
        assert!(html.contains("href='/delete/4'"));
        assert!(html.contains("href='/delete/9'"));
    }

    #[test]
    fn test_cells_are_escaped() {
        let rows = vec![listing(1, "<script>alert('x')</script>", Some("XX"), None)];
        let html = render_master(&rows);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#x27;x&#x27;)&lt;/script&gt;"));
    }

    #[test]
    fn test_empty_table_still_renders_headers() {
        let html = render_vendor(None, &[]);
        assert_eq!(row_count(&html), 0);
        assert!(html.contains("<p>0 candidate(s)</p>"));
        assert!(html.contains("<th>Experience</th>"));
    }
}
