//! HTML rendering helpers shared by the notification templates.
//!
//! Bodies are plain inline-styled HTML tables so they render in any mail
//! client without external assets.

/// English month name for a 1-based month number.
///
/// Out-of-range values fall back to the number itself so a malformed
/// selection never panics the render path.
pub fn month_name(month: u32) -> String {
    match month {
        1 => "January".to_string(),
        2 => "February".to_string(),
        3 => "March".to_string(),
        4 => "April".to_string(),
        5 => "May".to_string(),
        6 => "June".to_string(),
        7 => "July".to_string(),
        8 => "August".to_string(),
        9 => "September".to_string(),
        10 => "October".to_string(),
        11 => "November".to_string(),
        12 => "December".to_string(),
        other => other.to_string(),
    }
}

/// Title-cases a person's name for greeting lines.
///
/// Snapshot names often arrive fully upper-cased; greetings use
/// "Ana Souza", not "ANA SOUZA".
pub fn format_name(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escapes the characters HTML treats specially in text content.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Renders a bordered table with a header row.
pub fn html_table(columns: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = String::from(
        "<table border=\"1\" cellpadding=\"6\" cellspacing=\"0\" \
         style=\"border-collapse: collapse; font-family: sans-serif;\">\n<tr>",
    );
    for column in columns {
        out.push_str("<th>");
        out.push_str(&escape_html(column));
        out.push_str("</th>");
    }
    out.push_str("</tr>\n");
    for row in rows {
        out.push_str("<tr>");
        for cell in row {
            out.push_str("<td>");
            out.push_str(&escape_html(cell));
            out.push_str("</td>");
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>");
    out
}

/// A roster body: greeting paragraph, table, signoff paragraph.
pub fn roster_body(greeting: &str, message: &str, columns: &[&str], rows: &[Vec<String>]) -> String {
    format!(
        "<html><body style=\"font-family: sans-serif;\">\
         <p>{}</p><p>{}</p>{}<p>{}</p></body></html>",
        escape_html(greeting),
        escape_html(message),
        html_table(columns, rows),
        "Best regards,<br>People Team",
    )
}

/// A greeting body: a short personal congratulations with no table.
pub fn greeting_body(salutation: &str, message: &str) -> String {
    format!(
        "<html><body style=\"font-family: sans-serif;\">\
         <p>{}</p><p>{}</p><p>{}</p></body></html>",
        escape_html(salutation),
        escape_html(message),
        "Best regards,<br>People Team",
    )
}
