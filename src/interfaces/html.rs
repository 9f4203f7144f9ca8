//! HTML fragments for the pages that show availability notices and badges.

use crate::domain::availability::AvailabilityNotice;
use crate::domain::status::Badge;

/// CSS class identifying the availability notice, so it can be found and
/// removed before a new one is inserted.
pub const NOTICE_CLASS: &str = "availability-alert";
/// CSS class of each clickable alternative.
pub const ALTERNATIVE_CLASS: &str = "alternative-time";

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders the dismissible unavailability notice.
///
/// Each alternative carries its 24-hour value in `data-time`; the click
/// handler reads that attribute rather than the label.
pub fn render_notice(notice: &AvailabilityNotice) -> String {
    let mut html = format!(
        "<div class=\"alert alert-warning alert-dismissible {NOTICE_CLASS}\" role=\"alert\">\
         <i class=\"fas fa-exclamation-triangle me-2\"></i>\
         <strong>Time slot unavailable!</strong> {}",
        escape(&notice.message)
    );
    if !notice.alternatives.is_empty() {
        html.push_str(
            "<div class=\"mt-2\"><strong>Alternative times:</strong>\
             <div class=\"d-flex flex-wrap gap-2 mt-2\">",
        );
        for slot in &notice.alternatives {
            html.push_str(&format!(
                "<button type=\"button\" class=\"badge bg-primary {ALTERNATIVE_CLASS}\" data-time=\"{}\">{}</button>",
                escape(&slot.value),
                escape(&slot.label)
            ));
        }
        html.push_str("</div></div>");
    }
    html.push_str(
        "<button type=\"button\" class=\"btn-close\" data-bs-dismiss=\"alert\" aria-label=\"Close\"></button></div>",
    );
    html
}

pub fn render_badge(badge: &Badge) -> String {
    format!(
        "<span class=\"badge bg-{}\">{}</span>",
        badge.color.css_suffix(),
        escape(&badge.label)
    )
}
