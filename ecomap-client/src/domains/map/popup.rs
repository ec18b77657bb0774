//! Popup markup for facility overlays.

use ecomap_model::{Facility, Viewer};

/// Inputs besides the facility itself that shape popup content.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupContext {
    /// Site origin used for the details link, without a trailing slash.
    pub site_url: String,
    pub viewer: Viewer,
}

impl PopupContext {
    pub fn new(site_url: impl Into<String>, viewer: Viewer) -> Self {
        let site_url = site_url.into();
        Self {
            site_url: site_url.trim_end_matches('/').to_string(),
            viewer,
        }
    }

    pub fn details_url(&self, facility: &Facility) -> String {
        format!("{}/ecofacilities/view/{}", self.site_url, facility.id)
    }
}

/// Deterministic popup HTML for `facility`.
pub fn render(facility: &Facility, ctx: &PopupContext) -> String {
    let mut html = String::with_capacity(512);
    html.push_str("<div class=\"popup-content\">");
    html.push_str(&format!(
        "<h5 class=\"mb-2\">{}</h5>",
        escape(&facility.title)
    ));
    html.push_str(&format!(
        "<p class=\"mb-1\"><strong>Category:</strong> {}</p>",
        escape(&facility.category_name)
    ));
    html.push_str(&format!(
        "<p class=\"mb-2\">{}</p>",
        escape(&facility.description)
    ));
    html.push_str(&format!(
        "<p class=\"mb-3\"><small>{}</small></p>",
        escape(&facility.address_line())
    ));
    html.push_str("<div class=\"popup-buttons\">");
    html.push_str(&format!(
        "<a href=\"{}\" class=\"btn btn-primary btn-popup\">View Details</a>",
        escape(&ctx.details_url(facility))
    ));
    if ctx.viewer.is_logged_in() {
        html.push_str(&format!(
            "<button class=\"btn btn-outline-secondary btn-popup add-status-btn\" \
             data-facility-id=\"{}\">Add Status</button>",
            facility.id
        ));
    }
    html.push_str("</div></div>");
    html
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
