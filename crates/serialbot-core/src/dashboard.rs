// ── Dashboard link ──
//
// Pure URL templating; no remote call.

use url::Url;

use crate::serial::SerialNumber;

/// `base` with `serial_number=<serial>` appended to its query.
pub fn dashboard_url(base: &Url, serial: &SerialNumber) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .append_pair("serial_number", serial.as_str());
    url
}

/// Chat-formatted link to the dashboard for `serial`.
pub fn render_link(base: &Url, serial: &SerialNumber) -> String {
    let url = dashboard_url(base, serial);
    format!("🔗 <{url}|View dashboard for {serial}>")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn serial() -> SerialNumber {
        "92000042".parse().unwrap()
    }

    #[test]
    fn appends_serial_query() {
        let base = Url::parse("https://metabase.example.com/dashboard/12").unwrap();
        assert_eq!(
            dashboard_url(&base, &serial()).as_str(),
            "https://metabase.example.com/dashboard/12?serial_number=92000042"
        );
    }

    #[test]
    fn keeps_existing_query() {
        let base = Url::parse("https://metabase.example.com/d/12?tab=3").unwrap();
        assert_eq!(
            dashboard_url(&base, &serial()).as_str(),
            "https://metabase.example.com/d/12?tab=3&serial_number=92000042"
        );
    }

    #[test]
    fn link_format() {
        let base = Url::parse("https://metabase.example.com/d/12").unwrap();
        assert_eq!(
            render_link(&base, &serial()),
            "🔗 <https://metabase.example.com/d/12?serial_number=92000042|View dashboard for 92000042>"
        );
    }
}
