use scraper::Html;

/// Elements whose text never reaches the screen.
const HIDDEN_ELEMENTS: [&str; 3] = ["script", "style", "template"];

/// Shown by the board when a window has no bookings.
pub(crate) const NO_RESERVATIONS: &str = "아직 예약자가 없습니다";

const LOGIN_REJECTIONS: [&str; 2] = ["비밀번호가 틀립니다", "존재하지 않는 회원"];

/// Visible text of an HTML fragment, every text node trimmed and glued
/// together without a separator.
pub fn extract_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    fragment
        .root_element()
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node.ancestors().any(|a| {
                a.value()
                    .as_element()
                    .is_some_and(|e| HIDDEN_ELEMENTS.contains(&e.name()))
            });
            (!hidden).then(|| text.trim())
        })
        .filter(|t| !t.is_empty())
        .collect()
}

/// Attendee names listed in a reservation fragment.
pub fn parse_attendees(html: &str) -> Vec<String> {
    let text = extract_text(html);
    if text.is_empty() || text.contains(NO_RESERVATIONS) {
        return Vec::new();
    }

    text.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

pub fn is_login_rejected(body: &str) -> bool {
    LOGIN_REJECTIONS.iter().any(|m| body.contains(m))
}
