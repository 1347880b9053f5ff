//! CSV export of a section's registration list.
//!
//! Player storage is a keyed mapping with no inherent order, so rows are
//! emitted in ascending username order to keep repeated exports of the
//! same section byte-identical.

use super::models::Section;

/// Fixed header row of the registration export
///
/// Club, Birthdate, Federation and FIDE No. are intentionally blank
/// columns reserved for the pairing program the directors feed this into.
pub const CSV_HEADER: &str =
    "No.,Title,Name,Rating,Chess Rating,Club,Birthdate,Federation,FIDE No.,Email,Status,Byes";

/// Placeholder opponent assigned to odd players out; never a registration.
const NO_OPPONENT: &str = "No Opponent";

/// Render the registration list of a section as CSV
pub fn registrations_csv(section: &Section) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');

    let mut sequence = 0;
    for player in section.players.values() {
        if player.lichess_username == NO_OPPONENT {
            continue;
        }
        sequence += 1;

        let name = format!(
            "{} (Lichess: {}, Discord: {})",
            player.username, player.lichess_username, player.discord_username
        );
        let rating = player.rating.to_string();
        let cells = [
            sequence.to_string(),
            player.title.clone(),
            name,
            rating.clone(),
            rating,
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            player.email.clone(),
            "ACTIVE".to_string(),
            bye_summary(&player.bye_requests),
        ];

        let row: Vec<String> = cells.iter().map(|cell| csv_escape(cell)).collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}

/// Render a player's bye requests as a human-readable summary
///
/// Index `i` of the request list refers to round `i + 1`. Returns an
/// empty string when no round was requested.
pub fn bye_summary(requests: &[bool]) -> String {
    let rounds: Vec<String> = requests
        .iter()
        .enumerate()
        .filter(|(_, requested)| **requested)
        .map(|(index, _)| (index + 1).to_string())
        .collect();

    if rounds.is_empty() {
        String::new()
    } else {
        format!("Bye requests for rounds {}", rounds.join(", "))
    }
}

/// Quote a CSV field when it contains a comma, quote or line break
fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
