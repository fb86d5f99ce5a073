//! Identifier-to-label formatting for table headers and list keys.

/// Convert an identifier-style key into a human-readable label.
///
/// Splits words at every letter/digit boundary (both directions) and at
/// every lowercase→uppercase boundary, then capitalizes the first letter
/// of each word. Empty input passes through unchanged.
///
/// ```
/// use matchlinelib::label::id_to_word;
/// assert_eq!(id_to_word("matchNumber"), "Match Number");
/// assert_eq!(id_to_word("team2Number"), "Team 2 Number");
/// ```
pub fn id_to_word(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len() + 4);
    let mut prev: Option<char> = None;
    for c in identifier.chars() {
        if let Some(p) = prev {
            let boundary = (p.is_ascii_alphabetic() && c.is_ascii_digit())
                || (p.is_ascii_digit() && c.is_ascii_alphabetic())
                || (p.is_lowercase() && c.is_uppercase());
            if boundary {
                out.push(' ');
            }
        }
        // Capitalize word-initial letters
        if c.is_ascii_lowercase() && word_initial(prev) {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        prev = Some(c);
    }
    out
}

/// A letter starts a word when it follows nothing, whitespace, or a digit.
fn word_initial(prev: Option<char>) -> bool {
    match prev {
        None => true,
        Some(p) => !p.is_ascii_alphabetic(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_split() {
        assert_eq!(id_to_word("matchNumber"), "Match Number");
        assert_eq!(id_to_word("scoreRedFinal"), "Score Red Final");
        assert_eq!(id_to_word("tournamentLevel"), "Tournament Level");
    }

    #[test]
    fn test_digit_boundaries() {
        assert_eq!(id_to_word("team2Number"), "Team 2 Number");
        assert_eq!(id_to_word("red1"), "Red 1");
        assert_eq!(id_to_word("1st"), "1 St");
    }

    #[test]
    fn test_single_word() {
        assert_eq!(id_to_word("name"), "Name");
        assert_eq!(id_to_word("city"), "City");
    }

    #[test]
    fn test_already_capitalized() {
        assert_eq!(id_to_word("Schedule"), "Schedule");
        // consecutive capitals stay together (no lower→upper boundary)
        assert_eq!(id_to_word("eventID"), "Event ID");
    }

    #[test]
    fn test_empty_passes_through() {
        assert_eq!(id_to_word(""), "");
    }
}
