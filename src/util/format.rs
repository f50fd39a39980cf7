//! Text formatting helpers shared by the screens

/// Letter label for an option index (0 -> 'A')
///
/// # Examples
/// ```
/// use quizmaster::util::format::option_label;
///
/// assert_eq!(option_label(0), 'A');
/// assert_eq!(option_label(3), 'D');
/// ```
pub fn option_label(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}

/// Map a key character to an option index.
///
/// Accepts letters `a`-`d` (any case) and digits `1`-`4`.
pub fn option_from_char(c: char, option_count: usize) -> Option<usize> {
    let index = match c {
        'a'..='z' => c as usize - 'a' as usize,
        'A'..='Z' => c as usize - 'A' as usize,
        '1'..='9' => c as usize - '1' as usize,
        _ => return None,
    };
    (index < option_count).then_some(index)
}

/// Normalise typed room code input: upper-cased, no whitespace,
/// capped at `max_len` characters
pub fn normalize_room_code(input: &str, max_len: usize) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .take(max_len)
        .collect()
}

/// Percentage of the quiz reached when showing question `index`
pub fn progress_percent(index: usize, total: usize) -> u16 {
    if total == 0 {
        return 0;
    }
    (((index + 1) * 100) / total).min(100) as u16
}

/// Pluralised count, e.g. "1 Player" / "4 Players"
pub fn count_label(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_from_char() {
        assert_eq!(option_from_char('a', 4), Some(0));
        assert_eq!(option_from_char('D', 4), Some(3));
        assert_eq!(option_from_char('e', 4), None);
        assert_eq!(option_from_char('1', 4), Some(0));
        assert_eq!(option_from_char('4', 4), Some(3));
        assert_eq!(option_from_char('5', 4), None);
        assert_eq!(option_from_char('?', 4), None);
    }

    #[test]
    fn test_normalize_room_code() {
        assert_eq!(normalize_room_code("ab c1", 6), "ABC1");
        assert_eq!(normalize_room_code("abcdefgh", 6), "ABCDEF");
        assert_eq!(normalize_room_code("", 6), "");
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(progress_percent(0, 3), 33);
        assert_eq!(progress_percent(2, 3), 100);
        assert_eq!(progress_percent(0, 0), 0);
    }

    #[test]
    fn test_count_label() {
        assert_eq!(count_label(1, "Player"), "1 Player");
        assert_eq!(count_label(4, "Question"), "4 Questions");
    }
}
