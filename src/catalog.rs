//! Static card catalog: the 66 books in canonical order.
//!
//! `rank` is the canonical position (1..=66, contiguous, unique) and is the
//! only thing the order check looks at; `title` and `display` are presentation.

/// One sortable card. Immutable, defined at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    pub title: &'static str,
    pub rank: u32,
    pub display: &'static str,
}

const fn card(title: &'static str, rank: u32, display: &'static str) -> Card {
    Card { title, rank, display }
}

/// Ground truth for correct ordering. Ranks form a contiguous 1..=N sequence;
/// the check in `game::GameSession::check` depends on that.
pub const CATALOG: &[Card] = &[
    card("Genesis", 1, "1st book"),
    card("Exodus", 2, "2nd book"),
    card("Leviticus", 3, "3rd book"),
    card("Numbers", 4, "4th book"),
    card("Deuteronomy", 5, "5th book"),
    card("Joshua", 6, "6th book"),
    card("Judges", 7, "7th book"),
    card("Ruth", 8, "8th book"),
    card("1 Samuel", 9, "9th book"),
    card("2 Samuel", 10, "10th book"),
    card("1 Kings", 11, "11th book"),
    card("2 Kings", 12, "12th book"),
    card("1 Chronicles", 13, "13th book"),
    card("2 Chronicles", 14, "14th book"),
    card("Ezra", 15, "15th book"),
    card("Nehemiah", 16, "16th book"),
    card("Esther", 17, "17th book"),
    card("Job", 18, "18th book"),
    card("Psalms", 19, "19th book"),
    card("Proverbs", 20, "20th book"),
    card("Ecclesiastes", 21, "21st book"),
    card("Song of Solomon", 22, "22nd book"),
    card("Isaiah", 23, "23rd book"),
    card("Jeremiah", 24, "24th book"),
    card("Lamentations", 25, "25th book"),
    card("Ezekiel", 26, "26th book"),
    card("Daniel", 27, "27th book"),
    card("Hosea", 28, "28th book"),
    card("Joel", 29, "29th book"),
    card("Amos", 30, "30th book"),
    card("Obadiah", 31, "31st book"),
    card("Jonah", 32, "32nd book"),
    card("Micah", 33, "33rd book"),
    card("Nahum", 34, "34th book"),
    card("Habakkuk", 35, "35th book"),
    card("Zephaniah", 36, "36th book"),
    card("Haggai", 37, "37th book"),
    card("Zechariah", 38, "38th book"),
    card("Malachi", 39, "39th book"),
    card("Matthew", 40, "40th book"),
    card("Mark", 41, "41st book"),
    card("Luke", 42, "42nd book"),
    card("John", 43, "43rd book"),
    card("Acts", 44, "44th book"),
    card("Romans", 45, "45th book"),
    card("1 Corinthians", 46, "46th book"),
    card("2 Corinthians", 47, "47th book"),
    card("Galatians", 48, "48th book"),
    card("Ephesians", 49, "49th book"),
    card("Philippians", 50, "50th book"),
    card("Colossians", 51, "51st book"),
    card("1 Thessalonians", 52, "52nd book"),
    card("2 Thessalonians", 53, "53rd book"),
    card("1 Timothy", 54, "54th book"),
    card("2 Timothy", 55, "55th book"),
    card("Titus", 56, "56th book"),
    card("Philemon", 57, "57th book"),
    card("Hebrews", 58, "58th book"),
    card("James", 59, "59th book"),
    card("1 Peter", 60, "60th book"),
    card("2 Peter", 61, "61st book"),
    card("1 John", 62, "62nd book"),
    card("2 John", 63, "63rd book"),
    card("3 John", 64, "64th book"),
    card("Jude", 65, "65th book"),
    card("Revelation", 66, "66th book"),
];

/// Look up a card by canonical rank. Ranks are contiguous so this is a direct
/// index, with a scan fallback should the table ever be reordered.
pub fn card_by_rank(rank: u32) -> Option<&'static Card> {
    let idx = rank.checked_sub(1)? as usize;
    match CATALOG.get(idx) {
        Some(c) if c.rank == rank => Some(c),
        _ => CATALOG.iter().find(|c| c.rank == rank),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_rank() {
        assert_eq!(card_by_rank(1).map(|c| c.title), Some("Genesis"));
        assert_eq!(card_by_rank(66).map(|c| c.title), Some("Revelation"));
        assert_eq!(card_by_rank(0), None);
        assert_eq!(card_by_rank(67), None);
    }
}
