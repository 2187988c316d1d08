/** Lowest file/rank coordinate */
pub const MIN: u8 = 1;
/** Highest file/rank coordinate */
pub const MAX: u8 = 8;

#[inline]
pub fn is_valid_coord(x: i16, y: i16) -> bool {
    (MIN as i16..=MAX as i16).contains(&x) && (MIN as i16..=MAX as i16).contains(&y)
}

/// Playable squares are the dark ones, where `x + y` is even.
#[inline]
pub fn is_dark(x: u8, y: u8) -> bool {
    (x + y) % 2 == 0
}

/// Parses a two-character square token such as `c3` (file is case-insensitive).
pub fn parse_square(token: &str) -> Option<(u8, u8)> {
    let mut chars = token.trim().chars();
    let file = chars.next()?.to_ascii_lowercase();
    let rank = chars.next()?;
    if chars.next().is_some() || !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
        return None;
    }
    Some((file as u8 - b'a' + 1, rank as u8 - b'0'))
}

const POS_TO_STRING: [&str; 64] = [
    "a1", "b1", "c1", "d1", "e1", "f1", "g1", "h1",
    "a2", "b2", "c2", "d2", "e2", "f2", "g2", "h2",
    "a3", "b3", "c3", "d3", "e3", "f3", "g3", "h3",
    "a4", "b4", "c4", "d4", "e4", "f4", "g4", "h4",
    "a5", "b5", "c5", "d5", "e5", "f5", "g5", "h5",
    "a6", "b6", "c6", "d6", "e6", "f6", "g6", "h6",
    "a7", "b7", "c7", "d7", "e7", "f7", "g7", "h7",
    "a8", "b8", "c8", "d8", "e8", "f8", "g8", "h8",
];

/// Name of an in-bounds square, `x` and `y` in `1..=8`.
pub fn pos_to_str(x: u8, y: u8) -> &'static str {
    POS_TO_STRING[((y - MIN) * MAX + (x - MIN)) as usize]
}

pub const FILE_LABELS: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];
