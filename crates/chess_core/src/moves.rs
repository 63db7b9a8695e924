use shakmaty::CastlingMode;

pub use shakmaty::Move;

/// Writes a move in coordinate notation: source square, destination square
/// and an optional promotion letter (`e2e4`, `e7e8q`). Castling is written as
/// the king's two-square step (`e1g1`).
pub fn move_to_notation(mv: &Move) -> String {
    mv.to_uci(CastlingMode::Standard).to_string()
}

/// Cheap shape check for coordinate notation, used to give a clearer error
/// before searching the legal moves.
pub fn is_coordinate_notation(notation: &str) -> bool {
    let bytes = notation.as_bytes();
    if bytes.len() != 4 && bytes.len() != 5 {
        return false;
    }

    let is_square = |file: u8, rank: u8| (b'a'..=b'h').contains(&file) && (b'1'..=b'8').contains(&rank);
    if !is_square(bytes[0], bytes[1]) || !is_square(bytes[2], bytes[3]) {
        return false;
    }

    // Promotion piece, if any
    bytes.len() == 4 || matches!(bytes[4], b'q' | b'r' | b'b' | b'n')
}

/// Finds the move among `candidates` that is written as `notation`.
pub fn find_by_notation<'a, I>(candidates: I, notation: &str) -> Option<&'a Move>
where
    I: IntoIterator<Item = &'a Move>,
{
    candidates
        .into_iter()
        .find(|mv| move_to_notation(mv) == notation)
}
