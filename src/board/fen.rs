use std::str::FromStr;

use super::error::FenError;
use super::types::{CastlingRights, Color, Piece, PieceKind, Square};
use super::Board;

/// FEN of the standard starting position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Board {
    /// Parse a board position from FEN notation.
    ///
    /// The half-move clock and full-move number are optional and default to
    /// `0` and `1`. Positions without exactly one king per side, with the side
    /// not to move in check, or with an en-passant target no pawn could have
    /// left are rejected.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let mut board = Board::empty();
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() < 4 {
            return Err(FenError::TooFewParts { found: parts.len() });
        }

        // Piece placement, rank 8 first
        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidRank { ranks: ranks.len() });
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as u8;
            let mut file = 0usize;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                    continue;
                }
                let piece = Piece::from_fen_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                if file >= 8 {
                    return Err(FenError::TooManyFiles {
                        rank: rank_idx,
                        files: file + 1,
                    });
                }
                board.add_piece(piece, Square::from_coords(rank, file as u8));
                file += 1;
            }
            if file != 8 {
                return Err(FenError::TooManyFiles {
                    rank: rank_idx,
                    files: file,
                });
            }
        }

        for color in Color::BOTH {
            let count = board.pieces(PieceKind::King, color).popcount();
            if count != 1 {
                return Err(FenError::KingCount { color, count });
            }
        }

        match parts[1] {
            "w" => {}
            "b" => board.toggle_side(),
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        }

        let mut rights = CastlingRights::none();
        if parts[2] != "-" {
            for c in parts[2].chars() {
                match c {
                    'K' => rights.set(Color::White, true),
                    'Q' => rights.set(Color::White, false),
                    'k' => rights.set(Color::Black, true),
                    'q' => rights.set(Color::Black, false),
                    _ => return Err(FenError::InvalidCastling { char: c }),
                }
            }
        }
        board.set_castling_rights(rights);

        if parts[3] != "-" {
            let invalid = || FenError::InvalidEnPassant {
                found: parts[3].to_string(),
            };
            let target: Square = parts[3].parse().map_err(|_| invalid())?;
            // The target lies behind a pawn that just double-pushed, with
            // the target and the pawn's origin both empty.
            let (expected_rank, pawn_rank, origin_rank) = match board.side_to_move() {
                Color::White => (5, 4, 6),
                Color::Black => (2, 3, 1),
            };
            if target.rank() != expected_rank {
                return Err(invalid());
            }
            let pusher = Piece::new(PieceKind::Pawn, board.side_to_move().opponent());
            let pawn_sq = Square::from_coords(pawn_rank, target.file());
            let origin = Square::from_coords(origin_rank, target.file());
            if board.piece_at(pawn_sq) != Some(pusher)
                || board.piece_at(target).is_some()
                || board.piece_at(origin).is_some()
            {
                return Err(invalid());
            }
            board.set_en_passant(Some(target));
        }

        let waiting = board.side_to_move().opponent();
        if board.is_square_attacked(board.king_square(waiting), board.side_to_move()) {
            return Err(FenError::OpponentInCheck { color: waiting });
        }

        let clock = |field: Option<&&str>, default: u32| match field {
            None => Ok(default),
            Some(text) => text.parse::<u32>().map_err(|_| FenError::InvalidClock {
                found: (*text).to_string(),
            }),
        };
        board.halfmove_clock = clock(parts.get(4), 0)?;
        board.fullmove_number = clock(parts.get(5), 1)?.max(1);

        debug_assert_eq!(board.hash, board.compute_hash());
        Ok(board)
    }

    /// Parse a board position from FEN notation.
    ///
    /// # Panics
    /// Panics if the FEN string is invalid. Use `try_from_fen` for fallible parsing.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        match Self::try_from_fen(fen) {
            Ok(board) => board,
            Err(e) => panic!("invalid FEN {fen:?}: {e}"),
        }
    }

    /// Convert the board position to FEN notation.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::with_capacity(8);
        for rank in (0..8u8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8u8 {
                match self.piece_at(Square::from_coords(rank, file)) {
                    Some(piece) => {
                        if empty > 0 {
                            row.push_str(&empty.to_string());
                            empty = 0;
                        }
                        row.push(piece.to_fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let active = match self.side_to_move() {
            Color::White => "w",
            Color::Black => "b",
        };

        let rights = self.castling_rights();
        let mut castling = String::new();
        for (color, kingside, c) in [
            (Color::White, true, 'K'),
            (Color::White, false, 'Q'),
            (Color::Black, true, 'k'),
            (Color::Black, false, 'q'),
        ] {
            if rights.has(color, kingside) {
                castling.push(c);
            }
        }
        if castling.is_empty() {
            castling.push('-');
        }

        let ep = self
            .en_passant()
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{} {} {} {} {} {}",
            rows.join("/"),
            active,
            castling,
            ep,
            self.halfmove_clock(),
            self.fullmove_number()
        )
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::try_from_fen(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_fen_matches_new() {
        let board = Board::from_fen(START_FEN);
        assert_eq!(board, Board::new());
        assert_eq!(Board::new().to_fen(), START_FEN);
    }

    #[test]
    fn test_fen_round_trip() {
        for fen in [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        ] {
            let board = Board::from_fen(fen);
            assert_eq!(board.to_fen(), fen);
            assert!(board.validate().is_ok());
        }
    }

    #[test]
    fn test_optional_clock_fields() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 b - -");
        assert_eq!(board.halfmove_clock(), 0);
        assert_eq!(board.fullmove_number(), 1);
        assert_eq!(board.side_to_move(), Color::Black);
    }

    #[test]
    fn test_fen_errors() {
        assert_eq!(
            Board::try_from_fen("8/8/8 w"),
            Err(FenError::TooFewParts { found: 2 })
        );
        assert_eq!(
            Board::try_from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(FenError::KingCount {
                color: Color::Black,
                count: 0
            })
        );
        assert!(matches!(
            Board::try_from_fen("4k3/8/8/8/8/8/8/4KX2 w - - 0 1"),
            Err(FenError::InvalidPiece { char: 'X' })
        ));
        assert!(matches!(
            Board::try_from_fen("4k3/8/8/8/8/8/8/4K3 x - - 0 1"),
            Err(FenError::InvalidSideToMove { .. })
        ));
        assert!(matches!(
            Board::try_from_fen("4k3/8/8/8/8/8/8/4K3 w - e4 0 1"),
            Err(FenError::InvalidEnPassant { .. })
        ));
        assert!(matches!(
            Board::try_from_fen("4k3/8/8/8/8/8/8/4K3 w - - x 1"),
            Err(FenError::InvalidClock { .. })
        ));
        assert!(matches!(
            Board::try_from_fen("4k3/8/8/8/8/8/8/4K2 w - - 0 1"),
            Err(FenError::TooManyFiles { rank: 7, files: 7 })
        ));
    }

    #[test]
    fn test_en_passant_target_needs_the_pushed_pawn() {
        // A target on e3 needs a white pawn on e4 and nothing on e3 or e2.
        for fen in [
            "4k3/8/8/8/3p4/8/8/4K3 b - e3 0 1",
            "4k3/8/8/8/3pP3/8/4P3/4K3 b - e3 0 1",
            "4k3/8/8/8/3pP3/4N3/8/4K3 b - e3 0 1",
            "4k3/8/8/8/3pp3/8/8/4K3 b - e3 0 1",
        ] {
            assert!(
                matches!(Board::try_from_fen(fen), Err(FenError::InvalidEnPassant { .. })),
                "{fen}"
            );
        }
        assert!(Board::try_from_fen("4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1").is_ok());
    }

    #[test]
    fn test_side_not_to_move_in_check_is_rejected() {
        assert_eq!(
            Board::try_from_fen("4k3/8/8/8/8/8/4R3/4K3 w - - 0 1"),
            Err(FenError::OpponentInCheck {
                color: Color::Black
            })
        );
        assert!(Board::try_from_fen("4k3/8/8/8/8/8/4R3/4K3 b - - 0 1").is_ok());
    }
}
