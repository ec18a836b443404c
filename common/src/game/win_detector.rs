use super::board::{Board, WINNING_LINES};
use super::types::{Mark, WinningLine};

pub fn check_win(board: &Board) -> Option<Mark> {
    for line in WINNING_LINES {
        let [a, b, c] = line;
        let mark = board.cell(a);
        if mark == Mark::Empty {
            continue;
        }
        if board.cell(b) == mark && board.cell(c) == mark {
            return Some(mark);
        }
    }

    None
}

pub fn check_win_with_line(board: &Board) -> Option<WinningLine> {
    for line in WINNING_LINES {
        let [a, b, c] = line;
        let mark = board.cell(a);
        if mark == Mark::Empty {
            continue;
        }
        if board.cell(b) == mark && board.cell(c) == mark {
            return Some(WinningLine::new(mark, line));
        }
    }

    None
}
