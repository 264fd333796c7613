// linkshelf state managers
// Managers hold mutable client state: the in-memory bookmark board.

pub mod bookmark_board;
