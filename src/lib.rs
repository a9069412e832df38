pub mod d17_lib;
pub mod helpers;
