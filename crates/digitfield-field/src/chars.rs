//! Glyph and sequence constants for the particle field.

/// Digit sequences a particle can walk through.
pub const SEQUENCES: [[u8; 10]; 4] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [1, 3, 5, 7, 9, 1, 3, 5, 7, 9],
    [0, 2, 4, 6, 8, 0, 2, 4, 6, 8],
    [3, 5, 1, 8, 9, 2, 4, 7, 6, 0],
];

/// Characters used to draw each digit.
pub const DIGIT_CHARS: [char; 10] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];
