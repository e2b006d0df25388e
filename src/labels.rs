/// Fingerspelling letters the classifier is trained on. The letters j and z
/// require motion and are not covered by single-frame hand poses.
pub const GESTURE_LABELS: &[&str] = &[
    "a", "b", "c", "d", "e", "f", "g", "h", "i", "k", "l", "m", "n", "o", "p", "q", "r", "s", "t",
    "u", "v", "w", "x", "y",
];

/// Quiz prompts paired with the letter the signer is expected to show.
pub const QUIZ_QUESTIONS: &[(&str, &str)] = &[
    ("What is the sign for the letter 'A'?", "a"),
    ("How is the letter 'B' represented?", "b"),
    ("Can you demonstrate the sign for 'C'?", "c"),
    ("What does the sign for 'D' look like?", "d"),
    ("How do you sign the letter 'E'?", "e"),
    ("What is the correct handshape for 'F'?", "f"),
    ("How do you represent the letter 'G'?", "g"),
    ("What is the sign for the letter 'H'?", "h"),
    ("How do you sign the letter 'I'?", "i"),
    ("How is the letter 'K' signed?", "k"),
    ("What is the handshape for the letter 'L'?", "l"),
    ("Can you show how to sign the letter 'M'?", "m"),
    ("What does the sign for the letter 'N' look like?", "n"),
    ("How is the letter 'O' represented?", "o"),
    ("What is the sign for the letter 'P'?", "p"),
    ("How do you form the letter 'Q'?", "q"),
    ("What is the handshape for 'R'?", "r"),
    ("How do you sign the letter 'S'?", "s"),
    ("What does the sign for 'T' look like?", "t"),
    ("How is the letter 'U' represented?", "u"),
    ("What is the sign for the letter 'V'?", "v"),
    ("How do you sign the letter 'W'?", "w"),
    ("What is the representation for 'X'?", "x"),
    ("How is the letter 'Y' signed?", "y"),
];

pub fn moves() -> Vec<String> {
    GESTURE_LABELS.iter().map(|label| label.to_string()).collect()
}
