//! Split a command line into a chain of sub-commands on `&&`, `||`, and `;`.

/// Split a command line on chain separators.
///
/// A `;` only separates when the next character is not a word character,
/// so `a;b` stays whole while `a; b` and `a;` split. Segments are trimmed and
/// empty ones dropped.
///
/// This is a lexical split, not a shell parser: quotes, pipes, background
/// `&`, subshells, and here-docs are not interpreted, so `echo 'a && b'`
/// splits inside the quotes.
pub fn split_chain(input: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        let separator = match c {
            '&' | '|' if chars.peek() == Some(&c) => {
                chars.next();
                true
            }
            ';' => !chars.peek().is_some_and(|next| is_word_char(*next)),
            _ => false,
        };

        if separator {
            push_segment(&mut segments, &current);
            current.clear();
        } else {
            current.push(c);
        }
    }

    push_segment(&mut segments, &current);
    segments
}

fn push_segment(segments: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        segments.push(trimmed.to_string());
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
