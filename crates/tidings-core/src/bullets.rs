//! Bullet extraction — raw generated prose to a bounded list of display
//! lines.
//!
//! Generated text is not guaranteed to use list syntax, so extraction is
//! two-tier: explicit list lines when any are present, otherwise the leading
//! sentences. No escaping happens here; display encoding is the renderer's
//! job.

/// Maximum number of bullets returned.
pub const MAX_BULLETS: usize = 5;

/// Number of sentences kept when the text contains no list lines.
const FALLBACK_SENTENCES: usize = 3;

/// Extract up to [`MAX_BULLETS`] display bullets from `content`.
///
/// A line counts as a list item when, after trimming, it starts with `-`,
/// `*`, `•`, or an ASCII digit. Leading markers (`- `, `* `, `• `, `3. `)
/// are stripped from kept lines. When no line qualifies, the first
/// sentences of the text are returned instead, terminators included.
pub fn to_bullets(content: &str) -> Vec<String> {
  let bullets: Vec<String> = content
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty())
    .filter(|line| is_list_item(line))
    .map(strip_markers)
    .take(MAX_BULLETS)
    .collect();

  if !bullets.is_empty() {
    return bullets;
  }

  split_sentences(content)
    .into_iter()
    .map(|s| s.trim().to_owned())
    .filter(|s| !s.is_empty())
    .take(FALLBACK_SENTENCES)
    .collect()
}

fn is_list_item(line: &str) -> bool {
  line
    .chars()
    .next()
    .is_some_and(|c| matches!(c, '-' | '*' | '•') || c.is_ascii_digit())
}

/// Strip one leading bullet marker, then one leading `<digits>.` prefix.
/// Applied in that order so `- 1. item` reduces to `item`.
fn strip_markers(line: &str) -> String {
  let rest = match line.strip_prefix(['-', '*', '•']) {
    Some(stripped) => stripped.trim_start(),
    None => line,
  };
  strip_number_prefix(rest).to_owned()
}

fn strip_number_prefix(line: &str) -> &str {
  let digits =
    line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
  if digits == 0 {
    return line;
  }
  // Only a literal dot after the digits marks a numbered item; `10) foo`
  // and plain years pass through untouched.
  match line[digits..].strip_prefix('.') {
    Some(rest) => rest.trim_start(),
    None => line,
  }
}

/// Split into sentences, keeping terminal punctuation with each sentence.
/// Trailing text with no terminator is dropped.
fn split_sentences(text: &str) -> Vec<String> {
  let mut sentences = Vec::new();
  let mut current = String::new();
  let mut in_terminator = false;

  for c in text.chars() {
    if matches!(c, '.' | '!' | '?') {
      // A terminator with nothing accumulated cannot open a sentence.
      if !current.is_empty() {
        current.push(c);
        in_terminator = true;
      }
    } else {
      if in_terminator {
        sentences.push(std::mem::take(&mut current));
        in_terminator = false;
      }
      current.push(c);
    }
  }
  if in_terminator {
    sentences.push(current);
  }

  sentences
}
