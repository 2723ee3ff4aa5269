//! Best-effort parsing of "N variants" completions

/// Split an LLM reply into caption variants
///
/// Accepts the two shapes models actually produce: numbered lines
/// (`1. ...` / `2) ...`) or blocks separated by blank lines. Parsing is
/// best-effort with no structural guarantee from the model, so when neither
/// shape is present the raw text comes back as a single variant.
pub fn split_variants(raw: &str, max: usize) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let numbered = split_numbered(trimmed);
    let variants = if numbered.len() > 1 {
        numbered
    } else {
        split_blocks(trimmed)
    };

    if variants.len() > 1 {
        variants.into_iter().take(max.max(1)).collect()
    } else {
        // Fallback: the whole reply as one variant
        vec![trimmed.to_string()]
    }
}

/// Collect lines starting with `<digits>.` or `<digits>)` as variants
fn split_numbered(text: &str) -> Vec<String> {
    let mut variants: Vec<String> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if let Some(body) = strip_number_prefix(line) {
            if !body.is_empty() {
                variants.push(body.to_string());
            }
        } else if !line.is_empty() {
            // Continuation of the previous variant
            if let Some(last) = variants.last_mut() {
                last.push(' ');
                last.push_str(line);
            }
        }
    }

    variants
}

fn strip_number_prefix(line: &str) -> Option<&str> {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    let rest = &line[digits..];
    rest.strip_prefix('.')
        .or_else(|| rest.strip_prefix(')'))
        .map(str::trim_start)
}

/// Treat blank-line-separated blocks as variants
fn split_blocks(text: &str) -> Vec<String> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(|block| block.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_list_with_dots() {
        let raw = "1. Beyond the threshold.\n2. Ride the wave.\n3. No second peak.";
        let variants = split_variants(raw, 3);
        assert_eq!(
            variants,
            vec!["Beyond the threshold.", "Ride the wave.", "No second peak."]
        );
    }

    #[test]
    fn test_numbered_list_with_parens_and_continuations() {
        let raw = "1) First line\nstill first\n2) Second line";
        let variants = split_variants(raw, 3);
        assert_eq!(variants, vec!["First line still first", "Second line"]);
    }

    #[test]
    fn test_blank_line_blocks() {
        let raw = "Short and sharp.\n\nClimb, don't explain.";
        let variants = split_variants(raw, 3);
        assert_eq!(variants, vec!["Short and sharp.", "Climb, don't explain."]);
    }

    #[test]
    fn test_unstructured_reply_falls_back_to_single_variant() {
        let raw = "The second peak isn't explained. It's climbed.";
        let variants = split_variants(raw, 3);
        assert_eq!(variants, vec![raw]);
    }

    #[test]
    fn test_truncates_to_max() {
        let raw = "1. a\n2. b\n3. c\n4. d";
        assert_eq!(split_variants(raw, 2), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_reply() {
        assert!(split_variants("   \n ", 3).is_empty());
    }
}
