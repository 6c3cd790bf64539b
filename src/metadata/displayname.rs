//! Display-name derivation for field, message and enum identifiers.
//!
//! Identifiers arrive in whatever convention the schema author used
//! (`AssetIDs`, `resource_type`, `map1`) and are turned into the
//! human-oriented form shown in descriptions and table headers. The split
//! rules are deliberately conservative around acronym runs so that `IDs`
//! or `EC2` survive as single words.

/// Derives a human-readable display name from an identifier.
///
/// Words are split at underscores and at case/digit boundaries and joined
/// with single spaces; letter case is never changed. Runs of two or more
/// uppercase letters are kept together; when such a run is followed by a
/// lowercase word of at least two letters, the run's last letter starts
/// that word (`HTTPServer` → `HTTP Server`), while a single trailing
/// lowercase letter stays attached to the run (`AssetIDs` → `Asset IDs`).
/// Digits split from a preceding lowercase letter (`map1` → `map 1`) but
/// stay attached to an uppercase run (`EC2Instance` → `EC2 Instance`).
///
/// # Examples
///
/// ```rust
/// use fieldscope::metadata::display_name;
///
/// assert_eq!(display_name("AssetIDs"), "Asset IDs");
/// assert_eq!(display_name("EC2Instance"), "EC2 Instance");
/// assert_eq!(display_name("Uint64Value"), "Uint 64 Value");
/// assert_eq!(display_name("resource_type"), "resource type");
/// ```
#[must_use]
pub fn display_name(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut words: Vec<String> = Vec::new();
    let mut cur = String::new();

    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        if ch == '_' || ch.is_whitespace() {
            flush(&mut words, &mut cur);
            i += 1;
            continue;
        }

        match cur.chars().last() {
            None => cur.push(ch),
            Some(prev) => {
                let starts_word = (prev.is_lowercase() && ch.is_uppercase())
                    || (prev.is_ascii_digit() && ch.is_uppercase())
                    || (prev.is_lowercase() && ch.is_ascii_digit());

                if starts_word {
                    flush(&mut words, &mut cur);
                    cur.push(ch);
                } else if prev.is_uppercase() && ch.is_lowercase() {
                    let run = cur.chars().rev().take_while(|c| c.is_uppercase()).count();
                    let suffix = chars[i..].iter().take_while(|c| c.is_lowercase()).count();
                    if run >= 2 && suffix >= 2 {
                        // The run's last letter belongs to the lowercase word.
                        let last = cur.pop().unwrap_or_default();
                        flush(&mut words, &mut cur);
                        cur.push(last);
                    }
                    cur.push(ch);
                } else {
                    cur.push(ch);
                }
            }
        }
        i += 1;
    }
    flush(&mut words, &mut cur);
    words.join(" ")
}

fn flush(words: &mut Vec<String>, cur: &mut String) {
    if !cur.is_empty() {
        words.push(std::mem::take(cur));
    }
}
