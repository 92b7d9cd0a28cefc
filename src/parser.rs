//! Scrapes trail blocks out of a free-text model reply.
//!
//! The reply is split into blocks on blank lines. Inside a block every
//! line is stripped of markdown decoration and matched against known
//! `Key: value` labels. A block with no recognised label is prose (an
//! intro or sign-off) and is dropped, unless it is a lone heading, which
//! names the labelled block after it. A labelled block with no name
//! continues the trail before it. Nothing here fails: a reply we cannot
//! read yields no trails and callers fall back to the raw text.

use crate::models::Trail;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Difficulty,
    Length,
    Elevation,
    Description,
    Features,
    Link,
}

impl Field {
    fn from_label(label: &str) -> Option<Self> {
        let label = label.to_ascii_lowercase();
        let field = match label.as_str() {
            "name" | "trail" | "trail name" => Self::Name,
            "difficulty" | "difficulty level" => Self::Difficulty,
            "length" | "distance" | "trail length" => Self::Length,
            "elevation" | "elevation gain" => Self::Elevation,
            "description" | "brief description" => Self::Description,
            "features" | "notable features" | "highlights" => Self::Features,
            "link" | "alltrails" | "alltrails link" | "url" => Self::Link,
            _ => return None,
        };
        Some(field)
    }

    const ALL: [Field; 7] = [
        Self::Name,
        Self::Difficulty,
        Self::Length,
        Self::Elevation,
        Self::Description,
        Self::Features,
        Self::Link,
    ];
}

/// Trails read from a reply, plus how many trail-like blocks could not
/// be attributed to any trail.
#[derive(Debug, Default)]
pub struct ParsedReply {
    pub trails: Vec<Trail>,
    pub dropped: usize,
}

pub fn parse_trails(reply: &str) -> Vec<Trail> {
    parse_reply(reply).trails
}

pub fn parse_reply(reply: &str) -> ParsedReply {
    let mut parsed = ParsedReply::default();
    let mut heading: Option<String> = None;

    for lines in blocks(reply) {
        let block = read_block(&lines);

        if !block.labelled {
            heading = match block.leading.as_slice() {
                [only] if is_heading(lines[0]) => Some(only.clone()),
                _ => None,
            };
            continue;
        }

        let Block { mut trail, leading, .. } = block;
        let mut leading = leading.into_iter();
        let pending = heading.take();

        if trail.name.is_empty() {
            if let Some(name) = leading.next().or(pending) {
                trail.name = name;
            }
        } else if let Some(unused) = pending {
            if !parsed.trails.is_empty() {
                tracing::debug!("Dropping heading with no fields: {}", unused);
                parsed.dropped += 1;
            }
        }

        let extra: Vec<String> = leading.collect();
        if !extra.is_empty() {
            let extra = extra.join(" ");
            trail.description = Some(match trail.description.take() {
                Some(description) => format!("{extra} {description}"),
                None => extra,
            });
        }

        if !trail.name.is_empty() {
            parsed.trails.push(trail);
        } else if let Some(previous) = parsed.trails.last_mut() {
            merge(previous, trail);
        } else {
            tracing::debug!("Dropping block with no trail name: {}", lines.join(" / "));
            parsed.dropped += 1;
        }
    }

    parsed
}

fn blocks(reply: &str) -> Vec<Vec<&str>> {
    let mut all = Vec::new();
    let mut current = Vec::new();
    for line in reply.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                all.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        all.push(current);
    }
    all
}

struct Block {
    trail: Trail,
    /// Unlabelled lines before the first label.
    leading: Vec<String>,
    labelled: bool,
}

fn read_block(lines: &[&str]) -> Block {
    let mut block = Block {
        trail: Trail::default(),
        leading: Vec::new(),
        labelled: false,
    };
    // A label with nothing after the colon collects the lines below it.
    let mut open: Option<Field> = None;

    for line in lines {
        let line = clean_line(line);
        if line.is_empty() {
            continue;
        }
        if let Some((field, value)) = split_label(&line) {
            block.labelled = true;
            if value.is_empty() {
                open = Some(field);
            } else {
                match field {
                    Field::Description | Field::Features => append_field(&mut block.trail, field, value),
                    _ => set_field(&mut block.trail, field, value.to_string()),
                }
                open = None;
            }
            continue;
        }
        match open {
            Some(field) => append_field(&mut block.trail, field, &line),
            None if !block.labelled => block.leading.push(line),
            None => append_field(&mut block.trail, Field::Description, &line),
        }
    }

    block
}

/// A lone line the model decorated (`### 2. Name`, `**Name**`).
fn is_heading(raw: &str) -> bool {
    clean_line(raw) != raw.trim()
}

fn field_mut(trail: &mut Trail, field: Field) -> Option<&mut Option<String>> {
    match field {
        Field::Name => None,
        Field::Difficulty => Some(&mut trail.difficulty),
        Field::Length => Some(&mut trail.length),
        Field::Elevation => Some(&mut trail.elevation_gain),
        Field::Description => Some(&mut trail.description),
        Field::Features => Some(&mut trail.features),
        Field::Link => Some(&mut trail.link),
    }
}

fn set_field(trail: &mut Trail, field: Field, value: String) {
    match field_mut(trail, field) {
        Some(slot) => *slot = Some(value),
        None => trail.name = value,
    }
}

fn append_field(trail: &mut Trail, field: Field, value: &str) {
    if field == Field::Name {
        trail.name = match trail.name.as_str() {
            "" => value.to_string(),
            name => format!("{name} {value}"),
        };
        return;
    }
    let separator = if field == Field::Features { ", " } else { " " };
    let Some(slot) = field_mut(trail, field) else {
        return;
    };
    *slot = Some(match slot.take() {
        Some(existing) => format!("{existing}{separator}{value}"),
        None => value.to_string(),
    });
}

/// Folds a nameless block into the trail it continues.
fn merge(into: &mut Trail, mut from: Trail) {
    for field in Field::ALL {
        let value = field_mut(&mut from, field).and_then(Option::take);
        if let Some(value) = value {
            append_field(into, field, &value);
        }
    }
}

/// Splits `Label: value` when the label is one we know.
fn split_label(line: &str) -> Option<(Field, &str)> {
    let (label, value) = line.split_once(':')?;
    // Models like to decorate labels with emoji.
    let label = label.trim_matches(|c: char| !c.is_alphanumeric());
    let field = Field::from_label(label)?;
    Some((field, value.trim()))
}

/// Drops heading hashes, emphasis markers and list bullets or numbers.
fn clean_line(line: &str) -> String {
    let line = line.replace("**", "").replace("__", "");
    let mut rest = line.trim().trim_start_matches('#').trim_start();

    for bullet in ["- ", "* ", "• "] {
        if let Some(stripped) = rest.strip_prefix(bullet) {
            rest = stripped.trim_start();
            break;
        }
    }

    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 {
        let after = &rest[digits..];
        let mut chars = after.chars();
        if matches!(chars.next(), Some('.') | Some(')'))
            && chars.next().is_some_and(char::is_whitespace)
        {
            rest = after[1..].trim_start();
        }
    }

    rest.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELLED_REPLY: &str = "\
Here are five trails you might enjoy:

Name: Stawamus Chief
Difficulty: Difficult
Length: 7.0 miles
Elevation Gain: 2,000 feet
Description: Granite monolith with sweeping views 🏔️
Features: Three summits, chains and ladders
Link: https://www.alltrails.com/trail/canada/british-columbia/stawamus-chief

Name: Shannon Falls Loop
Difficulty: Easy
Length: 0.5 miles

Enjoy your hikes!";

    #[test]
    fn labelled_blocks_become_trails() {
        let trails = parse_trails(LABELLED_REPLY);
        assert_eq!(trails.len(), 2);

        let chief = &trails[0];
        assert_eq!(chief.name, "Stawamus Chief");
        assert_eq!(chief.difficulty.as_deref(), Some("Difficult"));
        assert_eq!(chief.length.as_deref(), Some("7.0 miles"));
        assert_eq!(chief.elevation_gain.as_deref(), Some("2,000 feet"));
        assert_eq!(chief.features.as_deref(), Some("Three summits, chains and ladders"));
        assert_eq!(
            chief.link.as_deref(),
            Some("https://www.alltrails.com/trail/canada/british-columbia/stawamus-chief")
        );

        assert_eq!(trails[1].name, "Shannon Falls Loop");
        assert_eq!(trails[1].link, None);
    }

    #[test]
    fn markdown_headings_supply_the_name() {
        let reply = "\
### 1. **Garibaldi Lake** 🌊
* **Difficulty:** Moderate
* **Length:** 11 miles
A turquoise lake beneath glaciers.

### 2. Joffre Lakes
- Difficulty: Moderate
- Distance: 4.7 miles";

        let trails = parse_trails(reply);
        assert_eq!(trails.len(), 2);
        assert_eq!(trails[0].name, "Garibaldi Lake 🌊");
        assert_eq!(trails[0].difficulty.as_deref(), Some("Moderate"));
        assert_eq!(trails[0].length.as_deref(), Some("11 miles"));
        assert_eq!(trails[0].description.as_deref(), Some("A turquoise lake beneath glaciers."));
        assert_eq!(trails[1].name, "Joffre Lakes");
        assert_eq!(trails[1].length.as_deref(), Some("4.7 miles"));
    }

    #[test]
    fn prose_without_labels_yields_nothing() {
        assert!(parse_trails("Sorry, I don't know that city.\n\nTry another one.").is_empty());
        assert!(parse_trails("").is_empty());
    }

    #[test]
    fn emoji_decorated_labels_are_recognised() {
        let trails = parse_trails("Name: Quarry Rock\n🥾 Difficulty: Easy\n📏 Length: 2.4 miles");
        assert_eq!(trails[0].difficulty.as_deref(), Some("Easy"));
        assert_eq!(trails[0].length.as_deref(), Some("2.4 miles"));
    }

    #[test]
    fn urls_are_not_mistaken_for_labels() {
        let trails = parse_trails("Name: Grouse Grind\nhttps://www.alltrails.com/trail/grouse-grind");
        assert_eq!(trails.len(), 1);
        assert_eq!(
            trails[0].description.as_deref(),
            Some("https://www.alltrails.com/trail/grouse-grind")
        );
    }

    #[test]
    fn unlabelled_lines_extend_the_description() {
        let trails = parse_trails("Name: Lynn Loop\nDescription: Forest walk.\nMossy cedars everywhere.");
        assert_eq!(
            trails[0].description.as_deref(),
            Some("Forest walk. Mossy cedars everywhere.")
        );
    }

    #[test]
    fn clean_line_keeps_decimal_numbers() {
        assert_eq!(clean_line("10.5 miles round trip"), "10.5 miles round trip");
        assert_eq!(clean_line("  3) Dog Mountain"), "Dog Mountain");
        assert_eq!(clean_line("## __Bold__ heading"), "Bold heading");
    }

    #[test]
    fn block_with_labels_but_no_name_is_dropped() {
        assert!(parse_trails("Difficulty: Easy\nLength: 2 miles").is_empty());
    }

    #[test]
    fn features_list_in_its_own_paragraph_stays_with_its_trail() {
        let reply = "\
Name: Stawamus Chief
Difficulty: Difficult

Features:
- Three summits
- Chains and ladders

Name: Shannon Falls
Difficulty: Easy";

        let parsed = parse_reply(reply);
        assert_eq!(parsed.dropped, 0);
        assert_eq!(parsed.trails.len(), 2);
        assert_eq!(parsed.trails[0].name, "Stawamus Chief");
        assert_eq!(parsed.trails[0].features.as_deref(), Some("Three summits, Chains and ladders"));
        assert_eq!(parsed.trails[0].description, None);
        assert_eq!(parsed.trails[1].name, "Shannon Falls");
    }

    #[test]
    fn heading_paragraph_names_the_fields_below_it() {
        let reply = "\
### 1. Garibaldi Lake

Difficulty: Moderate
Length: 11 miles

### 2. **Joffre Lakes**

- Difficulty: Moderate";

        let parsed = parse_reply(reply);
        assert_eq!(parsed.dropped, 0);
        assert_eq!(parsed.trails.len(), 2);
        assert_eq!(parsed.trails[0].name, "Garibaldi Lake");
        assert_eq!(parsed.trails[0].length.as_deref(), Some("11 miles"));
        assert_eq!(parsed.trails[1].name, "Joffre Lakes");
    }

    #[test]
    fn empty_name_label_takes_the_next_line() {
        let trails = parse_trails("Name:\nLighthouse Park\nDifficulty: Easy");
        assert_eq!(trails[0].name, "Lighthouse Park");
        assert_eq!(trails[0].difficulty.as_deref(), Some("Easy"));
    }

    #[test]
    fn unattributed_blocks_are_counted() {
        let reply = "\
Difficulty: Easy
Length: 2 miles

Name: Quarry Rock
Difficulty: Easy

3. Lighthouse Park

Name: Dog Mountain";

        let parsed = parse_reply(reply);
        assert_eq!(parsed.trails.len(), 2);
        assert_eq!(parsed.dropped, 2);
    }
}
