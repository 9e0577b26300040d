//! Placeholder conversion between canonical and Android printf syntax.
//!
//! Both sides use `%[index$][modifiers]conversion` markers. The canonical
//! form uses `@` for string arguments and prefers unnumbered markers; Android
//! uses `s` and needs explicit positions as soon as a value has more than one
//! argument. The two directions have different safety rules:
//!
//! - [`to_canonical`] only strips positions when they read `1$, 2$, 3$, ...`
//!   from left to right, because then they carry no information.
//! - [`to_platform`] only adds positions when none are present yet and
//!   there are at least two markers.
//!
//! Anything that does not fit those rules keeps its numbering untouched,
//! digit for digit. `%%` is a literal percent sign and never counts as a
//! marker; `%n` is a marker but consumes no argument, so it is never counted
//! or numbered either.

/// One `%` marker found in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Marker<'a> {
    index: Option<usize>,
    /// Position digits as written, without the `$`. Empty when unnumbered.
    position: &'a str,
    /// Flags, width, precision and length modifiers between the position and the conversion.
    modifiers: &'a str,
    conversion: char,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'a> {
    Text(&'a str),
    Marker(Marker<'a>),
}

/// What [`render`] writes in front of a marker's modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    /// The position as written, if any.
    Keep,
    Drop,
    Number(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Text,
    /// Just read `%`.
    Percent,
    /// Reading digits that are either a position (if `$` follows) or a width.
    Digits,
    /// Past the position, reading flags/width/precision/length.
    Modifiers,
}

const CANONICAL_STRING: char = '@';
const PLATFORM_STRING: char = 's';
/// Conversion that writes nothing and takes no argument.
const NO_ARGUMENT: char = 'n';

fn is_flag(c: char) -> bool {
    matches!(c, '-' | '#' | '+' | ',' | '(' | '.')
}

fn is_length_modifier(c: char) -> bool {
    matches!(c, 'h' | 'l' | 'q' | 'L' | 'z' | 'j' | 't')
}

fn is_conversion(c: char) -> bool {
    c == CANONICAL_STRING || (c.is_ascii_alphabetic() && !is_length_modifier(c))
}

/// Splits `input` into literal text and markers with a single left-to-right pass.
///
/// A `%` that is not followed by a complete marker stays part of the text.
fn scan(input: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut state = State::Text;
    let mut text_start = 0;
    let mut marker_start = 0;
    let mut modifiers_start = 0;
    let mut number: usize = 0;
    let mut index = None;
    let mut position = "";

    for (pos, c) in input.char_indices() {
        let mut finished = None;
        state = match state {
            State::Text => {
                if c == '%' {
                    marker_start = pos;
                    State::Percent
                } else {
                    State::Text
                }
            }
            State::Percent => {
                index = None;
                position = "";
                modifiers_start = pos;
                if c == '%' {
                    State::Text
                } else if let Some(d) = c.to_digit(10) {
                    number = d as usize;
                    State::Digits
                } else if is_flag(c) || is_length_modifier(c) {
                    State::Modifiers
                } else if is_conversion(c) {
                    finished = Some(c);
                    State::Text
                } else {
                    State::Text
                }
            }
            State::Digits => {
                if let Some(d) = c.to_digit(10) {
                    number = number.saturating_mul(10).saturating_add(d as usize);
                    State::Digits
                } else if c == '$' {
                    index = Some(number);
                    position = &input[modifiers_start..pos];
                    modifiers_start = pos + 1;
                    State::Modifiers
                } else if is_flag(c) || is_length_modifier(c) {
                    State::Modifiers
                } else if is_conversion(c) {
                    finished = Some(c);
                    State::Text
                } else if c == '%' {
                    marker_start = pos;
                    State::Percent
                } else {
                    State::Text
                }
            }
            State::Modifiers => {
                if c.is_ascii_digit() || is_flag(c) || is_length_modifier(c) {
                    State::Modifiers
                } else if is_conversion(c) {
                    finished = Some(c);
                    State::Text
                } else if c == '%' {
                    marker_start = pos;
                    State::Percent
                } else {
                    State::Text
                }
            }
        };

        if let Some(conversion) = finished {
            if text_start < marker_start {
                segments.push(Segment::Text(&input[text_start..marker_start]));
            }
            segments.push(Segment::Marker(Marker {
                index,
                position,
                modifiers: &input[modifiers_start..pos],
                conversion,
            }));
            text_start = pos + c.len_utf8();
        }
    }

    if text_start < input.len() {
        segments.push(Segment::Text(&input[text_start..]));
    }
    segments
}

impl Marker<'_> {
    fn takes_argument(&self) -> bool {
        self.conversion != NO_ARGUMENT
    }
}

/// Markers that consume an argument, in textual order.
fn argument_markers<'s, 'a>(
    segments: &'s [Segment<'a>],
) -> impl Iterator<Item = &'s Marker<'a>> {
    segments.iter().filter_map(|segment| match segment {
        Segment::Marker(marker) if marker.takes_argument() => Some(marker),
        _ => None,
    })
}

/// Reassembles `segments`, letting `rewrite` pick the position and
/// conversion of each argument marker (called with the marker's 1-based
/// occurrence among argument markers). Other markers are copied as written.
fn render<F>(segments: &[Segment<'_>], mut rewrite: F) -> String
where
    F: FnMut(usize, &Marker<'_>) -> (Position, char),
{
    let mut out = String::new();
    let mut occurrence = 0;
    for segment in segments {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Marker(marker) => {
                let (position, conversion) = if marker.takes_argument() {
                    occurrence += 1;
                    rewrite(occurrence, marker)
                } else {
                    (Position::Keep, marker.conversion)
                };
                out.push('%');
                match position {
                    Position::Keep if marker.index.is_some() => {
                        out.push_str(marker.position);
                        out.push('$');
                    }
                    Position::Number(index) => {
                        out.push_str(&index.to_string());
                        out.push('$');
                    }
                    Position::Keep | Position::Drop => {}
                }
                out.push_str(marker.modifiers);
                out.push(conversion);
            }
        }
    }
    out
}

/// True when at least one marker is numbered and all markers are numbered
/// `1, 2, 3, ...` in textual order.
fn has_redundant_positions(segments: &[Segment<'_>]) -> bool {
    let mut expected = 1;
    for marker in argument_markers(segments) {
        match marker.index {
            Some(index) if index == expected => expected += 1,
            _ => return false,
        }
    }
    expected > 1
}

fn swap_string_conversion(conversion: char, from: char, to: char) -> char {
    if conversion == from { to } else { conversion }
}

/// Converts Android placeholders to canonical ones.
///
/// `%s` becomes `%@`. Positions are dropped when they merely restate the
/// textual order; otherwise they are kept exactly as written.
///
/// ```rust
/// use android_strings_codec::placeholder::to_canonical;
/// assert_eq!(to_canonical("%1$s likes %2$s"), "%@ likes %@");
/// assert_eq!(to_canonical("%2$s likes %1$s"), "%2$@ likes %1$@");
/// ```
pub fn to_canonical(input: &str) -> String {
    let segments = scan(input);
    let strip = has_redundant_positions(&segments);
    render(&segments, |_, marker| {
        let position = if strip { Position::Drop } else { Position::Keep };
        (
            position,
            swap_string_conversion(marker.conversion, PLATFORM_STRING, CANONICAL_STRING),
        )
    })
}

/// Converts canonical placeholders to Android ones.
///
/// `%@` becomes `%s`. When a value has two or more markers and none of them
/// is numbered yet, each marker gets its occurrence as position.
///
/// ```rust
/// use android_strings_codec::placeholder::to_platform;
/// assert_eq!(
///     to_platform("Hello %@, you have %d messages"),
///     "Hello %1$s, you have %2$d messages"
/// );
/// assert_eq!(to_platform("Hello %@"), "Hello %s");
/// ```
pub fn to_platform(input: &str) -> String {
    let segments = scan(input);
    let count = argument_markers(&segments).count();
    let numbered = argument_markers(&segments).any(|marker| marker.index.is_some());
    let number = count > 1 && !numbered;
    render(&segments, |occurrence, marker| {
        let position = if number {
            Position::Number(occurrence)
        } else {
            Position::Keep
        };
        (
            position,
            swap_string_conversion(marker.conversion, CANONICAL_STRING, PLATFORM_STRING),
        )
    })
}
