//! Positional marker arguments (`y/<year>`, `t/<term>`, `m/<credits>`).
//!
//! A marker is a letter followed by `/`; its value runs up to the next marker
//! or the end of the input. Markers need no whitespace around them, so
//! `CS1010y/1t/2` and `CS1010 y/1 t/2` tokenize the same way.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Year,
    Term,
    Credits,
}

impl Marker {
    fn from_byte(byte: u8) -> Option<Self> {
        match byte.to_ascii_lowercase() {
            b'y' => Some(Marker::Year),
            b't' => Some(Marker::Term),
            b'm' => Some(Marker::Credits),
            _ => None,
        }
    }

    pub fn prefix(self) -> &'static str {
        match self {
            Marker::Year => "y/",
            Marker::Term => "t/",
            Marker::Credits => "m/",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagError {
    Missing(Marker),
    Unexpected(Marker),
    Duplicate(Marker),
    OutOfOrder(Marker),
    InvalidNumber { marker: Marker, value: String },
    StrayText(String),
}

impl fmt::Display for FlagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagError::Missing(marker) => write!(f, "missing {}", marker.prefix()),
            FlagError::Unexpected(marker) => write!(f, "unexpected {}", marker.prefix()),
            FlagError::Duplicate(marker) => write!(f, "{} given twice", marker.prefix()),
            FlagError::OutOfOrder(marker) => write!(f, "{} out of order", marker.prefix()),
            FlagError::InvalidNumber { marker, value } => {
                write!(f, "{} expects a number, got '{}'", marker.prefix(), value)
            }
            FlagError::StrayText(text) => write!(f, "unexpected text '{}'", text),
        }
    }
}

/// Which markers a command accepts. Required markers must appear in the
/// listed order; optional ones may appear anywhere after the first marker.
#[derive(Debug, Clone, Copy)]
pub struct FlagLayout {
    pub required: &'static [Marker],
    pub optional: &'static [Marker],
}

impl FlagLayout {
    pub const NONE: FlagLayout = FlagLayout {
        required: &[],
        optional: &[],
    };
    pub const YEAR: FlagLayout = FlagLayout {
        required: &[Marker::Year],
        optional: &[],
    };
    pub const YEAR_TERM: FlagLayout = FlagLayout {
        required: &[Marker::Year, Marker::Term],
        optional: &[],
    };
    pub const YEAR_TERM_CREDITS: FlagLayout = FlagLayout {
        required: &[Marker::Year, Marker::Term],
        optional: &[Marker::Credits],
    };
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagArgs {
    pub year: Option<u32>,
    pub term: Option<u32>,
    pub credits: Option<u32>,
}

impl FlagArgs {
    fn slot(&mut self, marker: Marker) -> &mut Option<u32> {
        match marker {
            Marker::Year => &mut self.year,
            Marker::Term => &mut self.term,
            Marker::Credits => &mut self.credits,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFlags<'a> {
    /// Trimmed text before the first marker.
    pub leading: &'a str,
    pub args: FlagArgs,
}

/// Splits `input` at every marker occurrence.
pub fn split_markers(input: &str) -> (&str, Vec<(Marker, &str)>) {
    let bytes = input.as_bytes();
    let mut starts = Vec::new();
    let mut i = 0;
    while i + 1 < bytes.len() {
        if bytes[i + 1] == b'/' {
            if let Some(marker) = Marker::from_byte(bytes[i]) {
                starts.push((i, marker));
                i += 2;
                continue;
            }
        }
        i += 1;
    }

    let leading_end = starts.first().map_or(input.len(), |(start, _)| *start);
    let mut segments = Vec::with_capacity(starts.len());
    for (index, (start, marker)) in starts.iter().enumerate() {
        let end = starts.get(index + 1).map_or(input.len(), |(next, _)| *next);
        segments.push((*marker, &input[start + 2..end]));
    }
    (&input[..leading_end], segments)
}

pub fn parse_flags(input: &str, layout: FlagLayout) -> Result<ParsedFlags<'_>, FlagError> {
    let (leading, segments) = split_markers(input);
    let mut args = FlagArgs::default();
    let mut next_required = 0;

    for (marker, raw) in segments {
        if layout.required.contains(&marker) {
            if args.slot(marker).is_some() {
                return Err(FlagError::Duplicate(marker));
            }
            if layout.required[next_required] != marker {
                return Err(FlagError::OutOfOrder(marker));
            }
            next_required += 1;
        } else if layout.optional.contains(&marker) {
            if next_required == 0 {
                return Err(FlagError::OutOfOrder(marker));
            }
            if args.slot(marker).is_some() {
                return Err(FlagError::Duplicate(marker));
            }
        } else {
            return Err(FlagError::Unexpected(marker));
        }

        let value = raw.trim();
        let number = value.parse::<u32>().map_err(|_| FlagError::InvalidNumber {
            marker,
            value: value.to_string(),
        })?;
        *args.slot(marker) = Some(number);
    }

    if let Some(missing) = layout.required.get(next_required) {
        return Err(FlagError::Missing(*missing));
    }

    Ok(ParsedFlags {
        leading: leading.trim(),
        args,
    })
}

/// Like [`parse_flags`] but rejects any text before the first marker.
pub fn parse_bare_flags(input: &str, layout: FlagLayout) -> Result<FlagArgs, FlagError> {
    let parsed = parse_flags(input, layout)?;
    if !parsed.leading.is_empty() {
        return Err(FlagError::StrayText(parsed.leading.to_string()));
    }
    Ok(parsed.args)
}
