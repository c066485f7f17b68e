//! Output path templates with frame tokens.
//!
//! Recognised tokens:
//! - `$F`, `$F4`, `${F}`, `${F4}` (Houdini style)
//! - `%d`, `%04d` (printf style)
//! - `####` (hash padding, width = run length)

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Frame { width: usize },
}

/// A parsed output path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl FrameTemplate {
    pub fn parse(raw: &str) -> Self {
        let chars: Vec<char> = raw.chars().collect();
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut i = 0;

        while i < chars.len() {
            if let Some((width, consumed)) = match_token(&chars[i..]) {
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Frame { width });
                i += consumed;
                continue;
            }
            literal.push(chars[i]);
            i += 1;
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self {
            raw: raw.to_string(),
            segments,
        }
    }

    /// Convert a concrete per-frame path into a template by replacing the
    /// digits ending the file stem with printf padding of the same width
    /// (`render.1001.exr` -> `render.%04d.exr`).
    ///
    /// Paths without a trailing frame number are kept as-is.
    pub fn from_frame_path(path: &str) -> Self {
        let name_start = path.rfind(['/', '\\']).map(|i| i + 1).unwrap_or(0);
        let name = &path[name_start..];
        let stem_end = match name.rfind('.') {
            Some(0) | None => name.len(),
            Some(i) => i,
        };

        let stem = name[..stem_end].as_bytes();
        let digits = stem.iter().rev().take_while(|b| b.is_ascii_digit()).count();
        if digits == 0 {
            return Self::parse(path);
        }

        let start = stem_end - digits;
        let templated = format!(
            "{}{}%0{}d{}",
            &path[..name_start],
            &name[..start],
            digits,
            &name[stem_end..]
        );
        Self::parse(&templated)
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn has_frame_token(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Frame { .. }))
    }

    /// Substitute a frame number into every frame token.
    pub fn expand(&self, frame: i64) -> String {
        let mut out = String::with_capacity(self.raw.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Frame { width } => out.push_str(&pad_frame(frame, *width)),
            }
        }
        out
    }

    /// Render with printf padding, the form the farm expects for output
    /// filenames.
    pub fn to_printf(&self) -> String {
        let mut out = String::with_capacity(self.raw.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Frame { width } if *width <= 1 => out.push_str("%d"),
                Segment::Frame { width } => out.push_str(&format!("%0{}d", width)),
            }
        }
        out
    }

    /// Apply a path transform (prefix mapping, separator cleanup) to the
    /// printf rendering of the template.
    pub fn map_path(&self, f: impl Fn(&str) -> String) -> Self {
        Self::parse(&f(&self.to_printf()))
    }
}

impl fmt::Display for FrameTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn pad_frame(frame: i64, width: usize) -> String {
    if frame < 0 {
        format!("-{:0width$}", frame.unsigned_abs(), width = width.saturating_sub(1))
    } else {
        format!("{:0width$}", frame, width = width)
    }
}

/// Returns (width, chars consumed) when a frame token starts at `chars[0]`.
fn match_token(chars: &[char]) -> Option<(usize, usize)> {
    match chars.first()? {
        '$' => match chars.get(1)? {
            'F' => {
                let (width, digits) = read_digits(&chars[2..]);
                // `$FOO` is some other variable, not a frame token.
                if digits == 0 && chars.get(2).is_some_and(|c| c.is_alphanumeric() || *c == '_') {
                    return None;
                }
                Some((width.unwrap_or(1), 2 + digits))
            }
            '{' if chars.get(2) == Some(&'F') => {
                let (width, digits) = read_digits(&chars[3..]);
                if chars.get(3 + digits) == Some(&'}') {
                    Some((width.unwrap_or(1), 4 + digits))
                } else {
                    None
                }
            }
            _ => None,
        },
        '%' => {
            let (width, digits) = read_digits(&chars[1..]);
            if chars.get(1 + digits) == Some(&'d') {
                Some((width.unwrap_or(1), 2 + digits))
            } else {
                None
            }
        }
        '#' => {
            let run = chars.iter().take_while(|c| **c == '#').count();
            Some((run, run))
        }
        _ => None,
    }
}

fn read_digits(chars: &[char]) -> (Option<usize>, usize) {
    let digits: String = chars.iter().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        (None, 0)
    } else {
        (digits.parse().ok(), digits.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_houdini_padding() {
        let template = FrameTemplate::parse("render.$F4.exr");
        assert_eq!(template.expand(1), "render.0001.exr");
        assert_eq!(template.expand(1250), "render.1250.exr");
    }

    #[test]
    fn expands_braced_and_unpadded_tokens() {
        assert_eq!(FrameTemplate::parse("a.${F3}.exr").expand(7), "a.007.exr");
        assert_eq!(FrameTemplate::parse("a.$F.exr").expand(7), "a.7.exr");
        assert_eq!(FrameTemplate::parse("a.%d.exr").expand(12), "a.12.exr");
    }

    #[test]
    fn expands_printf_and_hash_padding() {
        assert_eq!(FrameTemplate::parse("a.%04d.exr").expand(5), "a.0005.exr");
        assert_eq!(FrameTemplate::parse("a.####.exr").expand(5), "a.0005.exr");
    }

    #[test]
    fn negative_frames_keep_total_width() {
        assert_eq!(FrameTemplate::parse("a.$F4.exr").expand(-3), "a.-003.exr");
    }

    #[test]
    fn literal_dollar_and_percent_survive() {
        let template = FrameTemplate::parse("$HIP/100%/$FOO.exr");
        assert!(!template.has_frame_token());
        assert_eq!(template.expand(3), "$HIP/100%/$FOO.exr");
    }

    #[test]
    fn frame_path_becomes_printf_template() {
        let template = FrameTemplate::from_frame_path("/shots/sh010/render.1001.exr");
        assert_eq!(template.to_printf(), "/shots/sh010/render.%04d.exr");
        assert_eq!(template.expand(1002), "/shots/sh010/render.1002.exr");
    }

    #[test]
    fn frame_path_ignores_digits_in_directories() {
        let template = FrameTemplate::from_frame_path("/shots/sh010/beauty.exr");
        assert!(!template.has_frame_token());
        assert_eq!(template.to_printf(), "/shots/sh010/beauty.exr");
    }

    #[test]
    fn frame_path_ignores_digits_inside_the_name() {
        let template = FrameTemplate::from_frame_path("/shots/sh010_beauty.exr");
        assert!(!template.has_frame_token());
    }

    #[test]
    fn to_printf_normalises_all_token_styles() {
        assert_eq!(
            FrameTemplate::parse("render.$F4.exr").to_printf(),
            "render.%04d.exr"
        );
        assert_eq!(FrameTemplate::parse("r.##.exr").to_printf(), "r.%02d.exr");
        assert_eq!(FrameTemplate::parse("r.$F.exr").to_printf(), "r.%d.exr");
    }
}
