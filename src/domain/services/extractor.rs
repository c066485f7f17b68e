//! Attribute extractor
//!
//! Best-effort extraction of render prims and layer metadata from `usdcat`
//! text output. This is line scanning, not a USD parser: unknown syntax is
//! skipped and missing fields stay empty.

use std::collections::HashMap;

use crate::domain::entities::{LayerMetadata, PrimKind, PrimRecord, SceneDescription};
use crate::domain::value_objects::FrameTemplate;

/// Specifiers that open a prim.
const SPECIFIERS: &[&str] = &["def", "over", "class"];

/// Qualifiers that may precede a property declaration.
const QUALIFIERS: &[&str] = &[
    "uniform", "custom", "varying", "config", "prepend", "append", "add", "delete", "reorder",
];

/// Build a scene description from the two dumps. Layer metadata is taken
/// from `metadata_dump`, falling back to the header of `render_dump`.
pub fn extract_scene(metadata_dump: &str, render_dump: &str) -> SceneDescription {
    let mut metadata = extract_layer_metadata(metadata_dump);
    if metadata.is_empty() {
        metadata = extract_layer_metadata(render_dump);
    }
    SceneDescription::new(metadata, extract_prims(render_dump))
}

/// Read `key = value` lines at the top level of the layer's leading
/// `( ... )` block.
pub fn extract_layer_metadata(dump: &str) -> LayerMetadata {
    let mut metadata = LayerMetadata::default();
    let mut lines = dump.lines().map(str::trim);

    // Find the block opener; anything before it is the `#usda` header.
    loop {
        match lines.next() {
            Some("(") => break,
            Some(line) if line.starts_with("def ") || line.starts_with("over ") => {
                return metadata
            }
            Some(_) => continue,
            None => return metadata,
        }
    }

    let mut depth = 0i32;
    let mut in_doc = false;

    for line in lines {
        if in_doc {
            if line.matches("\"\"\"").count() % 2 == 1 {
                in_doc = false;
            }
            continue;
        }

        if depth == 0 && line == ")" {
            break;
        }

        if depth == 0 {
            if let Some((key, value)) = split_assignment(line) {
                let key = key.split_whitespace().last().unwrap_or(key);
                metadata.insert(key, value);
            }
        }

        if line.matches("\"\"\"").count() % 2 == 1 {
            in_doc = true;
            continue;
        }

        let stripped = strip_quoted(line);
        depth += count(&stripped, &['{', '[', '(']) - count(&stripped, &['}', ']', ')']);
        depth = depth.max(0);
    }

    metadata
}

#[derive(Debug)]
enum Block {
    Prim(String),
    Value,
}

#[derive(Debug)]
enum Collecting {
    /// Multi-line relationship target list
    Targets { prim: usize, relationship: String },
    /// Multi-line `productName.timeSamples` block
    ProductSamples { prim: usize },
}

#[derive(Default)]
struct PrimScanner {
    records: Vec<PrimRecord>,
    index: HashMap<String, usize>,
    stack: Vec<Block>,
    pending: Option<String>,
    paren_depth: i32,
    collecting: Option<Collecting>,
}

/// Recover every prim, with relationships and product names, from a
/// flattened dump.
pub fn extract_prims(dump: &str) -> Vec<PrimRecord> {
    let mut scanner = PrimScanner::default();
    for line in dump.lines() {
        scanner.line(line.trim());
    }
    scanner.records
}

impl PrimScanner {
    fn line(&mut self, line: &str) {
        if line.is_empty() || line.starts_with('#') {
            return;
        }

        if let Some(collecting) = self.collecting.take() {
            self.collect(collecting, line);
            return;
        }

        // Inside a prim's metadata parentheses.
        if self.paren_depth > 0 {
            let stripped = strip_quoted(line);
            self.paren_depth += count(&stripped, &['(']) - count(&stripped, &[')']);
            if self.paren_depth <= 0 {
                self.paren_depth = 0;
                if stripped.trim_end().ends_with('{') {
                    self.open_brace();
                }
            }
            return;
        }

        if let Some((kind, name, rest)) = parse_prim_header(line) {
            self.declare_prim(kind, &name);
            let stripped = strip_quoted(rest);
            self.paren_depth = (count(&stripped, &['(']) - count(&stripped, &[')'])).max(0);
            if self.paren_depth == 0 && stripped.trim_end().ends_with('{') {
                self.open_brace();
            }
            return;
        }

        if line == "{" {
            self.open_brace();
            return;
        }

        if line.starts_with('}') {
            self.stack.pop();
            return;
        }

        match self.stack.last() {
            Some(Block::Prim(path)) => {
                let path = path.clone();
                self.property(&path, line);
            }
            Some(Block::Value) => {
                if opens_block(line) {
                    self.stack.push(Block::Value);
                }
            }
            None => {}
        }
    }

    fn declare_prim(&mut self, kind: Option<String>, name: &str) {
        let parent = self
            .stack
            .iter()
            .rev()
            .find_map(|b| match b {
                Block::Prim(path) => Some(path.as_str()),
                Block::Value => None,
            })
            .unwrap_or("");
        let path = format!("{}/{}", parent, name);

        match self.index.get(&path) {
            Some(&i) => {
                if let Some(kind) = kind {
                    self.records[i].kind = PrimKind::from_type_name(&kind);
                }
            }
            None => {
                let kind = kind
                    .map(|k| PrimKind::from_type_name(&k))
                    .unwrap_or_else(|| PrimKind::Other(String::new()));
                self.index.insert(path.clone(), self.records.len());
                self.records.push(PrimRecord::new(path.clone(), kind));
            }
        }

        self.pending = Some(path);
    }

    fn open_brace(&mut self) {
        match self.pending.take() {
            Some(path) => self.stack.push(Block::Prim(path)),
            None => self.stack.push(Block::Value),
        }
    }

    fn property(&mut self, prim_path: &str, line: &str) {
        let Some(&prim) = self.index.get(prim_path) else {
            return;
        };

        let declaration = strip_qualifiers(line);

        if let Some(rest) = declaration.strip_prefix("rel ") {
            let Some((name, value)) = split_assignment(rest) else {
                return;
            };
            let relationship = name.trim().to_string();
            let targets = relationship_targets(value);
            self.records[prim]
                .relationships
                .entry(relationship.clone())
                .or_default()
                .extend(targets);

            if value.trim_start().starts_with('[') && !value.contains(']') {
                self.collecting = Some(Collecting::Targets { prim, relationship });
            }
            return;
        }

        let Some((lhs, value)) = split_assignment(declaration) else {
            if opens_block(line) {
                self.stack.push(Block::Value);
            }
            return;
        };
        let name = lhs.split_whitespace().last().unwrap_or(lhs);

        match name {
            "productName" => {
                if let Some(text) = quoted_strings(value).first() {
                    self.records[prim].product_name = Some(FrameTemplate::parse(text));
                }
            }
            "productName.timeSamples" => {
                if let Some(first) = quoted_strings(value).first() {
                    self.set_sampled_product_name(prim, first);
                }
                if value.trim_start().starts_with('{') && !value.contains('}') {
                    self.collecting = Some(Collecting::ProductSamples { prim });
                }
            }
            "resolution" => {
                self.records[prim].resolution = parse_int_pair(value);
            }
            _ => {
                if opens_block(value) {
                    self.stack.push(Block::Value);
                }
            }
        }
    }

    fn collect(&mut self, collecting: Collecting, line: &str) {
        match collecting {
            Collecting::Targets { prim, relationship } => {
                let targets = relationship_targets(line);
                self.records[prim]
                    .relationships
                    .entry(relationship.clone())
                    .or_default()
                    .extend(targets);
                if !line.contains(']') {
                    self.collecting = Some(Collecting::Targets { prim, relationship });
                }
            }
            Collecting::ProductSamples { prim } => {
                if let Some(first) = quoted_strings(line).first() {
                    self.set_sampled_product_name(prim, first);
                }
                if !line.contains('}') {
                    self.collecting = Some(Collecting::ProductSamples { prim });
                }
            }
        }
    }

    // Only the first sample counts; later samples differ by frame number.
    fn set_sampled_product_name(&mut self, prim: usize, path: &str) {
        let record = &mut self.records[prim];
        if record.product_name.is_none() {
            record.product_name = Some(FrameTemplate::from_frame_path(path));
        }
    }
}

/// Parse `def Type "name" ...`; returns (type, name, rest of line).
fn parse_prim_header(line: &str) -> Option<(Option<String>, String, &str)> {
    let (specifier, rest) = line.split_once(char::is_whitespace)?;
    if !SPECIFIERS.contains(&specifier) {
        return None;
    }
    let rest = rest.trim_start();

    let open = rest.find('"')?;
    let type_name = rest[..open].trim();
    if type_name.contains(char::is_whitespace) || type_name.contains('=') {
        return None;
    }

    let after_open = &rest[open + 1..];
    let close = after_open.find('"')?;
    let name = &after_open[..close];
    if name.is_empty() {
        return None;
    }

    let kind = (!type_name.is_empty()).then(|| type_name.to_string());
    Some((kind, name.to_string(), &after_open[close + 1..]))
}

fn strip_qualifiers(line: &str) -> &str {
    let mut rest = line;
    loop {
        let Some((word, tail)) = rest.split_once(char::is_whitespace) else {
            return rest;
        };
        if QUALIFIERS.contains(&word) {
            rest = tail.trim_start();
        } else {
            return rest;
        }
    }
}

/// Split `lhs = rhs` on the first ` = ` outside quotes, tolerating
/// irregular spacing.
fn split_assignment(line: &str) -> Option<(&str, &str)> {
    let mut in_quotes = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '=' if !in_quotes => {
                let lhs = line[..i].trim();
                if lhs.is_empty() {
                    return None;
                }
                return Some((lhs, line[i + 1..].trim()));
            }
            _ => {}
        }
    }
    None
}

fn relationship_targets(text: &str) -> Vec<String> {
    let mut targets = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find('<') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('>') else {
            break;
        };
        let target = after[..end].trim();
        if !target.is_empty() {
            targets.push(target.to_string());
        }
        rest = &after[end + 1..];
    }
    targets
}

fn quoted_strings(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find('"') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('"') else {
            break;
        };
        out.push(&after[..end]);
        rest = &after[end + 1..];
    }
    out
}

fn parse_int_pair(text: &str) -> Option<(u32, u32)> {
    let inner = text.trim().strip_prefix('(')?;
    let inner = &inner[..inner.find(')')?];
    let (a, b) = inner.split_once(',')?;
    Some((a.trim().parse().ok()?, b.trim().parse().ok()?))
}

fn opens_block(text: &str) -> bool {
    let stripped = strip_quoted(text);
    let stripped = stripped.trim_end();
    stripped.ends_with('{') && !stripped.contains('}')
}

/// Blank out quoted text so brackets inside strings are not counted.
fn strip_quoted(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut in_quotes = false;
    for c in line.chars() {
        if c == '"' {
            in_quotes = !in_quotes;
            continue;
        }
        if !in_quotes {
            out.push(c);
        }
    }
    out
}

fn count(text: &str, chars: &[char]) -> i32 {
    text.chars().filter(|c| chars.contains(c)).count() as i32
}
