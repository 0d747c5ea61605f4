//! Flatten template HTML into text blocks for PDF layout.
//!
//! Only the structure a letter needs survives: headings, paragraphs, list
//! items, line breaks and alignment. Inline markup is dropped.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref COMMENT: Regex = Regex::new(r"(?s)<!--.*?-->").unwrap();
    static ref HEAD: Regex = Regex::new(r"(?is)<head\b.*?</head\s*>").unwrap();
    static ref STYLE: Regex = Regex::new(r"(?is)<style\b.*?</style\s*>").unwrap();
    static ref SCRIPT: Regex = Regex::new(r"(?is)<script\b.*?</script\s*>").unwrap();
    static ref TAG: Regex = Regex::new(r"(?s)<\s*(/)?\s*([A-Za-z][A-Za-z0-9]*)([^>]*)>").unwrap();
    static ref ENTITY: Regex = Regex::new(r"&(#[xX][0-9A-Fa-f]+|#[0-9]+|[A-Za-z]+);").unwrap();
}

const BLOCK_TAGS: &[&str] = &[
    "p", "div", "li", "tr", "table", "ul", "ol", "section", "article", "header", "footer",
    "blockquote", "hr", "h1", "h2", "h3", "h4", "h5", "h6", "body", "html",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Heading(u8),
    Paragraph,
    ListItem,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    pub kind: BlockKind,
    pub align: Align,
    pub text: String,
}

struct BlockBuilder {
    blocks: Vec<TextBlock>,
    buffer: String,
    kind: BlockKind,
    align: Align,
}

impl BlockBuilder {
    fn new() -> Self {
        Self {
            blocks: Vec::new(),
            buffer: String::new(),
            kind: BlockKind::Paragraph,
            align: Align::Left,
        }
    }

    fn flush(&mut self) {
        let decoded = decode_entities(&self.buffer);
        let text = decoded.split_whitespace().collect::<Vec<_>>().join(" ");
        self.buffer.clear();
        if !text.is_empty() {
            self.blocks.push(TextBlock {
                kind: self.kind,
                align: self.align,
                text,
            });
        }
    }

    fn open_block(&mut self, name: &str, attrs: &str) {
        self.flush();
        self.kind = match name {
            "li" => BlockKind::ListItem,
            _ => heading_level(name).map_or(BlockKind::Paragraph, BlockKind::Heading),
        };
        self.align = parse_align(attrs).unwrap_or(Align::Left);
    }

    fn close_block(&mut self) {
        self.flush();
        self.kind = BlockKind::Paragraph;
        self.align = Align::Left;
    }
}

/// Convert HTML into ordered text blocks.
pub fn html_to_blocks(html: &str) -> Vec<TextBlock> {
    let cleaned = COMMENT.replace_all(html, "");
    let cleaned = HEAD.replace_all(&cleaned, "");
    let cleaned = STYLE.replace_all(&cleaned, "");
    let cleaned = SCRIPT.replace_all(&cleaned, "");

    let mut builder = BlockBuilder::new();
    let mut last_end = 0;

    for caps in TAG.captures_iter(&cleaned) {
        let Some(whole) = caps.get(0) else { continue };
        builder.buffer.push_str(&cleaned[last_end..whole.start()]);
        last_end = whole.end();

        let closing = caps.get(1).is_some();
        let name = caps[2].to_ascii_lowercase();
        let attrs = caps.get(3).map_or("", |m| m.as_str());

        match name.as_str() {
            "br" => builder.flush(),
            "td" | "th" => builder.buffer.push(' '),
            tag if BLOCK_TAGS.contains(&tag) => {
                if closing {
                    builder.close_block();
                } else {
                    builder.open_block(tag, attrs);
                }
            }
            _ => {}
        }
    }

    builder.buffer.push_str(&cleaned[last_end..]);
    builder.flush();
    builder.blocks
}

/// Number of visible characters across all blocks.
pub fn text_length(blocks: &[TextBlock]) -> usize {
    blocks.iter().map(|block| block.text.chars().count()).sum()
}

fn heading_level(name: &str) -> Option<u8> {
    let level = name.strip_prefix('h')?.parse::<u8>().ok()?;
    (1..=6).contains(&level).then_some(level)
}

fn parse_align(attrs: &str) -> Option<Align> {
    let normalized: String = attrs
        .to_ascii_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '"' && *c != '\'')
        .collect();

    if normalized.contains("align:center") || normalized.contains("align=center") {
        Some(Align::Center)
    } else if normalized.contains("align:right") || normalized.contains("align=right") {
        Some(Align::Right)
    } else {
        None
    }
}

/// Decode the HTML entities that show up in Spanish letters.
pub fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                named_entity(entity)
            };
            decoded.map_or_else(|| caps[0].to_string(), |c| c.to_string())
        })
        .into_owned()
}

fn named_entity(name: &str) -> Option<char> {
    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "aacute" => 'á',
        "eacute" => 'é',
        "iacute" => 'í',
        "oacute" => 'ó',
        "uacute" => 'ú',
        "Aacute" => 'Á',
        "Eacute" => 'É',
        "Iacute" => 'Í',
        "Oacute" => 'Ó',
        "Uacute" => 'Ú',
        "ntilde" => 'ñ',
        "Ntilde" => 'Ñ',
        "uuml" => 'ü',
        "Uuml" => 'Ü',
        "ordm" => 'º',
        "ordf" => 'ª',
        "deg" => '°',
        "iquest" => '¿',
        "iexcl" => '¡',
        "laquo" => '«',
        "raquo" => '»',
        "ndash" => '–',
        "mdash" => '—',
        _ => return None,
    };
    Some(c)
}
