//! Roast markup rendering
//!
//! The service answers with loose HTML (headings, paragraphs, lists, bold).
//! egui has no HTML widget, so the text is flattened into a list of styled
//! blocks. Unknown tags are dropped and their text kept. Plain text with no
//! tags at all is shown line by line.

use crate::theme;
use eframe::egui;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub code: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading(u8, Vec<Span>),
    Paragraph(Vec<Span>),
    Bullet(Vec<Span>),
    Rule,
}

impl Block {
    #[cfg(test)]
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading(_, spans) | Block::Paragraph(spans) | Block::Bullet(spans) => {
                spans.iter().map(|s| s.text.as_str()).collect()
            }
            Block::Rule => String::new(),
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Kind {
    Paragraph,
    Heading(u8),
    Bullet,
}

#[derive(Default)]
struct Builder {
    blocks: Vec<Block>,
    spans: Vec<Span>,
    kind: Option<Kind>,
    bold: u32,
    italic: u32,
    code: u32,
    /// Whitespace seen since the last word
    pending_space: bool,
}

impl Builder {
    fn text(&mut self, raw: &str) {
        for (i, word) in raw.split(char::is_whitespace).enumerate() {
            if i > 0 {
                self.pending_space = true;
            }
            if word.is_empty() {
                continue;
            }
            let at_start = self.spans.is_empty();
            let mut piece = String::new();
            if self.pending_space && !at_start {
                piece.push(' ');
            }
            self.pending_space = false;
            piece.push_str(&decode_entities(word));
            self.push(piece);
        }
    }

    fn push(&mut self, piece: String) {
        let (bold, italic, code) = (self.bold > 0, self.italic > 0, self.code > 0);
        match self.spans.last_mut() {
            Some(last) if last.bold == bold && last.italic == italic && last.code == code => {
                last.text.push_str(&piece);
            }
            _ => self.spans.push(Span {
                text: piece,
                bold,
                italic,
                code,
            }),
        }
    }

    fn line_break(&mut self) {
        let kind = self.kind;
        self.flush();
        // A <br> inside a list item continues the same kind of block
        if kind == Some(Kind::Bullet) {
            self.kind = Some(Kind::Paragraph);
        }
    }

    fn open(&mut self, kind: Kind) {
        self.flush();
        self.kind = Some(kind);
    }

    fn flush(&mut self) {
        let spans = std::mem::take(&mut self.spans);
        self.pending_space = false;
        let kind = self.kind.take().unwrap_or(Kind::Paragraph);
        if spans.iter().all(|s| s.text.trim().is_empty()) {
            return;
        }
        self.blocks.push(match kind {
            Kind::Paragraph => Block::Paragraph(spans),
            Kind::Heading(level) => Block::Heading(level, spans),
            Kind::Bullet => Block::Bullet(spans),
        });
    }

    fn rule(&mut self) {
        self.flush();
        self.blocks.push(Block::Rule);
    }
}

/// Parse roast markup into display blocks.
pub fn parse(src: &str) -> Vec<Block> {
    if !looks_like_html(src) {
        return parse_plain(src);
    }

    let mut b = Builder::default();
    let mut rest = src;

    while !rest.is_empty() {
        let Some(lt) = rest.find('<') else {
            b.text(rest);
            break;
        };
        b.text(&rest[..lt]);
        let after = &rest[lt + 1..];
        let Some(gt) = after.find('>') else {
            // Unterminated tag, possibly mid-stream: hold it back
            break;
        };
        handle_tag(&mut b, &after[..gt]);
        rest = &after[gt + 1..];
    }

    b.flush();
    b.blocks
}

fn handle_tag(b: &mut Builder, tag: &str) {
    let tag = tag.trim();
    if tag.starts_with('!') {
        return;
    }
    let closing = tag.starts_with('/');
    let name: String = tag
        .trim_start_matches('/')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();

    let adjust = |depth: &mut u32| {
        if closing {
            *depth = depth.saturating_sub(1);
        } else {
            *depth += 1;
        }
    };

    match name.as_str() {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            if closing {
                b.flush();
            } else {
                let level = name.as_bytes()[1] - b'0';
                b.open(Kind::Heading(level));
            }
        }
        "p" | "div" | "section" | "article" | "blockquote" | "ul" | "ol" | "table" | "tr" => {
            b.flush();
        }
        "li" => {
            if closing {
                b.flush();
            } else {
                b.open(Kind::Bullet);
            }
        }
        "br" => b.line_break(),
        "hr" => b.rule(),
        "strong" | "b" => adjust(&mut b.bold),
        "em" | "i" => adjust(&mut b.italic),
        "code" | "pre" => adjust(&mut b.code),
        "td" | "th" if closing => b.text(" "),
        _ => {}
    }
}

fn looks_like_html(src: &str) -> bool {
    src.char_indices().any(|(i, c)| {
        c == '<'
            && src[i + 1..]
                .chars()
                .next()
                .is_some_and(|n| n.is_ascii_alphabetic() || n == '/' || n == '!')
    })
}

fn parse_plain(src: &str) -> Vec<Block> {
    src.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|line| {
            let line = line.trim_end();
            if let Some(item) = line.trim_start().strip_prefix("- ") {
                return Block::Bullet(vec![plain_span(item)]);
            }
            let hashes = line.chars().take_while(|&c| c == '#').count();
            if (1..=6).contains(&hashes) && line[hashes..].starts_with(' ') {
                return Block::Heading(hashes as u8, vec![plain_span(line[hashes..].trim())]);
            }
            Block::Paragraph(vec![plain_span(line)])
        })
        .collect()
}

fn plain_span(text: &str) -> Span {
    Span {
        text: text.to_string(),
        ..Span::default()
    }
}

/// Decode the handful of entities the service actually emits.
pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail.find(';').and_then(|semi| {
            let entity = &tail[1..semi];
            let ch = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some(' '),
                _ => entity
                    .strip_prefix("#x")
                    .and_then(|h| u32::from_str_radix(h, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|d| d.parse().ok()))
                    .and_then(char::from_u32),
            }?;
            Some((ch, semi + 1))
        });
        match decoded {
            Some((ch, len)) => {
                out.push(ch);
                rest = &tail[len..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn span_text(span: &Span, size: f32, color: egui::Color32) -> egui::RichText {
    let mut text = egui::RichText::new(&span.text).size(size).color(color);
    if span.bold {
        text = text.strong().color(theme::TEXT_PRIMARY);
    }
    if span.italic {
        text = text.italics();
    }
    if span.code {
        text = text.monospace().background_color(theme::BG_SURFACE);
    }
    text
}

fn spans_row(ui: &mut egui::Ui, spans: &[Span], size: f32, color: egui::Color32) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        for span in spans {
            ui.label(span_text(span, size, color));
        }
    });
}

/// Render parsed blocks into `ui`.
pub fn render(ui: &mut egui::Ui, blocks: &[Block]) {
    for block in blocks {
        match block {
            Block::Heading(level, spans) => {
                ui.add_space(theme::SPACING_MD);
                let size = match level {
                    1 => 26.0,
                    2 => 22.0,
                    3 => 19.0,
                    _ => theme::FONT_HEADING,
                };
                let spans: Vec<Span> = spans.iter().map(|s| Span { bold: true, ..s.clone() }).collect();
                spans_row(ui, &spans, size, theme::ACCENT_LIGHT);
                ui.add_space(theme::SPACING_SM);
            }
            Block::Paragraph(spans) => {
                spans_row(ui, spans, theme::FONT_RESULT, theme::TEXT_SECONDARY);
                ui.add_space(theme::SPACING_SM);
            }
            Block::Bullet(spans) => {
                ui.horizontal_wrapped(|ui| {
                    ui.spacing_mut().item_spacing.x = 0.0;
                    ui.label(egui::RichText::new("  •  ").size(theme::FONT_RESULT).color(theme::ACCENT));
                    for span in spans {
                        ui.label(span_text(span, theme::FONT_RESULT, theme::TEXT_SECONDARY));
                    }
                });
            }
            Block::Rule => {
                ui.add_space(theme::SPACING_SM);
                ui.separator();
                ui.add_space(theme::SPACING_SM);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(blocks: &[Block]) -> Vec<String> {
        blocks.iter().map(Block::plain_text).collect()
    }

    #[test]
    fn headings_paragraphs_and_lists() {
        let html = "<h2>Round 1</h2>\n<p>alice has <strong>400</strong> repos.</p>\n<ul>\n  <li>all forks</li>\n  <li>no stars</li>\n</ul>";
        let blocks = parse(html);

        assert!(matches!(blocks[0], Block::Heading(2, _)));
        assert_eq!(
            texts(&blocks),
            vec!["Round 1", "alice has 400 repos.", "all forks", "no stars"]
        );
        match &blocks[1] {
            Block::Paragraph(spans) => {
                assert_eq!(spans.len(), 3);
                assert!(spans[1].bold);
                assert_eq!(spans[1].text, " 400");
            }
            other => panic!("expected paragraph, got {other:?}"),
        }
        assert!(matches!(blocks[3], Block::Bullet(_)));
    }

    #[test]
    fn br_and_hr_split_blocks() {
        let blocks = parse("first<br>second<hr/>third");
        assert_eq!(texts(&blocks), vec!["first", "second", "", "third"]);
        assert_eq!(blocks[2], Block::Rule);
    }

    #[test]
    fn whitespace_collapses_like_html() {
        let blocks = parse("<p>  too \n\n   many    spaces </p>");
        assert_eq!(texts(&blocks), vec!["too many spaces"]);
    }

    #[test]
    fn unknown_tags_keep_text_and_entities_decode() {
        let blocks = parse(r#"<p><span class="x">Tom &amp; Jerry &lt;3 &#128293;</span></p>"#);
        assert_eq!(texts(&blocks), vec!["Tom & Jerry <3 🔥"]);
    }

    #[test]
    fn unterminated_tag_is_held_back() {
        // Mid-stream the tail may be a half-written tag
        let blocks = parse("<p>hello</p><str");
        assert_eq!(texts(&blocks), vec!["hello"]);
    }

    #[test]
    fn plain_text_falls_back_to_lines() {
        let blocks = parse("## Verdict\nalice < bob\n\n- reason one");
        assert_eq!(blocks[0], Block::Heading(2, vec![plain_span("Verdict")]));
        assert_eq!(texts(&blocks), vec!["Verdict", "alice < bob", "reason one"]);
        assert!(matches!(blocks[2], Block::Bullet(_)));
    }

    #[test]
    fn entity_edge_cases() {
        assert_eq!(decode_entities("a & b"), "a & b");
        assert_eq!(decode_entities("&bogus; &#x41;"), "&bogus; A");
        assert_eq!(decode_entities("&amp"), "&amp");
    }
}
