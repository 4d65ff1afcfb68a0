//! Markdown rendering with frontmatter extraction.
//!
//! Documents are parsed once with YAML-style metadata blocks enabled. The
//! leading metadata block is pulled out of the event stream and decoded as
//! frontmatter; everything else is rendered to HTML.

use pulldown_cmark::{Event, MetadataBlockKind, Options, Parser, Tag, TagEnd, html};

use super::frontmatter::FrontmatterRecord;
use crate::config::MarkdownConfig;

#[derive(thiserror::Error, Debug)]
pub enum MarkdownError {
    #[error("invalid markdown extension: {0}")]
    InvalidExtension(String),
}

/// Parser options resolved from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkdownOptions {
    options: Options,
}

impl MarkdownOptions {
    /// Resolve the configured extension names.
    pub fn from_config(markdown_config: &MarkdownConfig) -> Result<Self, MarkdownError> {
        let mut options = Options::ENABLE_YAML_STYLE_METADATA_BLOCKS;
        for extension in &markdown_config.extensions {
            match extension.as_str() {
                "definition_lists" => options.insert(Options::ENABLE_DEFINITION_LIST),
                "footnotes" => options.insert(Options::ENABLE_FOOTNOTES),
                "gfm" => options.insert(Options::ENABLE_GFM),
                "heading_attributes" => options.insert(Options::ENABLE_HEADING_ATTRIBUTES),
                "strikethrough" => options.insert(Options::ENABLE_STRIKETHROUGH),
                "tables" => options.insert(Options::ENABLE_TABLES),
                "tasklists" => options.insert(Options::ENABLE_TASKLISTS),
                other => return Err(MarkdownError::InvalidExtension(other.to_string())),
            }
        }
        Ok(Self { options })
    }
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            options: Options::ENABLE_YAML_STYLE_METADATA_BLOCKS,
        }
    }
}

/// Result of rendering one document.
#[derive(Debug)]
pub struct MarkdownOutput {
    /// Decoded frontmatter (empty if the document has none)
    pub front_matter: FrontmatterRecord,
    /// The document body as HTML
    pub html: String,
}

/// Extract frontmatter from `markdown` and render the rest to HTML.
///
/// Only a metadata block that opens the document counts as frontmatter.
/// A `---` block that is never closed is ordinary markdown. A leading byte
/// order mark is ignored.
pub fn render_markdown(markdown: &str, options: &MarkdownOptions) -> MarkdownOutput {
    let markdown = markdown.strip_prefix('\u{feff}').unwrap_or(markdown);
    let (markdown, had_empty_block) = match strip_empty_front_matter(markdown) {
        Some(body) => (body, true),
        None => (markdown, false),
    };
    let parser = Parser::new_ext(markdown, options.options);

    let mut in_front_matter = false;
    let mut yaml: Option<String> = None;

    let events: Vec<Event> = parser
        .enumerate()
        .filter_map(|(index, event)| match event {
            Event::Start(Tag::MetadataBlock(MetadataBlockKind::YamlStyle))
                if index == 0 && !had_empty_block =>
            {
                in_front_matter = true;
                yaml = Some(String::new());
                None
            }
            Event::End(TagEnd::MetadataBlock(MetadataBlockKind::YamlStyle)) if in_front_matter => {
                in_front_matter = false;
                None
            }
            Event::Text(text) if in_front_matter => {
                if let Some(yaml) = yaml.as_mut() {
                    yaml.push_str(&text);
                }
                None
            }
            _ => Some(event),
        })
        .collect();

    let front_matter = yaml
        .as_deref()
        .map(FrontmatterRecord::parse)
        .unwrap_or_default();

    let mut html_output = String::new();
    html::push_html(&mut html_output, events.into_iter());
    let trimmed_len = html_output.trim_end_matches('\n').len();
    html_output.truncate(trimmed_len);

    MarkdownOutput {
        front_matter,
        html: html_output,
    }
}

/// The parser reads an empty `---`/`---` block as two thematic breaks.
/// Returns the body after such a block, if the document opens with one.
fn strip_empty_front_matter(markdown: &str) -> Option<&str> {
    let rest = markdown
        .strip_prefix("---\r\n")
        .or_else(|| markdown.strip_prefix("---\n"))?;
    let (line, body) = rest.split_once('\n').unwrap_or((rest, ""));
    (line.trim_end() == "---").then_some(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(markdown: &str) -> MarkdownOutput {
        render_markdown(markdown, &MarkdownOptions::default())
    }

    #[test]
    fn test_render_basic_markdown() {
        let output = render("# Hello\n\nWorld");
        assert_eq!(output.html, "<h1>Hello</h1>\n<p>World</p>");
        assert!(output.front_matter.is_empty());
    }

    #[test]
    fn test_front_matter_is_extracted_and_stripped() {
        let output = render("---\nid: post-1\npublished: true\n---\n# Hi\n");
        assert_eq!(output.front_matter.get_str("id"), Some("post-1"));
        assert_eq!(output.front_matter.get_bool("published"), Some(true));
        assert_eq!(output.html, "<h1>Hi</h1>");
        assert!(!output.html.contains("post-1"));
    }

    #[test]
    fn test_malformed_front_matter_still_renders() {
        let output = render("---\ntitle: [unclosed\n---\n\nBody text\n");
        assert!(output.front_matter.is_empty());
        assert_eq!(output.html, "<p>Body text</p>");
    }

    #[test]
    fn test_leading_byte_order_mark_is_ignored() {
        let output = render("\u{feff}---\nid: post-1\ntags: [Rust]\n---\n# Hi\n");
        assert_eq!(output.front_matter.get_str("id"), Some("post-1"));
        assert_eq!(output.front_matter.get_string_list("tags"), Some(vec!["Rust".to_string()]));
        assert_eq!(output.html, "<h1>Hi</h1>");

        let plain = render("\u{feff}# Hi\n");
        assert_eq!(plain.html, "<h1>Hi</h1>");
    }

    #[test]
    fn test_crlf_front_matter() {
        let output = render("---\r\nid: post-1\r\n---\r\n# Hi\r\n");
        assert_eq!(output.front_matter.get_str("id"), Some("post-1"));
        assert_eq!(output.html, "<h1>Hi</h1>");
    }

    #[test]
    fn test_empty_front_matter_block_is_stripped() {
        let output = render("---\n---\n# Hi\n");
        assert!(output.front_matter.is_empty());
        assert_eq!(output.html, "<h1>Hi</h1>");

        let crlf = render("---\r\n---\r\n# Hi\r\n");
        assert!(crlf.front_matter.is_empty());
        assert_eq!(crlf.html, "<h1>Hi</h1>");

        let only = render("---\n---");
        assert_eq!(only.html, "");
    }

    #[test]
    fn test_rules_that_are_not_a_block_still_render() {
        let output = render("---\n----\n# Hi\n");
        assert!(output.html.contains("<hr />"));
        assert_eq!(strip_empty_front_matter("# Title\n---\n---\n"), None);
    }

    #[test]
    fn test_unterminated_block_is_markdown() {
        let output = render("---\nid: nope\n\n# Hi\n");
        assert!(output.front_matter.is_empty());
        assert!(output.html.contains("<h1>Hi</h1>"));
    }

    #[test]
    fn test_standard_syntax() {
        let output = render("Some *emphasis* and a [link](https://example.com).\n\n- one\n- two\n\n```\ncode\n```\n");
        assert!(output.html.contains("<em>emphasis</em>"));
        assert!(output.html.contains("<a href=\"https://example.com\">link</a>"));
        assert!(output.html.contains("<li>one</li>"));
        assert!(output.html.contains("<pre><code>code\n</code></pre>"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let markdown = "---\nid: a\n---\n## Title\n\nText with `code`.\n";
        assert_eq!(render(markdown).html, render(markdown).html);
    }

    #[test]
    fn test_configured_extensions() {
        let config = MarkdownConfig {
            extensions: vec!["strikethrough".to_string()],
        };
        let options = MarkdownOptions::from_config(&config).unwrap();
        let output = render_markdown("~~gone~~", &options);
        assert_eq!(output.html, "<p><del>gone</del></p>");
    }

    #[test]
    fn test_invalid_extension() {
        let config = MarkdownConfig {
            extensions: vec!["not_a_real_extension".to_string()],
        };
        assert!(MarkdownOptions::from_config(&config).is_err());
    }
}
