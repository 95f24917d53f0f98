// src/extractors/section.rs

// --- Imports ---
use ego_tree::NodeId;
use scraper::Html;
use selectors::attr::CaseSensitivity;

use crate::extractors::render::prettify;

// --- Constants ---
const SECTION_TAG: &str = "div";
const SECTION_CLASS: &str = "section";
const HEADING_TAG: &str = "h1";

// --- Data Structures ---
#[derive(Debug, Clone)]
pub struct ExtractedSection {
    pub content_html: String,  // Pretty-printed section fragment
    pub heading_removed: bool, // Whether a leading h1 was found and dropped
}

// --- Main Extractor Structure ---
pub struct SectionExtractor;

impl SectionExtractor {
    pub fn new() -> Self {
        Self {}
    }

    /// Extracts the first `<div class="section">` from a document, with its
    /// first `<h1>` descendant removed.
    ///
    /// Returns `None` when the document contains no such div. A section
    /// without an `<h1>` is still extracted; `heading_removed` records which
    /// case occurred.
    pub fn extract(&self, html_content: &str) -> Option<ExtractedSection> {
        // 1. Parse the HTML document
        let mut document = Html::parse_document(html_content);

        // 2. Locate the first matching section div in document order
        let section_id = self.find_section(&document)?;

        // 3. Detach the section's first h1 descendant, if it has one
        let heading_id = self.find_heading(&document, section_id);
        match heading_id {
            Some(id) => {
                tracing::debug!("Removing first <{}> from extracted section", HEADING_TAG);
                if let Some(mut heading) = document.tree.get_mut(id) {
                    heading.detach();
                }
            }
            None => {
                tracing::debug!("Extracted section has no <{}> to remove", HEADING_TAG);
            }
        }

        // 4. Pretty-print what remains of the section subtree
        let section = document.tree.get(section_id)?;
        Some(ExtractedSection {
            content_html: prettify(section),
            heading_removed: heading_id.is_some(),
        })
    }

    /// Finds the first `div` carrying the exact class token `section`.
    ///
    /// The class attribute is matched token-wise and case-sensitively, so
    /// `class="section highlight"` qualifies but `class="subsection"` and
    /// `class="Section"` do not.
    fn find_section(&self, document: &Html) -> Option<NodeId> {
        document
            .tree
            .root()
            .descendants()
            .find(|node| {
                node.value().as_element().map_or(false, |element| {
                    element.name() == SECTION_TAG
                        && element.has_class(SECTION_CLASS, CaseSensitivity::CaseSensitive)
                })
            })
            .map(|node| node.id())
    }

    /// Finds the first `h1` anywhere inside the section subtree, in document
    /// order, excluding the section element itself.
    fn find_heading(&self, document: &Html, section_id: NodeId) -> Option<NodeId> {
        let section = document.tree.get(section_id)?;
        section
            .descendants()
            .skip(1) // descendants() yields the section node itself first
            .find(|node| {
                node.value()
                    .as_element()
                    .map_or(false, |element| element.name() == HEADING_TAG)
            })
            .map(|node| node.id())
    }
}
