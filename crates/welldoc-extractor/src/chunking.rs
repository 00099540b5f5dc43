//! Section-aware chunking of document text for the index

use welldoc_domain::{Chunk, ChunkType, Document, TocEntry};

/// Page range of one TOC section (1-based, inclusive)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSpan<'a> {
    /// The TOC entry, `None` for a document without TOC
    pub entry: Option<&'a TocEntry>,
    /// First page
    pub start: u32,
    /// Last page
    pub end: u32,
}

/// Splits page text into text and table chunks tagged with section metadata
#[derive(Debug, Clone)]
pub struct SectionChunker {
    max_words: usize,
}

impl SectionChunker {
    /// Create a chunker packing text paragraphs up to `max_words`
    pub fn new(max_words: usize) -> Self {
        Self {
            max_words: max_words.max(1),
        }
    }

    /// Page spans of the document's sections
    ///
    /// Section i runs from its page to the page before section i+1 (or its own
    /// page when the next one starts on the same page); the last runs to
    /// `page_count`. Without a TOC the whole document is a single span.
    pub fn spans<'a>(&self, document: &'a Document, page_count: u32) -> Vec<SectionSpan<'a>> {
        let page_count = page_count.max(1);
        if document.toc.is_empty() {
            return vec![SectionSpan {
                entry: None,
                start: 1,
                end: page_count,
            }];
        }

        document
            .toc
            .iter()
            .enumerate()
            .filter(|(_, e)| e.page <= page_count)
            .map(|(i, entry)| {
                let end = match document.toc.get(i + 1) {
                    Some(next) => next.page.saturating_sub(1).max(entry.page),
                    None => page_count,
                };
                SectionSpan {
                    entry: Some(entry),
                    start: entry.page,
                    end: end.min(page_count),
                }
            })
            .collect()
    }

    /// Chunk a document given its pages (index 0 is page 1)
    pub fn chunk(&self, document: &Document, pages: &[String]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        for span in self.spans(document, pages.len() as u32) {
            let first = span.start.saturating_sub(1) as usize;
            let last = (span.end as usize).min(pages.len());
            if first >= last {
                continue;
            }
            let text = pages[first..last].join("\n\n");

            let template = Chunk {
                text: String::new(),
                chunk_type: ChunkType::Text,
                well_id: document.well_id.clone(),
                document_name: document.filename.clone(),
                section_number: span.entry.map(|e| e.number.clone()).unwrap_or_default(),
                section_title: span.entry.map(|e| e.title.clone()).unwrap_or_default(),
                category: span.entry.and_then(|e| e.category),
                page: span.start,
            };
            self.chunk_section(&text, &template, &mut chunks);
        }
        chunks
    }

    fn chunk_section(&self, text: &str, template: &Chunk, out: &mut Vec<Chunk>) {
        let mut buffer: Vec<&str> = Vec::new();
        let mut buffered_words = 0;

        for paragraph in paragraphs(text) {
            if is_table(&paragraph) {
                if !buffer.is_empty() {
                    out.push(text_chunk(template, &buffer));
                    buffer.clear();
                    buffered_words = 0;
                }
                out.push(Chunk {
                    text: paragraph.join("\n"),
                    chunk_type: ChunkType::Table,
                    ..template.clone()
                });
                continue;
            }

            for line in paragraph {
                let words = line.split_whitespace().count();
                if buffered_words + words > self.max_words && !buffer.is_empty() {
                    out.push(text_chunk(template, &buffer));
                    buffer.clear();
                    buffered_words = 0;
                }
                buffer.push(line);
                buffered_words += words;
            }
        }

        if !buffer.is_empty() {
            out.push(text_chunk(template, &buffer));
        }
    }
}

impl Default for SectionChunker {
    fn default() -> Self {
        Self::new(300)
    }
}

fn text_chunk(template: &Chunk, lines: &[&str]) -> Chunk {
    Chunk {
        text: lines.join(" "),
        chunk_type: ChunkType::Text,
        ..template.clone()
    }
}

/// Non-blank line groups separated by blank lines
fn paragraphs(text: &str) -> Vec<Vec<&str>> {
    let mut result = Vec::new();
    let mut current = Vec::new();
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if !current.is_empty() {
                result.push(std::mem::take(&mut current));
            }
        } else {
            current.push(trimmed);
        }
    }
    if !current.is_empty() {
        result.push(current);
    }
    result
}

/// A paragraph is tabular when most of its lines carry column separators
fn is_table(lines: &[&str]) -> bool {
    let columnar = lines.iter().filter(|l| l.contains('|') || l.contains('\t')).count();
    columnar * 2 > lines.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use welldoc_domain::Category;

    fn document() -> Document {
        let mut doc = Document::new("W1", "EOWR.pdf", "/w/EOWR.pdf", 10);
        let mut intro = TocEntry::new("1", "Introduction", 1).unwrap();
        intro.category = Some(Category::ProjectAdmin);
        let mut casing = TocEntry::new("2", "Casing", 2).unwrap();
        casing.category = Some(Category::Casing);
        doc.toc = vec![intro, casing];
        doc
    }

    #[test]
    fn test_spans_follow_toc_pages() {
        let doc = document();
        let spans = SectionChunker::default().spans(&doc, 4);
        assert_eq!(spans.len(), 2);
        assert_eq!((spans[0].start, spans[0].end), (1, 1));
        assert_eq!((spans[1].start, spans[1].end), (2, 4));
    }

    #[test]
    fn test_no_toc_single_span() {
        let doc = Document::new("W1", "scan.pdf", "/w/scan.pdf", 10);
        let spans = SectionChunker::default().spans(&doc, 3);
        assert_eq!(spans.len(), 1);
        assert!(spans[0].entry.is_none());
        assert_eq!(spans[0].end, 3);
    }

    #[test]
    fn test_text_and_table_chunks_carry_metadata() {
        let doc = document();
        let pages = vec![
            "Intro text here.".to_string(),
            "Casing was run.\n\n| Size | Depth |\n| 9 5/8 | 1200 |".to_string(),
        ];
        let chunks = SectionChunker::default().chunk(&doc, &pages);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].category, Some(Category::ProjectAdmin));
        assert_eq!(chunks[1].chunk_type, ChunkType::Text);
        assert_eq!(chunks[1].section_title, "Casing");
        assert_eq!(chunks[2].chunk_type, ChunkType::Table);
        assert_eq!(chunks[2].category, Some(Category::Casing));
        assert_eq!(chunks[2].page, 2);
        assert_eq!(chunks[2].document_name, "EOWR.pdf");
    }

    #[test]
    fn test_text_packing_respects_word_limit() {
        let doc = Document::new("W1", "a.pdf", "/a.pdf", 1);
        let pages = vec!["one two three\nfour five six\nseven eight nine".to_string()];
        let chunks = SectionChunker::new(6).chunk(&doc, &pages);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "one two three four five six");
        assert_eq!(chunks[1].text, "seven eight nine");
    }

    #[test]
    fn test_out_of_range_toc_entries_skipped() {
        let mut doc = document();
        doc.toc.push(TocEntry::new("3", "Appendix", 50).unwrap());
        let pages = vec!["a".to_string(), "b".to_string()];
        let chunks = SectionChunker::default().chunk(&doc, &pages);
        assert!(chunks.iter().all(|c| c.section_number != "3"));
    }
}
