//! Word and PowerPoint extraction.
//!
//! DOCX goes through `docx-rs`. PPTX is read straight from the package: each
//! `ppt/slides/slideN.xml` part is scanned for `<a:t>` text runs.

use std::io::{Cursor, Read};

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::error::ProcessError;

pub const EMPTY_DOCUMENT: &str = "No text content found in document";
pub const EMPTY_PRESENTATION: &str = "No text content found in presentation";

lazy_static! {
    static ref SLIDE_PART: Regex = Regex::new(r"^ppt/slides/slide(\d+)\.xml$").unwrap();
    static ref TEXT_RUN: Regex = Regex::new(r"<a:t(?:\s[^>]*)?>([^<]*)</a:t>").unwrap();
    static ref PARAGRAPH_END: Regex = Regex::new(r"</a:p>").unwrap();
    static ref ENTITY: Regex = Regex::new(r"&(#x[0-9A-Fa-f]+|#[0-9]+|amp|lt|gt|quot|apos);").unwrap();
}

/// Paragraph text, then table rows with cells joined by ` | `.
pub fn extract_docx(bytes: &[u8]) -> Result<String, ProcessError> {
    let doc = docx_rs::read_docx(bytes).map_err(|e| ProcessError::extraction("DOCX", e))?;

    let mut paragraphs = Vec::new();
    let mut rows = Vec::new();
    for child in &doc.document.children {
        match child {
            docx_rs::DocumentChild::Paragraph(para) => {
                let text = paragraph_text(para);
                if !text.trim().is_empty() {
                    paragraphs.push(text.trim().to_string());
                }
            }
            docx_rs::DocumentChild::Table(table) => {
                for row in &table.rows {
                    let docx_rs::TableChild::TableRow(tr) = row;
                    let cells: Vec<String> = tr
                        .cells
                        .iter()
                        .map(|cell| {
                            let docx_rs::TableRowChild::TableCell(tc) = cell;
                            let parts: Vec<String> = tc
                                .children
                                .iter()
                                .filter_map(|content| match content {
                                    docx_rs::TableCellContent::Paragraph(para) => {
                                        Some(paragraph_text(para))
                                    }
                                    _ => None,
                                })
                                .collect();
                            parts.join("\n").trim().to_string()
                        })
                        .filter(|cell| !cell.is_empty())
                        .collect();
                    if !cells.is_empty() {
                        rows.push(cells.join(" | "));
                    }
                }
            }
            _ => {}
        }
    }

    paragraphs.extend(rows);
    let text = paragraphs.join("\n");
    if text.trim().is_empty() {
        Ok(EMPTY_DOCUMENT.to_string())
    } else {
        Ok(text.trim().to_string())
    }
}

fn paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut out = String::new();
    for child in &para.children {
        match child {
            docx_rs::ParagraphChild::Run(run) => push_run(run, &mut out),
            docx_rs::ParagraphChild::Hyperlink(link) => {
                for inner in &link.children {
                    if let docx_rs::ParagraphChild::Run(run) = inner {
                        push_run(run, &mut out);
                    }
                }
            }
            _ => {}
        }
    }
    out
}

fn push_run(run: &docx_rs::Run, out: &mut String) {
    for child in &run.children {
        if let docx_rs::RunChild::Text(text) = child {
            out.push_str(&text.text);
        }
    }
}

/// `Slide N: …` blocks in slide order, separated by blank lines.
pub fn extract_pptx(bytes: &[u8]) -> Result<String, ProcessError> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| ProcessError::extraction("PPTX", e))?;

    let mut slides: Vec<(u32, String)> = Vec::new();
    for i in 0..archive.len() {
        let mut file = archive
            .by_index(i)
            .map_err(|e| ProcessError::extraction("PPTX", e))?;
        if file.is_dir() {
            continue;
        }
        let number = match SLIDE_PART
            .captures(file.name())
            .and_then(|c| c[1].parse::<u32>().ok())
        {
            Some(n) => n,
            None => continue,
        };
        let mut xml = String::new();
        file.read_to_string(&mut xml)
            .map_err(|e| ProcessError::extraction("PPTX", e))?;
        slides.push((number, xml));
    }
    slides.sort_by_key(|(number, _)| *number);

    let blocks: Vec<String> = slides
        .iter()
        .enumerate()
        .filter_map(|(index, (_, xml))| {
            let text = slide_text(xml);
            if text.is_empty() {
                None
            } else {
                Some(format!("Slide {}: {}", index + 1, text))
            }
        })
        .collect();

    let text = blocks.join("\n\n");
    if text.trim().is_empty() {
        Ok(EMPTY_PRESENTATION.to_string())
    } else {
        Ok(text.trim().to_string())
    }
}

/// Non-empty paragraphs of one slide, joined by spaces.
fn slide_text(xml: &str) -> String {
    PARAGRAPH_END
        .split(xml)
        .map(|paragraph| {
            TEXT_RUN
                .captures_iter(paragraph)
                .map(|c| decode_entities(&c[1]))
                .collect::<String>()
        })
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => {
                    let code = match entity.strip_prefix("#x") {
                        Some(hex) => u32::from_str_radix(hex, 16).ok(),
                        None => entity[1..].parse::<u32>().ok(),
                    };
                    code.and_then(char::from_u32)
                }
            };
            decoded.map(String::from).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn slide_xml(paragraphs: &[&str]) -> String {
        let body: String = paragraphs
            .iter()
            .map(|p| format!("<a:p><a:r><a:rPr lang=\"en-US\"/><a:t>{p}</a:t></a:r></a:p>"))
            .collect();
        format!("<p:sld><p:cSld><p:spTree><p:sp><p:txBody>{body}</p:txBody></p:sp></p:spTree></p:cSld></p:sld>")
    }

    fn build_pptx(parts: &[(&str, String)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, xml) in parts {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(xml.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_pptx_slides_in_numeric_order() {
        let bytes = build_pptx(&[
            ("ppt/slides/slide10.xml", slide_xml(&["Ten"])),
            ("ppt/slides/slide2.xml", slide_xml(&["Architecture", "Rust &amp; React"])),
            ("ppt/slides/slide1.xml", slide_xml(&["Welcome"])),
            ("ppt/presentation.xml", "<p:presentation/>".to_string()),
        ]);
        let text = extract_pptx(&bytes).unwrap();
        assert_eq!(
            text,
            "Slide 1: Welcome\n\nSlide 2: Architecture Rust & React\n\nSlide 3: Ten"
        );
    }

    #[test]
    fn test_pptx_without_text() {
        let bytes = build_pptx(&[("ppt/slides/slide1.xml", slide_xml(&[]))]);
        assert_eq!(extract_pptx(&bytes).unwrap(), EMPTY_PRESENTATION);
    }

    #[test]
    fn test_pptx_rejects_non_zip() {
        let err = extract_pptx(b"plain bytes").unwrap_err();
        assert!(err.to_string().starts_with("PPTX extraction failed"));
    }

    #[test]
    fn test_docx_rejects_non_zip() {
        let err = extract_docx(b"plain bytes").unwrap_err();
        assert_eq!(err.status(), 500);
        assert!(err.to_string().starts_with("DOCX extraction failed"));
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a &lt;b&gt; &#233;t&#xE9; &bogus;"), "a <b> été &bogus;");
    }
}
