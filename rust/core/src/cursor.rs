// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tag-level XML cursor
//!
//! [`XmlCursor`] is the pull-reader seam the geometry decoder walks. It only
//! ever stops on start and end tags: whitespace, comments and processing
//! instructions are skipped, and text is read explicitly with
//! [`XmlCursor::element_text`]. [`QuickXmlCursor`] implements it on top of
//! quick-xml's namespace-aware reader.

use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;
use std::fmt;

/// Kind of event the cursor is positioned on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorEvent {
    StartElement,
    EndElement,
    /// Before the first tag, or after the document
    Other,
}

/// Namespace URI plus local name of an element
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    pub namespace: Option<String>,
    pub local_name: String,
}

impl QualifiedName {
    pub fn new(namespace: Option<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace,
            local_name: local_name.into(),
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local_name),
            None => f.write_str(&self.local_name),
        }
    }
}

fn describe_expected(event: CursorEvent, namespace: Option<&str>, local_name: Option<&str>) -> String {
    let kind = match event {
        CursorEvent::StartElement => "start tag",
        CursorEvent::EndElement => "end tag",
        CursorEvent::Other => "non-tag event",
    };
    match (namespace, local_name) {
        (Some(ns), Some(local)) => format!("{} {{{}}}{}", kind, ns, local),
        (Some(ns), None) => format!("{} in namespace {}", kind, ns),
        (None, Some(local)) => format!("{} {}", kind, local),
        (None, None) => kind.to_string(),
    }
}

/// Namespace-aware pull reader positioned on one tag at a time
pub trait XmlCursor {
    /// Kind of the current event
    fn event(&self) -> CursorEvent;

    /// Name of the current start or end tag
    fn name(&self) -> Option<&QualifiedName>;

    /// Value of an unprefixed attribute of the current start tag
    fn attribute(&self, local_name: &str) -> Option<&str>;

    /// Advance to the next start or end tag
    ///
    /// Whitespace, comments and processing instructions are skipped.
    /// Non-whitespace text and the end of the document are structure errors.
    fn next_tag(&mut self) -> Result<CursorEvent>;

    /// Read the text of the current element
    ///
    /// Precondition: positioned on a start tag.
    /// Postcondition: positioned on the matching end tag.
    fn element_text(&mut self) -> Result<String>;

    /// Whether the underlying reader processes DTDs
    fn supports_dtd(&self) -> bool;

    /// Byte offset in the document, for diagnostics
    fn position(&self) -> u64;

    #[inline]
    fn local_name(&self) -> Option<&str> {
        self.name().map(|n| n.local_name.as_str())
    }

    #[inline]
    fn namespace(&self) -> Option<&str> {
        self.name().and_then(|n| n.namespace.as_deref())
    }

    #[inline]
    fn is_start(&self) -> bool {
        self.event() == CursorEvent::StartElement
    }

    #[inline]
    fn is_end(&self) -> bool {
        self.event() == CursorEvent::EndElement
    }

    /// Human readable description of the current event
    fn describe(&self) -> String {
        match (self.event(), self.name()) {
            (CursorEvent::StartElement, Some(name)) => format!("start tag {}", name),
            (CursorEvent::EndElement, Some(name)) => format!("end tag {}", name),
            _ => "no tag".to_string(),
        }
    }

    /// Check the current event; `None` matches any namespace or name
    fn require(
        &self,
        event: CursorEvent,
        namespace: Option<&str>,
        local_name: Option<&str>,
    ) -> Result<()> {
        let matches = self.event() == event
            && namespace.map_or(true, |ns| self.namespace() == Some(ns))
            && local_name.map_or(true, |local| self.local_name() == Some(local));
        if matches {
            Ok(())
        } else {
            Err(Error::structure(
                describe_expected(event, namespace, local_name),
                self.describe(),
                self.position(),
            ))
        }
    }
}

enum Step {
    Tag,
    Text(String),
    Skip,
    Eof,
}

/// [`XmlCursor`] over an in-memory document, backed by [`quick_xml::NsReader`]
///
/// Self-closing elements are reported as a start tag followed by an end tag.
/// DTDs are never expanded; unless DTD support is enabled a `<!DOCTYPE>` is
/// rejected outright.
pub struct QuickXmlCursor<'a> {
    reader: NsReader<&'a [u8]>,
    event: CursorEvent,
    name: Option<QualifiedName>,
    attributes: Vec<(String, String)>,
    /// Current start tag was self-closing; the next step yields its end tag
    pending_end: bool,
    supports_dtd: bool,
}

impl<'a> QuickXmlCursor<'a> {
    /// Create a cursor positioned before the document
    pub fn new(xml: &'a str) -> Self {
        Self {
            reader: NsReader::from_str(xml),
            event: CursorEvent::Other,
            name: None,
            attributes: Vec::new(),
            pending_end: false,
            supports_dtd: false,
        }
    }

    /// Create a cursor positioned on the root element
    pub fn at_root(xml: &'a str) -> Result<Self> {
        let mut cursor = Self::new(xml);
        cursor.advance_to_start()?;
        Ok(cursor)
    }

    /// Allow (but never expand) `<!DOCTYPE>` declarations
    pub fn with_dtd_support(mut self, enabled: bool) -> Self {
        self.supports_dtd = enabled;
        self
    }

    /// Skip forward to the next start tag, ignoring text and end tags
    pub fn advance_to_start(&mut self) -> Result<()> {
        loop {
            match self.step()? {
                Step::Tag if self.event == CursorEvent::StartElement => return Ok(()),
                Step::Eof => {
                    return Err(Error::structure("start tag", "end of document", self.position()))
                }
                _ => {}
            }
        }
    }

    fn enter(&mut self, namespace: Option<String>, start: &BytesStart<'_>) -> Result<()> {
        self.event = CursorEvent::StartElement;
        self.name = Some(QualifiedName::new(
            namespace,
            String::from_utf8_lossy(start.local_name().as_ref()),
        ));
        self.attributes.clear();
        for attr in start.attributes() {
            let attr = attr?;
            if attr.key.prefix().is_some() {
                continue;
            }
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            self.attributes.push((key, value));
        }
        Ok(())
    }

    fn step(&mut self) -> Result<Step> {
        if self.pending_end {
            self.pending_end = false;
            self.event = CursorEvent::EndElement;
            self.attributes.clear();
            return Ok(Step::Tag);
        }

        let (resolved, event) = self.reader.read_resolved_event()?;
        let namespace = match resolved {
            ResolveResult::Bound(ns) => Some(String::from_utf8_lossy(ns.as_ref()).into_owned()),
            _ => None,
        };

        match event {
            Event::Start(start) => {
                self.enter(namespace, &start)?;
                Ok(Step::Tag)
            }
            Event::Empty(start) => {
                self.enter(namespace, &start)?;
                self.pending_end = true;
                Ok(Step::Tag)
            }
            Event::End(end) => {
                self.event = CursorEvent::EndElement;
                self.name = Some(QualifiedName::new(
                    namespace,
                    String::from_utf8_lossy(end.local_name().as_ref()),
                ));
                self.attributes.clear();
                Ok(Step::Tag)
            }
            Event::Text(text) => Ok(Step::Text(text.unescape()?.into_owned())),
            Event::CData(data) => Ok(Step::Text(
                String::from_utf8_lossy(&data.into_inner()).into_owned(),
            )),
            Event::DocType(_) if !self.supports_dtd => Err(Error::Configuration(
                "document declares a DTD but DTD processing is disabled".to_string(),
            )),
            Event::Eof => {
                self.event = CursorEvent::Other;
                self.name = None;
                self.attributes.clear();
                Ok(Step::Eof)
            }
            _ => Ok(Step::Skip),
        }
    }
}

impl XmlCursor for QuickXmlCursor<'_> {
    #[inline]
    fn event(&self) -> CursorEvent {
        self.event
    }

    #[inline]
    fn name(&self) -> Option<&QualifiedName> {
        self.name.as_ref()
    }

    fn attribute(&self, local_name: &str) -> Option<&str> {
        if self.event != CursorEvent::StartElement {
            return None;
        }
        self.attributes
            .iter()
            .find(|(key, _)| key == local_name)
            .map(|(_, value)| value.as_str())
    }

    fn next_tag(&mut self) -> Result<CursorEvent> {
        loop {
            match self.step()? {
                Step::Tag => return Ok(self.event),
                Step::Skip => {}
                Step::Text(text) if text.trim().is_empty() => {}
                Step::Text(text) => {
                    let snippet: String = text.trim().chars().take(32).collect();
                    return Err(Error::structure(
                        "start or end tag",
                        format!("text {:?}", snippet),
                        self.position(),
                    ));
                }
                Step::Eof => {
                    return Err(Error::structure(
                        "start or end tag",
                        "end of document",
                        self.position(),
                    ))
                }
            }
        }
    }

    fn element_text(&mut self) -> Result<String> {
        self.require(CursorEvent::StartElement, None, None)?;
        let owner = self.describe();
        let mut text = String::new();
        loop {
            match self.step()? {
                Step::Text(chunk) => text.push_str(&chunk),
                Step::Skip => {}
                Step::Tag if self.event == CursorEvent::EndElement => return Ok(text),
                Step::Tag => {
                    return Err(Error::structure(
                        format!("text content of {}", owner),
                        self.describe(),
                        self.position(),
                    ))
                }
                Step::Eof => {
                    return Err(Error::structure(
                        format!("text content of {}", owner),
                        "end of document",
                        self.position(),
                    ))
                }
            }
        }
    }

    #[inline]
    fn supports_dtd(&self) -> bool {
        self.supports_dtd
    }

    #[inline]
    fn position(&self) -> u64 {
        self.reader.buffer_position() as u64
    }
}
