//! Indentation-aware pretty printer for [`Message`]s (§4.5).
//!
//! Grounded on the teacher's `impl Display for ImageFileDirectory<T, ProcessedEntry>`
//! (`ifd.rs`), which writes `"{tag}: {value}"` lines into the supplied `fmt::Formatter`;
//! generalized here to a nested, brace-delimited, indent-tracked writer.

use std::fmt::Write;

use crate::model::{Attribute, Message};
use crate::registry;
use crate::tag::Tag;
use crate::value::Value;

/// Renders [`Message`]s as a brace-delimited, indented block of text.
pub struct Formatter {
    indent_width: usize,
}

impl Formatter {
    /// A formatter with the default 4-space indent.
    pub fn new() -> Formatter {
        Formatter { indent_width: 4 }
    }

    /// A formatter with a caller-chosen indent width, in spaces.
    pub fn with_indent(width: usize) -> Formatter {
        Formatter { indent_width: width }
    }

    /// Renders `message`. `is_request` selects whether `message.code` is printed as an
    /// `OPERATION` (looked up in [`registry::operation_name`]) or a `STATUS` (looked up in
    /// [`registry::status_name`]) — the one piece of semantic knowledge the formatter needs
    /// from the caller (§4.5, §6).
    pub fn format_message(&self, message: &Message, is_request: bool) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{{");
        self.write_indent(&mut out, 1);
        let _ = writeln!(out, "REQUEST-ID {}", message.request_id);
        self.write_indent(&mut out, 1);
        let _ = writeln!(out, "VERSION {}.{}", message.version_major, message.version_minor);
        self.write_indent(&mut out, 1);
        if is_request {
            let _ = writeln!(out, "OPERATION {}", code_name(message.code, registry::operation_name));
        } else {
            let _ = writeln!(out, "STATUS {}", code_name(message.code, registry::status_name));
        }

        if !message.groups.is_empty() {
            let _ = writeln!(out);
        }
        for group in &message.groups {
            self.write_indent(&mut out, 1);
            let _ = writeln!(out, "GROUP {}", group.tag.name());
            if let Some(attrs) = &group.attrs {
                for attr in attrs {
                    self.write_attribute(&mut out, 1, attr);
                }
            }
        }

        out.push('}');
        out.push('\n');
        out
    }

    fn write_attribute(&self, out: &mut String, depth: usize, attr: &Attribute) {
        self.write_indent(out, depth);
        let _ = write!(out, "ATTR \"{}\" ", attr.name);
        self.write_value_list(out, depth, &attr.values);
        out.push('\n');
    }

    /// Writes a run of (tag, value) pairs, printing each distinct tag once followed by its
    /// space-separated values (§4.5).
    fn write_value_list(&self, out: &mut String, depth: usize, values: &[(Tag, Value)]) {
        let mut i = 0;
        while i < values.len() {
            if i > 0 {
                out.push(' ');
            }
            let tag = values[i].0;
            let _ = write!(out, "{}:", tag.name());
            while i < values.len() && values[i].0 == tag {
                out.push(' ');
                self.write_value(out, depth, &values[i].1);
                i += 1;
            }
        }
    }

    fn write_value(&self, out: &mut String, depth: usize, value: &Value) {
        match value {
            Value::Collection(members) => {
                out.push('{');
                out.push('\n');
                for member in members {
                    self.write_indent(out, depth + 1);
                    let _ = write!(out, "MEMBER \"{}\" ", member.name);
                    self.write_value_list(out, depth + 1, &member.values);
                    out.push('\n');
                }
                self.write_indent(out, depth);
                out.push('}');
            }
            other => {
                let _ = write!(out, "{}", other.to_display_string());
            }
        }
    }

    fn write_indent(&self, out: &mut String, depth: usize) {
        for _ in 0..depth * self.indent_width {
            out.push(' ');
        }
    }
}

impl Default for Formatter {
    fn default() -> Formatter {
        Formatter::new()
    }
}

fn code_name(code: u16, lookup: fn(u16) -> Option<&'static str>) -> String {
    match lookup(code) {
        Some(name) => name.to_string(),
        None => format!("0x{code:04x}"),
    }
}
