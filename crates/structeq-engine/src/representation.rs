//! Human-readable rendering of compared values.

use std::fmt::Write;

use chrono::SecondsFormat;
use structeq_types::Value;

/// Renders values in difference reports.
pub trait Representation {
    fn to_string_of(&self, value: &Value) -> String;
}

/// The default rendering.
///
/// Strings are quoted, dates are RFC 3339 with milliseconds, objects print
/// as `Type{field=value, ..}` over their declared fields. An object already
/// being printed further up prints as `Type{...}`.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardRepresentation;

impl StandardRepresentation {
    fn write_value(&self, value: &Value, out: &mut String, in_progress: &mut Vec<usize>) {
        match value {
            Value::Absent => out.push_str("<absent>"),
            Value::Null => out.push_str("null"),
            Value::Bool(b) => push_display(out, b),
            Value::Int(i) => push_display(out, i),
            Value::Float(f) => {
                let _ = write!(out, "{f:?}");
            }
            Value::Char(c) => {
                let _ = write!(out, "'{c}'");
            }
            Value::Str(s) => {
                let _ = write!(out, "{s:?}");
            }
            Value::Date(d) => out.push_str(&d.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Value::Seq(items) => self.write_elements(items, "[", "]", out, in_progress),
            Value::Set(items) => self.write_elements(items, "{", "}", out, in_progress),
            Value::Map(entries) => {
                out.push('{');
                for (i, (key, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(key);
                    out.push('=');
                    self.write_value(v, out, in_progress);
                }
                out.push('}');
            }
            Value::Optional(None) => out.push_str("Optional.empty"),
            Value::Optional(Some(inner)) => {
                out.push_str("Optional[");
                self.write_value(inner, out, in_progress);
                out.push(']');
            }
            Value::Object(object) => {
                out.push_str(object.type_name());
                let identity = object.identity();
                if in_progress.contains(&identity) {
                    out.push_str("{...}");
                    return;
                }
                in_progress.push(identity);
                out.push('{');
                for (i, name) in object.schema().fields_including_inherited().into_iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(name);
                    out.push('=');
                    match object.field(name) {
                        Ok(v) => self.write_value(&v, out, in_progress),
                        Err(_) => out.push('?'),
                    }
                }
                out.push('}');
                in_progress.pop();
            }
        }
    }

    fn write_elements(
        &self,
        items: &[Value],
        open: &str,
        close: &str,
        out: &mut String,
        in_progress: &mut Vec<usize>,
    ) {
        out.push_str(open);
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write_value(item, out, in_progress);
        }
        out.push_str(close);
    }
}

fn push_display(out: &mut String, value: impl std::fmt::Display) {
    let _ = write!(out, "{value}");
}

impl Representation for StandardRepresentation {
    fn to_string_of(&self, value: &Value) -> String {
        let mut out = String::new();
        self.write_value(value, &mut out, &mut Vec::new());
        out
    }
}
