//! Labeled header lines shared by commit and tag bodies.
//!
//! A body is `label value\n` lines, an empty line, then the message. A line
//! that starts with a space continues the previous value (multi-line
//! signatures use this).

/// One `label value` line, continuation lines joined with `\n`.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Field {
    pub label: String,
    pub value: String,
}

/// Header lines and the message that follows them.
#[derive(Debug)]
pub(crate) struct Fields<'a> {
    pub fields: Vec<Field>,
    /// Bytes after the first blank line, untouched. Empty when the body ends
    /// without a blank line.
    pub message: &'a [u8],
}

/// Split a body into labeled lines and the trailing message.
///
/// Header lines must be UTF-8; the message is returned as raw bytes.
pub(crate) fn split_fields(body: &[u8]) -> Result<Fields<'_>, String> {
    let mut fields: Vec<Field> = Vec::new();
    let mut pos = 0;

    while pos < body.len() {
        let (line, next) = match body[pos..].iter().position(|&b| b == b'\n') {
            Some(len) => (&body[pos..pos + len], pos + len + 1),
            None => (&body[pos..], body.len()),
        };
        if line.is_empty() {
            return Ok(Fields {
                fields,
                message: &body[next..],
            });
        }

        let line = std::str::from_utf8(line)
            .map_err(|_| format!("header line at byte {pos} is not UTF-8"))?;
        if let Some(continuation) = line.strip_prefix(' ') {
            let last = fields
                .last_mut()
                .ok_or_else(|| "continuation line before any header".to_string())?;
            last.value.push('\n');
            last.value.push_str(continuation);
        } else {
            let (label, value) = line.split_once(' ').unwrap_or((line, ""));
            fields.push(Field {
                label: label.to_string(),
                value: value.to_string(),
            });
        }
        pos = next;
    }

    Ok(Fields {
        fields,
        message: &[],
    })
}
