//! Human-readable rendering of decoded objects.

use std::fmt;

use colored::Colorize;
use lodex_object::{Blob, Commit, DecodedObject, Object, Person, Tag, Tree};
use lodex_types::ObjectId;

/// Render `decoded` as colored text, one trailing newline included.
pub fn text(id: &ObjectId, decoded: &DecodedObject) -> String {
    TextView { id, decoded }.to_string()
}

struct TextView<'a> {
    id: &'a ObjectId,
    decoded: &'a DecodedObject,
}

impl fmt::Display for TextView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {} ({}, {} bytes)",
            "object".bold(),
            self.id.to_hex().yellow(),
            self.decoded.kind().to_string().cyan(),
            self.decoded.size()
        )?;
        match &self.decoded.object {
            Object::Blob(blob) => blob_text(f, blob),
            Object::Tree(tree) => tree_text(f, tree),
            Object::Commit(commit) => commit_text(f, commit),
            Object::Tag(tag) => tag_text(f, tag),
        }
    }
}

fn blob_text(f: &mut fmt::Formatter<'_>, blob: &Blob) -> fmt::Result {
    writeln!(f)?;
    match blob.as_text() {
        Some(text) => {
            f.write_str(text)?;
            if !text.is_empty() && !text.ends_with('\n') {
                writeln!(f)?;
            }
            Ok(())
        }
        None => writeln!(f, "{}", format!("<binary, {} bytes>", blob.len()).dimmed()),
    }
}

fn tree_text(f: &mut fmt::Formatter<'_>, tree: &Tree) -> fmt::Result {
    if tree.is_empty() {
        return writeln!(f, "{}", "(empty tree)".dimmed());
    }
    for entry in &tree.entries {
        writeln!(
            f,
            "{:>6} {:<6} {}  {}",
            entry.mode,
            entry.kind.to_string(),
            entry.id.to_hex().yellow(),
            entry.name
        )?;
    }
    Ok(())
}

fn commit_text(f: &mut fmt::Formatter<'_>, commit: &Commit) -> fmt::Result {
    writeln!(f, "{:<10}{}", "tree", commit.tree_id.to_hex().yellow())?;
    for parent in &commit.parents {
        writeln!(f, "{:<10}{}", "parent", parent.to_hex().yellow())?;
    }
    writeln!(f, "{:<10}{}", "author", person_text(&commit.author))?;
    writeln!(f, "{:<10}{}", "committer", person_text(&commit.committer))?;
    extra_headers_text(f, &commit.extra_headers)?;
    message_text(f, &commit.message)?;

    writeln!(f)?;
    writeln!(f, "{} ({} entries)", "tree".bold(), commit.tree.len())?;
    tree_text(f, &commit.tree)
}

fn tag_text(f: &mut fmt::Formatter<'_>, tag: &Tag) -> fmt::Result {
    writeln!(f, "{:<10}{}", "object", tag.object.to_hex().yellow())?;
    writeln!(f, "{:<10}{}", "type", tag.object_type.cyan())?;
    writeln!(f, "{:<10}{}", "tag", tag.name.green().bold())?;
    writeln!(f, "{:<10}{}", "tagger", person_text(&tag.tagger))?;
    extra_headers_text(f, &tag.extra_headers)?;
    message_text(f, &tag.message)
}

fn person_text(person: &Person) -> String {
    let when = match person.time() {
        Some(time) => time.format("%Y-%m-%d %H:%M:%S %z").to_string(),
        None => person.timestamp_raw.clone(),
    };
    format!("{} <{}> {}", person.name, person.email.blue(), when.dimmed())
}

fn extra_headers_text(f: &mut fmt::Formatter<'_>, headers: &[(String, String)]) -> fmt::Result {
    for (label, value) in headers {
        let mut lines = value.lines();
        writeln!(f, "{:<10}{}", label.dimmed(), lines.next().unwrap_or(""))?;
        for line in lines {
            writeln!(f, "{:<10}{}", "", line)?;
        }
    }
    Ok(())
}

fn message_text(f: &mut fmt::Formatter<'_>, message: &str) -> fmt::Result {
    if message.is_empty() {
        return Ok(());
    }
    writeln!(f)?;
    for line in message.lines() {
        writeln!(f, "    {line}")?;
    }
    Ok(())
}
