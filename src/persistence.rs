use std::io::Write;

use anyhow::Context;
use serde::Serialize;
use serde_json::Value;

/// Entities that can be represented as a storable document
pub trait Writable {
    type Document: Serialize;

    fn to_document(&self) -> Self::Document;
}

pub fn to_json<T>(entity: &T) -> anyhow::Result<Value>
where
    T: Writable + ?Sized,
{
    serde_json::to_value(entity.to_document()).context("Failed to convert document to JSON")
}

/// Writes the entity document as a single line of JSON
pub fn write_json<T, W>(output: &mut W, entity: &T) -> anyhow::Result<()>
where
    T: Writable + ?Sized,
    W: Write,
{
    serde_json::to_writer(&mut *output, &entity.to_document())
        .context("Failed to write JSON document")?;
    writeln!(output).context("Failed to write JSON document")?;
    // Ensure all data is flushed to the output
    output.flush().context("Failed to flush JSON writer")
}
