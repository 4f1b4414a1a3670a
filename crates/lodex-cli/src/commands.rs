use std::io::Write;

use anyhow::Context;
use lodex_object::ObjectDecoder;
use lodex_store::LooseObjectStore;
use lodex_types::ObjectId;
use tracing::debug;

use crate::cli::{Cli, OutputFormat};
use crate::render;

pub fn run(cli: Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let id: ObjectId = cli
        .object
        .parse()
        .with_context(|| format!("invalid object id {:?}", cli.object))?;
    let store = LooseObjectStore::from_config(&cli.store_config());
    debug!(objects_dir = %store.objects_dir().display(), id = %id, "opening loose store");
    let decoder = ObjectDecoder::with_config(store, cli.decoder_config());

    if cli.raw {
        let raw = decoder
            .read_raw(&id)
            .with_context(|| format!("failed to read object {id}"))?;
        out.write_all(&raw)?;
        return Ok(());
    }

    let decoded = decoder
        .decode(&id)
        .with_context(|| format!("failed to decode object {id}"))?;
    match cli.format {
        OutputFormat::Text => out.write_all(render::text(&id, &decoded).as_bytes())?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&decoded)?)?,
    }
    Ok(())
}
