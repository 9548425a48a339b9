//! Example: checking page availability while a document downloads
//!
//! Simulates a slow download in 256 byte chunks and reports after each chunk
//! whether the first page can be displayed yet.
//!
//! Run with `RUST_LOG=pdfavail=debug cargo run --example progressive_check`
//! to see the resolver at work.

use pdfavail::objects::{Dictionary, Object};
use pdfavail::parser::{IndirectObjectHolder, ProgressiveBuffer, ReadValidator};
use pdfavail::{DocAvailStatus, PageObjectAvail, Result};
use std::collections::BTreeMap;
use std::rc::Rc;

const SLOT: u64 = 128;
const CHUNK: u64 = 256;

fn page(contents: u32, next: u32) -> Object {
    let mut link = Dictionary::new();
    link.set_for("Subtype", Object::name("Link"));
    link.set_for(
        "Dest",
        Object::from(vec![Object::Reference(next), Object::name("Fit")]),
    );

    let mut page = Dictionary::new();
    page.set_for("Type", Object::name("Page"));
    page.set_for("Parent", Object::Reference(1));
    page.set_for("Contents", Object::Reference(contents));
    page.set_for("Annots", Object::from(vec![Object::from(link)]));
    Object::from(page)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Objects are stored back to front, so the first page arrives last
    let mut objects = BTreeMap::new();
    objects.insert(20, page(21, 30));
    objects.insert(21, Object::string("BT (first page) Tj ET"));
    objects.insert(30, page(31, 20));
    objects.insert(31, Object::string("BT (second page) Tj ET"));
    let offsets: BTreeMap<u32, u64> = objects
        .keys()
        .rev()
        .enumerate()
        .map(|(slot, objnum)| (*objnum, slot as u64 * SLOT))
        .collect();
    let size = objects.len() as u64 * SLOT;

    let buffer = Rc::new(ProgressiveBuffer::new(size));
    let validator = Rc::new(ReadValidator::new(buffer.clone()));

    let reader = validator.clone();
    let holder = IndirectObjectHolder::with_parser(Box::new(move |objnum: u32| {
        let object = objects.get(&objnum)?;
        let mut bytes = vec![0u8; SLOT as usize];
        reader
            .read_block_at_offset(&mut bytes, offsets[&objnum])
            .then(|| object.clone())
    }));

    let mut avail = PageObjectAvail::from_object_number(&validator, &holder, 20);
    let mut received = 0;
    loop {
        let status = avail.check_avail();
        println!(
            "{received:>4}/{size} bytes: {status:?} ({} pending)",
            avail.pending_count()
        );
        match status {
            DocAvailStatus::DataAvailable => break,
            DocAvailStatus::DataError => {
                eprintln!("Download is corrupt");
                break;
            }
            DocAvailStatus::DataNotAvailable => {}
        }

        let requested = validator.take_download_hints();
        println!("  requested: {requested:?}");

        let end = (received + CHUNK).min(size);
        buffer.append_at(received, &vec![b' '; (end - received) as usize])?;
        received = end;
    }

    println!("First page is ready");
    Ok(())
}
