#![no_main]
use std::error::Error;

use libfuzzer_sys::fuzz_target;
use ttf_read::{FontRef, TableProvider};

fn do_cmap_things(data: &[u8]) -> Result<(), Box<dyn Error>> {
    let font = FontRef::new(data)?;
    let cmap = font.cmap()?;
    for record in cmap.encoding_records() {
        let Ok(subtable) = cmap.subtable(&record) else {
            continue;
        };
        // iteration is bounded by the 32-bit codepoint space; cap the work
        let mut last = None;
        for (cp, gid) in subtable.iter().take(1 << 16) {
            assert!(last < Some(cp));
            assert_eq!(subtable.map_codepoint(cp), Some(gid));
            last = Some(cp);
        }
    }
    Ok(())
}

fuzz_target!(|data: &[u8]| {
    let _ = do_cmap_things(data);
});
