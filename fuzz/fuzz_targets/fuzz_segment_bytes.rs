#![no_main]

use libfuzzer_sys::fuzz_target;
use mixscript::MixedScriptText;

fuzz_target!(|data: &[u8]| {
    if data.len() > 4096 {
        return;
    }

    let styler = MixedScriptText::new();
    match (styler.runs_bytes(data), std::str::from_utf8(data)) {
        (Ok(runs), Ok(text)) => {
            let rebuilt: String = runs.iter().map(|r| r.text).collect();
            assert_eq!(rebuilt, text);
            assert_eq!(runs, styler.runs(text));
        }
        (Err(_), Err(_)) => {}
        (Ok(_), Err(_)) => panic!("accepted invalid UTF-8"),
        (Err(e), Ok(_)) => panic!("rejected valid UTF-8: {e}"),
    }
});
